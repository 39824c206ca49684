// Copyright (c) 2022 Bastiaan Marinus van de Weerd

mod error;
mod parsing;
mod ratings;
mod region;
mod rule;
mod util;
mod workflow;

use std::path::PathBuf;
use {error::Error, ratings::{Part, RATING_DOMAIN}, rule::Verdict, workflow::Workflows};


/// Sorts parts through workflows of rules
#[derive(clap::Parser)]
struct Args {
	/// Workflows, a blank line, then parts
	#[arg(default_value = "input")]
	input: PathBuf,
	/// Workflow that every part starts out in
	#[arg(long, default_value = "in")]
	entry: String,
}


fn input_from_str<'s>(s: &'s str, entry: &str) -> Result<(Workflows<'s>, Vec<Part>), Error> {
	let (workflows, parts) = parsing::try_input_from_str(s)?;
	let workflows = Workflows::load(workflows, entry)?;
	Ok((workflows, parts.collect::<Result<_, _>>()?))
}


#[tracing::instrument(skip_all, fields(parts = parts.len()))]
fn part1_impl(workflows: &Workflows, parts: &[Part]) -> u64 {
	use rayon::iter::{IntoParallelRefIterator as _, ParallelIterator as _};
	parts.par_iter()
		.filter(|&part| workflows.evaluate(part) == Verdict::Accept)
		.map(Part::value)
		.sum()
}

#[tracing::instrument(skip_all)]
fn part2_impl(workflows: &Workflows) -> u64 {
	workflows.accepted_combinations(&RATING_DOMAIN)
}


fn run(args: &Args) -> Result<(), Error> {
	let input = std::fs::read_to_string(&args.input)
		.map_err(|source| Error::Io { path: args.input.clone(), source })?;
	let (workflows, parts) = input_from_str(&input, &args.entry)?;
	println!("Part 1: {}", part1_impl(&workflows, &parts));
	println!("Part 2: {}", part2_impl(&workflows));
	Ok(())
}

fn main() {
	use {clap::Parser as _, tracing_subscriber::{prelude::*, EnvFilter}};

	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	if let Err(err) = run(&Args::parse()) {
		tracing::error!(%err, "aborted");
		eprintln!("{err}");
		std::process::exit(1);
	}
}
