// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use {std::{num::ParseIntError, str::FromStr}, either::Either, itertools::Itertools as _};
use crate::{
	ratings::{Category, Part, RATING_DOMAIN},
	rule::{Comparison, Condition, Destination, Rule},
	util::{str_offset, try_strip_prefix},
	workflow::Workflow,
};


impl TryFrom<u8> for Category {
	type Error = ();
	fn try_from(b: u8) -> Result<Self, Self::Error> {
		Category::ALL.into_iter().find(|c| c.name().as_bytes() == [b]).ok_or(())
	}
}

#[allow(dead_code)]
#[derive(Debug)]
pub(crate) enum CategoryError {
	Len(usize),
	Invalid(char),
}

impl FromStr for Category {
	type Err = CategoryError;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let b = s.bytes().exactly_one().map_err(|_| CategoryError::Len(s.len()))?;
		b.try_into().map_err(|_| CategoryError::Invalid(b as char))
	}
}

#[allow(dead_code)]
#[derive(Debug)]
pub(crate) enum ConditionError {
	Category { found: Option<char> },
	Comparison { found: Option<char> },
	Threshold(ParseIntError),
}

impl FromStr for Condition {
	type Err = ConditionError;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		use ConditionError as E;

		let category: Category = match s.bytes().next() {
			Some(b) => b.try_into().map_err(|_| E::Category { found: s.chars().next() })?,
			None => return Err(E::Category { found: None }),
		};
		let comparison = match s.as_bytes().get(1) {
			Some(b'>') => Comparison::Greater,
			Some(b'<') => Comparison::Less,
			_ => return Err(E::Comparison { found: s[1..].chars().next() }),
		};
		let threshold = s[2..].parse().map_err(E::Threshold)?;
		Ok(Condition { category, comparison, threshold })
	}
}


#[allow(dead_code)]
#[derive(Debug)]
pub(crate) enum LabelError {
	Empty,
	Invalid { column: usize, found: char },
}

fn try_label_from_str(s: &str) -> Result<&str, LabelError> {
	if s.is_empty() { return Err(LabelError::Empty) }
	match s.char_indices().find(|(_, c)| !c.is_ascii_lowercase()) {
		Some((c, found)) => Err(LabelError::Invalid { column: c + 1, found }),
		None => Ok(s),
	}
}

fn try_destination_from_str(s: &str) -> Result<Destination<&str>, LabelError> {
	match s {
		"A" => Ok(Destination::Accept),
		"R" => Ok(Destination::Reject),
		s => try_label_from_str(s).map(Destination::Workflow),
	}
}

macro_rules! recolumn_label_err { ( $offset:expr ) => { |e| match e {
	LabelError::Invalid { column, found } => LabelError::Invalid { column: column + $offset, found },
	_ => e,
} } }

#[allow(dead_code)]
#[derive(Debug)]
pub(crate) enum WorkflowError {
	Format { column: usize },
	Name(LabelError),
	Rule { column: usize, source: Either<ConditionError, LabelError> },
	/// A clause without condition that is not the last one
	FallbackNotLast { column: usize },
	/// The last clause has a condition
	NoFallback,
	Fallback(LabelError),
}

pub(crate) fn try_workflow_from_str(s: &str) -> Result<Workflow<'_, Destination<&str>>, WorkflowError> {
	use WorkflowError as E;

	let s0 = s;
	macro_rules! c { ( $s:expr ) => { str_offset!(s0, $s) } }

	let (name, s) = s.split_once('{').ok_or(E::Format { column: s.len() + 1 })?;
	let name = try_label_from_str(name).map_err(E::Name)?;
	let clauses = s.strip_suffix('}').ok_or(E::Format { column: s0.len() + 1 })?;

	let (rules, fallback) = match clauses.rsplit_once(',') {
		Some((rules, fallback)) => (Some(rules), fallback),
		None => (None, clauses),
	};

	if fallback.contains(':') { return Err(E::NoFallback) }
	let fallback = try_destination_from_str(fallback)
		.map_err(|e| E::Fallback(recolumn_label_err!(c!(fallback))(e)))?;

	let rules = rules.into_iter()
		.flat_map(|rules| rules.split(','))
		.map(|clause| {
			let (condition, destination) = clause.split_once(':')
				.ok_or(E::FallbackNotLast { column: c!(clause) + 1 })?;
			let condition = condition.parse()
				.map_err(|e| E::Rule { column: c!(condition) + 1, source: Either::Left(e) })?;
			let destination = try_destination_from_str(destination)
				.map_err(|e| E::Rule { column: c!(destination) + 1, source: Either::Right(e) })?;
			Ok::<_, WorkflowError>(Rule { condition, destination })
		})
		.collect::<Result<_, _>>()?;

	Ok(Workflow { name, rules, fallback })
}


#[allow(dead_code)]
#[derive(Debug)]
pub(crate) enum PartError {
	Format { column: usize },
	Rating { column: usize, source: Either<CategoryError, ParseIntError> },
	OutOfRange { category: Category, found: u32 },
	Duplicate(Category),
	Missing(Category),
}

impl FromStr for Part {
	type Err = PartError;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		use PartError as E;

		let s0 = s;
		macro_rules! c { ( $s:expr ) => { str_offset!(s0, $s) } }

		let s = try_strip_prefix(s, "{").map_err(|s| E::Format { column: c!(s) + 1 })?;
		let s = s.strip_suffix('}').ok_or(E::Format { column: s0.len() + 1 })?;

		let mut ratings = [None; 4];
		for pair in s.split(',') {
			let (category, rating) = pair.split_once('=')
				.ok_or(E::Format { column: c!(pair) + pair.len() + 1 })?;
			let category: Category = category.parse()
				.map_err(|e| E::Rating { column: c!(category) + 1, source: Either::Left(e) })?;
			let rating: u32 = rating.parse()
				.map_err(|e| E::Rating { column: c!(rating) + 1, source: Either::Right(e) })?;
			if !RATING_DOMAIN.contains(&rating) {
				return Err(E::OutOfRange { category, found: rating })
			}
			if ratings[category.index()].replace(rating).is_some() {
				return Err(E::Duplicate(category))
			}
		}

		let mut found = [0; 4];
		for (category, rating) in Category::ALL.into_iter().zip(ratings) {
			found[category.index()] = rating.ok_or(E::Missing(category))?;
		}
		Ok(Part::from_ratings(found))
	}
}


#[allow(dead_code)]
#[derive(Debug)]
pub(crate) enum InputError {
	Workflow { line: usize, source: WorkflowError },
	NoWorkflows,
	Part { line: usize, source: PartError },
}

fn try_workflows_from_lines<'s>(lines: impl Iterator<Item = (usize, &'s str)>)
-> Result<Vec<Workflow<'s, Destination<&'s str>>>, InputError> {
	let workflows = lines
		.map(|(l, line)| try_workflow_from_str(line)
			.map_err(|e| InputError::Workflow { line: l + 1, source: e }))
		.collect::<Result<Vec<_>, _>>()?;
	if workflows.is_empty() { return Err(InputError::NoWorkflows) }
	Ok(workflows)
}

#[cfg(test)]
pub(crate) fn try_workflows_from_str(s: &str)
-> Result<Vec<Workflow<'_, Destination<&str>>>, InputError> {
	try_workflows_from_lines(s.lines().enumerate())
}

/// Workflows up to the first blank line, followed by parts.
pub(crate) fn try_input_from_str(s: &str) -> Result<(
	Vec<Workflow<'_, Destination<&str>>>,
	impl Iterator<Item = Result<Part, InputError>> + '_,
), InputError> {
	let mut lines = s.lines().enumerate();
	let workflows = try_workflows_from_lines((&mut lines)
		.take_while(|(_, line)| !line.is_empty()))?;
	Ok((workflows, lines
		.map(|(l, line)| line.parse::<Part>()
			.map_err(|e| InputError::Part { line: l + 1, source: e }))))
}


#[cfg(test)]
mod tests {
	use {super::*, test_case::test_case};

	#[test]
	fn workflow() {
		let workflow = try_workflow_from_str("px{a<2006:qkq,m>2090:A,rfg}").unwrap();
		assert_eq!(workflow.name, "px");
		assert_eq!(workflow.rules, [
			Rule {
				condition: Condition { category: Category::A, comparison: Comparison::Less,
					threshold: 2006 },
				destination: Destination::Workflow("qkq"),
			},
			Rule {
				condition: Condition { category: Category::M, comparison: Comparison::Greater,
					threshold: 2090 },
				destination: Destination::Accept,
			},
		]);
		assert_eq!(workflow.fallback, Destination::Workflow("rfg"));

		let workflow = try_workflow_from_str("lnx{R}").unwrap();
		assert!(workflow.rules.is_empty());
		assert_eq!(workflow.fallback, Destination::Reject);
	}

	#[test]
	fn workflow_round_trip() {
		for s in ["px{a<2006:qkq,m>2090:A,rfg}", "in{s<1351:px,qqz}", "crn{x>2662:A,R}", "hdj{A}"] {
			assert_eq!(try_workflow_from_str(s).unwrap().to_string(), s);
		}
	}

	#[test_case("px{a<2006:qkq,m>2090:A}" => matches Err(WorkflowError::NoFallback) ; "no fallback")]
	#[test_case("px{a<2006:qkq,R,A}" => matches Err(WorkflowError::FallbackNotLast { column: 15 })
		; "fallback not last")]
	#[test_case("px{a<2006:qkq,R" => matches Err(WorkflowError::Format { column: 16 }) ; "unclosed")]
	#[test_case("px a<2006:qkq,R}" => matches Err(WorkflowError::Format { column: 17 }) ; "unopened")]
	#[test_case("Px{R}" => matches Err(WorkflowError::Name(LabelError::Invalid { column: 1, found: 'P' }))
		; "name")]
	#[test_case("px{}" => matches Err(WorkflowError::Fallback(LabelError::Empty)) ; "empty")]
	#[test_case("px{a=2006:A,R}" => matches Err(WorkflowError::Rule {
		column: 4, source: Either::Left(ConditionError::Comparison { found: Some('=') }) })
		; "comparison")]
	#[test_case("px{q<2006:A,R}" => matches Err(WorkflowError::Rule {
		column: 4, source: Either::Left(ConditionError::Category { found: Some('q') }) })
		; "category")]
	#[test_case("px{a<20x6:A,R}" => matches Err(WorkflowError::Rule {
		column: 4, source: Either::Left(ConditionError::Threshold(_)) }) ; "threshold")]
	#[test_case("px{a<2006:Ab,R}" => matches Err(WorkflowError::Rule {
		column: 11, source: Either::Right(LabelError::Invalid { column: 1, found: 'A' }) })
		; "destination")]
	#[test_case("px{a<2006:A,rF}" => matches Err(WorkflowError::Fallback(
		LabelError::Invalid { column: 14, found: 'F' })) ; "fallback")]
	fn workflow_errors(s: &str) -> Result<Workflow<'_, Destination<&str>>, WorkflowError> {
		try_workflow_from_str(s)
	}

	#[test]
	fn part() {
		let part: Part = "{x=787,m=2655,a=1222,s=2876}".parse().unwrap();
		assert_eq!(part, Part::from_ratings([787, 2655, 1222, 2876]));
		let part: Part = "{s=4,a=3,m=2,x=1}".parse().unwrap();
		assert_eq!(part, Part::from_ratings([1, 2, 3, 4]));
	}

	#[test_case("x=1,m=2,a=3,s=4}" => matches Err(PartError::Format { column: 1 }) ; "unopened")]
	#[test_case("{x=1,m=2,a=3,s=4" => matches Err(PartError::Format { column: 17 }) ; "unclosed")]
	#[test_case("{x=1,m2,a=3,s=4}" => matches Err(PartError::Format { column: 8 }) ; "no equals")]
	#[test_case("{x=1,q=2,a=3,s=4}" => matches Err(PartError::Rating {
		column: 6, source: Either::Left(CategoryError::Invalid('q')) }) ; "category")]
	#[test_case("{x=1,mm=2,a=3,s=4}" => matches Err(PartError::Rating {
		column: 6, source: Either::Left(CategoryError::Len(2)) }) ; "category len")]
	#[test_case("{x=1,m=-2,a=3,s=4}" => matches Err(PartError::Rating {
		column: 8, source: Either::Right(_) }) ; "rating")]
	#[test_case("{x=1,m=0,a=3,s=4}" => matches Err(PartError::OutOfRange {
		category: Category::M, found: 0 }) ; "zero")]
	#[test_case("{x=1,m=4001,a=3,s=4}" => matches Err(PartError::OutOfRange {
		category: Category::M, found: 4001 }) ; "too large")]
	#[test_case("{x=1,m=2,x=3,s=4}" => matches Err(PartError::Duplicate(Category::X)) ; "duplicate")]
	#[test_case("{x=1,m=2,s=4}" => matches Err(PartError::Missing(Category::A)) ; "missing")]
	fn part_errors(s: &str) -> Result<Part, PartError> {
		s.parse()
	}

	#[test]
	fn input() {
		const INPUT: &str = indoc::indoc! { "
			in{x>10:A,ab}
			ab{m<5:R,A}

			{x=11,m=1,a=1,s=1}
			{x=5,m=1,a=1,s=1}
		" };
		let (workflows, parts) = try_input_from_str(INPUT).unwrap();
		assert_eq!(workflows.len(), 2);
		assert_eq!(parts.map(Result::unwrap).collect::<Vec<_>>(), [
			Part::from_ratings([11, 1, 1, 1]),
			Part::from_ratings([5, 1, 1, 1]),
		]);
	}

	#[test]
	fn input_errors() {
		assert!(matches!(try_input_from_str("\n{x=1,m=1,a=1,s=1}"), Err(InputError::NoWorkflows)));
		assert!(matches!(try_input_from_str("in{A}\nab{x>1:A}\n"),
			Err(InputError::Workflow { line: 2, source: WorkflowError::NoFallback })));

		let (_, mut parts) = try_input_from_str("in{A}\n\n{x=1,m=1,a=1,s=1}\n{x=1}").unwrap();
		assert!(parts.next().unwrap().is_ok());
		assert!(matches!(parts.next(), Some(Err(InputError::Part { line: 4, .. }))));
	}
}
