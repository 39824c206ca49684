// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::{collections::HashMap, fmt, ops::{Index, RangeInclusive}};
use crate::{ratings::Part, region::Region, rule::{Constraint, Destination, Rule, Verdict}};


#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub(crate) struct WorkflowId(usize);

/// Rules are tried in order; the fallback applies when none of them match.
#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) struct Workflow<'s, D> {
	pub(crate) name: &'s str,
	pub(crate) rules: Vec<Rule<D>>,
	pub(crate) fallback: D,
}

impl<D> Workflow<'_, D> {
	pub(crate) fn evaluate(&self, part: &Part) -> &D {
		self.rules.iter()
			.find(|rule| rule.matches(part))
			.map_or(&self.fallback, |rule| &rule.destination)
	}

	fn destinations(&self) -> impl Iterator<Item = &D> {
		self.rules.iter()
			.map(|rule| &rule.destination)
			.chain(std::iter::once(&self.fallback))
	}
}

impl<'s> Workflow<'s, Destination<WorkflowId>> {
	/// Every chain of constraints under which a part passing through this workflow, having
	/// already satisfied `accumulated`, ends up accepted.
	pub(crate) fn enumerate_accepting_paths(
		&self,
		workflows: &Workflows<'s>,
		mut accumulated: Vec<Constraint>,
	) -> Vec<Vec<Constraint>> {
		fn extended(accumulated: &[Constraint], constraint: Constraint) -> Vec<Constraint> {
			let mut path = accumulated.to_vec();
			path.push(constraint);
			path
		}

		let mut paths = vec![];
		for rule in &self.rules {
			let constraint = rule.condition.constraint();
			match rule.destination {
				Destination::Accept => paths.push(extended(&accumulated, constraint)),
				Destination::Reject => (),
				Destination::Workflow(next) => paths.extend(workflows[next]
					.enumerate_accepting_paths(workflows, extended(&accumulated, constraint))),
			}
			accumulated.push(constraint.negated());
		}

		match self.fallback {
			Destination::Accept => paths.push(accumulated),
			Destination::Reject => (),
			Destination::Workflow(next) => paths.extend(workflows[next]
				.enumerate_accepting_paths(workflows, accumulated)),
		}
		paths
	}
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum LoadError {
	#[error("workflow {0:?} is defined more than once")]
	DuplicateWorkflow(String),
	#[error("workflow {workflow:?} refers to undefined workflow {destination:?}")]
	UnknownWorkflowReference { workflow: String, destination: String },
	#[error("entry workflow {0:?} is not defined")]
	MissingEntryWorkflow(String),
	#[error("workflows refer to each other in a cycle: {}", .0.join(" -> "))]
	WorkflowCycle(Vec<String>),
}

/// Loaded workflows, with all destinations resolved and guaranteed to be free of cycles.
#[derive(Debug)]
pub(crate) struct Workflows<'s> {
	workflows: Vec<Workflow<'s, Destination<WorkflowId>>>,
	entry: WorkflowId,
}

impl<'s> Index<WorkflowId> for Workflows<'s> {
	type Output = Workflow<'s, Destination<WorkflowId>>;
	fn index(&self, id: WorkflowId) -> &Self::Output {
		&self.workflows[id.0]
	}
}

impl<'s> Workflows<'s> {
	pub(crate) fn load(
		parsed: Vec<Workflow<'s, Destination<&'s str>>>,
		entry: &str,
	) -> Result<Self, LoadError> {
		let mut ids = HashMap::with_capacity(parsed.len());
		for (i, workflow) in parsed.iter().enumerate() {
			if ids.insert(workflow.name, WorkflowId(i)).is_some() {
				return Err(LoadError::DuplicateWorkflow(workflow.name.to_owned()))
			}
		}

		let workflows = parsed.into_iter()
			.map(|Workflow { name, rules, fallback }| {
				let resolve = |label: &str| ids.get(label).copied()
					.ok_or_else(|| LoadError::UnknownWorkflowReference {
						workflow: name.to_owned(),
						destination: label.to_owned(),
					});
				Ok::<_, LoadError>(Workflow {
					name,
					rules: rules.into_iter()
						.map(|rule| rule.try_map(|d| d.try_map(resolve)))
						.collect::<Result<_, _>>()?,
					fallback: fallback.try_map(resolve)?,
				})
			})
			.collect::<Result<Vec<_>, _>>()?;

		let entry = *ids.get(entry)
			.ok_or_else(|| LoadError::MissingEntryWorkflow(entry.to_owned()))?;

		let workflows = Workflows { workflows, entry };
		if let Some(cycle) = workflows.find_cycle() {
			return Err(LoadError::WorkflowCycle(cycle.into_iter()
				.map(|id| workflows[id].name.to_owned())
				.collect()))
		}

		tracing::debug!(workflows = workflows.workflows.len(), entry = workflows[entry].name,
			"loaded workflows");
		Ok(workflows)
	}

	fn find_cycle(&self) -> Option<Vec<WorkflowId>> {
		#[derive(Clone, Copy, PartialEq, Eq)]
		enum Mark { Unvisited, Visiting, Visited }

		fn visit(
			workflows: &Workflows,
			id: WorkflowId,
			marks: &mut [Mark],
			path: &mut Vec<WorkflowId>,
		) -> Option<Vec<WorkflowId>> {
			match marks[id.0] {
				Mark::Visited => return None,
				Mark::Visiting => {
					let start = path.iter().position(|&p| p == id)?;
					let mut cycle = path[start..].to_vec();
					cycle.push(id);
					return Some(cycle)
				}
				Mark::Unvisited => (),
			}

			marks[id.0] = Mark::Visiting;
			path.push(id);
			for destination in workflows[id].destinations() {
				let &Destination::Workflow(next) = destination else { continue };
				if let Some(cycle) = visit(workflows, next, marks, path) { return Some(cycle) }
			}
			path.pop();
			marks[id.0] = Mark::Visited;
			None
		}

		let mut marks = vec![Mark::Unvisited; self.workflows.len()];
		let mut path = vec![];
		(0..self.workflows.len())
			.find_map(|i| visit(self, WorkflowId(i), &mut marks, &mut path))
	}

	pub(crate) fn evaluate(&self, part: &Part) -> Verdict {
		let mut id = self.entry;
		// Without cycles, no workflow is visited twice
		for _ in 0..self.workflows.len() {
			match *self[id].evaluate(part) {
				Destination::Accept => return Verdict::Accept,
				Destination::Reject => return Verdict::Reject,
				Destination::Workflow(next) => id = next,
			}
		}
		unreachable!("workflows were checked for cycles when loaded")
	}

	pub(crate) fn accepting_paths(&self) -> Vec<Vec<Constraint>> {
		self[self.entry].enumerate_accepting_paths(self, vec![])
	}

	/// Number of distinct parts with all ratings in `domain` that end up accepted.
	pub(crate) fn accepted_combinations(&self, domain: &RangeInclusive<u32>) -> u64 {
		use rayon::iter::{IntoParallelIterator as _, ParallelIterator as _};

		let paths = self.accepting_paths();
		tracing::debug!(paths = paths.len(), "enumerated accepting paths");

		paths.into_par_iter()
			.map(|path| {
				tracing::trace!(?path, "accepting path");
				Region::from(path).volume(domain)
			})
			.sum()
	}

	fn unresolved(&self) -> impl Iterator<Item = Workflow<'s, Destination<&'s str>>> + '_ {
		let name = |d: Destination<WorkflowId>| d.map(|id| self[id].name);
		self.workflows.iter().map(move |workflow| Workflow {
			name: workflow.name,
			rules: workflow.rules.iter()
				.map(|&Rule { condition, destination }|
					Rule { condition, destination: name(destination) })
				.collect(),
			fallback: name(workflow.fallback),
		})
	}
}


impl<D: fmt::Display> fmt::Display for Workflow<'_, D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{{", self.name)?;
		for rule in &self.rules { write!(f, "{rule},")? }
		write!(f, "{}}}", self.fallback)
	}
}

impl fmt::Display for Workflows<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use itertools::Itertools as _;
		write!(f, "{}", self.unresolved().format("\n"))
	}
}
