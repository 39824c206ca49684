// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::{fmt, ops::RangeInclusive};
use crate::ratings::{Category, Part};


#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Comparison { Greater, Less }

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Condition {
	pub(crate) category: Category,
	pub(crate) comparison: Comparison,
	pub(crate) threshold: u32,
}

impl Condition {
	pub(crate) fn matches(&self, part: &Part) -> bool {
		let Constraint { category, bound } = self.constraint();
		bound.contains(part.rating(category))
	}

	/// The constraint a rating satisfies when this condition matches.
	pub(crate) fn constraint(&self) -> Constraint {
		let bound = match self.comparison {
			Comparison::Greater => Bound::Greater(self.threshold),
			Comparison::Less => Bound::Less(self.threshold),
		};
		Constraint { category: self.category, bound }
	}
}


#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Bound {
	Greater(u32),
	Less(u32),
	GreaterEq(u32),
	LessEq(u32),
}

impl Bound {
	pub(crate) fn negated(self) -> Self {
		use Bound::*;
		match self {
			Greater(t) => LessEq(t),
			Less(t) => GreaterEq(t),
			GreaterEq(t) => Less(t),
			LessEq(t) => Greater(t),
		}
	}

	/// Narrows the inclusive `[lower, upper]` pair; may leave it empty (`lower > upper`).
	pub(crate) fn narrow(self, [lower, upper]: [i64; 2]) -> [i64; 2] {
		use Bound::*;
		match self {
			Greater(t) => [lower.max(t as i64 + 1), upper],
			GreaterEq(t) => [lower.max(t as i64), upper],
			Less(t) => [lower, upper.min(t as i64 - 1)],
			LessEq(t) => [lower, upper.min(t as i64)],
		}
	}

	pub(crate) fn contains(self, rating: u32) -> bool {
		use Bound::*;
		match self {
			Greater(t) => rating > t,
			GreaterEq(t) => rating >= t,
			Less(t) => rating < t,
			LessEq(t) => rating <= t,
		}
	}
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Constraint {
	pub(crate) category: Category,
	pub(crate) bound: Bound,
}

impl Constraint {
	pub(crate) fn negated(self) -> Self {
		Constraint { category: self.category, bound: self.bound.negated() }
	}

	pub(crate) fn narrow(self, category: Category, range: [i64; 2]) -> [i64; 2] {
		if self.category != category { return range }
		self.bound.narrow(range)
	}

	#[cfg(test)]
	pub(crate) fn is_satisfied_by(self, part: &Part) -> bool {
		self.bound.contains(part.rating(self.category))
	}
}

pub(crate) fn domain_bounds(domain: &RangeInclusive<u32>) -> [i64; 2] {
	[*domain.start() as i64, *domain.end() as i64]
}


#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Verdict { Accept, Reject }

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Destination<W> {
	Accept,
	Reject,
	Workflow(W),
}

impl<W> Destination<W> {
	pub(crate) fn try_map<V, E>(self, f: impl FnOnce(W) -> Result<V, E>)
	-> Result<Destination<V>, E> {
		Ok(match self {
			Destination::Accept => Destination::Accept,
			Destination::Reject => Destination::Reject,
			Destination::Workflow(w) => Destination::Workflow(f(w)?),
		})
	}

	pub(crate) fn map<V>(self, f: impl FnOnce(W) -> V) -> Destination<V> {
		match self {
			Destination::Accept => Destination::Accept,
			Destination::Reject => Destination::Reject,
			Destination::Workflow(w) => Destination::Workflow(f(w)),
		}
	}
}


#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Rule<D> {
	pub(crate) condition: Condition,
	pub(crate) destination: D,
}

impl<D> Rule<D> {
	pub(crate) fn matches(&self, part: &Part) -> bool {
		self.condition.matches(part)
	}

	pub(crate) fn try_map<E, F>(self, f: impl FnOnce(D) -> Result<E, F>) -> Result<Rule<E>, F> {
		Ok(Rule { condition: self.condition, destination: f(self.destination)? })
	}
}


impl fmt::Display for Condition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let op = match self.comparison { Comparison::Greater => '>', Comparison::Less => '<' };
		write!(f, "{}{op}{}", self.category, self.threshold)
	}
}

impl<W: fmt::Display> fmt::Display for Destination<W> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Destination::Accept => f.write_str("A"),
			Destination::Reject => f.write_str("R"),
			Destination::Workflow(w) => w.fmt(f),
		}
	}
}

impl<D: fmt::Display> fmt::Display for Rule<D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.condition, self.destination)
	}
}
