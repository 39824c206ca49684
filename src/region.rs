// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::ops::RangeInclusive;
use crate::{ratings::Category, rule::{Constraint, domain_bounds}};


/// Axis-aligned box of parts described by a chain of constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Region(Vec<Constraint>);

impl From<Vec<Constraint>> for Region {
	fn from(constraints: Vec<Constraint>) -> Self {
		Region(constraints)
	}
}

impl Region {
	pub(crate) fn count_for(&self, category: Category, domain: &RangeInclusive<u32>) -> u64 {
		let [lower, upper] = self.0.iter()
			.fold(domain_bounds(domain), |range, constraint| constraint.narrow(category, range));
		(upper - lower + 1).max(0) as u64
	}

	pub(crate) fn volume(&self, domain: &RangeInclusive<u32>) -> u64 {
		Category::ALL.iter().map(|&c| self.count_for(c, domain)).product()
	}
}
