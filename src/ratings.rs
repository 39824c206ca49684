// Copyright (c) 2022 Bastiaan Marinus van de Weerd


/// Inclusive range that every rating lies in.
pub(crate) const RATING_DOMAIN: std::ops::RangeInclusive<u32> = 1..=4000;


macro_rules! categories { ( $( $name:ident ),+ ) => { paste::paste! {
	#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
	pub(crate) enum Category { $( [<$name:upper>] ),+ }

	impl Category {
		pub(crate) const ALL: [Category; 4] = [$( Category::[<$name:upper>] ),+];

		/// Position in `Category::ALL`.
		pub(crate) fn index(self) -> usize { self as usize }

		pub(crate) fn name(self) -> &'static str {
			match self { $( Category::[<$name:upper>] => stringify!($name) ),+ }
		}
	}

	#[derive(Debug, PartialEq, Eq, Clone, Copy)]
	pub(crate) struct Part { $( $name: u32 ),+ }

	impl Part {
		/// Ratings in the order of `Category::ALL`.
		pub(crate) fn from_ratings(ratings: [u32; 4]) -> Self {
			let [$( $name ),+] = ratings;
			Part { $( $name ),+ }
		}

		pub(crate) fn rating(&self, category: Category) -> u32 {
			match category { $( Category::[<$name:upper>] => self.$name ),+ }
		}

		pub(crate) fn value(&self) -> u64 {
			0 $( + self.$name as u64 )+
		}
	}
} } }
categories!(x, m, a, s);

impl std::fmt::Display for Category {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl std::fmt::Display for Part {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use itertools::Itertools as _;
		write!(f, "{{{}}}", Category::ALL.iter()
			.format_with(",", |&c, f| f(&format_args!("{c}={}", self.rating(c)))))
	}
}
