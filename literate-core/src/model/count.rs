use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChainError;
use super::randomizer::Randomizer;

/// How many units (words, sentences, paragraphs) to generate.
///
/// `Range` bounds are both inclusive as written, but the draw is
/// `rand(max - min) + min`, so a drawn value never reaches `max` itself.
/// `max` still matters: sentences may grow up to it when they end on a
/// preposition.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum Count {
	Fixed(usize),
	Range { min: usize, max: usize },
}

impl Count {
	pub const fn range(min: usize, max: usize) -> Self {
		Count::Range { min, max }
	}

	/// Rejects zero bounds and inverted ranges.
	///
	/// `option` names the offending option in the error.
	pub fn validate(&self, option: &'static str) -> Result<(), ChainError> {
		let reason = match *self {
			Count::Fixed(0) => "count must be positive".to_owned(),
			Count::Range { min: 0, .. } => "range bounds must be positive".to_owned(),
			Count::Range { min, max } if max < min => {
				format!("range maximum {max} is below its minimum {min}")
			}
			_ => return Ok(()),
		};
		Err(ChainError::InvalidCount { option, reason })
	}

	/// Turns the count into a concrete number, drawing once for ranges.
	///
	/// A range with `min == max` is `min` and consumes no draw.
	pub fn resolve<R: Randomizer + ?Sized>(&self, randomizer: &mut R) -> usize {
		match *self {
			Count::Fixed(n) => n,
			Count::Range { min, max } if max <= min => min,
			Count::Range { min, max } => randomizer.rand(max - min) + min,
		}
	}

	/// Upper bound of the count: the value itself, or the range maximum.
	pub fn max(&self) -> usize {
		match *self {
			Count::Fixed(n) => n,
			Count::Range { max, .. } => max,
		}
	}
}

impl From<usize> for Count {
	fn from(n: usize) -> Self {
		Count::Fixed(n)
	}
}

impl From<RangeInclusive<usize>> for Count {
	fn from(range: RangeInclusive<usize>) -> Self {
		Count::range(*range.start(), *range.end())
	}
}

impl fmt::Display for Count {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Count::Fixed(n) => write!(f, "{n}"),
			Count::Range { min, max } => write!(f, "{min}..{max}"),
		}
	}
}

/// Parses `"7"`, `"3..15"` or `"3..=15"`.
impl FromStr for Count {
	type Err = ChainError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let parse = |value: &str| {
			value
				.trim()
				.parse::<usize>()
				.map_err(|_| ChainError::ParseCount(s.to_owned()))
		};
		match s.split_once("..") {
			None => Ok(Count::Fixed(parse(s)?)),
			Some((min, max)) => {
				let max = max.strip_prefix('=').unwrap_or(max);
				Ok(Count::range(parse(min)?, parse(max)?))
			}
		}
	}
}
