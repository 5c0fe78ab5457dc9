use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform integer draws used by sampling and generation.
///
/// Implementations should return a value in `[0, limit)`; `Sampler`
/// reduces anything larger modulo `limit`. A `limit` of 0 returns 0.
pub trait Randomizer {
	fn rand(&mut self, limit: usize) -> usize;
}

impl<R: Randomizer + ?Sized> Randomizer for &mut R {
	fn rand(&mut self, limit: usize) -> usize {
		(**self).rand(limit)
	}
}

/// Adapts any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngRandomizer<R> {
	rng: R,
}

impl<R: Rng> RngRandomizer<R> {
	pub fn new(rng: R) -> Self {
		Self { rng }
	}
}

/// `RngRandomizer` over the standard seedable generator.
pub type StdRandomizer = RngRandomizer<StdRng>;

impl RngRandomizer<StdRng> {
	/// Reproducible generator: equal seeds give equal draws.
	pub fn seeded(seed: u64) -> Self {
		Self::new(StdRng::seed_from_u64(seed))
	}

	/// Generator seeded from the operating system.
	pub fn from_os() -> Self {
		Self::new(StdRng::from_os_rng())
	}
}

impl<R: Rng> Randomizer for RngRandomizer<R> {
	fn rand(&mut self, limit: usize) -> usize {
		if limit == 0 {
			return 0;
		}
		self.rng.random_range(0..limit)
	}
}

/// Replays a fixed script of draws, cycling when it runs out.
///
/// Each scripted value is reduced modulo the requested limit, so
/// `SequenceRandomizer::new(vec![0])` always picks the first candidate.
#[derive(Debug, Clone)]
pub struct SequenceRandomizer {
	values: Vec<usize>,
	next: usize,
}

impl SequenceRandomizer {
	pub fn new(values: Vec<usize>) -> Self {
		Self { values, next: 0 }
	}

	/// Number of draws served so far.
	pub fn draws(&self) -> usize {
		self.next
	}
}

impl Randomizer for SequenceRandomizer {
	fn rand(&mut self, limit: usize) -> usize {
		if self.values.is_empty() || limit == 0 {
			self.next += 1;
			return 0;
		}
		let value = self.values[self.next % self.values.len()];
		self.next += 1;
		value % limit
	}
}
