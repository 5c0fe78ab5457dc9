use super::chain::MarkovChain;
use super::randomizer::Randomizer;

/// Draws words and punctuation from a `MarkovChain`.
///
/// The chain is only borrowed; the randomizer is the single piece of
/// mutable state, so concurrent callers each build their own sampler
/// over a shared chain.
#[derive(Debug)]
pub struct Sampler<'a, R> {
	chain: &'a MarkovChain,
	randomizer: R,
}

impl<'a, R: Randomizer> Sampler<'a, R> {
	pub fn new(chain: &'a MarkovChain, randomizer: R) -> Self {
		Self { chain, randomizer }
	}

	pub fn chain(&self) -> &'a MarkovChain {
		self.chain
	}

	/// Index in `[0, limit)`, whatever the randomizer returns.
	fn pick(&mut self, limit: usize) -> usize {
		match limit {
			0 => 0,
			_ => self.randomizer.rand(limit) % limit,
		}
	}

	/// Gives the randomizer back, e.g. to inspect a scripted one.
	pub fn into_randomizer(self) -> R {
		self.randomizer
	}

	pub(crate) fn randomizer_mut(&mut self) -> &mut R {
		&mut self.randomizer
	}

	/// Picks a successor of `current`, weighted by occurrence count.
	///
	/// The draw is uniform in `[1, weight_sum]` and successors are scanned
	/// in first-seen order until the running count reaches it. A
	/// self-transition still occupies its share of the weight but can never
	/// be returned; if the draw lands on it, the first later successor wins.
	///
	/// Returns `None` for unknown words, dead ends, and when only the
	/// self-transition is left past the draw.
	pub fn next_word(&mut self, current: &str) -> Option<&'a str> {
		let chain = self.chain;
		let link = chain.link(current)?;
		let target = self.pick(link.weight) + 1;

		let mut partial_sum = 0;
		link.successors.iter().find_map(|&(next, occurrence)| {
			partial_sum += occurrence;
			(next != link.word && partial_sum >= target).then(|| chain.word(next))
		})
	}

	/// Uniform pick among all words, dead ends included.
	pub fn random_word(&mut self) -> Option<&'a str> {
		let chain = self.chain;
		let count = chain.word_count();
		if count == 0 {
			return None;
		}
		Some(chain.word(self.pick(count)))
	}

	/// Uniform pick among words that started a sentence.
	pub fn random_first_word(&mut self) -> Option<&'a str> {
		let chain = self.chain;
		let count = chain.first_word_count();
		if count == 0 {
			return None;
		}
		Some(chain.word(chain.first_word_id(self.pick(count))))
	}

	/// Uniform pick among chain keys. `None` when no word has a successor.
	pub fn random_markov_key(&mut self) -> Option<&'a str> {
		let chain = self.chain;
		let count = chain.markov_key_count();
		if count == 0 {
			return None;
		}
		Some(chain.word(chain.link_at(self.pick(count)).word))
	}

	/// Uniform pick by index in the punctuation distribution.
	pub fn random_punctuation(&mut self) -> &'a str {
		let chain = self.chain;
		let punctuation = chain.punctuation_distribution();
		&punctuation[self.pick(punctuation.len())]
	}
}
