use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::thread;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::ChainError;
use crate::io::read_corpus;
use super::tokenizer::{split_sentences, tokenize_sentence};

/// Default terminal punctuation, sampled uniformly by index: sixteen
/// periods, one question mark and one exclamation mark.
pub const DEFAULT_PUNCTUATION_DISTRIBUTION: [&str; 18] = [
	".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", ".", "?", "!",
];

/// Below this many sentences the corpus is ingested on the calling thread.
const PARALLEL_THRESHOLD: usize = 4096;

/// Construction settings of a `MarkovChain`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ChainConfig {
	/// Terminal punctuation marks, sampled uniformly by index.
	/// Repeat a mark to make it more likely.
	pub punctuation_distribution: Vec<String>,
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self {
			punctuation_distribution: DEFAULT_PUNCTUATION_DISTRIBUTION
				.iter()
				.map(|p| (*p).to_owned())
				.collect(),
		}
	}
}

/// Outgoing transitions of one word while the chain is being built.
#[derive(Clone, Debug, Default)]
struct PendingLink {
	word: usize,
	successors: Vec<(usize, usize)>,
	/// Position of each successor id inside `successors`.
	positions: HashMap<usize, usize>,
}

impl PendingLink {
	fn new(word: usize) -> Self {
		Self { word, ..Default::default() }
	}

	fn bump(&mut self, next: usize, occurrence: usize) {
		match self.positions.get(&next) {
			Some(&at) => self.successors[at].1 += occurrence,
			None => {
				self.positions.insert(next, self.successors.len());
				self.successors.push((next, occurrence));
			}
		}
	}
}

/// Accumulates word transitions from tokenized sentences.
///
/// Words are interned into dense ids in first-seen order, and every
/// collection keeps that order, so the resulting chain samples the same
/// way in every process.
///
/// # Invariants
/// - `link_of` and `is_first` always have one slot per vocabulary entry
/// - each word id owns at most one `PendingLink`
#[derive(Clone, Debug, Default)]
pub struct ChainBuilder {
	vocabulary: Vec<String>,
	index: HashMap<String, usize>,
	first_words: Vec<usize>,
	is_first: Vec<bool>,
	links: Vec<PendingLink>,
	link_of: Vec<Option<usize>>,
}

impl ChainBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Tokenizes a whole corpus, in parallel when it is large enough.
	pub fn from_corpus(corpus: &str) -> Self {
		let sentences: Vec<&str> = split_sentences(corpus).collect();
		if sentences.len() >= PARALLEL_THRESHOLD {
			Self::from_sentences_parallel(&sentences, num_cpus::get())
		} else {
			Self::from_sentences(&sentences)
		}
	}

	/// Ingests raw sentences one after the other.
	pub fn from_sentences(sentences: &[&str]) -> Self {
		let mut builder = Self::new();
		for sentence in sentences {
			builder.add_sentence(&tokenize_sentence(sentence));
		}
		builder
	}

	/// Splits the sentences into `chunks` contiguous slices, builds one
	/// partial chain per slice on its own thread and merges them in slice
	/// order. The result is identical to `from_sentences`.
	pub fn from_sentences_parallel(sentences: &[&str], chunks: usize) -> Self {
		if sentences.is_empty() {
			return Self::new();
		}
		let chunk_size = sentences.len().div_ceil(chunks.max(1));
		trace!("building chain from {} sentences in chunks of {}", sentences.len(), chunk_size);

		let partials: Vec<ChainBuilder> = thread::scope(|scope| {
			let handles: Vec<_> = sentences
				.chunks(chunk_size)
				.map(|chunk| scope.spawn(move || Self::from_sentences(chunk)))
				.collect();
			handles
				.into_iter()
				.map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
				.collect()
		});

		let mut partials = partials.into_iter();
		let mut merged = partials.next().unwrap_or_default();
		for partial in partials {
			merged.merge(&partial);
		}
		merged
	}

	/// Splits `text` into sentences and ingests each of them.
	pub fn add_text(&mut self, text: &str) {
		for sentence in split_sentences(text) {
			self.add_sentence(&tokenize_sentence(sentence));
		}
	}

	/// Records one tokenized sentence.
	///
	/// - The first word joins the set of first words.
	/// - Every word joins the vocabulary.
	/// - Every adjacent pair adds one occurrence to the transition table.
	pub fn add_sentence(&mut self, words: &[&str]) {
		let ids: Vec<usize> = words.iter().map(|word| self.intern(word)).collect();
		if let Some(&first) = ids.first() {
			self.mark_first(first);
		}
		for pair in ids.windows(2) {
			self.add_transition(pair[0], pair[1], 1);
		}
	}

	/// Folds another builder into this one.
	///
	/// Words, first words and transitions unknown to `self` are appended
	/// in the order `other` saw them; counts of known transitions are
	/// summed. Merging chunk builders in chunk order therefore equals
	/// building from the concatenated chunks.
	pub fn merge(&mut self, other: &Self) {
		let ids: Vec<usize> = other.vocabulary.iter().map(|word| self.intern(word)).collect();
		for &first in &other.first_words {
			self.mark_first(ids[first]);
		}
		for link in &other.links {
			for &(next, occurrence) in &link.successors {
				self.add_transition(ids[link.word], ids[next], occurrence);
			}
		}
	}

	/// Prunes dead ends, computes the weight sums and freezes the chain.
	///
	/// # Errors
	/// - `EmptyCorpus` if no word was ever recorded.
	/// - `EmptyPunctuation` if `config` carries no punctuation mark.
	pub fn finish(self, config: ChainConfig) -> Result<MarkovChain, ChainError> {
		if self.vocabulary.is_empty() {
			return Err(ChainError::EmptyCorpus);
		}
		if config.punctuation_distribution.is_empty() {
			return Err(ChainError::EmptyPunctuation);
		}

		let mut link_of = vec![None; self.vocabulary.len()];
		let links: Vec<Link> = self
			.links
			.into_iter()
			.filter(|link| !link.successors.is_empty())
			.enumerate()
			.map(|(at, link)| {
				link_of[link.word] = Some(at);
				let weight = link.successors.iter().map(|(_, occurrence)| occurrence).sum();
				Link { word: link.word, successors: link.successors, weight }
			})
			.collect();

		let chain = MarkovChain {
			vocabulary: self.vocabulary,
			index: self.index,
			first_words: self.first_words,
			links,
			link_of,
			punctuation: config.punctuation_distribution,
		};
		debug!("built markov chain: {chain}");
		Ok(chain)
	}

	fn intern(&mut self, word: &str) -> usize {
		if let Some(&id) = self.index.get(word) {
			return id;
		}
		let id = self.vocabulary.len();
		self.vocabulary.push(word.to_owned());
		self.index.insert(word.to_owned(), id);
		self.is_first.push(false);
		self.link_of.push(None);
		id
	}

	fn mark_first(&mut self, id: usize) {
		if !self.is_first[id] {
			self.is_first[id] = true;
			self.first_words.push(id);
		}
	}

	fn add_transition(&mut self, from: usize, to: usize, occurrence: usize) {
		let at = match self.link_of[from] {
			Some(at) => at,
			None => {
				let at = self.links.len();
				self.links.push(PendingLink::new(from));
				self.link_of[from] = Some(at);
				at
			}
		};
		self.links[at].bump(to, occurrence);
	}
}

/// Frozen outgoing transitions of one chain key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Link {
	pub(crate) word: usize,
	/// `(successor id, occurrence)` in first-seen order, never empty.
	pub(crate) successors: Vec<(usize, usize)>,
	/// Sum of all occurrences in `successors`.
	pub(crate) weight: usize,
}

/// A first-order word Markov chain built from a corpus.
///
/// Holds the transition table, the weight sums, the vocabulary and the
/// first words of sentences. Nothing changes after construction, so a
/// chain can be shared freely between threads; sampling state lives in
/// `Sampler`.
///
/// # Invariants
/// - the vocabulary is never empty
/// - every chain key has at least one successor
/// - each weight equals the sum of its successor counts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkovChain {
	vocabulary: Vec<String>,
	index: HashMap<String, usize>,
	first_words: Vec<usize>,
	links: Vec<Link>,
	link_of: Vec<Option<usize>>,
	punctuation: Vec<String>,
}

impl MarkovChain {
	/// Builds a chain with the default punctuation distribution.
	pub fn new(corpus: &str) -> Result<Self, ChainError> {
		Self::with_config(corpus, ChainConfig::default())
	}

	/// Builds a chain from `corpus` using `config`.
	///
	/// # Errors
	/// - `EmptyCorpus` if the corpus yields no word (empty text, only
	///   punctuation or digits, ...).
	/// - `EmptyPunctuation` if the distribution is empty.
	pub fn with_config(corpus: &str, config: ChainConfig) -> Result<Self, ChainError> {
		ChainBuilder::from_corpus(corpus).finish(config)
	}

	/// Reads the source material from `path` and builds a chain from it.
	pub fn from_file<P: AsRef<Path>>(path: P, config: ChainConfig) -> Result<Self, ChainError> {
		let corpus = read_corpus(path)?;
		Self::with_config(&corpus, config)
	}

	/// Every distinct word of the corpus, dead ends included.
	pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
		self.vocabulary.iter().map(String::as_str)
	}

	/// Words that started at least one sentence.
	pub fn first_words(&self) -> impl Iterator<Item = &str> + '_ {
		self.first_words.iter().map(|&id| self.word(id))
	}

	/// Words with at least one recorded successor.
	pub fn markov_keys(&self) -> impl Iterator<Item = &str> + '_ {
		self.links.iter().map(|link| self.word(link.word))
	}

	/// Successors of `word` with their occurrence counts, in the order
	/// they were first observed. `None` for dead ends and unknown words.
	pub fn successors(&self, word: &str) -> Option<impl Iterator<Item = (&str, usize)> + '_> {
		let link = self.link(word)?;
		Some(link.successors.iter().map(|&(next, occurrence)| (self.word(next), occurrence)))
	}

	/// Sum of the successor counts of `word`.
	pub fn weight_sum(&self, word: &str) -> Option<usize> {
		self.link(word).map(|link| link.weight)
	}

	pub fn contains_word(&self, word: &str) -> bool {
		self.index.contains_key(word)
	}

	pub fn punctuation_distribution(&self) -> &[String] {
		&self.punctuation
	}

	pub fn word_count(&self) -> usize {
		self.vocabulary.len()
	}

	pub fn first_word_count(&self) -> usize {
		self.first_words.len()
	}

	pub fn markov_key_count(&self) -> usize {
		self.links.len()
	}

	pub(crate) fn word(&self, id: usize) -> &str {
		&self.vocabulary[id]
	}

	pub(crate) fn first_word_id(&self, at: usize) -> usize {
		self.first_words[at]
	}

	pub(crate) fn link_at(&self, at: usize) -> &Link {
		&self.links[at]
	}

	pub(crate) fn link(&self, word: &str) -> Option<&Link> {
		let id = *self.index.get(word)?;
		self.link_of[id].map(|at| &self.links[at])
	}
}

impl fmt::Display for MarkovChain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} words, {} word-chains, {} first_words",
			self.word_count(),
			self.markov_key_count(),
			self.first_word_count()
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn successors_of<'a>(chain: &'a MarkovChain, word: &str) -> Vec<(&'a str, usize)> {
		chain.successors(word).map(|it| it.collect()).unwrap_or_default()
	}

	#[test]
	fn counts_transitions() {
		let chain = MarkovChain::new("The cat sat. The cat ran.").unwrap();
		assert_eq!(successors_of(&chain, "The"), vec![("cat", 2)]);
		assert_eq!(successors_of(&chain, "cat"), vec![("sat", 1), ("ran", 1)]);
		assert_eq!(chain.first_words().collect::<Vec<_>>(), vec!["The"]);
		assert_eq!(chain.words().collect::<Vec<_>>(), vec!["The", "cat", "sat", "ran"]);
		assert_eq!(chain.weight_sum("cat"), Some(2));
	}

	#[test]
	fn dead_ends_are_not_keys() {
		let chain = MarkovChain::new("The cat sat. The cat ran.").unwrap();
		assert_eq!(chain.markov_keys().collect::<Vec<_>>(), vec!["The", "cat"]);
		assert!(chain.successors("sat").is_none());
		assert!(chain.weight_sum("ran").is_none());
		assert!(chain.contains_word("ran"));
	}

	#[test]
	fn words_are_case_sensitive() {
		let chain = MarkovChain::new("The dog. the dog").unwrap();
		assert_eq!(chain.first_words().collect::<Vec<_>>(), vec!["The", "the"]);
		assert_eq!(chain.weight_sum("dog"), None);
	}

	#[test]
	fn self_transitions_are_recorded() {
		let chain = MarkovChain::new("no no no yes").unwrap();
		assert_eq!(successors_of(&chain, "no"), vec![("no", 2), ("yes", 1)]);
		assert_eq!(chain.weight_sum("no"), Some(3));
	}

	#[test]
	fn empty_corpus_is_rejected() {
		assert!(matches!(MarkovChain::new(""), Err(ChainError::EmptyCorpus)));
		assert!(matches!(MarkovChain::new("... -- ?! 42"), Err(ChainError::EmptyCorpus)));
	}

	#[test]
	fn empty_punctuation_is_rejected() {
		let config = ChainConfig { punctuation_distribution: Vec::new() };
		assert!(matches!(
			MarkovChain::with_config("Some words here.", config),
			Err(ChainError::EmptyPunctuation)
		));
	}

	#[test]
	fn single_word_sentences_have_no_keys() {
		let chain = MarkovChain::new("Hello. World.").unwrap();
		assert_eq!(chain.word_count(), 2);
		assert_eq!(chain.markov_key_count(), 0);
		assert_eq!(chain.first_word_count(), 2);
	}

	#[test]
	fn display_summarizes_sizes() {
		let chain = MarkovChain::new("The cat sat. The cat ran.").unwrap();
		assert_eq!(chain.to_string(), "4 words, 2 word-chains, 1 first_words");
	}

	#[test]
	fn merge_preserves_first_seen_order() {
		let mut left = ChainBuilder::new();
		left.add_text("a b c. b c");
		let mut right = ChainBuilder::new();
		right.add_text("d b e. a b c");
		left.merge(&right);

		let mut sequential = ChainBuilder::new();
		sequential.add_text("a b c. b c. d b e. a b c");

		let config = ChainConfig::default();
		assert_eq!(left.finish(config.clone()).unwrap(), sequential.finish(config).unwrap());
	}

	#[test]
	fn parallel_build_matches_sequential() {
		let corpus = "One fish two fish. Red fish blue fish. \
			The fish swam to the reef. A fish and a crab met at the reef. \
			The crab was red. Blue was the sea.";
		let sentences: Vec<&str> = split_sentences(corpus).collect();

		let config = ChainConfig::default();
		let sequential = ChainBuilder::from_sentences(&sentences).finish(config.clone()).unwrap();
		for chunks in [1, 2, 3, 7, 64] {
			let parallel = ChainBuilder::from_sentences_parallel(&sentences, chunks)
				.finish(config.clone())
				.unwrap();
			assert_eq!(parallel, sequential, "chunks = {chunks}");
		}
	}

	#[test]
	fn custom_punctuation_is_kept() {
		let config = ChainConfig { punctuation_distribution: vec!["!".to_owned(), "...".to_owned()] };
		let chain = MarkovChain::with_config("Go now.", config).unwrap();
		assert_eq!(chain.punctuation_distribution(), ["!".to_owned(), "...".to_owned()]);
	}
}
