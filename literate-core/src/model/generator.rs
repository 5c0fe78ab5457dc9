use crate::error::ChainError;
use super::chain::MarkovChain;
use super::count::Count;
use super::options::{Document, DocumentOptions, Join, ParagraphOptions, SentenceOptions};
use super::randomizer::Randomizer;
use super::sampler::Sampler;

/// A sentence ending on one of these words keeps growing, up to the
/// maximum of its word count. Matching is exact and case-sensitive.
const PREPOSITIONS: [&str; 15] = [
	"the", "to", "and", "a", "in", "that", "it", "if", "of", "is", "was", "for", "on", "as", "an",
];

/// High-level text generation over a shared `MarkovChain`.
///
/// # Responsibilities
/// - Compose capitalized, punctuated sentences from weighted word draws
/// - Group sentences into paragraphs and paragraphs into documents
/// - Route `first_word` to the first unit and `punctuation` to the last
///
/// # Draw order
/// Per sentence: start word (unless given), word count, punctuation
/// (unless given), one successor draw per collected word, then the
/// extension draws. Paragraphs and documents draw their own count before
/// their parts. A scripted randomizer therefore reproduces output exactly.
#[derive(Debug)]
pub struct TextGenerator<'a, R> {
	sampler: Sampler<'a, R>,
}

impl<'a, R: Randomizer> TextGenerator<'a, R> {
	pub fn new(chain: &'a MarkovChain, randomizer: R) -> Self {
		Self { sampler: Sampler::new(chain, randomizer) }
	}

	/// Lower-level access for single draws.
	pub fn sampler(&mut self) -> &mut Sampler<'a, R> {
		&mut self.sampler
	}

	pub fn into_randomizer(self) -> R {
		self.sampler.into_randomizer()
	}

	/// A random word of the corpus.
	pub fn word(&mut self) -> Option<&'a str> {
		self.sampler.random_word()
	}

	/// A random word that started a sentence in the corpus.
	pub fn first_word(&mut self) -> Option<&'a str> {
		self.sampler.random_first_word()
	}

	/// A random word that has at least one successor.
	pub fn markov_word(&mut self) -> Option<&'a str> {
		self.sampler.random_markov_key()
	}

	/// A random terminal punctuation mark.
	pub fn punctuation(&mut self) -> &'a str {
		self.sampler.random_punctuation()
	}

	/// Generates one sentence.
	///
	/// The sentence may hold fewer words than requested when the chain
	/// dies out, and more (up to `words.max()`) when it ends on a
	/// preposition.
	///
	/// # Errors
	/// `InvalidCount` if `words` is rejected; nothing is drawn then.
	pub fn sentence(&mut self, options: &SentenceOptions) -> Result<String, ChainError> {
		options.words.validate("words")?;
		Ok(self.compose_sentence(
			options.first_word.as_deref(),
			options.words,
			options.punctuation.as_deref(),
		))
	}

	/// Generates sentences joined by single spaces.
	///
	/// # Errors
	/// `InvalidCount` if `words` or `sentences` is rejected.
	pub fn paragraph(&mut self, options: &ParagraphOptions) -> Result<String, ChainError> {
		options.words.validate("words")?;
		options.sentences.validate("sentences")?;
		Ok(self.compose_paragraph(
			options.first_word.as_deref(),
			options.words,
			options.sentences,
			options.punctuation.as_deref(),
		))
	}

	/// Generates several paragraphs, joined or kept apart per `options.join`.
	///
	/// # Errors
	/// `InvalidCount` if `words`, `sentences` or `paragraphs` is rejected.
	pub fn paragraphs(&mut self, options: &DocumentOptions) -> Result<Document, ChainError> {
		options.words.validate("words")?;
		options.sentences.validate("sentences")?;
		options.paragraphs.validate("paragraphs")?;

		let count = options.paragraphs.resolve(self.sampler.randomizer_mut());
		let paragraphs: Vec<String> = (0..count)
			.map(|i| {
				let (is_first, is_last) = (i == 0, i + 1 == count);
				self.compose_paragraph(
					options.first_word.as_deref().filter(|_| is_first),
					options.words,
					options.sentences,
					options.punctuation.as_deref().filter(|_| is_last),
				)
			})
			.collect();

		Ok(match &options.join {
			Join::Separator(separator) => Document::Joined(paragraphs.join(separator)),
			Join::Disabled => Document::Paragraphs(paragraphs),
		})
	}

	fn compose_paragraph(
		&mut self,
		first_word: Option<&str>,
		words: Count,
		sentences: Count,
		punctuation: Option<&str>,
	) -> String {
		let count = sentences.resolve(self.sampler.randomizer_mut());
		(0..count)
			.map(|i| {
				let (is_first, is_last) = (i == 0, i + 1 == count);
				self.compose_sentence(
					first_word.filter(|_| is_first),
					words,
					punctuation.filter(|_| is_last),
				)
			})
			.collect::<Vec<_>>()
			.join(" ")
	}

	fn compose_sentence(&mut self, first_word: Option<&str>, words: Count, punctuation: Option<&str>) -> String {
		// A chain made only of one-word sentences has no key to start from.
		let mut current = match first_word {
			Some(word) => Some(word),
			None => self.sampler.random_markov_key().or_else(|| self.sampler.random_word()),
		};
		let count = words.resolve(self.sampler.randomizer_mut());
		let punctuation = match punctuation {
			Some(mark) => mark,
			None => self.sampler.random_punctuation(),
		};

		let mut sentence: Vec<&str> = Vec::new();
		for _ in 0..count {
			let Some(word) = current else { break };
			sentence.push(word);
			current = self.sampler.next_word(word);
		}
		self.extend_trailing_preposition(words.max(), &mut sentence);

		let mut text = sentence.join(" ");
		text.push_str(punctuation);
		capitalize(&text)
	}

	/// Appends successors while the sentence is shorter than `max_words`
	/// and ends on a preposition.
	fn extend_trailing_preposition<'w>(&mut self, max_words: usize, sentence: &mut Vec<&'w str>)
	where
		'a: 'w,
	{
		while sentence.len() < max_words {
			let Some(&last) = sentence.last() else { break };
			if !PREPOSITIONS.contains(&last) {
				break;
			}
			match self.sampler.next_word(last) {
				Some(next) => sentence.push(next),
				None => break,
			}
		}
	}
}

/// Uppercases the first character only; the rest is kept as is.
fn capitalize(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::randomizer::{RngRandomizer, SequenceRandomizer};

	const CATS: &str = "The cat sat. The cat ran.";
	const WALKS: &str = "I went to the shop. I went to the park.";

	fn scripted(chain: &MarkovChain, draws: Vec<usize>) -> TextGenerator<'_, SequenceRandomizer> {
		TextGenerator::new(chain, SequenceRandomizer::new(draws))
	}

	fn sentence_options(first_word: Option<&str>, words: Count, punctuation: Option<&str>) -> SentenceOptions {
		SentenceOptions {
			first_word: first_word.map(str::to_owned),
			words,
			punctuation: punctuation.map(str::to_owned),
		}
	}

	#[test]
	fn sentence_from_given_start() {
		let chain = MarkovChain::new(CATS).unwrap();
		let options = sentence_options(Some("The"), Count::Fixed(3), Some("."));
		assert_eq!(scripted(&chain, vec![0]).sentence(&options).unwrap(), "The cat sat.");
		assert_eq!(scripted(&chain, vec![1]).sentence(&options).unwrap(), "The cat ran.");
	}

	#[test]
	fn sentence_draws_start_and_punctuation() {
		let chain = MarkovChain::new(CATS).unwrap();
		// key #1 is "cat", mark #16 is "?", then "cat" -> "sat"
		let mut generator = scripted(&chain, vec![1, 16, 0]);
		let options = sentence_options(None, Count::Fixed(3), None);
		assert_eq!(generator.sentence(&options).unwrap(), "Cat sat?");
		assert_eq!(generator.into_randomizer().draws(), 3);
	}

	#[test]
	fn sentence_stops_when_chain_dies() {
		let chain = MarkovChain::new("The cat sat.").unwrap();
		let options = sentence_options(Some("The"), Count::Fixed(10), Some("."));
		assert_eq!(scripted(&chain, vec![0]).sentence(&options).unwrap(), "The cat sat.");
	}

	#[test]
	fn trailing_preposition_extends_up_to_maximum() {
		let chain = MarkovChain::new(WALKS).unwrap();

		let options = sentence_options(Some("went"), Count::range(2, 5), Some("."));
		assert_eq!(scripted(&chain, vec![0]).sentence(&options).unwrap(), "Went to the shop.");

		let options = sentence_options(Some("went"), Count::range(2, 3), Some("."));
		assert_eq!(scripted(&chain, vec![0]).sentence(&options).unwrap(), "Went to the.");
	}

	#[test]
	fn extension_ends_when_preposition_is_a_dead_end() {
		let chain = MarkovChain::new("I went to").unwrap();
		let options = sentence_options(Some("went"), Count::range(2, 6), Some("."));
		assert_eq!(scripted(&chain, vec![0]).sentence(&options).unwrap(), "Went to.");
	}

	#[test]
	fn huge_count_on_dying_chain_stops_early() {
		let chain = MarkovChain::new("The cat sat.").unwrap();
		let options = sentence_options(Some("The"), Count::Fixed(1 << 62), Some("."));
		assert_eq!(scripted(&chain, vec![0]).sentence(&options).unwrap(), "The cat sat.");
	}

	#[test]
	fn fixed_count_leaves_no_room_to_extend() {
		let chain = MarkovChain::new(WALKS).unwrap();
		let options = sentence_options(Some("went"), Count::Fixed(2), Some("."));
		assert_eq!(scripted(&chain, vec![0]).sentence(&options).unwrap(), "Went to.");
	}

	#[test]
	fn capitalizes_first_character_only() {
		let chain = MarkovChain::new("iPhone users like it.").unwrap();
		let options = sentence_options(Some("iPhone"), Count::Fixed(2), Some("!"));
		assert_eq!(scripted(&chain, vec![0]).sentence(&options).unwrap(), "IPhone users!");
	}

	#[test]
	fn unknown_start_word_stands_alone() {
		let chain = MarkovChain::new(CATS).unwrap();
		let options = sentence_options(Some("zebra"), Count::Fixed(4), Some("."));
		assert_eq!(scripted(&chain, vec![0]).sentence(&options).unwrap(), "Zebra.");
	}

	#[test]
	fn keyless_chain_starts_from_any_word() {
		let chain = MarkovChain::new("Hello. World.").unwrap();
		let sentence = scripted(&chain, vec![1]).sentence(&SentenceOptions::default()).unwrap();
		assert_eq!(sentence, "World.");
	}

	#[test]
	fn paragraph_routes_first_word_and_punctuation() {
		let chain = MarkovChain::new(CATS).unwrap();
		let options = ParagraphOptions {
			first_word: Some("cat".to_owned()),
			words: Count::Fixed(2),
			sentences: Count::Fixed(3),
			punctuation: Some("!".to_owned()),
		};
		let paragraph = scripted(&chain, vec![0]).paragraph(&options).unwrap();
		assert_eq!(paragraph, "Cat sat. The cat. The cat!");
	}

	#[test]
	fn document_can_keep_paragraphs_apart() {
		let chain = MarkovChain::new(CATS).unwrap();
		let options = DocumentOptions {
			first_word: Some("cat".to_owned()),
			words: Count::Fixed(2),
			sentences: Count::Fixed(1),
			paragraphs: Count::Fixed(2),
			punctuation: Some("?".to_owned()),
			join: Join::Disabled,
		};
		let document = scripted(&chain, vec![0]).paragraphs(&options).unwrap();
		assert_eq!(document.as_joined(), None);
		assert_eq!(document.into_paragraphs(), vec!["Cat sat.", "The cat?"]);
	}

	#[test]
	fn document_joins_with_separator() {
		let chain = MarkovChain::new(CATS).unwrap();
		let mut options = DocumentOptions {
			first_word: Some("The".to_owned()),
			words: Count::Fixed(2),
			sentences: Count::Fixed(1),
			paragraphs: Count::Fixed(2),
			punctuation: Some(".".to_owned()),
			..Default::default()
		};
		let document = scripted(&chain, vec![0]).paragraphs(&options).unwrap();
		assert_eq!(document.as_joined(), Some("The cat.\n\nThe cat."));

		options.join = Join::Separator(" | ".to_owned());
		let document = scripted(&chain, vec![0]).paragraphs(&options).unwrap();
		assert_eq!(document.as_joined(), Some("The cat. | The cat."));
		assert_eq!(document.into_paragraphs(), vec!["The cat. | The cat."]);
	}

	#[test]
	fn invalid_counts_fail_before_drawing() {
		let chain = MarkovChain::new(CATS).unwrap();
		let mut generator = scripted(&chain, vec![0]);

		let sentence = sentence_options(None, Count::range(4, 2), None);
		assert!(matches!(
			generator.sentence(&sentence),
			Err(ChainError::InvalidCount { option: "words", .. })
		));

		let paragraph = ParagraphOptions { sentences: Count::Fixed(0), ..Default::default() };
		assert!(matches!(
			generator.paragraph(&paragraph),
			Err(ChainError::InvalidCount { option: "sentences", .. })
		));

		let document = DocumentOptions { paragraphs: Count::range(0, 3), ..Default::default() };
		assert!(matches!(
			generator.paragraphs(&document),
			Err(ChainError::InvalidCount { option: "paragraphs", .. })
		));

		assert_eq!(generator.into_randomizer().draws(), 0);
	}

	#[test]
	fn seeded_generation_is_reproducible() {
		let chain = MarkovChain::new(WALKS).unwrap();
		let options = DocumentOptions::default();
		let first = TextGenerator::new(&chain, RngRandomizer::seeded(11)).paragraphs(&options).unwrap();
		let second = TextGenerator::new(&chain, RngRandomizer::seeded(11)).paragraphs(&options).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn single_draws_are_exposed() {
		let chain = MarkovChain::new(CATS).unwrap();
		let mut generator = scripted(&chain, vec![1]);
		assert_eq!(generator.word(), Some("cat"));
		assert_eq!(generator.first_word(), Some("The"));
		assert_eq!(generator.markov_word(), Some("cat"));
		assert_eq!(generator.punctuation(), ".");
	}
}
