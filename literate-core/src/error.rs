use thiserror::Error;

/// Errors surfaced by chain construction and text generation.
///
/// A chain that "dies" while a sentence is being sampled is not an error:
/// the sentence is simply shorter than requested.
#[derive(Error, Debug)]
pub enum ChainError {
	/// The corpus holds no usable word at all.
	#[error("corpus contains no words")]
	EmptyCorpus,

	/// The punctuation distribution must hold at least one mark.
	#[error("punctuation distribution is empty")]
	EmptyPunctuation,

	/// A `words`, `sentences` or `paragraphs` count was rejected.
	#[error("invalid `{option}` count: {reason}")]
	InvalidCount {
		option: &'static str,
		reason: String,
	},

	/// A count could not be parsed from text (`"7"` or `"3..15"`).
	#[error("cannot parse count from {0:?}")]
	ParseCount(String),

	/// The source material could not be read.
	#[error("failed to read source material: {0}")]
	Io(#[from] std::io::Error),
}
