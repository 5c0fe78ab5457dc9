use serde::{Deserialize, Serialize};

use super::count::Count;

/// Default number of words in a sentence.
pub const DEFAULT_WORDS: Count = Count::range(3, 15);

/// Default number of sentences in a paragraph.
pub const DEFAULT_SENTENCES: Count = Count::range(5, 15);

/// Default number of paragraphs in a document.
pub const DEFAULT_PARAGRAPHS: Count = Count::range(3, 5);

/// Default text between paragraphs.
pub const DEFAULT_JOIN: &str = "\n\n";

/// Parameters of a single sentence.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct SentenceOptions {
	/// Start word; a random chain key when `None`.
	pub first_word: Option<String>,

	/// Number of words drawn before the preposition extension.
	pub words: Count,

	/// Terminal punctuation; drawn from the distribution when `None`.
	pub punctuation: Option<String>,
}

impl Default for SentenceOptions {
	fn default() -> Self {
		Self { first_word: None, words: DEFAULT_WORDS, punctuation: None }
	}
}

/// Parameters of a paragraph.
///
/// `first_word` only applies to the first sentence and `punctuation` only
/// to the last one; the others pick their own.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ParagraphOptions {
	pub first_word: Option<String>,
	pub words: Count,
	pub sentences: Count,
	pub punctuation: Option<String>,
}

impl Default for ParagraphOptions {
	fn default() -> Self {
		Self {
			first_word: None,
			words: DEFAULT_WORDS,
			sentences: DEFAULT_SENTENCES,
			punctuation: None,
		}
	}
}

/// How the paragraphs of a document are returned.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Join {
	/// Concatenate with this separator.
	Separator(String),
	/// Keep the paragraphs apart.
	Disabled,
}

impl Default for Join {
	fn default() -> Self {
		Join::Separator(DEFAULT_JOIN.to_owned())
	}
}

/// Parameters of a multi-paragraph document.
///
/// `first_word` reaches the first sentence of the first paragraph and
/// `punctuation` the last sentence of the last paragraph.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct DocumentOptions {
	pub first_word: Option<String>,
	pub words: Count,
	pub sentences: Count,
	pub paragraphs: Count,
	pub punctuation: Option<String>,
	pub join: Join,
}

impl Default for DocumentOptions {
	fn default() -> Self {
		Self {
			first_word: None,
			words: DEFAULT_WORDS,
			sentences: DEFAULT_SENTENCES,
			paragraphs: DEFAULT_PARAGRAPHS,
			punctuation: None,
			join: Join::default(),
		}
	}
}

/// Generated document: joined text, or one string per paragraph when
/// joining is disabled.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum Document {
	Joined(String),
	Paragraphs(Vec<String>),
}

impl Document {
	/// The joined text, if joining was requested.
	pub fn as_joined(&self) -> Option<&str> {
		match self {
			Document::Joined(text) => Some(text),
			Document::Paragraphs(_) => None,
		}
	}

	/// Paragraphs as a list; a joined document is one entry.
	pub fn into_paragraphs(self) -> Vec<String> {
		match self {
			Document::Joined(text) => vec![text],
			Document::Paragraphs(paragraphs) => paragraphs,
		}
	}
}
