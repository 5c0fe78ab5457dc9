use once_cell::sync::Lazy;
use regex::Regex;

/// Sentence delimiters: terminal punctuation or a closing quote followed by
/// whitespace, a double dash, or a space before an apostrophe.
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r#"([.?!"](?-u:\s)|--| ')+"#).expect("sentence break regex is valid")
});

/// Word separator inside a sentence, with the same ASCII `\s` class as
/// `SENTENCE_BREAK`.
static WHITESPACE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?-u:\s)+").expect("whitespace regex is valid")
});

/// Leading edge of a word: first letter and everything word-like after it.
static WORD_HEAD: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"[A-Za-z][A-Za-z'-]*").expect("word head regex is valid")
});

/// Trailing edge of a word: drops apostrophes and dashes after the last letter.
static WORD_TAIL: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"[A-Za-z'-]*[A-Za-z]").expect("word tail regex is valid")
});

/// Splits raw corpus text into raw sentences.
///
/// Matched delimiters are discarded. Leading or trailing empty pieces are
/// kept; they tokenize to nothing.
pub fn split_sentences(corpus: &str) -> impl Iterator<Item = &str> {
	SENTENCE_BREAK.split(corpus)
}

/// Reduces a whitespace-free token to its word part.
///
/// Returns an empty string when the token holds no ASCII letter.
/// Case is left untouched.
///
/// Examples:
/// - `"(Hello,"` → `"Hello"`
/// - `"don't!"` → `"don't"`
/// - `"--'"` → `""`
pub fn scrub_word(token: &str) -> &str {
	let head = match WORD_HEAD.find(token) {
		Some(m) => m.as_str(),
		None => return "",
	};
	match WORD_TAIL.find(head) {
		Some(m) => m.as_str().trim(),
		None => "",
	}
}

/// Splits a sentence on runs of ASCII whitespace (vertical tab included)
/// and scrubs every piece, keeping only non-empty words in order.
pub fn tokenize_sentence(sentence: &str) -> Vec<&str> {
	WHITESPACE
		.split(sentence)
		.map(scrub_word)
		.filter(|word| !word.is_empty())
		.collect()
}
