//! Markov-chain placeholder text generation library.
//!
//! This crate turns a corpus of English prose into a first-order word
//! Markov chain and samples plausible-looking filler from it:
//! - Words, sentence-initial words and chain keys
//! - Capitalized, punctuated sentences
//! - Paragraphs and multi-paragraph documents
//!
//! ```ignore
//! use literate_core::model::{MarkovChain, RngRandomizer, SentenceOptions, TextGenerator};
//!
//! let chain = MarkovChain::new("The cat sat on the mat. The dog sat on the cat.")?;
//! let mut generator = TextGenerator::new(&chain, RngRandomizer::seeded(7));
//! println!("{}", generator.sentence(&SentenceOptions::default())?);
//! ```

/// Chain construction, sampling and text composition.
pub mod model;

/// Error type shared by construction and generation.
pub mod error;

/// Source material loading.
pub mod io;

pub use error::ChainError;
