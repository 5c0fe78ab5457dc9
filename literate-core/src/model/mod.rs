//! Word-level Markov chain text generation.
//!
//! This module provides:
//! - Sentence splitting and word scrubbing (`tokenizer`)
//! - Transition table construction (`ChainBuilder`, `MarkovChain`)
//! - Injectable randomness (`Randomizer`)
//! - Weighted and uniform draws (`Sampler`)
//! - Sentence, paragraph and document composition (`TextGenerator`)

/// Corpus splitting into sentences and cleaned words.
pub mod tokenizer;

/// Word transition table, vocabulary and first words.
///
/// Built once from a corpus, read-only afterwards.
pub mod chain;

/// Uniform integer sources: `rand` adapters and scripted draws.
pub mod randomizer;

/// Weighted successor draws and uniform set picks.
pub mod sampler;

/// Integer-or-range counts.
pub mod count;

/// Per-call generation parameters and document output.
pub mod options;

/// Sentence, paragraph and document generation.
pub mod generator;

pub use chain::{ChainBuilder, ChainConfig, MarkovChain, DEFAULT_PUNCTUATION_DISTRIBUTION};
pub use count::Count;
pub use generator::TextGenerator;
pub use options::{Document, DocumentOptions, Join, ParagraphOptions, SentenceOptions};
pub use randomizer::{Randomizer, RngRandomizer, SequenceRandomizer, StdRandomizer};
pub use sampler::Sampler;
