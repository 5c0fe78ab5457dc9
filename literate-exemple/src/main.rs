use literate_core::model::{
    ChainConfig, Count, DocumentOptions, Join, MarkovChain, ParagraphOptions,
    RngRandomizer, SentenceOptions, TextGenerator,
};

/// Used when no corpus file is given on the command line.
const SAMPLE_CORPUS: &str = "The harbour was quiet in the early morning. \
    A few boats rocked against the pier and the gulls waited on the posts. \
    An old man walked to the end of the pier with a bucket of bait. \
    He sat on the edge and looked at the water for a long time. \
    The water was grey and the sky was grey, and the town behind him was asleep. \
    When the sun came up over the hills the boats went out one by one. \
    The old man watched them go and then he went home for breakfast.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Build the chain from a file if one is given, otherwise from the sample text
    let chain = match std::env::args().nth(1) {
        Some(path) => MarkovChain::from_file(path, ChainConfig::default())?,
        None => MarkovChain::new(SAMPLE_CORPUS)?,
    };
    println!("Chain: {}", chain);

    // A fixed seed gives the same text on every run; use 'RngRandomizer::from_os()' for fresh text
    let mut generator = TextGenerator::new(&chain, RngRandomizer::seeded(2024));

    // Single draws
    println!("Word: {:?}", generator.word());
    println!("First word: {:?}", generator.first_word());
    println!("Markov word: {:?}", generator.markov_word());

    // A sentence with every option left at its default (3..15 words, random punctuation)
    println!("Sentence: {}", generator.sentence(&SentenceOptions::default())?);

    // A sentence starting from a chosen word, with exactly 6 words (more if it ends on "the", "to", ...)
    let options = SentenceOptions {
        first_word: Some("The".to_owned()),
        words: Count::Fixed(6),
        punctuation: Some("!".to_owned()),
    };
    println!("Custom sentence: {}", generator.sentence(&options)?);

    // A short paragraph; only its last sentence gets the custom punctuation
    let options = ParagraphOptions {
        sentences: Count::range(2, 4),
        punctuation: Some("...".to_owned()),
        ..Default::default()
    };
    println!("Paragraph: {}", generator.paragraph(&options)?);

    // Invalid counts are rejected instead of clamped
    let options = SentenceOptions { words: Count::range(9, 3), ..Default::default() };
    match generator.sentence(&options) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected: {}", e),
    }

    // Several paragraphs, kept apart
    let options = DocumentOptions {
        paragraphs: Count::Fixed(2),
        sentences: Count::Fixed(2),
        join: Join::Disabled,
        ..Default::default()
    };
    for (i, paragraph) in generator.paragraphs(&options)?.into_paragraphs().iter().enumerate() {
        println!("Paragraph {}: {}", i + 1, paragraph);
    }

    Ok(())
}
