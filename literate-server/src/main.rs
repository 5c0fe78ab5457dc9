use std::env;
use std::str::FromStr;

use actix_cors::Cors;
use actix_web::{get, middleware, web, App, HttpResponse, HttpServer, Responder};
use log::info;
use serde::Deserialize;

use literate_core::ChainError;
use literate_core::model::{
	ChainConfig, Count, Document, DocumentOptions, Join, MarkovChain, ParagraphOptions,
	RngRandomizer, SentenceOptions, StdRandomizer, TextGenerator,
};

/// Server settings, read from the environment.
///
/// - `LITERATE_CORPUS`: path of the source material (required)
/// - `LITERATE_HOST`: bind address, `127.0.0.1` by default
/// - `LITERATE_PORT`: bind port, `5000` by default
struct ServerConfig {
	corpus: String,
	host: String,
	port: u16,
}

impl ServerConfig {
	fn from_env() -> Result<Self, String> {
		let corpus = env::var("LITERATE_CORPUS")
			.map_err(|_| "LITERATE_CORPUS must point to a corpus file".to_owned())?;
		let host = env::var("LITERATE_HOST").unwrap_or_else(|_| "127.0.0.1".into());
		let port = match env::var("LITERATE_PORT") {
			Ok(port) => port.parse().map_err(|_| format!("Invalid LITERATE_PORT: {port}"))?,
			Err(_) => 5000,
		};
		Ok(Self { corpus, host, port })
	}
}

/// Query parameters shared by the sentence, paragraph and paragraphs
/// endpoints. Counts are written `7` or `3..15`.
#[derive(Deserialize)]
struct GenerateParams {
	first_word: Option<String>,
	words: Option<String>,
	sentences: Option<String>,
	paragraphs: Option<String>,
	punctuation: Option<String>,
	join: Option<String>, // "false" keeps paragraphs apart
	seed: Option<u64>,
}

struct SharedData {
	chain: MarkovChain,
}

impl GenerateParams {
	fn count(value: &Option<String>, default: Count) -> Result<Count, ChainError> {
		match value {
			Some(s) => Count::from_str(s),
			None => Ok(default),
		}
	}

	fn sentence_options(&self) -> Result<SentenceOptions, ChainError> {
		let defaults = SentenceOptions::default();
		Ok(SentenceOptions {
			first_word: self.first_word.clone(),
			words: Self::count(&self.words, defaults.words)?,
			punctuation: self.punctuation.clone(),
		})
	}

	fn paragraph_options(&self) -> Result<ParagraphOptions, ChainError> {
		let defaults = ParagraphOptions::default();
		Ok(ParagraphOptions {
			first_word: self.first_word.clone(),
			words: Self::count(&self.words, defaults.words)?,
			sentences: Self::count(&self.sentences, defaults.sentences)?,
			punctuation: self.punctuation.clone(),
		})
	}

	fn document_options(&self) -> Result<DocumentOptions, ChainError> {
		let defaults = DocumentOptions::default();
		let join = match self.join.as_deref() {
			None => defaults.join,
			Some("false") => Join::Disabled,
			Some(separator) => Join::Separator(separator.to_owned()),
		};
		Ok(DocumentOptions {
			first_word: self.first_word.clone(),
			words: Self::count(&self.words, defaults.words)?,
			sentences: Self::count(&self.sentences, defaults.sentences)?,
			paragraphs: Self::count(&self.paragraphs, defaults.paragraphs)?,
			punctuation: self.punctuation.clone(),
			join,
		})
	}

	/// One randomizer per request: reproducible when `seed` is given.
	fn randomizer(&self) -> StdRandomizer {
		match self.seed {
			Some(seed) => RngRandomizer::seeded(seed),
			None => RngRandomizer::from_os(),
		}
	}
}

/// Maps generation errors to a status code: bad counts are the caller's fault.
fn error_response(error: ChainError) -> HttpResponse {
	match error {
		ChainError::InvalidCount { .. } | ChainError::ParseCount(_) => {
			HttpResponse::BadRequest().body(error.to_string())
		}
		_ => HttpResponse::InternalServerError().body(error.to_string()),
	}
}

#[get("/v1/word")]
async fn get_word(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let mut generator = TextGenerator::new(&data.chain, query.randomizer());
	match generator.word() {
		Some(word) => HttpResponse::Ok().body(word.to_owned()),
		None => HttpResponse::NotFound().body("No word available"),
	}
}

#[get("/v1/first_word")]
async fn get_first_word(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let mut generator = TextGenerator::new(&data.chain, query.randomizer());
	match generator.first_word() {
		Some(word) => HttpResponse::Ok().body(word.to_owned()),
		None => HttpResponse::NotFound().body("No first word available"),
	}
}

#[get("/v1/markov_word")]
async fn get_markov_word(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let mut generator = TextGenerator::new(&data.chain, query.randomizer());
	match generator.markov_word() {
		Some(word) => HttpResponse::Ok().body(word.to_owned()),
		None => HttpResponse::NotFound().body("No chain word available"),
	}
}

/// HTTP GET endpoint `/v1/sentence`
#[get("/v1/sentence")]
async fn get_sentence(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let options = match query.sentence_options() {
		Ok(options) => options,
		Err(e) => return error_response(e),
	};
	let mut generator = TextGenerator::new(&data.chain, query.randomizer());
	match generator.sentence(&options) {
		Ok(sentence) => HttpResponse::Ok().body(sentence),
		Err(e) => error_response(e),
	}
}

/// HTTP GET endpoint `/v1/paragraph`
#[get("/v1/paragraph")]
async fn get_paragraph(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let options = match query.paragraph_options() {
		Ok(options) => options,
		Err(e) => return error_response(e),
	};
	let mut generator = TextGenerator::new(&data.chain, query.randomizer());
	match generator.paragraph(&options) {
		Ok(paragraph) => HttpResponse::Ok().body(paragraph),
		Err(e) => error_response(e),
	}
}

/// HTTP GET endpoint `/v1/paragraphs`
///
/// Plain text when joined, a JSON array with `join=false`.
#[get("/v1/paragraphs")]
async fn get_paragraphs(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let options = match query.document_options() {
		Ok(options) => options,
		Err(e) => return error_response(e),
	};
	let mut generator = TextGenerator::new(&data.chain, query.randomizer());
	match generator.paragraphs(&options) {
		Ok(Document::Joined(text)) => HttpResponse::Ok().body(text),
		Ok(paragraphs @ Document::Paragraphs(_)) => HttpResponse::Ok().json(paragraphs),
		Err(e) => error_response(e),
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<SharedData>) -> impl Responder {
	HttpResponse::Ok().body(data.chain.to_string())
}

/// Main entry point for the server.
///
/// Builds the chain once from `LITERATE_CORPUS` and shares it read-only
/// between workers; every request draws from its own randomizer, so no
/// lock is needed.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = ServerConfig::from_env()
		.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
	let chain = MarkovChain::from_file(&config.corpus, ChainConfig::default())
		.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
	info!("loaded {} from {}", chain, config.corpus);

	let shared_data = web::Data::new(SharedData { chain });

	info!("listening on {}:{}", config.host, config.port);
	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.service(get_word)
			.service(get_first_word)
			.service(get_markov_word)
			.service(get_sentence)
			.service(get_paragraph)
			.service(get_paragraphs)
			.service(get_stats)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
