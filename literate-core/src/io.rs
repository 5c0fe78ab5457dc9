use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ChainError;

/// Reads a corpus file and returns its whole content.
///
/// - Reads the entire file into memory
/// - Line endings are kept; they only matter as whitespace to the tokenizer
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> Result<String, ChainError> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn reads_whole_file() {
		let path = std::env::temp_dir().join(format!("literate-core-io-{}.txt", std::process::id()));
		let mut file = File::create(&path).unwrap();
		write!(file, "First line.\nSecond line.").unwrap();
		drop(file);

		let contents = read_corpus(&path).unwrap();
		std::fs::remove_file(&path).unwrap();
		assert_eq!(contents, "First line.\nSecond line.");
	}

	#[test]
	fn missing_file_is_an_io_error() {
		let result = read_corpus("./definitely/not/here.txt");
		assert!(matches!(result, Err(ChainError::Io(_))));
	}
}
