//! Vocabulary building and persistence.
//!
//! A vocabulary is the set of distinct tokens in a corpus. On disk it is a
//! plain text file with one token per line.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::reader;
use crate::rules::TokenisationRules;
use crate::tokeniser;

/// The set of distinct tokens across a corpus.
pub type Vocabulary = HashSet<String>;

/// A token or an arbitrarily nested sequence of tokens.
///
/// Tokens are always atomic; a token is never split into its characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Corpus {
    Token(String),
    Nested(Vec<Corpus>),
}

impl Corpus {
    /// Visit every token in order, depth first.
    pub fn for_each_token<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Corpus::Token(token) => f(token),
            Corpus::Nested(items) => {
                for item in items {
                    item.for_each_token(f);
                }
            }
        }
    }

    /// All tokens in order, depth first.
    pub fn flatten(&self) -> Vec<&str> {
        let mut tokens = Vec::new();
        self.for_each_token(&mut |token| tokens.push(token));
        tokens
    }
}

impl From<String> for Corpus {
    fn from(token: String) -> Self {
        Corpus::Token(token)
    }
}

impl From<&str> for Corpus {
    fn from(token: &str) -> Self {
        Corpus::Token(token.to_string())
    }
}

impl<T: Into<Corpus>> From<Vec<T>> for Corpus {
    fn from(items: Vec<T>) -> Self {
        Corpus::Nested(items.into_iter().map(Into::into).collect())
    }
}

/// Distinct tokens of a corpus of any nesting depth.
pub fn vocab_from_text_corpus(corpus: &Corpus) -> Vocabulary {
    let mut vocab = Vocabulary::new();
    corpus.for_each_token(&mut |token| {
        if !vocab.contains(token) {
            vocab.insert(token.to_string());
        }
    });
    vocab
}

/// Vocabulary of a dataset file, tokenised with the standard rule set.
pub fn vocab_from_training_data(path: impl AsRef<Path>) -> Result<Vocabulary> {
    let dataset = reader::load(path)?;
    let tokenised = tokeniser::parse_corpus(&dataset.questions, &TokenisationRules::standard());
    let vocab = vocab_from_text_corpus(&Corpus::from(tokenised));
    log::info!(
        "Built vocabulary of {} tokens from {} questions",
        vocab.len(),
        dataset.len()
    );
    Ok(vocab)
}

/// Reads a vocabulary file, keeping file order.
///
/// Only the first whitespace separated field of each line is used, so
/// embedding files with one vector per line can be read as vocabularies too.
/// Blank lines are skipped.
pub fn load_vocab(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::file_access(path, e))?;

    let mut tokens = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| Error::file_access(path, e))?;
        if let Some(token) = line.split_whitespace().next() {
            tokens.push(token.to_string());
        }
    }
    Ok(tokens)
}

/// Builds the vocabulary of `input_path` and writes it to `output_path`,
/// one token per line, replacing any existing file.
///
/// Tokens are written sorted so repeated runs produce identical files.
pub fn save_vocabs(input_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<()> {
    let output_path = output_path.as_ref();
    let mut tokens: Vec<String> = vocab_from_training_data(input_path)?.into_iter().collect();
    tokens.sort_unstable();

    let file = File::create(output_path).map_err(|e| Error::file_access(output_path, e))?;
    let mut writer = BufWriter::new(file);
    for token in &tokens {
        writeln!(writer, "{token}").map_err(|e| Error::file_access(output_path, e))?;
    }
    writer
        .flush()
        .map_err(|e| Error::file_access(output_path, e))?;

    log::info!("Wrote {} tokens to {}", tokens.len(), output_path.display());
    Ok(())
}
