//! Question tokeniser: rule-driven normalisation of natural-language
//! questions into token sequences, plus the vocabulary and one-hot utilities
//! that consume them.
//!
//! ```rust
//! use question_tokeniser::{parse_str, OneHotEncoder, TokenisationRules};
//!
//! let tokens = parse_str("How much is 50 % of $ 1,000?", &TokenisationRules::standard());
//! assert_eq!(tokens, ["How", "much", "is", "<PERCENT>", "of", "<MONEY>"]);
//!
//! let mut encoder = OneHotEncoder::new();
//! let vectors = encoder.encode(&[tokens], true).unwrap();
//! assert_eq!(vectors[0].dim(), (6, 6));
//! ```

pub mod config;
pub mod error;
pub mod labels;
pub mod one_hot;
pub mod patterns;
pub mod reader;
pub mod rules;
pub mod tokeniser;
pub mod vocab;

pub use config::Config;
pub use error::{Error, Result};
pub use labels::OneHotLabels;
pub use one_hot::OneHotEncoder;
pub use reader::{load, Dataset};
pub use rules::{Rule, TokenisationRules};
pub use tokeniser::{parse_corpus, parse_str, parse_tokens};
pub use vocab::{
    load_vocab, save_vocabs, vocab_from_text_corpus, vocab_from_training_data, Corpus, Vocabulary,
};
