//! One-hot encoding of tokenised questions against a growable token index.

use std::collections::HashMap;

use ndarray::Array2;

use crate::error::{Error, Result};

/// Growable token to index mapping.
///
/// A token keeps the index it was first given for the lifetime of the
/// encoder; new tokens get the next free index. The encoder is owned by the
/// caller and needs external synchronisation if shared between threads.
#[derive(Debug, Clone, Default)]
pub struct OneHotEncoder {
    index: HashMap<String, usize>,
    tokens: Vec<String>,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the index from a token list, e.g. a loaded vocabulary file.
    /// Indices follow list order; duplicates keep their first index.
    pub fn from_vocab<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut encoder = Self::new();
        for token in tokens {
            encoder.insert(token.into());
        }
        encoder
    }

    /// Number of distinct tokens seen so far, which is also the vector width.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Known tokens in index order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Add every unseen token of a batch to the index without encoding it.
    /// Returns how many tokens were added.
    pub fn update_index<S: AsRef<str>>(&mut self, tokenised_questions: &[Vec<S>]) -> usize {
        let before = self.len();
        for token in tokenised_questions.iter().flatten() {
            let token = token.as_ref();
            if !self.index.contains_key(token) {
                self.insert(token.to_string());
            }
        }
        if self.len() > before {
            log::debug!("One-hot index grew from {} to {} tokens", before, self.len());
        }
        self.len() - before
    }

    /// Encode a batch of tokenised questions.
    ///
    /// With `update_corpus` set, unseen tokens are added to the index first.
    /// Without it, any unseen token fails the whole batch with
    /// [`Error::UnknownToken`] and the index is left unchanged.
    ///
    /// Every matrix in the returned batch has one row per token and the same
    /// width: the index size once the whole batch has been indexed.
    pub fn encode<S: AsRef<str>>(
        &mut self,
        tokenised_questions: &[Vec<S>],
        update_corpus: bool,
    ) -> Result<Vec<Array2<f32>>> {
        if update_corpus {
            self.update_index(tokenised_questions);
        } else if let Some(token) = tokenised_questions
            .iter()
            .flatten()
            .map(|token| token.as_ref())
            .find(|token| !self.index.contains_key(*token))
        {
            return Err(Error::UnknownToken(token.to_string()));
        }

        let width = self.len();
        tokenised_questions
            .iter()
            .map(|question| self.encode_question(question, width))
            .collect()
    }

    fn encode_question<S: AsRef<str>>(&self, question: &[S], width: usize) -> Result<Array2<f32>> {
        let mut matrix = Array2::zeros((question.len(), width));
        for (row, token) in question.iter().enumerate() {
            let token = token.as_ref();
            let column = self
                .index_of(token)
                .ok_or_else(|| Error::UnknownToken(token.to_string()))?;
            matrix[[row, column]] = 1.0;
        }
        Ok(matrix)
    }

    fn insert(&mut self, token: String) -> usize {
        if let Some(&existing) = self.index.get(&token) {
            return existing;
        }
        let next = self.tokens.len();
        self.index.insert(token.clone(), next);
        self.tokens.push(token);
        next
    }
}
