use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

/// Questions and their class labels, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub questions: Vec<Vec<String>>,
    pub labels: Vec<String>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Iterate over `(question words, label)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&[String], &str)> {
        self.questions
            .iter()
            .zip(self.labels.iter())
            .map(|(question, label)| (question.as_slice(), label.as_str()))
    }
}

/// Loads a dataset file.
///
/// Each line holds the question type followed by the question words, all
/// whitespace separated, e.g. `NUM:dist How far is it from Denver to Aspen ?`.
/// Blank lines are skipped; a line with a label and no words is an error.
pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::file_access(path, e))?;

    let mut dataset = Dataset::default();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| Error::file_access(path, e))?;
        let mut fields = line.split_whitespace();

        let Some(label) = fields.next() else {
            continue;
        };
        let question: Vec<String> = fields.map(str::to_string).collect();
        if question.is_empty() {
            return Err(Error::malformed_line(
                path,
                number + 1,
                format!("label {label:?} has no question words"),
            ));
        }

        dataset.labels.push(label.to_string());
        dataset.questions.push(question);
    }

    log::debug!("Loaded {} questions from {}", dataset.len(), path.display());
    Ok(dataset)
}
