use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Maps class labels to dense indices and back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OneHotLabels {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl OneHotLabels {
    /// Build from a label sequence. Indices follow first appearance.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut one_hot = Self::default();
        for label in labels {
            let label = label.as_ref();
            if !one_hot.index.contains_key(label) {
                one_hot.index.insert(label.to_string(), one_hot.labels.len());
                one_hot.labels.push(label.to_string());
            }
        }
        one_hot
    }

    /// Load from a JSON file holding an array of label strings.
    pub fn from_labels_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| Error::file_access(path, e))?;
        let labels: Vec<String> = serde_json::from_str(&raw)
            .map_err(|e| Error::InvalidLabels(format!("{}: {e}", path.display())))?;
        Ok(Self::from_labels(labels))
    }

    pub fn idx_for_label(&self, label: &str) -> Result<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| Error::UnknownLabel(label.to_string()))
    }

    pub fn label_for_idx(&self, index: usize) -> Result<&str> {
        self.labels
            .get(index)
            .map(String::as_str)
            .ok_or(Error::LabelIndexOutOfRange {
                index,
                len: self.labels.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let labels = OneHotLabels::from_labels(["LOC:city", "HUM:ind", "LOC:city", "NUM:date"]);
        assert_eq!(labels.len(), 3);
        assert_eq!(labels.idx_for_label("HUM:ind").unwrap(), 1);
        assert_eq!(labels.label_for_idx(2).unwrap(), "NUM:date");
    }

    #[test]
    fn test_unknown_label_and_index() {
        let labels = OneHotLabels::from_labels(["DESC:def"]);
        assert!(matches!(
            labels.idx_for_label("ABBR:exp"),
            Err(Error::UnknownLabel(_))
        ));
        assert!(matches!(
            labels.label_for_idx(1),
            Err(Error::LabelIndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.json");
        fs::write(&path, r#"["ABBR:abb", "ENTY:animal"]"#).unwrap();

        let labels = OneHotLabels::from_labels_json_file(&path).unwrap();
        assert_eq!(labels.labels(), ["ABBR:abb".to_string(), "ENTY:animal".to_string()]);

        fs::write(&path, r#"{"not": "a list"}"#).unwrap();
        assert!(matches!(
            OneHotLabels::from_labels_json_file(&path),
            Err(Error::InvalidLabels(_))
        ));
    }
}
