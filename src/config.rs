use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::rules::TokenisationRules;

/// Dataset and resource locations for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub train: PathBuf,
    pub test: Option<PathBuf>,
    pub vocab: Option<PathBuf>,
    pub labels: Option<PathBuf>,
}

/// Configuration for a tokenisation run, read from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub paths: Paths,
    pub rules: TokenisationRules,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    paths: RawPaths,
    tokenisation: Option<BTreeMap<String, bool>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPaths {
    train: PathBuf,
    test: Option<PathBuf>,
    vocab: Option<PathBuf>,
    labels: Option<PathBuf>,
}

impl Config {
    /// Load a config file. Relative paths in it are resolved against the
    /// directory holding the file.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| Error::file_access(path, e))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let config = Self::from_toml_str(&raw, base)?;
        log::debug!("Loaded config from {}: {:?}", path.display(), config.rules.enabled());
        Ok(config)
    }

    /// Parse config text, resolving relative paths against `base`.
    ///
    /// A missing `[tokenisation]` table means the standard rule set; inside
    /// the table, rules that are not listed are disabled.
    pub fn from_toml_str(raw: &str, base: &Path) -> Result<Self> {
        let raw: RawConfig =
            toml::from_str(raw).map_err(|e| Error::invalid_config(e.to_string()))?;

        let rules = match raw.tokenisation {
            Some(table) => TokenisationRules::from_map(table)?,
            None => TokenisationRules::standard(),
        };

        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        let paths = Paths {
            train: resolve(raw.paths.train),
            test: raw.paths.test.map(resolve),
            vocab: raw.paths.vocab.map(resolve),
            labels: raw.paths.labels.map(resolve),
        };

        Ok(Self { paths, rules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;

    #[test]
    fn test_parse_with_rules() {
        let config = Config::from_toml_str(
            r#"
[paths]
train = "data/train.txt"
test = "/abs/test.txt"

[tokenisation]
TOKENISE_NUMBERS = true
TOKENISE_STOPWORDS = false
"#,
            Path::new("/project"),
        )
        .unwrap();

        assert_eq!(config.paths.train, PathBuf::from("/project/data/train.txt"));
        assert_eq!(config.paths.test, Some(PathBuf::from("/abs/test.txt")));
        assert_eq!(config.paths.vocab, None);
        assert_eq!(config.rules.enabled(), vec![Rule::TokeniseNumbers]);
    }

    #[test]
    fn test_missing_table_uses_standard_rules() {
        let config =
            Config::from_toml_str("[paths]\ntrain = \"train.txt\"\n", Path::new("")).unwrap();
        assert_eq!(config.rules, TokenisationRules::standard());
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let err = Config::from_toml_str(
            "[paths]\ntrain = \"t.txt\"\n[tokenisation]\nTOKENISE_EMOJI = true\n",
            Path::new(""),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownRuleKey(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("[paths]\n", Path::new("")).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_from_file_resolves_against_its_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        fs::write(&path, "[paths]\ntrain = \"train.txt\"\n").unwrap();

        let config = Config::from_config_file(&path).unwrap();
        assert_eq!(config.paths.train, dir.path().join("train.txt"));
    }
}
