use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

/// One normalisation pass of the tokeniser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    TokeniseQuotes,
    TokeniseNumbers,
    TokeniseMonth,
    TokenisePercentages,
    RemoveQuestionMarks,
    TokeniseStopwords,
    TokeniseUrls,
    TokeniseMoney,
    TokeniseYear,
    TokeniseCommaSeparatedNumbers,
}

impl Rule {
    pub const ALL: [Rule; 10] = [
        Rule::TokeniseQuotes,
        Rule::TokeniseNumbers,
        Rule::TokeniseMonth,
        Rule::TokenisePercentages,
        Rule::RemoveQuestionMarks,
        Rule::TokeniseStopwords,
        Rule::TokeniseUrls,
        Rule::TokeniseMoney,
        Rule::TokeniseYear,
        Rule::TokeniseCommaSeparatedNumbers,
    ];

    /// The key used for this rule in configuration files.
    pub fn key(self) -> &'static str {
        match self {
            Rule::TokeniseQuotes => "TOKENISE_QUOTES",
            Rule::TokeniseNumbers => "TOKENISE_NUMBERS",
            Rule::TokeniseMonth => "TOKENISE_MONTH",
            Rule::TokenisePercentages => "TOKENISE_PERCENTAGES",
            Rule::RemoveQuestionMarks => "REMOVE_QUESTION_MARKS",
            Rule::TokeniseStopwords => "TOKENISE_STOPWORDS",
            Rule::TokeniseUrls => "TOKENISE_URLS",
            Rule::TokeniseMoney => "TOKENISE_MONEY",
            Rule::TokeniseYear => "TOKENISE_YEAR",
            // Spelling kept for compatibility with existing config files
            Rule::TokeniseCommaSeparatedNumbers => "TOKENISE_COMMA_SEPERATED_NUMBERS",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Rule::ALL
            .into_iter()
            .find(|rule| rule.key() == s)
            .ok_or_else(|| Error::UnknownRuleKey(s.to_string()))
    }
}

/// Switches controlling which normalisation passes run.
///
/// Every rule is its own field, so a rule set can only name supported rules.
/// Rules that are not mentioned when deserializing or building from a map
/// are disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct TokenisationRules {
    #[serde(default)]
    pub tokenise_quotes: bool,
    #[serde(default)]
    pub tokenise_numbers: bool,
    #[serde(default)]
    pub tokenise_month: bool,
    #[serde(default)]
    pub tokenise_percentages: bool,
    #[serde(default)]
    pub remove_question_marks: bool,
    #[serde(default)]
    pub tokenise_stopwords: bool,
    #[serde(default)]
    pub tokenise_urls: bool,
    #[serde(default)]
    pub tokenise_money: bool,
    #[serde(default)]
    pub tokenise_year: bool,
    #[serde(default, rename = "TOKENISE_COMMA_SEPERATED_NUMBERS")]
    pub tokenise_comma_separated_numbers: bool,
}

impl TokenisationRules {
    /// Every rule disabled: tokenisation is a pass-through.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every rule enabled.
    pub fn all() -> Self {
        Rule::ALL
            .into_iter()
            .fold(Self::none(), |rules, rule| rules.with(rule, true))
    }

    /// The rule set used when building vocabularies from training data:
    /// everything except stopword removal.
    pub fn standard() -> Self {
        Self::all().with(Rule::TokeniseStopwords, false)
    }

    /// Build a rule set from `(key, enabled)` pairs, rejecting unknown keys.
    pub fn from_map<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, bool)>,
        K: AsRef<str>,
    {
        let mut rules = Self::none();
        for (key, enabled) in entries {
            let rule: Rule = key.as_ref().parse()?;
            rules.set(rule, enabled);
        }
        Ok(rules)
    }

    pub fn with(mut self, rule: Rule, enabled: bool) -> Self {
        self.set(rule, enabled);
        self
    }

    pub fn is_enabled(&self, rule: Rule) -> bool {
        match rule {
            Rule::TokeniseQuotes => self.tokenise_quotes,
            Rule::TokeniseNumbers => self.tokenise_numbers,
            Rule::TokeniseMonth => self.tokenise_month,
            Rule::TokenisePercentages => self.tokenise_percentages,
            Rule::RemoveQuestionMarks => self.remove_question_marks,
            Rule::TokeniseStopwords => self.tokenise_stopwords,
            Rule::TokeniseUrls => self.tokenise_urls,
            Rule::TokeniseMoney => self.tokenise_money,
            Rule::TokeniseYear => self.tokenise_year,
            Rule::TokeniseCommaSeparatedNumbers => self.tokenise_comma_separated_numbers,
        }
    }

    /// Rules currently switched on, in declaration order.
    pub fn enabled(&self) -> Vec<Rule> {
        Rule::ALL
            .into_iter()
            .filter(|rule| self.is_enabled(*rule))
            .collect()
    }

    fn set(&mut self, rule: Rule, enabled: bool) {
        let field = match rule {
            Rule::TokeniseQuotes => &mut self.tokenise_quotes,
            Rule::TokeniseNumbers => &mut self.tokenise_numbers,
            Rule::TokeniseMonth => &mut self.tokenise_month,
            Rule::TokenisePercentages => &mut self.tokenise_percentages,
            Rule::RemoveQuestionMarks => &mut self.remove_question_marks,
            Rule::TokeniseStopwords => &mut self.tokenise_stopwords,
            Rule::TokeniseUrls => &mut self.tokenise_urls,
            Rule::TokeniseMoney => &mut self.tokenise_money,
            Rule::TokeniseYear => &mut self.tokenise_year,
            Rule::TokeniseCommaSeparatedNumbers => &mut self.tokenise_comma_separated_numbers,
        };
        *field = enabled;
    }
}
