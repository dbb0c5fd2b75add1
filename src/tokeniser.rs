//! Rule-driven question tokeniser.
//!
//! Runs the enabled pattern matchers over a question in a fixed order, each
//! pass consuming the previous pass's output. Word order is preserved; tokens
//! are only replaced in place or removed.

use rayon::prelude::*;

use crate::patterns;
use crate::rules::{Rule, TokenisationRules};

type Pass = fn(Vec<String>) -> Vec<String>;

/// Passes in the order they run. Quotes come off before URLs are recognised,
/// money, percentages and years are claimed before the generic number
/// matchers, and question marks go before stopwords.
const PASSES: [(Rule, Pass); 10] = [
    (Rule::TokeniseQuotes, patterns::split_quotes),
    (Rule::TokeniseUrls, patterns::replace_urls),
    (Rule::TokeniseMoney, patterns::replace_money),
    (Rule::TokenisePercentages, patterns::replace_percentages),
    (Rule::TokeniseYear, patterns::replace_years),
    (Rule::TokeniseCommaSeparatedNumbers, patterns::replace_comma_separated_numbers),
    (Rule::TokeniseNumbers, patterns::replace_numbers),
    (Rule::TokeniseMonth, patterns::replace_months),
    (Rule::RemoveQuestionMarks, patterns::remove_question_marks),
    (Rule::TokeniseStopwords, patterns::remove_stopwords),
];

/// Tokenise a question that has already been split into words.
///
/// With question mark removal on, a trailing "?" is detached from its word
/// before any pattern runs, so "1999?" is still seen as a year.
pub fn parse_tokens<S: AsRef<str>>(question: &[S], rules: &TokenisationRules) -> Vec<String> {
    let mut tokens = Vec::with_capacity(question.len());
    for word in question {
        if rules.remove_question_marks {
            detach_question_marks(word.as_ref(), &mut tokens);
        } else {
            tokens.push(word.as_ref().to_string());
        }
    }

    PASSES
        .iter()
        .filter(|(rule, _)| rules.is_enabled(*rule))
        .fold(tokens, |tokens, (_, pass)| pass(tokens))
}

/// Tokenise a raw question string.
///
/// Splits on whitespace and detaches trailing question marks into their own
/// word, so "100?" is seen as "100" followed by "?".
pub fn parse_str(question: &str, rules: &TokenisationRules) -> Vec<String> {
    parse_tokens(&split_words(question), rules)
}

/// Tokenise many questions in parallel. Output order matches input order.
pub fn parse_corpus<S>(questions: &[Vec<S>], rules: &TokenisationRules) -> Vec<Vec<String>>
where
    S: AsRef<str> + Sync,
{
    questions
        .par_iter()
        .map(|question| parse_tokens(question, rules))
        .collect()
}

fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    for word in text.split_whitespace() {
        detach_question_marks(word, &mut words);
    }
    words
}

/// Pushes `word` with any trailing question marks as a separate word.
fn detach_question_marks(word: &str, out: &mut Vec<String>) {
    let stem = word.trim_end_matches('?');
    if !stem.is_empty() || word.is_empty() {
        out.push(stem.to_string());
    }
    if stem.len() < word.len() {
        out.push(word[stem.len()..].to_string());
    }
}
