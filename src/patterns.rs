//! Pattern matchers used by the tokeniser.
//!
//! Each matcher takes the current token list and returns a new one with every
//! match of its category replaced by a marker token (or removed). A token that
//! only partially matches a pattern is left as it is.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

pub const QUOTE_MARKER: &str = "<QUOTE>";
pub const NUMBER_MARKER: &str = "<NUMBER>";
pub const MONEY_MARKER: &str = "<MONEY>";
pub const PERCENT_MARKER: &str = "<PERCENT>";
pub const YEAR_MARKER: &str = "<YEAR>";
pub const MONTH_MARKER: &str = "<MONTH>";
pub const URL_MARKER: &str = "<URL>";

/// Earliest and latest values treated as calendar years.
const YEAR_RANGE: std::ops::RangeInclusive<u32> = 1000..=2099;

const CURRENCY_SYMBOLS: &[&str] = &["$", "£", "€", "¥"];
const OPENING_QUOTES: &[&str] = &["``", "\"", "\u{201c}"];
const CLOSING_QUOTES: &[&str] = &["''", "\"", "\u{201d}"];

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d+)?|\.\d+)$").expect("valid number pattern"));

static COMMA_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d+)?$").expect("valid comma number pattern")
});

static MONEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[$£€¥](\d+(\.\d+)?|\d{1,3}(,\d{3})+(\.\d+)?|\.\d+)$")
        .expect("valid money pattern")
});

static PERCENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d+)?|\d{1,3}(,\d{3})+(\.\d+)?|\.\d+)%$")
        .expect("valid percent pattern")
});

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid year pattern"));

// Bare domains need a lowercase TLD and a host of two or more characters,
// so abbreviations like "No.Us" or "Mass.Gov" are left alone.
static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((?i:(https?|ftp)://[^\s/$.?#][^\s]*|www\.[a-z0-9-]+(\.[a-z0-9-]+)+(/\S*)?)|[A-Za-z0-9-]{2,}(\.[A-Za-z0-9-]+)*\.(com|org|net|edu|gov|mil|int|info|biz|io|uk|us|de|fr|ca|au)(/\S*)?)$",
    )
    .expect("valid url pattern")
});

static MONTHS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "january", "february", "march", "april", "may", "june", "july", "august",
        "september", "october", "november", "december", "jan", "feb", "mar", "apr", "jun",
        "jul", "aug", "sep", "sept", "oct", "nov", "dec",
    ]
    .into_iter()
    .collect()
});

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
        "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers",
        "herself", "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
        "this", "that", "these", "those", "am", "is", "are", "was", "were", "be", "been",
        "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
        "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
        "for", "with", "about", "against", "between", "into", "through", "during", "before",
        "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off",
        "over", "under", "again", "further", "then", "once", "here", "there", "all", "any",
        "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
        "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just",
        "don", "should", "now",
    ]
    .into_iter()
    .collect()
});

/// True for bare integer or decimal literals, and for comma-grouped ones.
pub fn is_numeric_literal(token: &str) -> bool {
    NUMBER.is_match(token) || COMMA_NUMBER.is_match(token)
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token.to_lowercase().as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BareQuote {
    Open,
    Close,
    Either,
}

fn bare_quote(token: &str) -> Option<BareQuote> {
    let opens = OPENING_QUOTES.contains(&token);
    let closes = CLOSING_QUOTES.contains(&token);
    match (opens, closes) {
        (true, true) => Some(BareQuote::Either),
        (true, false) => Some(BareQuote::Open),
        (false, true) => Some(BareQuote::Close),
        (false, false) => None,
    }
}

/// Byte lengths of an attached opening and closing quote on a word.
fn attached_quotes(token: &str) -> (Option<usize>, Option<usize>) {
    let lead = OPENING_QUOTES
        .iter()
        .find(|q| token.starts_with(**q))
        .map(|q| q.len());
    let taken = lead.unwrap_or(0);
    let trail = CLOSING_QUOTES
        .iter()
        .find(|q| token.len() >= taken + q.len() && token[taken..].ends_with(**q))
        .map(|q| q.len());
    (lead, trail)
}

/// Splits paired quotes off their content and replaces them with quote markers.
///
/// Quotes may stand alone (`"`, ` `` `, `''`) or be attached to the first and
/// last quoted word. An opening quote without a matching closing quote (or the
/// reverse) is left untouched.
pub fn split_quotes(tokens: Vec<String>) -> Vec<String> {
    let edges: Vec<(Option<usize>, Option<usize>)> = tokens
        .iter()
        .map(|token| match bare_quote(token) {
            Some(_) => (None, None),
            None => attached_quotes(token),
        })
        .collect();

    // (leading quote matched, trailing quote matched); bare quotes use the first flag
    let mut matched = vec![(false, false); tokens.len()];
    let mut open: Option<usize> = None;

    for (i, token) in tokens.iter().enumerate() {
        match bare_quote(token) {
            Some(BareQuote::Open) => open = Some(i),
            Some(BareQuote::Close) => {
                if let Some(j) = open.take() {
                    matched[j].0 = true;
                    matched[i].0 = true;
                }
            }
            Some(BareQuote::Either) => match open.take() {
                Some(j) => {
                    matched[j].0 = true;
                    matched[i].0 = true;
                }
                None => open = Some(i),
            },
            None => {
                let (lead, trail) = edges[i];
                if lead.is_some() {
                    open = Some(i);
                }
                if trail.is_some() {
                    if let Some(j) = open.take() {
                        matched[j].0 = true;
                        matched[i].1 = true;
                    }
                }
            }
        }
    }

    let mut out = Vec::with_capacity(tokens.len() + 2);
    for (i, token) in tokens.into_iter().enumerate() {
        let (lead_matched, trail_matched) = matched[i];
        if bare_quote(&token).is_some() {
            if lead_matched {
                out.push(QUOTE_MARKER.to_string());
            } else {
                out.push(token);
            }
            continue;
        }
        if !lead_matched && !trail_matched {
            out.push(token);
            continue;
        }

        let (lead, trail) = edges[i];
        let start = if lead_matched { lead.unwrap_or(0) } else { 0 };
        let end = if trail_matched {
            token.len() - trail.unwrap_or(0)
        } else {
            token.len()
        };

        if lead_matched {
            out.push(QUOTE_MARKER.to_string());
        }
        if start < end {
            out.push(token[start..end].to_string());
        }
        if trail_matched {
            out.push(QUOTE_MARKER.to_string());
        }
    }
    out
}

pub fn replace_urls(tokens: Vec<String>) -> Vec<String> {
    replace_matching(tokens, |token| URL.is_match(token), URL_MARKER)
}

/// Replaces `$ 5`, `$5` or `£1,000.50` style amounts with the money marker.
///
/// A `%` right after an amount belongs to it: `$ 50 %` is a single money
/// token rather than money followed by a stray percent sign.
pub fn replace_money(tokens: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();
    while let Some(token) = iter.next() {
        let is_money = if CURRENCY_SYMBOLS.contains(&token.as_str()) {
            let amount = iter.peek().is_some_and(|next| is_numeric_literal(next));
            if amount {
                iter.next();
            }
            amount
        } else {
            MONEY.is_match(&token)
        };

        if is_money {
            iter.next_if(|next| next == "%");
            out.push(MONEY_MARKER.to_string());
        } else {
            out.push(token);
        }
    }
    out
}

/// Replaces `50 %` and `50%` with the percentage marker.
pub fn replace_percentages(tokens: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();
    while let Some(token) = iter.next() {
        if is_numeric_literal(&token) && iter.peek().is_some_and(|next| next == "%") {
            iter.next();
            out.push(PERCENT_MARKER.to_string());
        } else if PERCENT.is_match(&token) {
            out.push(PERCENT_MARKER.to_string());
        } else {
            out.push(token);
        }
    }
    out
}

pub fn replace_years(tokens: Vec<String>) -> Vec<String> {
    replace_matching(
        tokens,
        |token| {
            YEAR.is_match(token)
                && token
                    .parse::<u32>()
                    .is_ok_and(|year| YEAR_RANGE.contains(&year))
        },
        YEAR_MARKER,
    )
}

pub fn replace_comma_separated_numbers(tokens: Vec<String>) -> Vec<String> {
    replace_matching(tokens, |token| COMMA_NUMBER.is_match(token), NUMBER_MARKER)
}

pub fn replace_numbers(tokens: Vec<String>) -> Vec<String> {
    replace_matching(tokens, |token| NUMBER.is_match(token), NUMBER_MARKER)
}

/// Replaces month names and their abbreviations, ignoring case.
///
/// "May" is also a modal verb, so it only counts as a month when capitalised
/// and not the first word of the question.
pub fn replace_months(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .enumerate()
        .map(|(position, token)| {
            if is_month(&token, position) {
                MONTH_MARKER.to_string()
            } else {
                token
            }
        })
        .collect()
}

fn is_month(token: &str, position: usize) -> bool {
    let lowered = token.to_lowercase();
    let name = lowered.strip_suffix('.').unwrap_or(&lowered);
    if !MONTHS.contains(name) {
        return false;
    }
    if name == "may" {
        return position > 0 && token.starts_with('M');
    }
    true
}

/// Strips trailing question marks and drops tokens that were nothing else.
/// Empty tokens pass through untouched.
pub fn remove_question_marks(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .filter_map(|token| {
            let stripped = token.trim_end_matches('?');
            if stripped.is_empty() && !token.is_empty() {
                None
            } else if stripped.len() == token.len() {
                Some(token)
            } else {
                Some(stripped.to_string())
            }
        })
        .collect()
}

pub fn remove_stopwords(tokens: Vec<String>) -> Vec<String> {
    tokens.into_iter().filter(|token| !is_stopword(token)).collect()
}

fn replace_matching(
    tokens: Vec<String>,
    is_match: impl Fn(&str) -> bool,
    marker: &str,
) -> Vec<String> {
    tokens
        .into_iter()
        .map(|token| {
            if is_match(&token) {
                marker.to_string()
            } else {
                token
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(replace_numbers(words("42 3.14 .5 -7")), vec![NUMBER_MARKER; 4]);
        assert_eq!(replace_numbers(words("1,000 4th 3.")), words("1,000 4th 3."));
    }

    #[test]
    fn test_comma_separated_numbers() {
        assert_eq!(
            replace_comma_separated_numbers(words("1,000 12,345.6 1,00 42")),
            words("<NUMBER> <NUMBER> 1,00 42")
        );
    }

    #[test]
    fn test_money() {
        assert_eq!(
            replace_money(words("costs $ 5 or $1,000 or £3.50")),
            words("costs <MONEY> or <MONEY> or <MONEY>")
        );
        // A bare currency symbol without an amount stays put
        assert_eq!(replace_money(words("the $ sign")), words("the $ sign"));
        assert_eq!(replace_money(words("$ five")), words("$ five"));
    }

    #[test]
    fn test_money_absorbs_trailing_percent() {
        assert_eq!(replace_money(words("$ 50 %")), words("<MONEY>"));
        assert_eq!(replace_money(words("up $5 % today")), words("up <MONEY> today"));
        assert_eq!(replace_money(words("$ % 50")), words("$ % 50"));
    }

    #[test]
    fn test_percentages() {
        assert_eq!(
            replace_percentages(words("50 % of 12.5% and 1,000 %")),
            words("<PERCENT> of <PERCENT> and <PERCENT>")
        );
        assert_eq!(replace_percentages(words("% 50")), words("% 50"));
    }

    #[test]
    fn test_years() {
        assert_eq!(
            replace_years(words("in 1066 and 1999 not 0042 or 3000 or 19999")),
            words("in <YEAR> and <YEAR> not 0042 or 3000 or 19999")
        );
    }

    #[test]
    fn test_months() {
        assert_eq!(
            replace_months(words("born in JANUARY or Sept. or dec")),
            words("born in <MONTH> or <MONTH> or <MONTH>")
        );
    }

    #[test]
    fn test_may_needs_capital_and_position() {
        assert_eq!(replace_months(words("What happened in May")), words("What happened in <MONTH>"));
        assert_eq!(replace_months(words("May I ask")), words("May I ask"));
        assert_eq!(replace_months(words("who may win")), words("who may win"));
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            replace_urls(words("visit http://example.com/a?b=1 www.rust-lang.org wikipedia.org U.S. e.g.")),
            words("visit <URL> <URL> <URL> U.S. e.g.")
        );
    }

    #[test]
    fn test_capitalised_abbreviations_are_not_urls() {
        assert_eq!(
            replace_urls(words("No.Us Mass.Gov Wikipedia.org x.com HTTP://EXAMPLE.COM")),
            words("No.Us Mass.Gov <URL> x.com <URL>")
        );
    }

    #[test]
    fn test_bare_quotes_paired() {
        assert_eq!(
            split_quotes(words("What does `` carpe diem '' mean")),
            words("What does <QUOTE> carpe diem <QUOTE> mean")
        );
        assert_eq!(
            split_quotes(words("the \" Iron Lady \" nickname")),
            words("the <QUOTE> Iron Lady <QUOTE> nickname")
        );
    }

    #[test]
    fn test_attached_quotes_split_from_content() {
        assert_eq!(
            split_quotes(words("who sang \"Yesterday\" and \"Let It Be\"")),
            words("who sang <QUOTE> Yesterday <QUOTE> and <QUOTE> Let It Be <QUOTE>")
        );
    }

    #[test]
    fn test_unmatched_quote_untouched() {
        assert_eq!(split_quotes(words("a \"dangling quote")), words("a \"dangling quote"));
        assert_eq!(split_quotes(words("a closing '' only")), words("a closing '' only"));
        assert_eq!(split_quotes(words("don't touch students'")), words("don't touch students'"));
    }

    #[test]
    fn test_question_marks() {
        assert_eq!(
            remove_question_marks(words("Why now? ? ??")),
            words("Why now")
        );
        assert_eq!(remove_question_marks(words("a?b")), words("a?b"));
    }

    #[test]
    fn test_question_marks_keep_empty_token() {
        let tokens = vec![String::new(), "a".to_string(), "?".to_string()];
        assert_eq!(remove_question_marks(tokens), vec!["", "a"]);
    }

    #[test]
    fn test_stopwords() {
        assert_eq!(
            remove_stopwords(words("What is THE capital of <NUMBER>")),
            words("What capital <NUMBER>")
        );
    }
}
