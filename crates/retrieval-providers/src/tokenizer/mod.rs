//! Tokenizer
//!
//! Deterministic, stateless text-to-token splitting shared by vocabulary
//! building and query encoding. Two modes:
//!
//! | Mode | Use | Behavior |
//! |------|-----|----------|
//! | [`TokenMode::Simple`] | prose/comments | lowercase, split on non-alphanumeric runs |
//! | [`TokenMode::Code`] | identifiers, source text | simple split plus camelCase/snake/acronym splitting and a frozen stop list |
//!
//! Both modes drop tokens of length <= 1 after splitting.

mod stopwords;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

pub use stopwords::{is_stop_word, CODE_MODE_STOP_WORDS};

use crate::constants::TOKEN_MIN_LENGTH;

/// Grapheme-cluster length, so a token built from combining characters is
/// measured as a user would perceive it rather than `str::chars().count()`
/// overcounting each combining mark as its own character.
fn grapheme_len(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Tokenization strategy. `Code` is the default for source-derived documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenMode {
    /// Split on non-alphanumeric runs only. No identifier splitting, no stop
    /// list.
    Simple,
    /// Split on delimiters, camelCase, snake_case/kebab-case, and acronym
    /// boundaries, then drop the frozen stop words.
    #[default]
    Code,
}

static DELIMITER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\s,;:{}()\[\]<>'"=+\-*/\\|&^%$#@!~`]+"#).unwrap());

static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{Number}]+").unwrap());

static CAMEL_BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());

static SNAKE_KEBAB_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[_\-]+").unwrap());

static ACRONYM_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap());

/// Split `text` into tokens under `mode`.
///
/// Deterministic and side-effect free: the same input always yields the
/// same token sequence, in source order.
pub fn tokenize(text: &str, mode: TokenMode) -> Vec<String> {
    match mode {
        TokenMode::Simple => tokenize_simple(text),
        TokenMode::Code => tokenize_code(text),
    }
}

fn tokenize_simple(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_ALNUM_RE
        .split(&lowered)
        .filter(|t| grapheme_len(t) > TOKEN_MIN_LENGTH - 1)
        .map(str::to_owned)
        .collect()
}

fn tokenize_code(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for segment in DELIMITER_RE.split(text) {
        if segment.is_empty() {
            continue;
        }
        let camel_split = CAMEL_BOUNDARY_RE.replace_all(segment, "$1 $2");
        let snake_split = SNAKE_KEBAB_RE.replace_all(&camel_split, " ");
        let acronym_split = ACRONYM_BOUNDARY_RE.replace_all(&snake_split, "$1 $2");
        for word in acronym_split.split_whitespace() {
            let lowered = word.to_lowercase();
            if grapheme_len(&lowered) <= TOKEN_MIN_LENGTH - 1 {
                continue;
            }
            if is_stop_word(&lowered) {
                continue;
            }
            out.push(lowered);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_mode_splits_call_expression() {
        let tokens = tokenize("calculateTotalPrice(items)", TokenMode::Code);
        assert_eq!(tokens, vec!["calculate", "total", "price", "items"]);
    }

    #[test]
    fn code_mode_splits_acronym_then_camel() {
        let tokens = tokenize("XMLHttpRequest is the API", TokenMode::Code);
        assert_eq!(tokens, vec!["xml", "http", "request", "api"]);
    }

    #[test]
    fn code_mode_splits_snake_and_camel_together() {
        let tokens = tokenize("getUserID_v2", TokenMode::Code);
        assert_eq!(tokens, vec!["get", "user", "id", "v2"]);
    }

    #[test]
    fn code_mode_drops_stop_words_and_short_tokens() {
        let tokens = tokenize("this is a test", TokenMode::Code);
        assert_eq!(tokens, vec!["test"]);
    }

    #[test]
    fn simple_mode_has_no_stop_list() {
        let tokens = tokenize("this IS a Test.", TokenMode::Simple);
        assert_eq!(tokens, vec!["this", "is", "test"]);
    }

    #[test]
    fn tokenize_is_deterministic() {
        let a = tokenize("fetchUserProfile(userId)", TokenMode::Code);
        let b = tokenize("fetchUserProfile(userId)", TokenMode::Code);
        assert_eq!(a, b);
    }
}
