//! Frozen stop list for code-mode tokenization
//!
//! This list is part of the tokenizer's contract (spec §4.1, §9): it is not
//! configurable, because making it so would break vocabulary portability
//! across runs built with different configurations.

/// Very common English function words and generic programming keywords,
/// dropped after all code-mode splitting has produced single words.
pub const CODE_MODE_STOP_WORDS: &[&str] = &[
    "var", "let", "const", "this", "that", "new", "null", "true", "false", "the", "is", "at",
    "of", "on", "and", "or", "to", "in", "it", "for", "as", "be", "by", "an", "if", "do", "no",
    "so",
];

/// `true` if `token` is on the frozen code-mode stop list
pub fn is_stop_word(token: &str) -> bool {
    CODE_MODE_STOP_WORDS.contains(&token)
}
