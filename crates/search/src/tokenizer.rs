//! Identifier tokenization shared by every scorer.
//!
//! Tokens are returned unfiltered; scorers skip tokens of length
//! [`MIN_TOKEN_LEN`] or less themselves.

/// Tokens this short (or shorter) are too common to count as evidence.
pub const MIN_TOKEN_LEN: usize = 2;

/// Lower-cased pieces split on `-` and `_`.
#[must_use]
pub fn segments(identifier: &str) -> Vec<String> {
    split_lower(identifier, |c| c == '-' || c == '_')
}

/// Lower-cased pieces split on `-`, `_` and whitespace.
#[must_use]
pub fn words(identifier: &str) -> Vec<String> {
    split_lower(identifier, |c| c == '-' || c == '_' || c.is_whitespace())
}

/// Whether a token is long enough to participate in scoring.
#[must_use]
pub fn is_significant(token: &str) -> bool {
    token.chars().count() > MIN_TOKEN_LEN
}

fn split_lower(identifier: &str, is_sep: impl Fn(char) -> bool) -> Vec<String> {
    identifier
        .to_lowercase()
        .split(is_sep)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
