//! City name validation.
//!
//! Runs before any network call. Rules are checked in order and the first
//! failing rule decides the error.

use std::fmt;

use thiserror::Error;

pub const MIN_CITY_LEN: usize = 2;
pub const MAX_CITY_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter at least 2 characters")]
    TooShort,

    #[error("City name should not exceed 100 characters")]
    TooLong,

    #[error("Invalid city name — only letters, spaces and hyphens are allowed")]
    InvalidCharacters,
}

/// A trimmed city name that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInput {
    city: String,
}

impl SearchInput {
    pub fn city(&self) -> &str {
        &self.city
    }
}

impl fmt::Display for SearchInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.city)
    }
}

type Rule = (fn(&str) -> bool, ValidationError);

/// Each predicate returns `true` when the (already trimmed) value passes.
const RULES: [Rule; 3] = [
    (long_enough, ValidationError::TooShort),
    (short_enough, ValidationError::TooLong),
    (only_city_chars, ValidationError::InvalidCharacters),
];

fn long_enough(s: &str) -> bool {
    s.chars().count() >= MIN_CITY_LEN
}

fn short_enough(s: &str) -> bool {
    s.chars().count() <= MAX_CITY_LEN
}

fn only_city_chars(s: &str) -> bool {
    s.chars().all(is_city_char)
}

fn is_city_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, ' ' | '-' | '\'')
}

/// Trim `raw` and check it against the city name rules.
pub fn validate_city(raw: &str) -> Result<SearchInput, ValidationError> {
    let trimmed = raw.trim();

    if let Some((_, err)) = RULES.iter().find(|(passes, _)| !passes(trimmed)) {
        return Err(*err);
    }

    Ok(SearchInput { city: trimmed.to_string() })
}
