//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use thiserror::Error;

/// Classification of a client-supplied address string.
///
/// `Invalid` means the string did not parse as an address at all. It is
/// deliberately treated the same as "not public" by the resolver: an
/// unparsable value is never trusted, so it triggers external resolution
/// instead of being passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Address within a private, reserved, loopback or link-local range.
    Private,
    /// Globally routable address.
    Public,
    /// Not a syntactically valid address.
    Invalid,
}

impl Classification {
    /// Whether this classification allows the address to be used as-is.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
}

/// Error returned when a string is rejected as a city name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid city name: {0:?}")]
pub struct InvalidCityName(pub String);

/// A validated city name, safe to forward to a weather provider.
///
/// Constraints: Latin or Cyrillic letters, spaces, hyphens, apostrophes and
/// periods only; non-empty; at most 100 characters. Anything else is
/// rejected before a single external call is made.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityName(String);

impl CityName {
    /// Maximum accepted length, in characters.
    pub const MAX_LEN: usize = 100;

    /// Validate and wrap a raw city string.
    ///
    /// Leading/trailing whitespace is stripped before validation.
    pub fn parse(raw: &str) -> Result<Self, InvalidCityName> {
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed.chars().count() > Self::MAX_LEN {
            return Err(InvalidCityName(raw.to_string()));
        }

        if !trimmed.chars().all(Self::is_allowed_char) {
            return Err(InvalidCityName(raw.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    fn is_allowed_char(c: char) -> bool {
        c.is_ascii_alphabetic()
            || ('А'..='я').contains(&c) // Cyrillic А-Я + а-я
            || c == 'ё'
            || c == 'Ё'
            || matches!(c, ' ' | '-' | '\'' | '.')
    }

    /// View the validated name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the value, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for CityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
