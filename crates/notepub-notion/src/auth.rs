//! Integration token handling.

use std::fmt;

use crate::error::TokenError;

/// Prefixes of Notion internal integration tokens.
///
/// `secret_` is the historical format, `ntn_` the current one.
pub const TOKEN_PREFIXES: &[&str] = &["secret_", "ntn_"];

/// Upper bound on the leading characters kept visible by [`ApiToken::masked`].
const VISIBLE_CHARS: usize = 10;

/// Notion integration token with a verified prefix.
///
/// `Debug` and [`ApiToken::masked`] show at most the first 10 characters
/// and never more than half of the token.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Validate a raw token.
    ///
    /// Surrounding whitespace is ignored. Only the prefix is checked.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] if the token is empty or has an unknown prefix.
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(TokenError::Empty);
        }
        if !TOKEN_PREFIXES.iter().any(|prefix| token.starts_with(prefix)) {
            return Err(TokenError::BadPrefix {
                expected: TOKEN_PREFIXES,
            });
        }
        Ok(Self(token.to_owned()))
    }

    /// Leading characters of the token followed by `...`.
    ///
    /// Shows `min(10, len / 2)` characters, so short tokens stay hidden too.
    pub fn masked(&self) -> String {
        let shown = VISIBLE_CHARS.min(self.0.chars().count() / 2);
        let visible: String = self.0.chars().take(shown).collect();
        format!("{visible}...")
    }

    /// Value for the `Authorization` header.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&self.masked()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_secret_prefix() {
        let token = ApiToken::parse("secret_abcdefghijklmnop").unwrap();
        assert_eq!(token.bearer(), "Bearer secret_abcdefghijklmnop");
    }

    #[test]
    fn test_parse_ntn_prefix() {
        assert!(ApiToken::parse("ntn_1234567890").is_ok());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let token = ApiToken::parse("  secret_abc\n").unwrap();
        assert_eq!(token.bearer(), "Bearer secret_abc");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(ApiToken::parse("   "), Err(TokenError::Empty)));
    }

    #[test]
    fn test_parse_wrong_prefix() {
        let err = ApiToken::parse("Bearer abc").unwrap_err();
        assert!(matches!(err, TokenError::BadPrefix { .. }));
        assert_eq!(
            err.to_string(),
            "token should start with one of: secret_, ntn_"
        );
    }

    #[test]
    fn test_masked_keeps_ten_chars() {
        let token = ApiToken::parse("secret_abcdefghijklmnop").unwrap();
        assert_eq!(token.masked(), "secret_abc...");
    }

    #[test]
    fn test_masked_hides_at_least_half_of_short_token() {
        let token = ApiToken::parse("ntn_x").unwrap();
        assert_eq!(token.masked(), "nt...");

        let token = ApiToken::parse("secret_x").unwrap();
        assert_eq!(token.masked(), "secr...");
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = ApiToken::parse("secret_abcdefghijklmnop").unwrap();
        let debug = format!("{token:?}");
        assert!(!debug.contains("defghijklmnop"));
    }
}
