use std::fmt;

use rand::{rngs::OsRng, RngCore};
use uuid::{Builder, Uuid};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "sessionId";

/// Lifetime attached to the cookie; the server never expires a token itself.
pub const SESSION_MAX_AGE_DAYS: i64 = 7;

/// Opaque session credential. 122 random bits from the OS CSPRNG, rendered as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        Self(Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Returns `None` for anything that is not a well-formed token.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_tokens_are_v4_and_distinct() {
        let tokens: HashSet<SessionToken> = (0..1000).map(|_| SessionToken::generate()).collect();
        assert_eq!(tokens.len(), 1000);
        for t in &tokens {
            assert_eq!(t.as_uuid().get_version_num(), 4);
        }
    }

    #[test]
    fn display_then_parse_yields_same_token() {
        let token = SessionToken::generate();
        assert_eq!(SessionToken::parse(&token.to_string()), Some(token));
    }

    #[test]
    fn parse_rejects_malformed_values() {
        assert_eq!(SessionToken::parse(""), None);
        assert_eq!(SessionToken::parse("not-a-token"), None);
        assert_eq!(SessionToken::parse("1234"), None);
    }
}
