use std::fmt::{self, Display};
use std::sync::LazyLock;

use regex::Regex;

static BARE_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+$").unwrap());

/// The key of a leaf or group.
///
/// Bare identifiers are stored verbatim. Quoted atoms are stored with their
/// quotes stripped and the inner text wrapped in parentheses, so `"a b"`
/// becomes `(a b)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyLiteral(String);

impl KeyLiteral {
    /// A key taken verbatim from a bare identifier token.
    pub fn bare(identifier: impl Into<String>) -> Self {
        KeyLiteral(identifier.into())
    }

    /// A key built from the inner text of a quoted token.
    pub fn quoted(inner: &str) -> Self {
        KeyLiteral(format!("({inner})"))
    }

    /// Build a key from a raw atom token, quotes included.
    pub fn from_token(token: &str) -> Self {
        let quoted = token.len() >= 2
            && (token.starts_with('"') && token.ends_with('"')
                || token.starts_with('\'') && token.ends_with('\''));
        if quoted {
            Self::quoted(&token[1..token.len() - 1])
        } else {
            Self::bare(token)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the key is a plain `\w+` identifier.
    pub fn is_identifier(&self) -> bool {
        BARE_IDENTIFIER.is_match(&self.0)
    }

    /// The atom that parses back into this key.
    ///
    /// Keys that came from neither form are quoted as a whole, which does not
    /// round-trip.
    pub fn to_atom(&self) -> String {
        if self.is_identifier() {
            return self.0.clone();
        }
        let inner = self
            .0
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(&self.0);
        if inner.contains('"') {
            format!("'{inner}'")
        } else {
            format!("\"{inner}\"")
        }
    }
}

impl Display for KeyLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KeyLiteral {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for KeyLiteral {
    fn from(token: &str) -> Self {
        Self::from_token(token)
    }
}
