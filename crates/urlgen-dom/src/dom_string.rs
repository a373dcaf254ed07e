//! [WebIDL § 3.2.10 DOMString](https://webidl.spec.whatwg.org/#idl-DOMString)
//!
//! "The DOMString type corresponds to the set of all possible sequences of
//! code units."

use std::fmt;

/// A sequence of UTF-16 code units, which need not be well-formed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DomString(Vec<u16>);

impl DomString {
    /// Create an empty DOM string.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Wrap raw code units. Lone surrogates are allowed.
    #[must_use]
    pub const fn from_code_units(units: Vec<u16>) -> Self {
        Self(units)
    }

    /// The underlying code units.
    #[must_use]
    pub fn code_units(&self) -> &[u16] {
        &self.0
    }

    /// Number of code units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the string holds no code units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to a Rust string, replacing lone surrogates with U+FFFD.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }
}

impl From<&str> for DomString {
    fn from(s: &str) -> Self {
        Self(s.encode_utf16().collect())
    }
}

impl From<String> for DomString {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl fmt::Display for DomString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
