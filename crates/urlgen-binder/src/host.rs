//! Where generated URLs point.

use crate::resource::PageLocation;
use std::fmt;
use std::rc::Rc;

/// A literal `scheme://host` prefix with no trailing slash.
///
/// Only built through [`HostConfig::fixed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedHost(String);

impl FixedHost {
    /// The prefix as written into rendered URLs.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The `scheme://host` prefix of every rendered URL.
///
/// Picked when the page is deployed, never switched while it runs.
#[derive(Clone)]
pub enum HostConfig {
    /// A literal prefix such as `https://relay.example`.
    Fixed(FixedHost),
    /// The origin of the page the binder runs in, read at render time.
    PageOrigin(Rc<dyn PageLocation>),
}

impl HostConfig {
    /// A fixed prefix. Trailing slashes are dropped so the path joins cleanly.
    #[must_use]
    pub fn fixed(prefix: &str) -> Self {
        Self::Fixed(FixedHost(prefix.trim_end_matches('/').to_string()))
    }

    /// Follow the hosting page's own origin.
    #[must_use]
    pub fn page_origin(location: Rc<dyn PageLocation>) -> Self {
        Self::PageOrigin(location)
    }

    /// Resolve the prefix now. `None` when the page origin is opaque.
    #[must_use]
    pub fn origin(&self) -> Option<String> {
        match self {
            Self::Fixed(prefix) => Some(prefix.as_str().to_string()),
            Self::PageOrigin(location) => location.origin(),
        }
    }
}

impl fmt::Debug for HostConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(prefix) => f.debug_tuple("Fixed").field(&prefix.as_str()).finish(),
            Self::PageOrigin(_) => f.write_str("PageOrigin"),
        }
    }
}
