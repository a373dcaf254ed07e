//! Deployment configuration.
//!
//! A deployment picks the host variant, the placeholder and the fields to
//! bind. It is read once, before any field is bound:
//!
//! ```json
//! { "host": { "fixed": "https://relay.example" },
//!   "placeholder": "",
//!   "debounce_ms": 10,
//!   "fields": ["tag", "instance"] }
//! ```
//!
//! `"host": "page-origin"` follows the page's own location instead.

use crate::binder::{DEFAULT_DEBOUNCE, FieldUrlBinder};
use crate::host::HostConfig;
use crate::resource::PageLocation;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;
use std::{fs, io};
use thiserror::Error;
use urlgen_common::url::origin;

/// Fields bound when the configuration does not name any.
pub const DEFAULT_FIELDS: [&str; 2] = ["tag", "instance"];

/// Error loading a [`DeployConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The JSON did not match the expected shape.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A fixed host was configured as the empty string.
    #[error("fixed host must not be empty")]
    EmptyHost,
    /// A fixed host that is not an absolute `http(s)` URL, such as a bare
    /// hostname without a scheme.
    #[error("fixed host '{host}' is not an absolute http(s) URL")]
    InvalidHost {
        /// The configured host.
        host: String,
    },
    /// One of the configured fields is the empty string.
    #[error("field identifiers must not be empty")]
    EmptyFieldId,
}

/// Which host variant a deployment uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostSetting {
    /// Literal `scheme://host` prefix.
    Fixed(String),
    /// The serving page's origin.
    PageOrigin,
}

/// Everything that differs between deployments of the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    /// Host variant.
    pub host: HostSetting,
    /// Text shown while a field is empty.
    #[serde(default)]
    pub placeholder: String,
    /// Debounce delay in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Field identifiers to bind.
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,
}

fn default_debounce_ms() -> u64 {
    u64::try_from(DEFAULT_DEBOUNCE.as_millis()).unwrap_or(u64::MAX)
}

fn default_fields() -> Vec<String> {
    DEFAULT_FIELDS.iter().map(ToString::to_string).collect()
}

impl DeployConfig {
    /// A deployment pinned to `host`, with an empty placeholder.
    #[must_use]
    pub fn fixed(host: &str) -> Self {
        Self {
            host: HostSetting::Fixed(host.to_string()),
            placeholder: String::new(),
            debounce_ms: default_debounce_ms(),
            fields: default_fields(),
        }
    }

    /// A deployment following the page origin, with a newline placeholder
    /// so the display element keeps its height.
    #[must_use]
    pub fn page_origin() -> Self {
        Self {
            host: HostSetting::PageOrigin,
            placeholder: "\n".to_string(),
            debounce_ms: default_debounce_ms(),
            fields: default_fields(),
        }
    }

    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown keys, and
    /// a validation error for empty or schemeless hosts and empty field
    /// identifiers.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`DeployConfig::from_json`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check the invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyHost`], [`ConfigError::InvalidHost`] when a
    /// fixed host has no tuple origin, or [`ConfigError::EmptyFieldId`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let HostSetting::Fixed(host) = &self.host {
            if host.trim_end_matches('/').is_empty() {
                return Err(ConfigError::EmptyHost);
            }
            if origin(host).is_none() {
                return Err(ConfigError::InvalidHost { host: host.clone() });
            }
        }
        if self.fields.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyFieldId);
        }
        Ok(())
    }

    /// Build the binder for this deployment.
    ///
    /// `location` is only consulted for [`HostSetting::PageOrigin`].
    #[must_use]
    pub fn binder(&self, location: Rc<dyn PageLocation>) -> FieldUrlBinder {
        let host = match &self.host {
            HostSetting::Fixed(prefix) => HostConfig::fixed(prefix),
            HostSetting::PageOrigin => HostConfig::page_origin(location),
        };
        FieldUrlBinder::new(host)
            .with_placeholder(self.placeholder.clone())
            .with_debounce(Duration::from_millis(self.debounce_ms))
    }

    /// Field identifiers as string slices.
    #[must_use]
    pub fn field_ids(&self) -> Vec<&str> {
        self.fields.iter().map(String::as_str).collect()
    }
}
