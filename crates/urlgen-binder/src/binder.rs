//! The field-to-URL binder.
//!
//! # Algorithm
//!
//! On every `change` or `keyup` from the source, schedule a render after the
//! debounce delay. Pending renders are never cancelled; render is a pure
//! function of the field id, the host and the current value, so an extra
//! render only repeats the same write.
//!
//! Render:
//!
//! STEP 1: Read the raw value from the source.
//!
//! STEP 2: Strip one leading `#`.
//!
//! STEP 3: Percent-encode the rest as a single path segment.
//!
//! STEP 4: If the result is empty, write the placeholder.
//!
//! STEP 5: Otherwise write `scheme://host/<field>/<encoded>`.

use crate::event::EventKind;
use crate::host::HostConfig;
use crate::normalize::normalize;
use crate::resource::{Destination, Scheduler, Source};
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use urlgen_common::warning::warn_once;
use urlgen_dom::DomString;

/// Delay between an edit signal and the render it triggers.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(10);

/// ID of the display element paired with `field_id`.
#[must_use]
pub fn destination_id(field_id: &str) -> String {
    format!("{field_id}-url")
}

/// Configuration error raised while binding a field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The field identifier was empty.
    #[error("field identifier must not be empty")]
    EmptyFieldId,
    /// No input element carries the field's ID.
    #[error("field '{field_id}' has no source element '{field_id}'")]
    MissingSource {
        /// Field being bound.
        field_id: String,
    },
    /// No display element carries `<field>-url`.
    #[error("field '{field_id}' has no destination element '{destination_id}'")]
    MissingDestination {
        /// Field being bound.
        field_id: String,
        /// ID that was looked up.
        destination_id: String,
    },
}

/// Proof that a field is bound. Bindings live as long as the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    field_id: String,
}

impl Binding {
    /// The bound field.
    #[must_use]
    pub fn field_id(&self) -> &str {
        &self.field_id
    }
}

/// Renders a field's value as a relay URL into its display element.
#[derive(Debug, Clone)]
pub struct FieldUrlBinder {
    host: HostConfig,
    placeholder: String,
    debounce: Duration,
}

impl FieldUrlBinder {
    /// A binder with an empty placeholder and the default debounce.
    #[must_use]
    pub fn new(host: HostConfig) -> Self {
        Self {
            host,
            placeholder: String::new(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Text written when the value normalizes to nothing.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Delay between a signal and its render.
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// The configured host.
    #[must_use]
    pub const fn host(&self) -> &HostConfig {
        &self.host
    }

    /// The configured placeholder.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// The configured debounce delay.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Subscribe to `source` and keep `destination` rendered from it.
    ///
    /// Nothing is rendered until the first signal arrives.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::EmptyFieldId`] if `field_id` is empty.
    pub fn bind<S, D, T>(
        &self,
        field_id: &str,
        source: S,
        destination: D,
        scheduler: T,
    ) -> Result<Binding, BindError>
    where
        S: Source + 'static,
        D: Destination + 'static,
        T: Scheduler + 'static,
    {
        if field_id.is_empty() {
            return Err(BindError::EmptyFieldId);
        }

        let job = Rc::new(RenderJob {
            binder: self.clone(),
            field_id: field_id.to_string(),
            source,
            destination,
        });
        let delay = self.debounce;

        job.source.add_listener(Rc::new({
            let job = Rc::clone(&job);
            move |_event: EventKind| {
                let job = Rc::clone(&job);
                scheduler.schedule(delay, Box::new(move || job.run()));
            }
        }));

        Ok(Binding {
            field_id: field_id.to_string(),
        })
    }

    /// Compute what the display element should show for `raw`.
    ///
    /// Unencodable values and an opaque page origin fall back to the
    /// placeholder with a one-time diagnostic.
    #[must_use]
    pub fn render(&self, field_id: &str, raw: &DomString) -> String {
        // STEP 2-3
        let encoded = match normalize(raw) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn_once("binder", &format!("field '{field_id}': cannot encode value: {e}"));
                return self.placeholder.clone();
            }
        };

        // STEP 4
        if encoded.is_empty() {
            return self.placeholder.clone();
        }

        // STEP 5
        let Some(origin) = self.host.origin() else {
            warn_once("binder", &format!("field '{field_id}': page origin is opaque"));
            return self.placeholder.clone();
        };
        format!("{origin}/{field_id}/{encoded}")
    }
}

/// Everything a pending render needs, shared by all its timers.
struct RenderJob<S, D> {
    binder: FieldUrlBinder,
    field_id: String,
    source: S,
    destination: D,
}

impl<S: Source, D: Destination> RenderJob<S, D> {
    fn run(&self) {
        // STEP 1
        let raw = self.source.value();
        let output = self.binder.render(&self.field_id, &raw);
        self.destination.replace_text(&output);
    }
}
