//! Debounced transform-and-render binding of form fields to relay URLs.
//!
//! A relay subscription page has one text input per field (`tag`,
//! `instance`) and a display element next to it (`tag-url`,
//! `instance-url`). Every time the input changes, the binder waits a short
//! debounce window, strips one leading `#`, percent-encodes the rest and
//! writes `scheme://host/<field>/<value>` into the display element.
//!
//! # Example
//!
//! ```ignore
//! use urlgen_binder::{FieldUrlBinder, HostConfig, Page};
//!
//! let page = Page::new("https://relay.example/");
//! page.insert_field_markup("tag");
//! let binder = FieldUrlBinder::new(HostConfig::page_origin(page.location()));
//! page.bind_field(&binder, "tag")?;
//!
//! page.type_text("tag", "#music");
//! page.timers().run_until_idle();
//! assert_eq!(page.text_content("tag-url").as_deref(), Some("https://relay.example/tag/music"));
//! ```
//!
//! # Layout
//!
//! - [`resource`] - the seams the binder talks through (source, destination,
//!   scheduler, page location)
//! - [`normalize`] - the pure value transform
//! - [`binder`] - [`FieldUrlBinder`] itself
//! - [`timers`] - a virtual-clock timer queue
//! - [`page`] - a DOM-backed hosting page
//! - [`config`] - deployment configuration

pub mod binder;
pub mod config;
pub mod event;
pub mod host;
pub mod normalize;
pub mod page;
pub mod resource;
pub mod timers;

pub use binder::{BindError, Binding, DEFAULT_DEBOUNCE, FieldUrlBinder, destination_id};
pub use config::{ConfigError, DeployConfig, HostSetting};
pub use event::EventKind;
pub use host::{FixedHost, HostConfig};
pub use normalize::normalize;
pub use page::{ElementHandle, Page};
pub use resource::{Destination, Listener, PageLocation, Scheduler, Source, Task};
pub use timers::TimerQueue;
pub use urlgen_dom::DomString;
