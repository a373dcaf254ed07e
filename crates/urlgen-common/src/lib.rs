//! Common utilities for urlgen.
//!
//! This crate provides shared infrastructure used by the DOM and binder crates:
//! - **Warning System** - deduplicated, colored diagnostics on stderr
//! - **URL Utilities** - `encodeURIComponent` and origin serialization

pub mod url;
pub mod warning;
