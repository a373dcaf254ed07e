//! The value transform applied on every render.

use urlgen_common::url::{EncodeError, encode_uri_component};
use urlgen_dom::DomString;

/// U+0023 NUMBER SIGN.
const NUMBER_SIGN: u16 = 0x0023;

/// Strip one leading `#` and percent-encode the rest as a path segment.
///
/// Anchor-style values (`#music`) are treated as their bare identifier.
/// Only the first `#` goes; `##x` becomes `%23x`.
///
/// # Errors
///
/// Returns [`EncodeError`] if the value holds an unpaired surrogate.
pub fn normalize(raw: &DomString) -> Result<String, EncodeError> {
    let units = raw.code_units();
    let bare = units.strip_prefix(&[NUMBER_SIGN]).unwrap_or(units);
    encode_uri_component(bare)
}
