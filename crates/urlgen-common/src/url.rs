//! URL utilities.
//!
//! [ECMAScript § 19.2.6 URI Handling Functions](https://tc39.es/ecma262/#sec-uri-handling-functions)
//! [URL Standard](https://url.spec.whatwg.org/)

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;
use ::url::Url;

/// [§ 19.2.6.5 encodeURIComponent](https://tc39.es/ecma262/#sec-encodeuricomponent-uricomponent)
///
/// "Let extraUnescaped be the empty String." The unescaped set is therefore
/// uriAlpha, `DecimalDigit` and uriMark: `- _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Error raised when a DOM string cannot be percent-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// [§ 19.2.6.6 Encode](https://tc39.es/ecma262/#sec-encode)
    ///
    /// "If cp.[[IsUnpairedSurrogate]] is true, throw a URIError exception."
    #[error("unpaired surrogate 0x{unit:04X} at code unit {index}")]
    UnpairedSurrogate {
        /// Offending code unit.
        unit: u16,
        /// Position of the code unit in the input.
        index: usize,
    },
}

/// [§ 19.2.6.5 encodeURIComponent](https://tc39.es/ecma262/#sec-encodeuricomponent-uricomponent)
///
/// Percent-encode a sequence of UTF-16 code units for use as a single URL
/// path segment, exactly as `encodeURIComponent` does.
///
/// # Algorithm
///
/// [§ 19.2.6.6 Encode](https://tc39.es/ecma262/#sec-encode)
///
/// STEP 1: "Let cp be CodePointAt(string, k)."
///
/// STEP 2: "If cp.[[IsUnpairedSurrogate]] is true, throw a URIError exception."
///
/// STEP 3: "Let Octets be the List of octets resulting by applying the UTF-8
///          transformation to cp.[[CodePoint]]." Each octet not in the
///          unescaped set becomes `%XY` with uppercase hex digits.
///
/// # Errors
///
/// Returns [`EncodeError::UnpairedSurrogate`] if the input holds a lone
/// surrogate code unit.
pub fn encode_uri_component(units: &[u16]) -> Result<String, EncodeError> {
    // STEP 1-2: Decode to scalar values, rejecting lone surrogates.
    let mut decoded = String::with_capacity(units.len());
    let mut index = 0;
    for result in char::decode_utf16(units.iter().copied()) {
        match result {
            Ok(c) => {
                decoded.push(c);
                index += c.len_utf16();
            }
            Err(e) => {
                return Err(EncodeError::UnpairedSurrogate {
                    unit: e.unpaired_surrogate(),
                    index,
                });
            }
        }
    }

    // STEP 3: UTF-8 transform and escape.
    Ok(utf8_percent_encode(&decoded, URI_COMPONENT).to_string())
}

/// [§ 4.6 URL serializing](https://url.spec.whatwg.org/#concept-url-origin)
/// [HTML § 7.1.1 Origins](https://html.spec.whatwg.org/multipage/browsers.html#ascii-serialisation-of-an-origin)
///
/// Return the ASCII serialization of a URL's origin: `scheme://host[:port]`.
///
/// Returns `None` for URLs that fail to parse, and for opaque origins
/// (`file:`, `data:`, `about:blank`, ...).
#[must_use]
pub fn origin(url: &str) -> Option<String> {
    // STEP 1: "Let url be the result of running the basic URL parser."
    let url = Url::parse(url).ok()?;

    // STEP 2: "If url's scheme is not special, return a new opaque origin."
    let origin = url.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_unreserved_marks_pass_through() {
        assert_eq!(
            encode_uri_component(&units("-_.!~*'()")).unwrap(),
            "-_.!~*'()"
        );
    }

    #[test]
    fn test_lone_low_surrogate_reports_index() {
        let mut input = units("ab");
        input.push(0xDC00);
        assert_eq!(
            encode_uri_component(&input),
            Err(EncodeError::UnpairedSurrogate {
                unit: 0xDC00,
                index: 2
            })
        );
    }
}
