//! Input events the binder listens to.
//!
//! [UI Events § 5.5 Keyboard Events](https://www.w3.org/TR/uievents/#events-keyboardevents)
//! [HTML § 4.10.5.5 Common event behaviors](https://html.spec.whatwg.org/multipage/input.html#common-input-element-events)

use strum_macros::{Display, EnumIter, EnumString};

/// An edit signal emitted by a source input.
///
/// Both kinds go through the same handling path: a partial keystroke and a
/// committed edit are treated identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum EventKind {
    /// "The change event fires when the value is committed."
    #[strum(serialize = "change")]
    Change,
    /// A key was released while the input had focus.
    #[strum(serialize = "keyup")]
    KeyUp,
}
