//! Seams between the binder and the page hosting it.
//!
//! The binder never touches the DOM directly. It reads a [`Source`], writes a
//! [`Destination`], defers work through a [`Scheduler`] and, for the
//! page-origin host variant, asks a [`PageLocation`] where it is served from.
//! [`crate::page::Page`] implements all of them on top of a DOM tree; tests
//! substitute fakes.

use crate::event::EventKind;
use std::rc::Rc;
use std::time::Duration;
use urlgen_dom::DomString;

/// Callback invoked for every edit signal.
pub type Listener = Rc<dyn Fn(EventKind)>;

/// One-shot deferred work.
pub type Task = Box<dyn FnOnce()>;

/// An input the user types into.
pub trait Source {
    /// The current raw value.
    fn value(&self) -> DomString;

    /// Register `listener` for both `change` and `keyup` signals.
    fn add_listener(&self, listener: Listener);
}

/// An element whose text the binder owns.
pub trait Destination {
    /// Replace all existing content with `text`.
    fn replace_text(&self, text: &str);
}

/// Runs tasks later on the same thread.
pub trait Scheduler {
    /// Run `task` once, `delay` from now.
    fn schedule(&self, delay: Duration, task: Task);
}

/// The hosting page's location.
pub trait PageLocation {
    /// ASCII serialization of the page's origin, `None` if it is opaque.
    fn origin(&self) -> Option<String>;
}

impl<T: Source + ?Sized> Source for Rc<T> {
    fn value(&self) -> DomString {
        (**self).value()
    }

    fn add_listener(&self, listener: Listener) {
        (**self).add_listener(listener);
    }
}

impl<T: Destination + ?Sized> Destination for Rc<T> {
    fn replace_text(&self, text: &str) {
        (**self).replace_text(text);
    }
}

impl<T: Scheduler + ?Sized> Scheduler for Rc<T> {
    fn schedule(&self, delay: Duration, task: Task) {
        (**self).schedule(delay, task);
    }
}
