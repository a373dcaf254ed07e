//! A DOM-backed page hosting bound fields.
//!
//! [§ 7.2 The Window object](https://html.spec.whatwg.org/multipage/nav-history-apis.html#the-window-object)
//!
//! `Page` plays the browser's part: it owns the document, the location, the
//! timer queue and the event listeners. Element handles only hold weak
//! references back to the page, so listeners that capture them do not keep
//! the page alive.

use crate::binder::{BindError, Binding, FieldUrlBinder, destination_id};
use crate::event::EventKind;
use crate::resource::{Destination, Listener, PageLocation, Source};
use crate::timers::TimerQueue;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use strum::IntoEnumIterator;
use urlgen_common::url::origin;
use urlgen_common::warning::warn_once;
use urlgen_dom::{DomString, DomTree, NodeId};

struct PageState {
    document: RefCell<DomTree>,
    url: RefCell<String>,
    listeners: RefCell<HashMap<(NodeId, EventKind), Vec<Listener>>>,
}

/// A single page: document, location, timers and listeners.
pub struct Page {
    state: Rc<PageState>,
    timers: Rc<TimerQueue>,
}

impl Page {
    /// Load an empty HTML document at `url`.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self::with_document(url, DomTree::with_skeleton())
    }

    /// Host an existing document at `url`.
    #[must_use]
    pub fn with_document(url: &str, document: DomTree) -> Self {
        Self {
            state: Rc::new(PageState {
                document: RefCell::new(document),
                url: RefCell::new(url.to_string()),
                listeners: RefCell::new(HashMap::new()),
            }),
            timers: Rc::new(TimerQueue::new()),
        }
    }

    /// The page's current URL.
    #[must_use]
    pub fn url(&self) -> String {
        self.state.url.borrow().clone()
    }

    /// Change the page's URL without reloading the document.
    pub fn navigate(&self, url: &str) {
        url.clone_into(&mut self.state.url.borrow_mut());
    }

    /// A live view of the page's location for [`crate::HostConfig::PageOrigin`].
    #[must_use]
    pub fn location(&self) -> Rc<dyn PageLocation> {
        Rc::new(LocationHandle {
            state: Rc::downgrade(&self.state),
        })
    }

    /// The page's timer queue.
    #[must_use]
    pub fn timers(&self) -> Rc<TimerQueue> {
        Rc::clone(&self.timers)
    }

    /// Read the document.
    pub fn read_document<R>(&self, f: impl FnOnce(&DomTree) -> R) -> R {
        f(&self.state.document.borrow())
    }

    /// Mutate the document.
    pub fn update_document<R>(&self, f: impl FnOnce(&mut DomTree) -> R) -> R {
        f(&mut self.state.document.borrow_mut())
    }

    /// Append `<input id=field>` and `<pre id=field-url>` to the body.
    ///
    /// Returns `false` if the document has no body.
    pub fn insert_field_markup(&self, field_id: &str) -> bool {
        self.update_document(|tree| {
            let Some(body) = tree.body() else {
                return false;
            };
            for (tag, id) in [("input", field_id.to_string()), ("pre", destination_id(field_id))] {
                let el = tree.create_element(tag);
                tree.set_attribute(el, "id", &id);
                tree.append_child(body, el);
            }
            true
        })
    }

    /// Look up a connected element by ID.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<ElementHandle> {
        let node = self.read_document(|tree| tree.get_element_by_id(id))?;
        Some(ElementHandle {
            state: Rc::downgrade(&self.state),
            node,
        })
    }

    /// Bind `field_id` to its `<field>-url` display element.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] if the field ID is empty or either element is
    /// missing. Nothing is registered in that case.
    pub fn bind_field(&self, binder: &FieldUrlBinder, field_id: &str) -> Result<Binding, BindError> {
        if field_id.is_empty() {
            return Err(BindError::EmptyFieldId);
        }
        let source = self.element(field_id).ok_or_else(|| BindError::MissingSource {
            field_id: field_id.to_string(),
        })?;
        let destination_id = destination_id(field_id);
        let destination = self
            .element(&destination_id)
            .ok_or_else(|| BindError::MissingDestination {
                field_id: field_id.to_string(),
                destination_id: destination_id.clone(),
            })?;

        binder.bind(field_id, source, destination, self.timers())
    }

    /// Bind every field that can be bound.
    ///
    /// Fields with missing elements are reported once and skipped.
    pub fn bind_fields<'a>(
        &self,
        binder: &FieldUrlBinder,
        field_ids: impl IntoIterator<Item = &'a str>,
    ) -> Vec<Binding> {
        field_ids
            .into_iter()
            .filter_map(|field_id| match self.bind_field(binder, field_id) {
                Ok(binding) => Some(binding),
                Err(e) => {
                    warn_once("page", &e.to_string());
                    None
                }
            })
            .collect()
    }

    /// Set an element's value without firing any event.
    ///
    /// Returns `false` if no element has that ID.
    pub fn set_value(&self, id: &str, value: impl Into<DomString>) -> bool {
        let value = value.into();
        self.update_document(|tree| {
            let Some(node) = tree.get_element_by_id(id) else {
                return false;
            };
            tree.set_value(node, value);
            true
        })
    }

    /// [§ 2.9 Dispatching events](https://dom.spec.whatwg.org/#concept-event-dispatch)
    ///
    /// Invoke the listeners registered on element `id` for `kind`.
    /// Returns how many ran.
    pub fn dispatch_event(&self, id: &str, kind: EventKind) -> usize {
        let Some(node) = self.read_document(|tree| tree.get_element_by_id(id)) else {
            return 0;
        };
        // Clone out first: a listener may register more listeners.
        let listeners = self
            .state
            .listeners
            .borrow()
            .get(&(node, kind))
            .cloned()
            .unwrap_or_default();
        for listener in &listeners {
            listener(kind);
        }
        listeners.len()
    }

    /// Replace the value of `id` and release a key on it.
    pub fn type_text(&self, id: &str, text: &str) -> usize {
        if !self.set_value(id, text) {
            return 0;
        }
        self.dispatch_event(id, EventKind::KeyUp)
    }

    /// Commit the current value of `id`.
    pub fn commit(&self, id: &str) -> usize {
        self.dispatch_event(id, EventKind::Change)
    }

    /// Descendant text of element `id`.
    #[must_use]
    pub fn text_content(&self, id: &str) -> Option<String> {
        self.read_document(|tree| {
            tree.get_element_by_id(id)
                .map(|node| tree.text_content(node))
        })
    }
}

/// A handle to one element of a [`Page`].
///
/// Reads and writes go through the page's document; once the page is
/// dropped the handle reads as empty and ignores writes.
#[derive(Clone)]
pub struct ElementHandle {
    state: Weak<PageState>,
    node: NodeId,
}

impl Source for ElementHandle {
    fn value(&self) -> DomString {
        let Some(state) = self.state.upgrade() else {
            return DomString::new();
        };
        let document = state.document.borrow();
        document.value(self.node).cloned().unwrap_or_default()
    }

    fn add_listener(&self, listener: Listener) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        let mut listeners = state.listeners.borrow_mut();
        for kind in EventKind::iter() {
            listeners
                .entry((self.node, kind))
                .or_default()
                .push(Rc::clone(&listener));
        }
    }
}

impl Destination for ElementHandle {
    fn replace_text(&self, text: &str) {
        if let Some(state) = self.state.upgrade() {
            state.document.borrow_mut().set_text_content(self.node, text);
        }
    }
}

struct LocationHandle {
    state: Weak<PageState>,
}

impl PageLocation for LocationHandle {
    fn origin(&self) -> Option<String> {
        let state = self.state.upgrade()?;
        let url = state.url.borrow();
        origin(&url)
    }
}
