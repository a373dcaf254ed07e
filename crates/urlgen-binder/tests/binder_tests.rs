//! Tests for `FieldUrlBinder` against fake resources.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use urlgen_binder::{
    BindError, Destination, DomString, EventKind, FieldUrlBinder, HostConfig, Listener,
    PageLocation, Source, TimerQueue,
};

#[derive(Default)]
struct FakeInput {
    value: RefCell<DomString>,
    listeners: RefCell<Vec<Listener>>,
}

impl FakeInput {
    fn set(&self, text: &str) {
        *self.value.borrow_mut() = DomString::from(text);
    }

    fn fire(&self, kind: EventKind) {
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(kind);
        }
    }
}

impl Source for FakeInput {
    fn value(&self) -> DomString {
        self.value.borrow().clone()
    }

    fn add_listener(&self, listener: Listener) {
        self.listeners.borrow_mut().push(listener);
    }
}

#[derive(Default)]
struct FakeDisplay {
    writes: RefCell<Vec<String>>,
}

impl FakeDisplay {
    fn last(&self) -> Option<String> {
        self.writes.borrow().last().cloned()
    }

    fn count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl Destination for FakeDisplay {
    fn replace_text(&self, text: &str) {
        self.writes.borrow_mut().push(text.to_string());
    }
}

struct FakeLocation(RefCell<Option<String>>);

impl PageLocation for FakeLocation {
    fn origin(&self) -> Option<String> {
        self.0.borrow().clone()
    }
}

struct Fixture {
    input: Rc<FakeInput>,
    display: Rc<FakeDisplay>,
    timers: Rc<TimerQueue>,
}

fn bind(binder: &FieldUrlBinder, field_id: &str) -> Fixture {
    let fixture = Fixture {
        input: Rc::new(FakeInput::default()),
        display: Rc::new(FakeDisplay::default()),
        timers: Rc::new(TimerQueue::new()),
    };
    let binding = binder
        .bind(
            field_id,
            Rc::clone(&fixture.input),
            Rc::clone(&fixture.display),
            Rc::clone(&fixture.timers),
        )
        .unwrap();
    assert_eq!(binding.field_id(), field_id);
    fixture
}

fn example_binder() -> FieldUrlBinder {
    FieldUrlBinder::new(HostConfig::fixed("https://example.test"))
}

// ========== render ==========

#[test]
fn test_render_tag() {
    assert_eq!(
        example_binder().render("tag", &DomString::from("music")),
        "https://example.test/tag/music"
    );
}

#[test]
fn test_render_instance_strips_hash() {
    assert_eq!(
        example_binder().render("instance", &DomString::from("#mastodon.social")),
        "https://example.test/instance/mastodon.social"
    );
}

#[test]
fn test_render_encodes_space() {
    assert_eq!(
        example_binder().render("tag", &DomString::from("foo bar")),
        "https://example.test/tag/foo%20bar"
    );
}

#[test]
fn test_render_double_hash() {
    assert_eq!(
        example_binder().render("tag", &DomString::from("##x")),
        "https://example.test/tag/%23x"
    );
}

#[test]
fn test_render_empty_uses_placeholder() {
    let binder = example_binder().with_placeholder("\n");
    assert_eq!(binder.render("tag", &DomString::new()), "\n");
    assert_eq!(binder.render("tag", &DomString::from("#")), "\n");
    assert_eq!(example_binder().render("tag", &DomString::new()), "");
}

#[test]
fn test_render_unencodable_uses_placeholder() {
    let binder = example_binder().with_placeholder("-");
    let raw = DomString::from_code_units(vec![0x61, 0xDFFF]);
    assert_eq!(binder.render("tag", &raw), "-");
}

#[test]
fn test_render_fixed_host_trailing_slash() {
    let binder = FieldUrlBinder::new(HostConfig::fixed("https://example.test/"));
    assert_eq!(
        binder.render("tag", &DomString::from("a")),
        "https://example.test/tag/a"
    );
}

#[test]
fn test_fixed_host_is_always_trimmed() {
    let host = HostConfig::fixed("https://x//");
    let HostConfig::Fixed(prefix) = &host else {
        panic!("expected a fixed host, got {host:?}");
    };
    assert_eq!(prefix.as_str(), "https://x");
    assert_eq!(host.origin().as_deref(), Some("https://x"));

    let binder = FieldUrlBinder::new(host);
    assert_eq!(binder.render("tag", &DomString::from("a")), "https://x/tag/a");
}

#[test]
fn test_render_page_origin_read_at_render_time() {
    let location = Rc::new(FakeLocation(RefCell::new(Some("https://one.test".to_string()))));
    let binder = FieldUrlBinder::new(HostConfig::page_origin(location.clone()));
    assert_eq!(binder.render("tag", &DomString::from("a")), "https://one.test/tag/a");

    *location.0.borrow_mut() = Some("https://two.test".to_string());
    assert_eq!(binder.render("tag", &DomString::from("a")), "https://two.test/tag/a");
}

#[test]
fn test_render_opaque_origin_uses_placeholder() {
    let location = Rc::new(FakeLocation(RefCell::new(None)));
    let binder = FieldUrlBinder::new(HostConfig::page_origin(location)).with_placeholder("?");
    assert_eq!(binder.render("tag", &DomString::from("a")), "?");
}

// ========== bind ==========

#[test]
fn test_bind_rejects_empty_field_id() {
    let result = example_binder().bind(
        "",
        FakeInput::default(),
        FakeDisplay::default(),
        TimerQueue::new(),
    );
    assert_eq!(result, Err(BindError::EmptyFieldId));
}

#[test]
fn test_nothing_rendered_before_first_signal() {
    let f = bind(&example_binder(), "tag");
    f.input.set("music");
    assert_eq!(f.timers.run_until_idle(), 0);
    assert_eq!(f.display.count(), 0);
}

#[test]
fn test_render_waits_for_debounce() {
    let f = bind(&example_binder(), "tag");
    f.input.set("music");
    f.input.fire(EventKind::KeyUp);

    assert_eq!(f.timers.advance(Duration::from_millis(9)), 0);
    assert_eq!(f.display.last(), None);

    assert_eq!(f.timers.advance(Duration::from_millis(1)), 1);
    assert_eq!(f.display.last().as_deref(), Some("https://example.test/tag/music"));
}

#[test]
fn test_custom_debounce() {
    let f = bind(&example_binder().with_debounce(Duration::from_millis(250)), "tag");
    f.input.set("x");
    f.input.fire(EventKind::Change);
    assert_eq!(f.timers.advance(Duration::from_millis(249)), 0);
    assert_eq!(f.timers.advance(Duration::from_millis(1)), 1);
}

#[test]
fn test_change_and_keyup_take_same_path() {
    let f = bind(&example_binder(), "instance");
    f.input.set("#mastodon.social");
    f.input.fire(EventKind::Change);
    let _ = f.timers.run_until_idle();
    let after_change = f.display.last();

    f.input.fire(EventKind::KeyUp);
    let _ = f.timers.run_until_idle();
    assert_eq!(f.display.last(), after_change);
    assert_eq!(
        after_change.as_deref(),
        Some("https://example.test/instance/mastodon.social")
    );
}

#[test]
fn test_rapid_signals_each_render_and_last_value_wins() {
    let f = bind(&example_binder(), "tag");
    for prefix in ["m", "mu", "mus", "musi", "music"] {
        f.input.set(prefix);
        f.input.fire(EventKind::KeyUp);
        let _ = f.timers.advance(Duration::from_millis(3));
    }

    let _ = f.timers.run_until_idle();
    // No cancellation: one render per signal.
    assert_eq!(f.display.count(), 5);
    assert_eq!(f.display.last().as_deref(), Some("https://example.test/tag/music"));
}

#[test]
fn test_pending_renders_read_value_at_fire_time() {
    let f = bind(&example_binder(), "tag");
    f.input.set("a");
    f.input.fire(EventKind::KeyUp);
    f.input.set("b");
    f.input.fire(EventKind::KeyUp);

    assert_eq!(f.timers.run_until_idle(), 2);
    assert_eq!(
        *f.display.writes.borrow(),
        vec!["https://example.test/tag/b".to_string(); 2]
    );
}

#[test]
fn test_clearing_input_renders_placeholder() {
    let f = bind(&example_binder().with_placeholder("\n"), "tag");
    f.input.set("music");
    f.input.fire(EventKind::KeyUp);
    let _ = f.timers.run_until_idle();

    f.input.set("");
    f.input.fire(EventKind::KeyUp);
    let _ = f.timers.run_until_idle();
    assert_eq!(f.display.last().as_deref(), Some("\n"));
}

#[test]
fn test_two_fields_are_independent() {
    let binder = example_binder();
    let tag = bind(&binder, "tag");
    let instance = bind(&binder, "instance");

    tag.input.set("music");
    tag.input.fire(EventKind::KeyUp);
    let _ = tag.timers.run_until_idle();
    let _ = instance.timers.run_until_idle();

    assert_eq!(tag.display.last().as_deref(), Some("https://example.test/tag/music"));
    assert_eq!(instance.display.count(), 0);
}
