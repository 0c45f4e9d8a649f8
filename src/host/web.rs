//! Browser host backed by `web-sys`.
//!
//! [`mount`] builds a [`WebHost`], initializes a [`Page`] on it and forwards
//! window and document events to [`Page::dispatch`]. Observer, frame and
//! timer callbacks reach the page through the same sink.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use js_sys::Array;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::config::PageConfig;
use crate::error::HostError;
use crate::events::{EventOutcome, HostEvent};
use crate::host::{
    ElementId, Host, IntersectionEntry, MotionPreference, ObserverId, ObserverOptions,
    ScrollBehavior, TimerId,
};
use crate::page::Page;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

type Dispatcher = Box<dyn FnMut(HostEvent) -> EventOutcome>;
type Sink = Rc<RefCell<Option<Dispatcher>>>;
type Registry = Rc<RefCell<Vec<Element>>>;
type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub struct WebHost {
    window: Window,
    document: Document,
    registry: Registry,
    sink: Sink,
    observers: Vec<(IntersectionObserver, ObserverCallback)>,
    frame: Option<AnimationFrame>,
    timers: HashMap<TimerId, Timeout>,
    fired: Rc<RefCell<Vec<TimerId>>>,
    /// Timer whose callback is on the stack.
    running: Rc<Cell<Option<TimerId>>>,
    next_timer: u64,
}

impl WebHost {
    pub fn new() -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::UnsupportedCapability {
            capability: "window",
        })?;
        let document = window.document().ok_or(HostError::UnsupportedCapability {
            capability: "document",
        })?;
        Ok(Self {
            window,
            document,
            registry: Rc::new(RefCell::new(Vec::new())),
            sink: Rc::new(RefCell::new(None)),
            observers: Vec::new(),
            frame: None,
            timers: HashMap::new(),
            fired: Rc::new(RefCell::new(Vec::new())),
            running: Rc::new(Cell::new(None)),
            next_timer: 1,
        })
    }

    fn element(&self, id: ElementId) -> Option<Element> {
        self.registry.borrow().get(id.0).cloned()
    }

    fn html(&self, id: ElementId) -> Option<HtmlElement> {
        self.element(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    /// Releases handles of timers that already fired. The handle of the
    /// running callback must outlive the call, so it stays queued until the
    /// next prune.
    fn prune_timers(&mut self) {
        let released = release_fired(&mut self.fired.borrow_mut(), self.running.get());
        for timer in released {
            drop(self.timers.remove(&timer));
        }
    }
}

/// Splits fired timers into those whose handles can be dropped now and the
/// running one, which is left in `fired`.
fn release_fired(fired: &mut Vec<TimerId>, running: Option<TimerId>) -> Vec<TimerId> {
    let (kept, released): (Vec<TimerId>, Vec<TimerId>) = fired
        .drain(..)
        .partition(|timer| Some(*timer) == running);
    *fired = kept;
    released
}

fn register(registry: &Registry, element: Element) -> ElementId {
    let mut elements = registry.borrow_mut();
    if let Some(index) = elements
        .iter()
        .position(|known| known.is_same_node(Some(&*element)))
    {
        return ElementId(index);
    }
    elements.push(element);
    ElementId(elements.len() - 1)
}

fn emit(sink: &Sink, event: HostEvent) -> EventOutcome {
    match sink.try_borrow_mut() {
        Ok(mut dispatcher) => match dispatcher.as_mut() {
            Some(dispatch) => dispatch(event),
            None => EventOutcome::ignored(),
        },
        Err(_) => {
            tracing::trace!("Dropped host event during dispatch: {:?}", event);
            EventOutcome::ignored()
        }
    }
}

fn js_message(value: JsValue) -> HostError {
    HostError::Js {
        message: value.as_string().unwrap_or_else(|| format!("{:?}", value)),
    }
}

impl Host for WebHost {
    fn query_all(&mut self, selector: &str) -> Vec<ElementId> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            tracing::debug!("Invalid selector '{}'", selector);
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| register(&self.registry, element))
            .collect()
    }

    fn is_within(&self, element: ElementId, selector: &str) -> bool {
        self.element(element)
            .and_then(|element| element.closest(selector).ok().flatten())
            .is_some()
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(element) = self.element(element) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(element) = self.element(element) {
            let _ = element.class_list().remove_1(class);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.element(element)
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(element) = self.html(element) {
            let _ = element.style().set_property(property, value);
        }
    }

    fn remove_style(&mut self, element: ElementId, property: &str) {
        if let Some(element) = self.html(element) {
            let _ = element.style().remove_property(property);
        }
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element)
            .and_then(|element| element.get_attribute(name))
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(element) = self.element(element) {
            let _ = element.set_attribute(name, value);
        }
    }

    fn text(&self, element: ElementId) -> String {
        self.element(element)
            .and_then(|element| element.text_content())
            .unwrap_or_default()
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(element) = self.element(element) {
            element.set_text_content(Some(text));
        }
    }

    fn offset_top(&self, element: ElementId) -> f64 {
        self.html(element)
            .map(|element| f64::from(element.offset_top()))
            .unwrap_or_default()
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn motion_preference(&self) -> MotionPreference {
        match self.window.match_media(REDUCED_MOTION_QUERY) {
            Ok(Some(query)) if query.matches() => MotionPreference::Reduced,
            _ => MotionPreference::Full,
        }
    }

    fn create_observer(&mut self, options: ObserverOptions) -> Result<ObserverId, HostError> {
        let has_observer = js_sys::Reflect::has(&self.window, &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false);
        if !has_observer {
            return Err(HostError::UnsupportedCapability {
                capability: "IntersectionObserver",
            });
        }

        let id = ObserverId(self.observers.len());
        let registry = Rc::clone(&self.registry);
        let sink = Rc::clone(&self.sink);
        let callback: ObserverCallback = Closure::new(move |records: Array, _: IntersectionObserver| {
            let entries: Vec<IntersectionEntry> = records
                .iter()
                .filter_map(|record| record.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|record| IntersectionEntry {
                    target: register(&registry, record.target()),
                    is_intersecting: record.is_intersecting(),
                    ratio: record.intersection_ratio(),
                })
                .collect();
            emit(&sink, HostEvent::Intersections { observer: id, entries });
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin());
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(js_message)?;

        self.observers.push((observer, callback));
        Ok(id)
    }

    fn observe(&mut self, observer: ObserverId, element: ElementId) {
        if let (Some((observer, _)), Some(element)) = (self.observers.get(observer.0), self.element(element)) {
            observer.observe(&element);
        }
    }

    fn unobserve(&mut self, observer: ObserverId, element: ElementId) {
        if let (Some((observer, _)), Some(element)) = (self.observers.get(observer.0), self.element(element)) {
            observer.unobserve(&element);
        }
    }

    fn disconnect(&mut self, observer: ObserverId) {
        if let Some((observer, _)) = self.observers.get(observer.0) {
            observer.disconnect();
        }
    }

    fn request_frame(&mut self) {
        let sink = Rc::clone(&self.sink);
        self.frame = Some(request_animation_frame(move |_timestamp| {
            emit(&sink, HostEvent::FrameTick);
        }));
    }

    fn cancel_frame(&mut self) {
        self.frame = None;
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.prune_timers();

        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        let sink = Rc::clone(&self.sink);
        let fired = Rc::clone(&self.fired);
        let running = Rc::clone(&self.running);
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, move || {
            fired.borrow_mut().push(id);
            running.set(Some(id));
            emit(&sink, HostEvent::Timer(id));
            running.set(None);
        });
        self.timers.insert(id, timeout);
        id
    }

    fn clear_timeout(&mut self, timer: TimerId) {
        self.prune_timers();
        if self.running.get() == Some(timer) {
            return;
        }
        // Dropping a pending timeout clears it.
        drop(self.timers.remove(&timer));
    }

    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior) {
        let Some(element) = self.element(element) else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// A page wired to the browser. Dropping it removes the event listeners.
pub struct MountedPage {
    page: Rc<RefCell<Page<WebHost>>>,
    _listeners: Vec<EventListener>,
}

impl MountedPage {
    pub fn page(&self) -> Rc<RefCell<Page<WebHost>>> {
        Rc::clone(&self.page)
    }
}

pub fn mount(config: PageConfig) -> Result<MountedPage, HostError> {
    let host = WebHost::new()?;
    let window = host.window.clone();
    let document = host.document.clone();
    let registry = Rc::clone(&host.registry);
    let sink = Rc::clone(&host.sink);
    let clickable = config.click_selector();

    let page = Rc::new(RefCell::new(Page::init(host, config)));
    let weak: Weak<RefCell<Page<WebHost>>> = Rc::downgrade(&page);
    *sink.borrow_mut() = Some(Box::new(move |event: HostEvent| {
        let Some(page) = weak.upgrade() else {
            return EventOutcome::ignored();
        };
        let Ok(mut page) = page.try_borrow_mut() else {
            return EventOutcome::ignored();
        };
        page.dispatch(event)
    }));

    let mut listeners = Vec::new();

    let scroll_sink = Rc::clone(&sink);
    let scroll_window = window.clone();
    listeners.push(EventListener::new(&window, "scroll", move |_| {
        let offset = scroll_window.scroll_y().unwrap_or_default();
        emit(&scroll_sink, HostEvent::Scroll { offset });
    }));

    let visibility_sink = Rc::clone(&sink);
    let visibility_document = document.clone();
    listeners.push(EventListener::new(&document, "visibilitychange", move |_| {
        let hidden = visibility_document.hidden();
        emit(&visibility_sink, HostEvent::VisibilityChange { hidden });
    }));

    let key_sink = Rc::clone(&sink);
    listeners.push(EventListener::new(&document, "keydown", move |event: &Event| {
        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
            emit(&key_sink, HostEvent::Key { key: event.key() });
        }
    }));

    let click_sink = Rc::clone(&sink);
    listeners.push(EventListener::new_with_options(
        &document,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            let Some(target) = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.closest(&clickable).ok().flatten())
            else {
                return;
            };
            let target = register(&registry, target);
            if emit(&click_sink, HostEvent::Click { target }).default_prevented {
                event.prevent_default();
            }
        },
    ));

    let unload_sink = Rc::clone(&sink);
    listeners.push(EventListener::new(&window, "pagehide", move |_| {
        emit(&unload_sink, HostEvent::Unload);
    }));

    Ok(MountedPage {
        page,
        _listeners: listeners,
    })
}

/// Wasm entry point: mounts the page with the default configuration for
/// the rest of the document's life.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    start_with_config("")
}

/// Like [`start`], with a TOML page configuration.
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(config: &str) -> Result<(), JsValue> {
    crate::logging::init_browser_tracing();
    let config =
        PageConfig::from_toml_str(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let mounted = mount(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    // Listeners live as long as the document.
    std::mem::forget(mounted);
    Ok(())
}
