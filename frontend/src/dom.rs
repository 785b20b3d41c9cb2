use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, NodeList, Window,
};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

pub fn body() -> Option<HtmlElement> {
    document().and_then(|d| d.body())
}

/// Collects a `NodeList` into its element nodes.
pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    match document.query_selector_all(selector) {
        Ok(list) => elements(list),
        Err(e) => {
            warn!("Bad selector {}: {:?}", selector, e);
            Vec::new()
        }
    }
}

pub fn query_one<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Attaches `handler` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
        warn!("Failed to listen for {}: {:?}", event, e);
        return;
    }
    callback.forget();
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        warn!("Failed to set {}: {:?}", property, e);
    }
}

pub fn supports_intersection_observer() -> bool {
    window()
        .map(|w| Reflect::has(&w, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

/// Visibility watcher options.
pub struct WatchOptions<'a> {
    pub threshold: f64,
    pub root_margin: &'a str,
}

impl Default for WatchOptions<'_> {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px",
        }
    }
}

/// Observes `targets` and calls `on_enter` each time one of them becomes
/// visible. The observer is handed to the callback so it can stop watching.
pub fn watch_visibility<F>(
    targets: &[Element],
    options: WatchOptions,
    mut on_enter: F,
) -> Option<IntersectionObserver>
where
    F: FnMut(&Element, &IntersectionObserver) + 'static,
{
    if !supports_intersection_observer() {
        return None;
    }

    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                on_enter(&entry.target(), &observer);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(options.root_margin);

    let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => observer,
        Err(e) => {
            warn!("Failed to create IntersectionObserver: {:?}", e);
            return None;
        }
    };
    callback.forget();

    for target in targets {
        observer.observe(target);
    }
    Some(observer)
}
