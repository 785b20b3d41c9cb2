use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlImageElement, IntersectionObserver};

use crate::dom::{self, WatchOptions};

const LAZY_SELECTOR: &str = "img[loading=\"lazy\"]";
const LAZY_CLASS: &str = "lazy";

/// Source to load once the image is on screen: `data-src` wins when set.
pub fn resolve_source(deferred: Option<&str>, current: &str) -> String {
    match deferred {
        Some(src) if !src.is_empty() => src.to_string(),
        _ => current.to_string(),
    }
}

pub fn mount(document: &Document) -> Option<IntersectionObserver> {
    let images = dom::query_all(document, LAZY_SELECTOR);
    if images.is_empty() || !dom::supports_intersection_observer() {
        return None;
    }

    for img in &images {
        let _ = img.class_list().add_1(LAZY_CLASS);
    }
    debug!("Deferring {} images", images.len());

    dom::watch_visibility(&images, WatchOptions::default(), |el, observer| {
        if let Some(img) = el.dyn_ref::<HtmlImageElement>() {
            let deferred = img.get_attribute("data-src");
            img.set_src(&resolve_source(deferred.as_deref(), &img.src()));
        }
        let _ = el.class_list().remove_1(LAZY_CLASS);
        observer.unobserve(el);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_src_takes_precedence() {
        assert_eq!(resolve_source(Some("/img/full.webp"), "/img/thumb.webp"), "/img/full.webp");
    }

    #[test]
    fn missing_or_empty_data_src_keeps_current() {
        assert_eq!(resolve_source(None, "/img/thumb.webp"), "/img/thumb.webp");
        assert_eq!(resolve_source(Some(""), "/img/thumb.webp"), "/img/thumb.webp");
    }
}
