use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, ScrollBehavior, ScrollToOptions};

use crate::config::SiteConfig;
use crate::dom;

const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Element id an in-page link points at, if any.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Document offset to scroll to so the target sits `offset` px below the top.
pub fn scroll_destination(rect_top: f64, page_y: f64, offset: f64) -> f64 {
    rect_top + page_y - offset
}

pub fn scroll_to_element(document: &Document, id: &str, offset: f64) {
    let (Some(window), Some(target)) = (dom::window(), document.get_element_by_id(id)) else {
        debug!("No #{} to scroll to", id);
        return;
    };

    let page_y = window.scroll_y().unwrap_or(0.0);
    let top = scroll_destination(target.get_bounding_client_rect().top(), page_y, offset);

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn mount(document: &Document, config: &SiteConfig) {
    let offset = config.scroll_offset;
    let doc = document.clone();
    dom::listen(document, "click", move |event| {
        let anchor = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(ANCHOR_SELECTOR).ok().flatten());
        let Some(anchor) = anchor else {
            return;
        };

        event.prevent_default();
        if let Some(id) = anchor.get_attribute("href").as_deref().and_then(anchor_target) {
            scroll_to_element(&doc, id, offset);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_targets() {
        assert_eq!(anchor_target("#servicos"), Some("servicos"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/contato#form"), None);
        assert_eq!(anchor_target(""), None);
    }

    #[test]
    fn destination_subtracts_offset() {
        assert_eq!(scroll_destination(300.0, 1200.0, 80.0), 1420.0);
        assert_eq!(scroll_destination(-200.0, 1200.0, 80.0), 920.0);
        assert_eq!(scroll_destination(10.0, 0.0, 80.0), -70.0);
    }
}
