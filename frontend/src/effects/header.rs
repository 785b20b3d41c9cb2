use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use web_sys::{Document, HtmlElement};

use crate::config::SiteConfig;
use crate::dom;
use crate::utils::throttle;

const HEADER_SELECTOR: &str = ".header";
const SCROLLED_CLASS: &str = "header--scrolled";
const SCROLL_THROTTLE_MS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderView {
    pub scrolled: bool,
    pub hidden: bool,
}

/// Tracks scroll direction for the sticky header.
#[derive(Debug, Clone)]
pub struct HeaderState {
    threshold: f64,
    last_scroll_top: f64,
}

impl HeaderState {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            last_scroll_top: 0.0,
        }
    }

    pub fn update(&mut self, scroll_top: f64) -> HeaderView {
        let past_threshold = scroll_top > self.threshold;
        let view = HeaderView {
            scrolled: past_threshold,
            hidden: past_threshold && scroll_top > self.last_scroll_top,
        };
        self.last_scroll_top = scroll_top.max(0.0);
        view
    }
}

fn apply(header: &HtmlElement, view: HeaderView) {
    let classes = header.class_list();
    let _ = if view.scrolled {
        classes.add_1(SCROLLED_CLASS)
    } else {
        classes.remove_1(SCROLLED_CLASS)
    };
    let transform = if view.hidden { "translateY(-100%)" } else { "translateY(0)" };
    dom::set_style(header, "transform", transform);
}

pub fn mount(document: &Document, config: &SiteConfig) -> Option<HtmlElement> {
    let Some(header) = dom::query_one::<HtmlElement>(document, HEADER_SELECTOR) else {
        debug!("No {} element, skipping header effects", HEADER_SELECTOR);
        return None;
    };
    let window = dom::window()?;

    let state = Rc::new(RefCell::new(HeaderState::new(config.header_threshold)));
    let target = header.clone();
    let viewport = window.clone();
    let mut on_scroll = throttle(SCROLL_THROTTLE_MS, move || {
        let scroll_top = viewport.scroll_y().unwrap_or(0.0);
        let view = state.borrow_mut().update(scroll_top);
        apply(&target, view);
    });
    dom::listen(&window, "scroll", move |_| on_scroll());

    Some(header)
}
