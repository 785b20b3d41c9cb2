use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node};

use crate::config::SiteConfig;
use crate::dom;
use crate::utils::debounce;

const TOGGLE_ID: &str = "navToggle";
const MENU_ID: &str = "navMenu";
const LINK_SELECTOR: &str = ".nav__link";
const ACTIVE_CLASS: &str = "active";
const RESIZE_DEBOUNCE_MS: u32 = 150;

/// Inline styles turning the three hamburger bars into an "X".
const BARS_OPEN: [(&str, &str); 3] = [
    ("transform", "rotate(45deg) translate(5px, 5px)"),
    ("opacity", "0"),
    ("transform", "rotate(-45deg) translate(7px, -6px)"),
];

pub fn is_desktop_width(width: f64, breakpoint: f64) -> bool {
    width >= breakpoint
}

pub struct MobileMenu {
    toggle: HtmlElement,
    menu: Element,
    bars: Vec<HtmlElement>,
    open: Cell<bool>,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn open(&self) {
        let _ = self.menu.class_list().add_1(ACTIVE_CLASS);
        let _ = self.toggle.class_list().add_1(ACTIVE_CLASS);
        if let Some(body) = dom::body() {
            dom::set_style(&body, "overflow", "hidden");
        }
        for (bar, (property, value)) in self.bars.iter().zip(BARS_OPEN) {
            dom::set_style(bar, property, value);
        }
        self.open.set(true);
    }

    pub fn close(&self) {
        let _ = self.menu.class_list().remove_1(ACTIVE_CLASS);
        let _ = self.toggle.class_list().remove_1(ACTIVE_CLASS);
        if let Some(body) = dom::body() {
            dom::set_style(&body, "overflow", "");
        }
        for bar in &self.bars {
            dom::set_style(bar, "transform", "");
            dom::set_style(bar, "opacity", "");
        }
        self.open.set(false);
    }

    fn contains(&self, node: &Node) -> bool {
        self.toggle.contains(Some(node)) || self.menu.contains(Some(node))
    }
}

pub fn mount(document: &Document, config: &SiteConfig) -> Option<Rc<MobileMenu>> {
    let (Some(toggle), Some(menu)) = (
        dom::by_id::<HtmlElement>(document, TOGGLE_ID),
        document.get_element_by_id(MENU_ID),
    ) else {
        debug!("No #{} / #{}, skipping mobile menu", TOGGLE_ID, MENU_ID);
        return None;
    };

    let bars = toggle
        .query_selector_all("span")
        .map(dom::elements)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();

    let menu = Rc::new(MobileMenu {
        toggle,
        menu,
        bars,
        open: Cell::new(false),
    });

    {
        let handle = menu.clone();
        dom::listen(&menu.toggle, "click", move |_| handle.toggle());
    }

    for link in dom::query_all(document, LINK_SELECTOR) {
        let handle = menu.clone();
        dom::listen(&link, "click", move |_| handle.close());
    }

    {
        let handle = menu.clone();
        dom::listen(document, "click", move |event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                return;
            };
            if handle.is_open() && !handle.contains(&target) {
                handle.close();
            }
        });
    }

    if let Some(window) = dom::window() {
        let handle = menu.clone();
        let breakpoint = config.menu_breakpoint;
        let viewport = window.clone();
        let mut on_resize = debounce(RESIZE_DEBOUNCE_MS, move || {
            let width = viewport
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(0.0);
            if is_desktop_width(width, breakpoint) {
                handle.close();
            }
        });
        dom::listen(&window, "resize", move |_| on_resize());
    }

    Some(menu)
}
