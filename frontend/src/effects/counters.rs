use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use once_cell::sync::Lazy;
use regex::Regex;
use web_sys::{Document, Element, IntersectionObserver};

use crate::config::SiteConfig;
use crate::dom::{self, WatchOptions};

const COUNTER_SELECTOR: &str = ".stat__number";
const FRAME_MS: u32 = 16;

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid number pattern"));

/// Value a counter animates up to: the first run of digits in its text, the
/// same run `replace_first_number` rewrites on every frame.
pub fn parse_target(text: &str) -> Option<u64> {
    NUMBER_RE.find(text)?.as_str().parse().ok()
}

/// Swaps the first run of digits in `text` for `value`, keeping any prefix or suffix.
pub fn replace_first_number(text: &str, value: u64) -> String {
    NUMBER_RE.replace(text, value.to_string().as_str()).into_owned()
}

#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u64,
    step: f64,
    current: f64,
}

impl CounterAnimation {
    pub fn new(target: u64, duration_ms: u32, frame_ms: u32) -> Self {
        let frames = (f64::from(duration_ms) / f64::from(frame_ms.max(1))).max(1.0);
        Self {
            target,
            step: target as f64 / frames,
            current: 0.0,
        }
    }

    /// Advances one frame. Returns the value to display and whether this was
    /// the final frame.
    pub fn tick(&mut self) -> (u64, bool) {
        self.current += self.step;
        if self.current >= self.target as f64 {
            (self.target, true)
        } else {
            (self.current.floor() as u64, false)
        }
    }
}

fn animate(element: Element, target: u64, duration_ms: u32) {
    let mut animation = CounterAnimation::new(target, duration_ms, FRAME_MS);
    let slot: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
    let handle = slot.clone();

    let interval = Interval::new(FRAME_MS, move || {
        let (value, done) = animation.tick();
        let text = element.text_content().unwrap_or_default();
        element.set_text_content(Some(&replace_first_number(&text, value)));
        if done {
            handle.borrow_mut().take();
        }
    });
    slot.borrow_mut().replace(interval);
}

pub fn mount(document: &Document, config: &SiteConfig) -> Option<IntersectionObserver> {
    let counters = dom::query_all(document, COUNTER_SELECTOR);
    if counters.is_empty() {
        return None;
    }

    let duration_ms = config.counter_duration_ms;
    dom::watch_visibility(&counters, WatchOptions::default(), move |el, observer| {
        if let Some(target) = el.text_content().as_deref().and_then(parse_target) {
            animate(el.clone(), target, duration_ms);
        }
        observer.unobserve(el);
    })
}
