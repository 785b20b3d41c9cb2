use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use web_sys::{Document, IntersectionObserver};

use crate::dom::{self, WatchOptions};

const REVEAL_SELECTOR: &str = ".service, .feature, .testimonial, .step";
const PENDING_CLASS: &str = "animate-on-scroll";
pub const VISIBLE_CLASS: &str = "animate-in";

/// Remembers which of the watched elements have been revealed. Targets are
/// matched by identity, so the page markup is left untouched.
#[derive(Debug)]
pub struct RevealLedger<T> {
    targets: Vec<T>,
    revealed: Vec<bool>,
}

impl<T: PartialEq> RevealLedger<T> {
    pub fn new(targets: Vec<T>) -> Self {
        let revealed = vec![false; targets.len()];
        Self { targets, revealed }
    }

    /// True only the first time `target` enters the viewport.
    pub fn enter(&mut self, target: &T) -> bool {
        let Some(index) = self.targets.iter().position(|t| t == target) else {
            return false;
        };
        let seen = &mut self.revealed[index];
        if *seen {
            return false;
        }
        *seen = true;
        true
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|seen| **seen).count()
    }

    pub fn watched(&self) -> usize {
        self.targets.len()
    }
}

pub fn mount(document: &Document) -> Option<IntersectionObserver> {
    if !dom::supports_intersection_observer() {
        debug!("IntersectionObserver unavailable, content stays static");
        return None;
    }

    let targets = dom::query_all(document, REVEAL_SELECTOR);
    if targets.is_empty() {
        return None;
    }

    for el in &targets {
        let _ = el.class_list().add_1(PENDING_CLASS);
    }

    let ledger = Rc::new(RefCell::new(RevealLedger::new(targets.clone())));
    dom::watch_visibility(
        &targets,
        WatchOptions {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px",
        },
        move |el, observer| {
            let mut ledger = ledger.borrow_mut();
            if ledger.enter(el) {
                let _ = el.class_list().add_1(VISIBLE_CLASS);
                debug!("Revealed {}/{}", ledger.revealed_count(), ledger.watched());
            }
            observer.unobserve(el);
        },
    )
}
