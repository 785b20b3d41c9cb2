use std::rc::Rc;

use log::{debug, info, warn};
use web_sys::Document;

use crate::config::SiteConfig;
use crate::dom;
use crate::effects::{counters, header, lazy_images, menu, reveal, smooth_scroll};
use crate::form::contact;
use crate::styles;

/// Waits for the document to be parsed, then wires every component.
pub fn start(config: SiteConfig) {
    let Some(document) = dom::document() else {
        warn!("No document, nothing to enhance");
        return;
    };

    let config = Rc::new(config);
    if document.ready_state() == "loading" {
        let ready = document.clone();
        let mut config = Some(config);
        dom::listen(&document, "DOMContentLoaded", move |_| {
            if let Some(config) = config.take() {
                initialize(&ready, config);
            }
        });
    } else {
        initialize(&document, config);
    }
}

fn initialize(document: &Document, config: Rc<SiteConfig>) {
    styles::inject();

    let mut mounted = Vec::new();
    if menu::mount(document, &config).is_some() {
        mounted.push("mobile menu");
    }
    if header::mount(document, &config).is_some() {
        mounted.push("header");
    }
    smooth_scroll::mount(document, &config);
    mounted.push("smooth scroll");
    if reveal::mount(document).is_some() {
        mounted.push("reveal");
    }
    if contact::mount(document, config.clone()).is_some() {
        mounted.push("contact form");
    }
    if lazy_images::mount(document).is_some() {
        mounted.push("lazy images");
    }
    if counters::mount(document, &config).is_some() {
        mounted.push("counters");
    }

    debug!("Mounted: {}", mounted.join(", "));
    info!("✅ Site scripts initialised ({} components)", mounted.len());
}
