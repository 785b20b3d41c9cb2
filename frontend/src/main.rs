use log::info;

mod app;
mod config;
mod dom;
mod exports;
mod styles;
mod utils;
mod components {
    pub mod notification;
}
mod effects {
    pub mod counters;
    pub mod header;
    pub mod lazy_images;
    pub mod menu;
    pub mod reveal;
    pub mod smooth_scroll;
}
mod form {
    pub mod contact;
    pub mod controller;
    pub mod field;
    pub mod message;
    pub mod validation;
}

use config::SiteConfig;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting site scripts");
    app::start(SiteConfig::load());
}
