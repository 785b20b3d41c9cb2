//! Helpers callable from other scripts on the page.

use wasm_bindgen::prelude::*;

use crate::components::notification::{NotificationKind, Notifier, Toasts};
use crate::config::SiteConfig;
use crate::utils;

#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email(email: &str) -> bool {
    utils::is_valid_email(email)
}

#[wasm_bindgen(js_name = isValidPhone)]
pub fn is_valid_phone(phone: &str) -> bool {
    utils::is_valid_phone(phone)
}

#[wasm_bindgen(js_name = formatPhone)]
pub fn format_phone(phone: &str) -> String {
    utils::format_phone(phone)
}

#[wasm_bindgen(js_name = sanitizeString)]
pub fn sanitize_string(input: &str) -> String {
    utils::sanitize_string(input)
}

/// `kind` is "success", "error" or "info".
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, kind: &str) {
    let timeout_ms = SiteConfig::load().notification_timeout_ms;
    Toasts::new(timeout_ms).notify(message, NotificationKind::from_name(kind));
}
