use log::{debug, warn, Level};
use serde::Deserialize;
use thiserror::Error;

const CONFIG_ELEMENT_ID: &str = "site-config";
const WHATSAPP_BASE_URL: &str = "https://wa.me";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid site config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Site-wide settings. Every field can be overridden from the page through a
/// `<script type="application/json" id="site-config">` block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub whatsapp_number: String,
    pub email_address: String,
    pub scroll_offset: f64,
    pub header_threshold: f64,
    pub menu_breakpoint: f64,
    pub counter_duration_ms: u32,
    pub notification_timeout_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: "5511999999999".to_string(),
            email_address: "contato@marianasantos.com".to_string(),
            scroll_offset: 80.0,
            header_threshold: 100.0,
            menu_breakpoint: 1024.0,
            counter_duration_ms: 2000,
            notification_timeout_ms: 5000,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the overrides block from the page, falling back to defaults.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            debug!("No #{} block, using default config", CONFIG_ELEMENT_ID);
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Deep link that opens a WhatsApp chat with `text` pre-filled.
    pub fn whatsapp_link(&self, text: &str) -> String {
        format!(
            "{}/{}?text={}",
            WHATSAPP_BASE_URL,
            self.whatsapp_number,
            urlencoding::encode(text)
        )
    }
}
