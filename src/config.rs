use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

use crate::error::Result;

/// Id of the optional inline JSON block that overrides [`EnhanceConfig`] defaults.
pub const CONFIG_ELEMENT_ID: &str = "enhance-config";

pub const DEFAULT_PROMPT: &str = "Click on the workshops to learn more";
pub const DEFAULT_TITLE: &str = "Session";
pub const DEFAULT_META: &str = "3 hours • Intermediate • 30 seats";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub panel: String,
    pub label: String,
    pub card: String,
    pub card_title: String,
    pub card_meta: String,
    pub card_desc: String,
    pub prev: String,
    pub next: String,
    pub step: String,
    pub reveal: String,
    pub hero_id: String,
    pub hero_container: String,
    pub hover_block: String,
    pub header: String,
    pub menu: String,
    pub menu_item: String,
    pub menu_line: String,
    pub current_menu_item: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            panel: ".scrolly-workshops, .scrolly".to_string(),
            label: ".scrolly-graphic .graphic-content".to_string(),
            card: ".session-card".to_string(),
            card_title: ".session-title".to_string(),
            card_meta: ".session-meta".to_string(),
            card_desc: ".session-desc".to_string(),
            prev: ".scrolly-prev".to_string(),
            next: ".scrolly-next".to_string(),
            step: ".scrolly-step".to_string(),
            reveal: ".reveal".to_string(),
            hero_id: "hero".to_string(),
            hero_container: ".concept-two".to_string(),
            hover_block: ".hover".to_string(),
            header: "header".to_string(),
            menu: ".menu".to_string(),
            menu_item: ".menu-item".to_string(),
            menu_line: ".wee".to_string(),
            current_menu_item: "current-menu-item".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    pub prompt: String,
    pub default_title: String,
    pub default_meta: String,
    /// How long a freshly selected step keeps the `pop` class.
    pub pop_ms: u32,
    pub reveal_threshold: f64,
    pub float_step: f64,
    pub float_amplitude: f64,
    pub float_interval_ms: u32,
    pub parallax_radius: f64,
    pub parallax_strength: f64,
    pub header_delta: f64,
    pub header_min_scroll: f64,
    pub menu_resize_debounce_ms: u32,
    pub selectors: Selectors,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            default_meta: DEFAULT_META.to_string(),
            pop_ms: 520,
            reveal_threshold: 0.12,
            float_step: 0.01,
            float_amplitude: 2.0,
            float_interval_ms: 30,
            parallax_radius: 120.0,
            parallax_strength: 6.0,
            header_delta: 10.0,
            header_min_scroll: 120.0,
            menu_resize_debounce_ms: 120,
            selectors: Selectors::default(),
        }
    }
}

impl EnhanceConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the inline config block if the page has one. Bad JSON falls back to defaults.
    pub fn load(document: &Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = EnhanceConfig::from_json("{}").unwrap();
        assert_eq!(config, EnhanceConfig::default());
        assert_eq!(config.pop_ms, 520);
        assert_eq!(config.default_meta, DEFAULT_META);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = EnhanceConfig::from_json(
            r#"{"prompt": "Pick a session", "selectors": {"step": ".workshop"}}"#,
        )
        .unwrap();

        assert_eq!(config.prompt, "Pick a session");
        assert_eq!(config.selectors.step, ".workshop");
        assert_eq!(config.selectors.card, ".session-card");
        assert_eq!(config.reveal_threshold, 0.12);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(EnhanceConfig::from_json("[1, 2").is_err());
    }
}
