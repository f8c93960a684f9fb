//! Overlay configuration.
//!
//! Passed from JavaScript as a plain object with camelCase keys. Every field
//! is optional; missing fields take the defaults below, which match the
//! site stylesheet (`.custom-cursor`, `.custom-cursor.hover`) and its
//! 768px mobile breakpoint.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::{OverlayError, OverlayResult};
use crate::marker::PositionMode;

/// Smallest viewport width (CSS px) that gets the custom cursor.
pub const DEFAULT_DESKTOP_MIN_WIDTH: f64 = 769.0;

/// Delay before a resize re-evaluates activation.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u32 = 250;

pub const DEFAULT_MARKER_CLASS: &str = "custom-cursor";
pub const DEFAULT_HOVER_CLASS: &str = "hover";
pub const DEFAULT_INTERACTIVE_SELECTOR: &str =
    "a, button, .nav-button, .theme-toggle, .tool-button, .project-header, .tool-header";
pub const DEFAULT_EXEMPT_SELECTOR: &str = ".tag";

/// Console log level, mirrored onto `log::Level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Cursor overlay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayConfig {
    /// Viewports at least this wide (CSS px) show the marker.
    pub desktop_min_width: f64,
    /// Quiet period after the last resize event before re-evaluating.
    pub resize_debounce_ms: u32,
    /// Class given to the marker element.
    pub marker_class: String,
    /// Class toggled on the marker while hovering an interactive element.
    pub hover_class: String,
    /// Elements (or their descendants) that trigger the hover state.
    pub interactive_selector: String,
    /// Elements that force the non-hover state, even inside interactive ones.
    pub exempt_selector: String,
    pub position_mode: PositionMode,
    pub log_level: LogLevel,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            desktop_min_width: DEFAULT_DESKTOP_MIN_WIDTH,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            hover_class: DEFAULT_HOVER_CLASS.to_string(),
            interactive_selector: DEFAULT_INTERACTIVE_SELECTOR.to_string(),
            exempt_selector: DEFAULT_EXEMPT_SELECTOR.to_string(),
            position_mode: PositionMode::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl OverlayConfig {
    /// Parse a config object handed over from JavaScript.
    ///
    /// `undefined` and `null` yield the defaults.
    pub fn from_js(value: JsValue) -> OverlayResult<Self> {
        let config: OverlayConfig = if value.is_undefined() || value.is_null() {
            OverlayConfig::default()
        } else {
            serde_wasm_bindgen::from_value(value)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Whether a viewport of this width gets the marker.
    pub fn is_desktop(&self, viewport_width: f64) -> bool {
        viewport_width >= self.desktop_min_width
    }

    pub fn validate(&self) -> OverlayResult<()> {
        if !self.desktop_min_width.is_finite() || self.desktop_min_width <= 0.0 {
            return Err(OverlayError::InvalidConfig(format!(
                "desktopMinWidth must be a positive number, got {}",
                self.desktop_min_width
            )));
        }

        for (name, class) in [
            ("markerClass", &self.marker_class),
            ("hoverClass", &self.hover_class),
        ] {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(OverlayError::InvalidConfig(format!(
                    "{name} must be a single class name, got {class:?}"
                )));
            }
        }

        for (name, selector) in [
            ("interactiveSelector", &self.interactive_selector),
            ("exemptSelector", &self.exempt_selector),
        ] {
            if selector.trim().is_empty() {
                return Err(OverlayError::InvalidConfig(format!("{name} is empty")));
            }
        }

        Ok(())
    }
}
