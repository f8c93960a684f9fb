//! Marker state and style values.
//!
//! The marker is the element that stands in for the native cursor. This
//! module keeps its visual state and turns positions into CSS values; the
//! DOM writes happen in `dom`.

use serde::{Deserialize, Serialize};

/// 2D coordinate helper type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct XY<T> {
    pub x: T,
    pub y: T,
}

impl<T> XY<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// How a position reaches the marker's style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionMode {
    /// `transform: translate3d(..)`; compositor only, no layout.
    #[default]
    Transform,
    /// `left`/`top`; triggers layout on every update.
    Offset,
}

impl PositionMode {
    /// Style properties to write for a position, as `(property, value)`.
    pub fn style_properties(&self, position: XY<f64>) -> Vec<(&'static str, String)> {
        match self {
            PositionMode::Transform => vec![(
                "transform",
                format!(
                    "translate3d({}, {}, 0)",
                    format_px(position.x),
                    format_px(position.y)
                ),
            )],
            PositionMode::Offset => vec![
                ("left", format_px(position.x)),
                ("top", format_px(position.y)),
            ],
        }
    }
}

/// Format a CSS pixel length with at most two decimals.
pub fn format_px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid "-0px"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut text = format!("{:.2}", rounded);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text.push_str("px");
    text
}

/// Visual state of the marker while it exists.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerState {
    pub hovering: bool,
    pub visible: bool,
    /// Last position written to the DOM.
    pub position: Option<XY<f64>>,
}

impl Default for MarkerState {
    fn default() -> Self {
        Self {
            hovering: false,
            visible: true,
            position: None,
        }
    }
}

impl MarkerState {
    /// Record a hover change. Returns true if the state flipped.
    pub fn set_hovering(&mut self, hovering: bool) -> bool {
        let changed = self.hovering != hovering;
        self.hovering = hovering;
        changed
    }

    /// Record a visibility change. Returns true if the state flipped.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }

    /// Record a position. Returns true if it differs from the last one.
    pub fn move_to(&mut self, position: XY<f64>) -> bool {
        if self.position == Some(position) {
            return false;
        }
        self.position = Some(position);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_px() {
        assert_eq!(format_px(12.0), "12px");
        assert_eq!(format_px(12.5), "12.5px");
        assert_eq!(format_px(12.3456), "12.35px");
        assert_eq!(format_px(-0.001), "0px");
        assert_eq!(format_px(-4.25), "-4.25px");
    }

    #[test]
    fn test_transform_style() {
        let props = PositionMode::Transform.style_properties(XY::new(100.0, 42.5));
        assert_eq!(
            props,
            vec![("transform", "translate3d(100px, 42.5px, 0)".to_string())]
        );
    }

    #[test]
    fn test_offset_style() {
        let props = PositionMode::Offset.style_properties(XY::new(3.0, 4.0));
        assert_eq!(
            props,
            vec![("left", "3px".to_string()), ("top", "4px".to_string())]
        );
    }

    #[test]
    fn test_marker_state_changes() {
        let mut state = MarkerState::default();
        assert!(state.visible);
        assert!(!state.hovering);

        assert!(state.set_hovering(true));
        assert!(!state.set_hovering(true));

        assert!(state.set_visible(false));
        assert!(!state.set_visible(false));

        assert!(state.move_to(XY::new(1.0, 2.0)));
        assert!(!state.move_to(XY::new(1.0, 2.0)));
        assert!(state.move_to(XY::new(1.0, 3.0)));
    }
}
