//! Error types for the cursor overlay.
//!
//! Only construction surfaces errors to JavaScript. Event handling logs
//! failures and carries on, so a broken DOM never breaks the page.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Main error type for overlay operations.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// No global `window` (not running in a browser main thread)
    #[error("No window available")]
    NoWindow,

    /// Window has no document
    #[error("No document available")]
    NoDocument,

    /// Document has no body yet
    #[error("Document has no body")]
    NoBody,

    /// A DOM call threw
    #[error("DOM error: {0}")]
    Dom(String),

    /// Configuration rejected by validation or deserialization
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl From<JsValue> for OverlayError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        OverlayError::Dom(message)
    }
}

impl From<serde_wasm_bindgen::Error> for OverlayError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        OverlayError::InvalidConfig(err.to_string())
    }
}

impl From<OverlayError> for JsValue {
    fn from(err: OverlayError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Extension trait for turning missing DOM handles into errors.
pub trait OptionExt<T> {
    /// Convert None to the given error.
    fn context(self, err: OverlayError) -> OverlayResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context(self, err: OverlayError) -> OverlayResult<T> {
        self.ok_or(err)
    }
}

/// Type alias for Results using OverlayError.
pub type OverlayResult<T> = Result<T, OverlayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OverlayError::Dom("appendChild failed".to_string());
        assert_eq!(err.to_string(), "DOM error: appendChild failed");

        assert_eq!(OverlayError::NoBody.to_string(), "Document has no body");
    }

    #[test]
    fn test_invalid_config_display() {
        let err = OverlayError::InvalidConfig("markerClass is empty".to_string());
        assert!(err.to_string().contains("Invalid config"));
        assert!(err.to_string().contains("markerClass"));
    }

    #[test]
    fn test_option_ext_context() {
        let missing: Option<u32> = None;
        let result = missing.context(OverlayError::NoWindow);
        assert!(matches!(result, Err(OverlayError::NoWindow)));
    }

    #[test]
    fn test_option_ext_some_passthrough() {
        let present = Some(7);
        assert_eq!(present.context(OverlayError::NoDocument).unwrap(), 7);
    }
}
