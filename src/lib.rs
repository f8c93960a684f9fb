//! WASM Cursor Overlay
//!
//! Replaces the native pointer with a styled marker element that follows
//! the mouse, grows on interactive elements and hides when the pointer
//! leaves the window. Only viewports at least `desktopMinWidth` wide get
//! the marker; crossing the breakpoint while resizing creates or removes it.
//!
//! ```js
//! import init, { install } from "./cursor_overlay_wasm.js";
//! await init();
//! install({ exemptSelector: ".tag" });
//! ```

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod hover;
pub mod marker;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::OverlayConfig;
use crate::dom::SharedController;

pub use config::LogLevel;
pub use controller::{OverlayController, OverlayHost};
pub use error::{OverlayError, OverlayResult};
pub use hover::HoverTarget;
pub use marker::{MarkerState, PositionMode, XY};

thread_local! {
    /// Overlay created by [`install`].
    static INSTALLED: RefCell<Option<CursorOverlay>> = const { RefCell::new(None) };
}

/// Initialize panic hook and logging for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Trace).ok();
    log::set_max_level(log::LevelFilter::Info);
    log::info!("[CursorOverlay] WASM module initialized");
}

fn apply_log_level(config: &OverlayConfig) {
    log::set_max_level(log::Level::from(config.log_level).to_level_filter());
}

/// Handle to a running cursor overlay.
#[wasm_bindgen]
pub struct CursorOverlay {
    controller: SharedController,
}

#[wasm_bindgen]
impl CursorOverlay {
    /// Create the overlay for the current page.
    ///
    /// `config` is an optional object with camelCase `OverlayConfig` fields.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CursorOverlay, JsValue> {
        let config = OverlayConfig::from_js(config)?;
        apply_log_level(&config);
        let controller = dom::mount(config)?;
        Ok(CursorOverlay { controller })
    }

    /// Whether the marker currently exists.
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.controller
            .try_borrow()
            .map(|c| c.is_active())
            .unwrap_or(false)
    }

    /// Remove the marker and stop listening to every event.
    pub fn dispose(&self) {
        match self.controller.try_borrow_mut() {
            Ok(mut controller) => {
                controller.dispose();
                controller.host_mut().release();
                log::debug!("[CursorOverlay] Disposed");
            }
            Err(_) => log::warn!("[CursorOverlay] dispose() called while busy, ignoring"),
        }
    }
}

/// Create the page-wide overlay once the DOM is ready.
///
/// Replaces an overlay from a previous call. Config errors are reported
/// immediately; DOM errors during deferred creation are logged.
#[wasm_bindgen]
pub fn install(config: JsValue) -> Result<(), JsValue> {
    let config = OverlayConfig::from_js(config)?;
    apply_log_level(&config);

    let window = web_sys::window().ok_or(OverlayError::NoWindow)?;
    let document = window.document().ok_or(OverlayError::NoDocument)?;

    if document.ready_state() == "loading" {
        log::debug!("[CursorOverlay] Document loading, waiting for DOMContentLoaded");
        let on_ready = Closure::once_into_js(move || install_now(config));
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        install_now(config);
    }
    Ok(())
}

fn install_now(config: OverlayConfig) {
    if let Some(previous) = INSTALLED.with(|slot| slot.borrow_mut().take()) {
        previous.dispose();
    }

    match dom::mount(config) {
        Ok(controller) => {
            INSTALLED.with(|slot| *slot.borrow_mut() = Some(CursorOverlay { controller }));
        }
        Err(e) => log::warn!("[CursorOverlay] Install failed: {}", e),
    }
}
