//! Cursor overlay controller.
//!
//! Owns the marker lifecycle and reacts to pointer, hover, window and
//! viewport events. All DOM work and scheduling goes through [`OverlayHost`],
//! which lets the whole state machine run without a browser.
//!
//! Event flow:
//!
//! ```text
//! mousemove ─► pending position ─► (one rAF) ─► apply
//! mouseover/mouseout ─► HoverTarget ─► hover class
//! document leave/enter ─► display
//! resize ─► debounce timer ─► re-evaluate activation
//! ```

use crate::config::OverlayConfig;
use crate::error::OverlayResult;
use crate::hover::{self, HoverTarget};
use crate::marker::{MarkerState, XY};

/// Side effects the controller needs from its environment.
pub trait OverlayHost {
    /// Current viewport width in CSS pixels.
    fn viewport_width(&self) -> f64;

    /// Create the marker element and attach it to the page.
    fn mount_marker(&mut self, config: &OverlayConfig) -> OverlayResult<()>;
    /// Remove the marker element, if any.
    fn unmount_marker(&mut self);

    fn apply_position(&mut self, position: XY<f64>, config: &OverlayConfig);
    fn apply_hover(&mut self, hovering: bool, config: &OverlayConfig);
    fn apply_visibility(&mut self, visible: bool);

    /// Subscribe to pointer/hover/window-leave events.
    fn attach_pointer_listeners(&mut self) -> OverlayResult<()>;
    fn detach_pointer_listeners(&mut self);

    /// Ask for [`OverlayController::on_frame`] before the next repaint.
    ///
    /// Returns false when frames are unavailable; the controller then
    /// applies positions immediately.
    fn request_frame(&mut self) -> bool;
    fn cancel_frame(&mut self);

    /// Arm (or re-arm) the timer that calls
    /// [`OverlayController::on_resize_settled`].
    fn schedule_resize_check(&mut self, delay_ms: u32);
    fn cancel_resize_check(&mut self);
}

/// The single cursor overlay instance of a page.
pub struct OverlayController<H: OverlayHost> {
    host: H,
    config: OverlayConfig,
    /// Present while active (marker exists).
    marker: Option<MarkerState>,
    pending_position: Option<XY<f64>>,
    frame_requested: bool,
    resize_pending: bool,
}

impl<H: OverlayHost> OverlayController<H> {
    pub fn new(host: H, config: OverlayConfig) -> Self {
        Self {
            host,
            config,
            marker: None,
            pending_position: None,
            frame_requested: false,
            resize_pending: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.marker.is_some()
    }

    pub fn marker(&self) -> Option<&MarkerState> {
        self.marker.as_ref()
    }

    /// Create the marker if the viewport is wide enough.
    ///
    /// Returns whether the overlay is active afterwards.
    pub fn activate(&mut self, viewport_width: f64) -> bool {
        if self.is_active() {
            return true;
        }
        if !self.config.is_desktop(viewport_width) {
            log::debug!(
                "[CursorOverlay] Viewport {}px below {}px, staying inactive",
                viewport_width,
                self.config.desktop_min_width
            );
            return false;
        }

        if let Err(e) = self.host.mount_marker(&self.config) {
            log::warn!("[CursorOverlay] Failed to create marker: {}", e);
            return false;
        }
        if let Err(e) = self.host.attach_pointer_listeners() {
            log::warn!("[CursorOverlay] Failed to attach listeners: {}", e);
            self.host.detach_pointer_listeners();
            self.host.unmount_marker();
            return false;
        }

        self.marker = Some(MarkerState::default());
        log::info!("[CursorOverlay] Activated ({}px viewport)", viewport_width);
        true
    }

    /// Tear down the marker and its listeners.
    pub fn deactivate(&mut self) {
        if self.marker.take().is_none() {
            return;
        }
        self.host.detach_pointer_listeners();
        if self.frame_requested {
            self.host.cancel_frame();
            self.frame_requested = false;
        }
        self.pending_position = None;
        self.host.unmount_marker();
        log::info!("[CursorOverlay] Deactivated");
    }

    /// Record a pointer position; it is applied on the next frame.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if !self.is_active() {
            return;
        }
        self.pending_position = Some(XY::new(x, y));
        if self.frame_requested {
            return;
        }
        if self.host.request_frame() {
            self.frame_requested = true;
        } else {
            self.on_frame();
        }
    }

    /// Animation frame callback: apply the latest pending position.
    pub fn on_frame(&mut self) {
        self.frame_requested = false;
        let Some(position) = self.pending_position.take() else {
            return;
        };
        let Some(marker) = self.marker.as_mut() else {
            return;
        };
        if marker.move_to(position) {
            self.host.apply_position(position, &self.config);
        }
    }

    pub fn on_hover_enter(&mut self, target: HoverTarget) {
        if let Some(hovering) = hover::on_enter(target) {
            self.set_hovering(hovering);
        }
    }

    pub fn on_hover_leave(&mut self, target: HoverTarget, related: HoverTarget) {
        if let Some(hovering) = hover::on_leave(target, related) {
            self.set_hovering(hovering);
        }
    }

    fn set_hovering(&mut self, hovering: bool) {
        let Some(marker) = self.marker.as_mut() else {
            return;
        };
        if marker.set_hovering(hovering) {
            self.host.apply_hover(hovering, &self.config);
        }
    }

    pub fn on_window_leave(&mut self) {
        self.set_visible(false);
    }

    pub fn on_window_enter(&mut self) {
        self.set_visible(true);
    }

    fn set_visible(&mut self, visible: bool) {
        let Some(marker) = self.marker.as_mut() else {
            return;
        };
        if marker.set_visible(visible) {
            self.host.apply_visibility(visible);
        }
    }

    /// Restart the resize debounce.
    pub fn on_viewport_resize(&mut self) {
        if self.resize_pending {
            self.host.cancel_resize_check();
        }
        self.resize_pending = true;
        self.host.schedule_resize_check(self.config.resize_debounce_ms);
    }

    /// Debounce elapsed: activate or deactivate for the current width.
    pub fn on_resize_settled(&mut self) {
        self.resize_pending = false;
        let width = self.host.viewport_width();
        let wants_marker = self.config.is_desktop(width);

        match (self.is_active(), wants_marker) {
            (false, true) => {
                log::debug!("[CursorOverlay] Resized to {}px, activating", width);
                self.activate(width);
            }
            (true, false) => {
                log::debug!("[CursorOverlay] Resized to {}px, deactivating", width);
                self.deactivate();
            }
            _ => {}
        }
    }

    /// Deactivate and drop any pending timer.
    pub fn dispose(&mut self) {
        self.deactivate();
        if self.resize_pending {
            self.host.cancel_resize_check();
            self.resize_pending = false;
        }
    }
}
