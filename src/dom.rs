//! Browser host for the overlay controller.
//!
//! Implements [`OverlayHost`] on top of `web-sys`. Event callbacks hold a
//! weak handle to the controller, so dropping the last [`SharedController`]
//! tears everything down: listeners unregister themselves, the marker is
//! removed and pending frames/timers are cancelled.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, MouseEvent, Node, Window};

use crate::config::OverlayConfig;
use crate::controller::{OverlayController, OverlayHost};
use crate::error::{OptionExt, OverlayError, OverlayResult};
use crate::hover::HoverTarget;
use crate::marker::XY;

pub type SharedController = Rc<RefCell<OverlayController<DomHost>>>;
type WeakController = Weak<RefCell<OverlayController<DomHost>>>;

/// An event listener that unregisters itself when dropped.
pub(crate) struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub(crate) fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> OverlayResult<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Run `f` against the controller if it is still alive and not borrowed.
fn with_controller(weak: &WeakController, f: impl FnOnce(&mut OverlayController<DomHost>)) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let Ok(mut controller) = shared.try_borrow_mut() else {
        log::debug!("[CursorOverlay] Controller busy, dropping event");
        return;
    };
    f(&mut controller);
}

/// Classify an event target by walking up to the nearest matching ancestor.
fn classify(target: Option<EventTarget>, config: &OverlayConfig) -> HoverTarget {
    let Some(target) = target else {
        return HoverTarget::None;
    };
    let element = match target.dyn_into::<Element>() {
        Ok(element) => element,
        // Text nodes and the like: use their parent element
        Err(other) => match other.dyn_into::<Node>().ok().and_then(|n| n.parent_element()) {
            Some(element) => element,
            None => return HoverTarget::None,
        },
    };

    let inside = |selector: &str| matches!(element.closest(selector), Ok(Some(_)));
    HoverTarget::classify(
        inside(&config.exempt_selector),
        inside(&config.interactive_selector),
    )
}

/// `web-sys` implementation of [`OverlayHost`].
pub struct DomHost {
    window: Window,
    document: Document,
    controller: WeakController,
    marker: Option<HtmlElement>,
    pointer_listeners: Vec<EventListener>,
    resize_listener: Option<EventListener>,
    frame_callback: Closure<dyn FnMut(f64)>,
    frame_handle: Option<i32>,
    resize_callback: Closure<dyn FnMut()>,
    resize_timer: Option<i32>,
}

impl DomHost {
    fn new(window: Window, document: Document, controller: WeakController) -> Self {
        let frame_callback = {
            let weak = controller.clone();
            Closure::wrap(Box::new(move |_timestamp: f64| {
                with_controller(&weak, |c| {
                    c.host_mut().frame_handle = None;
                    c.on_frame();
                });
            }) as Box<dyn FnMut(f64)>)
        };

        let resize_callback = {
            let weak = controller.clone();
            Closure::wrap(Box::new(move || {
                with_controller(&weak, |c| {
                    c.host_mut().resize_timer = None;
                    c.on_resize_settled();
                });
            }) as Box<dyn FnMut()>)
        };

        Self {
            window,
            document,
            controller,
            marker: None,
            pointer_listeners: Vec::new(),
            resize_listener: None,
            frame_callback,
            frame_handle: None,
            resize_callback,
            resize_timer: None,
        }
    }

    /// Subscribe to window resizes for the lifetime of the host.
    fn listen_for_resize(&mut self) -> OverlayResult<()> {
        let weak = self.controller.clone();
        let listener = EventListener::new(self.window.as_ref(), "resize", move |_event| {
            with_controller(&weak, |c| c.on_viewport_resize());
        })?;
        self.resize_listener = Some(listener);
        Ok(())
    }

    /// Drop the resize subscription.
    pub fn release(&mut self) {
        self.resize_listener = None;
    }

    /// Element receiving `mouseenter`/`mouseleave` for the whole page.
    fn page_target(&self) -> EventTarget {
        match self.document.document_element() {
            Some(root) => root.into(),
            None => self.document.clone().into(),
        }
    }
}

impl OverlayHost for DomHost {
    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn mount_marker(&mut self, config: &OverlayConfig) -> OverlayResult<()> {
        self.unmount_marker();

        let marker = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| OverlayError::Dom("created element is not an HtmlElement".to_string()))?;
        marker.set_class_name(&config.marker_class);

        let body = self.document.body().context(OverlayError::NoBody)?;
        body.append_child(&marker)?;

        self.marker = Some(marker);
        Ok(())
    }

    fn unmount_marker(&mut self) {
        if let Some(marker) = self.marker.take() {
            marker.remove();
        }
    }

    fn apply_position(&mut self, position: XY<f64>, config: &OverlayConfig) {
        let Some(marker) = &self.marker else {
            return;
        };
        let style = marker.style();
        for (property, value) in config.position_mode.style_properties(position) {
            if let Err(e) = style.set_property(property, &value) {
                log::warn!("[CursorOverlay] Failed to set {}: {:?}", property, e);
            }
        }
    }

    fn apply_hover(&mut self, hovering: bool, config: &OverlayConfig) {
        let Some(marker) = &self.marker else {
            return;
        };
        if let Err(e) = marker
            .class_list()
            .toggle_with_force(&config.hover_class, hovering)
        {
            log::warn!("[CursorOverlay] Failed to toggle hover class: {:?}", e);
        }
    }

    fn apply_visibility(&mut self, visible: bool) {
        let Some(marker) = &self.marker else {
            return;
        };
        let display = if visible { "block" } else { "none" };
        if let Err(e) = marker.style().set_property("display", display) {
            log::warn!("[CursorOverlay] Failed to set display: {:?}", e);
        }
    }

    fn attach_pointer_listeners(&mut self) -> OverlayResult<()> {
        if !self.pointer_listeners.is_empty() {
            return Ok(());
        }
        let document: &EventTarget = self.document.as_ref();
        let page = self.page_target();

        let weak = self.controller.clone();
        let on_move = EventListener::new(document, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let (x, y) = (event.client_x() as f64, event.client_y() as f64);
            with_controller(&weak, |c| c.on_pointer_move(x, y));
        })?;
        self.pointer_listeners.push(on_move);

        let weak = self.controller.clone();
        let on_over = EventListener::new(document, "mouseover", move |event| {
            with_controller(&weak, |c| {
                let target = classify(event.target(), c.config());
                c.on_hover_enter(target);
            });
        })?;
        self.pointer_listeners.push(on_over);

        let weak = self.controller.clone();
        let on_out = EventListener::new(document, "mouseout", move |event| {
            let related = event
                .dyn_ref::<MouseEvent>()
                .and_then(|mouse| mouse.related_target());
            with_controller(&weak, |c| {
                let target = classify(event.target(), c.config());
                let related = classify(related, c.config());
                c.on_hover_leave(target, related);
            });
        })?;
        self.pointer_listeners.push(on_out);

        let weak = self.controller.clone();
        let on_leave = EventListener::new(&page, "mouseleave", move |_event| {
            with_controller(&weak, |c| c.on_window_leave());
        })?;
        self.pointer_listeners.push(on_leave);

        let weak = self.controller.clone();
        let on_enter = EventListener::new(&page, "mouseenter", move |_event| {
            with_controller(&weak, |c| c.on_window_enter());
        })?;
        self.pointer_listeners.push(on_enter);

        Ok(())
    }

    fn detach_pointer_listeners(&mut self) {
        self.pointer_listeners.clear();
    }

    fn request_frame(&mut self) -> bool {
        match self
            .window
            .request_animation_frame(self.frame_callback.as_ref().unchecked_ref())
        {
            Ok(handle) => {
                self.frame_handle = Some(handle);
                true
            }
            Err(e) => {
                log::debug!("[CursorOverlay] requestAnimationFrame unavailable: {:?}", e);
                false
            }
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame_handle.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }

    fn schedule_resize_check(&mut self, delay_ms: u32) {
        self.cancel_resize_check();
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.resize_callback.as_ref().unchecked_ref(),
            delay_ms.min(i32::MAX as u32) as i32,
        ) {
            Ok(handle) => self.resize_timer = Some(handle),
            Err(e) => log::warn!("[CursorOverlay] Failed to arm resize timer: {:?}", e),
        }
    }

    fn cancel_resize_check(&mut self) {
        if let Some(handle) = self.resize_timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for DomHost {
    fn drop(&mut self) {
        // Callbacks are freed with the host; nothing may fire afterwards.
        self.cancel_frame();
        self.cancel_resize_check();
        self.unmount_marker();
    }
}

/// Create the overlay for the current page and activate it if the viewport
/// is wide enough.
pub fn mount(config: OverlayConfig) -> OverlayResult<SharedController> {
    let window = web_sys::window().context(OverlayError::NoWindow)?;
    let document = window.document().context(OverlayError::NoDocument)?;

    let controller: SharedController = Rc::new_cyclic(|weak| {
        RefCell::new(OverlayController::new(
            DomHost::new(window, document, weak.clone()),
            config,
        ))
    });

    {
        let mut c = controller.borrow_mut();
        c.host_mut().listen_for_resize()?;
        let width = c.host().viewport_width();
        c.activate(width);
    }

    Ok(controller)
}
