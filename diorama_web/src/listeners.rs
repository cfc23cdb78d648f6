// Copyright 2026 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Global event listener registration.
//!
//! The widget listens document-wide, not container-scoped: movement anywhere
//! on the page drives the effect. [`ListenerGuard`] is the scoped resource
//! for those registrations — acquired on initialize, released exactly once
//! when dropped on teardown, so a discarded widget can never leak a
//! document-level handler.
//!
//! The touch listener is registered non-passive because the handler calls
//! `preventDefault()` to suppress page scrolling while steering the scene.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{AddEventListenerOptions, Document, Event, MouseEvent, TouchEvent, Window};

use crate::widget::{WidgetState, apply_pointer, refresh_center};

type MouseClosure = Closure<dyn FnMut(MouseEvent)>;
type TouchClosure = Closure<dyn FnMut(TouchEvent)>;
type ResizeClosure = Closure<dyn FnMut(Event)>;

/// Owns the three global listener registrations for one widget instance.
///
/// Multiple widgets each register their own listeners on the same document
/// and window; every page-wide move invokes all of them. Isolation is traded
/// for simplicity, exactly one deregistration per registration is the only
/// guarantee this type exists to provide.
pub(crate) struct ListenerGuard {
    window: Window,
    document: Document,
    mouse: MouseClosure,
    /// `None` when touch support is disabled in the configuration.
    touch: Option<TouchClosure>,
    resize: ResizeClosure,
}

impl ListenerGuard {
    /// Registers mousemove and (optionally) touchmove on `document` and
    /// resize on `window`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the browser rejects a registration.
    pub(crate) fn attach(
        window: &Window,
        document: &Document,
        state: &Rc<RefCell<WidgetState>>,
    ) -> Result<Self, JsValue> {
        let enable_touch = state.borrow().config.enable_touch;

        let mouse: MouseClosure = {
            let state = Rc::clone(state);
            Closure::wrap(Box::new(move |event: MouseEvent| {
                apply_pointer(
                    &state,
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                );
            }))
        };
        document.add_event_listener_with_callback("mousemove", mouse.as_ref().unchecked_ref())?;

        let touch = if enable_touch {
            let closure: TouchClosure = {
                let state = Rc::clone(state);
                Closure::wrap(Box::new(move |event: TouchEvent| {
                    let Some(touch) = event.touches().get(0) else {
                        return;
                    };
                    event.prevent_default();
                    apply_pointer(
                        &state,
                        f64::from(touch.client_x()),
                        f64::from(touch.client_y()),
                    );
                }))
            };
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            document.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            Some(closure)
        } else {
            None
        };

        let resize: ResizeClosure = {
            let state = Rc::clone(state);
            // Resize recomputes the center only; the next pointer sample
            // picks up the new geometry.
            Closure::wrap(Box::new(move |_event: Event| refresh_center(&state)))
        };
        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;

        Ok(Self {
            window: window.clone(),
            document: document.clone(),
            mouse,
            touch,
            resize,
        })
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback("mousemove", self.mouse.as_ref().unchecked_ref());
        if let Some(touch) = &self.touch {
            let _ = self
                .document
                .remove_event_listener_with_callback("touchmove", touch.as_ref().unchecked_ref());
        }
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
    }
}

impl core::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("touch", &self.touch.is_some())
            .finish_non_exhaustive()
    }
}
