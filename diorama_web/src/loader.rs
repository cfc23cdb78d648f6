// Copyright 2026 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Asynchronous image loading.
//!
//! Loading probes the source through an off-tree `HtmlImageElement`; once the
//! browser has decoded it, the same source becomes the `background-image` of
//! all three layers (the layers always share one image, differentiated only
//! by transform and filter) and the placeholder state is cleared.
//!
//! # Supersession policy
//!
//! Loads are fire-and-forget and not cancellable, so two in-flight requests
//! can complete in either order. The policy is **last call wins by sequence
//! number**: each call stamps the widget's load sequence, and a completion
//! whose stamp is no longer current is discarded. An earlier request that
//! resolves late can never overwrite a newer one; the network fetch itself is
//! not aborted, only its effect.
//!
//! A failed decode logs exactly one console error and leaves every layer in
//! its prior state.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Event, HtmlImageElement, console};

use crate::widget::WidgetState;

/// Begins loading `src` for the widget behind `state`.
///
/// Logs and returns without effect while the widget is idle.
pub(crate) fn start_load(state: &Rc<RefCell<WidgetState>>, src: &str) {
    if !state.borrow().lifecycle.is_live() {
        console::error_1(&JsValue::from_str(
            "diorama: load_image called before initialize",
        ));
        return;
    }

    let seq = {
        let mut state = state.borrow_mut();
        state.load_seq += 1;
        state.load_seq
    };

    let image = match HtmlImageElement::new() {
        Ok(image) => image,
        Err(err) => {
            console::error_2(
                &JsValue::from_str("diorama: could not create image element"),
                &err,
            );
            return;
        }
    };

    let onload = {
        let state = Rc::clone(state);
        let src = String::from(src);
        Closure::once_into_js(move |_event: Event| {
            let mut state = state.borrow_mut();
            if state.load_seq != seq {
                // Superseded by a later load_image call.
                return;
            }
            apply_image(&mut state, &src);
        })
    };
    image.set_onload(Some(onload.unchecked_ref()));

    let onerror = {
        let src = String::from(src);
        Closure::once_into_js(move |_event: Event| {
            console::error_1(&JsValue::from_str(&format!(
                "diorama: image failed to load: {src}"
            )));
        })
    };
    image.set_onerror(Some(onerror.unchecked_ref()));

    image.set_src(src);
}

/// Applies a decoded source to all three layers and clears the placeholders.
fn apply_image(state: &mut WidgetState, src: &str) {
    let Some(dom) = &state.dom else {
        // Torn down while the load was in flight.
        return;
    };
    let value = format!("url({src})");
    for layer in &dom.layers {
        let style = layer.style();
        let _ = style.set_property("background-image", &value);
        let _ = style.set_property("border", "none");
        let _ = layer.class_list().remove_1("placeholder");
        layer.set_text_content(None);
    }
}
