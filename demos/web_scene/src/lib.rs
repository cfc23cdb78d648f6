// Copyright 2026 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: a pointer-driven parallax scene.
//!
//! Creates a 500×350 host container, embeds a [`SceneWidget`] with the debug
//! overlay enabled, and loads a demo photograph. Move the pointer anywhere on
//! the page to tilt the scene.
//!
//! Build with: `wasm-pack build --target web demos/web_scene`
//!
//! Then serve `demos/web_scene/` and open `index.html` in a browser.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use diorama_core::config::{Extent, SceneConfig};
use diorama_web::{ContainerTarget, SceneWidget};
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

const IMAGE_URL: &str = "https://picsum.photos/id/1015/1000/700";

/// Entry point — called automatically by `wasm_bindgen(start)`.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().expect("no global window");
    let document = window.document().expect("no document");
    let body = document.body().expect("no body");
    body.style().set_css_text(
        "margin: 0; min-height: 100vh; display: flex; align-items: center; \
         justify-content: center; background: #10121f;",
    );

    let host = create_host(&document)?;
    body.append_child(&host)?;

    let config = SceneConfig {
        width: Extent::Px(500.0),
        height: Extent::Px(350.0),
        fill_background: true,
        show_debug_info: true,
        ..SceneConfig::default()
    };
    let widget = SceneWidget::new(ContainerTarget::Element(host), config)?;
    widget.load_image(IMAGE_URL);

    // Keep the widget alive for the page lifetime — there is no graceful
    // shutdown on the web, and dropping it would detach the listeners.
    core::mem::forget(widget);

    Ok(())
}

fn create_host(document: &Document) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = document.create_element("div")?.unchecked_into();
    el.set_id("scene-host");
    Ok(el)
}
