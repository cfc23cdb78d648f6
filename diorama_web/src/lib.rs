// Copyright 2026 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for diorama.
//!
//! This crate owns everything that touches the DOM:
//!
//! - [`SceneWidget`]: the embeddable widget — lifecycle, structure building,
//!   pose application, and state reporting
//! - [`ContainerTarget`]: host container resolution (selector or element)
//! - listener registration as a scoped guard, released exactly once on
//!   teardown
//! - asynchronous image loading with a last-call-wins supersession policy
//!
//! The pointer-to-pose math lives in [`diorama_core`] and is applied here as
//! CSS `transform` strings on a three-layer element stack.
//!
//! Failures the widget is specified to survive (a container selector that
//! resolves to nothing, an image that fails to decode) are reported through
//! the browser console and swallowed; environmental DOM failures (no
//! `window`, element creation rejected) propagate as `Err(JsValue)`.

#![no_std]

extern crate alloc;

mod css;
mod listeners;
mod loader;
mod widget;

pub use widget::{ContainerTarget, SceneWidget};
