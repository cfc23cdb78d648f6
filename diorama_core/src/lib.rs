// Copyright 2026 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types and math for the diorama parallax scene widget.
//!
//! `diorama_core` holds everything about the widget that does not touch a
//! rendering surface: the configuration record, the two-state lifecycle, the
//! three fixed layer roles with their baseline placements, and the pure
//! function that turns a pointer position into a per-layer pose. It is
//! `no_std` compatible (with `alloc`) so the same math runs on the wasm
//! target and in native host tests.
//!
//! # Architecture
//!
//! The crate is organized around a pointer-event loop that turns input
//! samples into a scene pose:
//!
//! ```text
//!   pointer/touch event (browser)
//!       │
//!       ▼
//!   normalized_offset(pointer, center, viewport) ──► Vec2 in [-1, 1]²
//!       │
//!       ▼
//!   compute_pose(&SceneConfig, offset) ──► ScenePose ──► backend applies CSS
//! ```
//!
//! **[`config`]** — The [`SceneConfig`] options record, its defaults, and
//! [`ConfigPatch`] for post-construction shallow merges.
//!
//! **[`scene`]** — [`LayerRole`] constants (depth, scale, filter, opacity,
//! parallax fraction), offset normalization, and the pure
//! [`compute_pose`](scene::compute_pose) / [`baseline_pose`](scene::baseline_pose)
//! functions.
//!
//! **[`lifecycle`]** — The explicit [`Lifecycle`] state machine that guards
//! every widget operation, and the [`SceneSnapshot`] state report.
//!
//! Backends (currently `diorama_web`) own the platform side: element
//! creation, listener registration, CSS formatting, and image loading.
//!
//! [`SceneConfig`]: config::SceneConfig
//! [`ConfigPatch`]: config::ConfigPatch
//! [`LayerRole`]: scene::LayerRole
//! [`Lifecycle`]: lifecycle::Lifecycle
//! [`SceneSnapshot`]: lifecycle::SceneSnapshot
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod lifecycle;
pub mod scene;
