// Copyright 2026 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget configuration.
//!
//! [`SceneConfig`] is the immutable-after-construction options record. Fields
//! left at their [`Default`] values match the documented widget defaults.
//! After construction, [`SceneConfig::apply`] shallow-merges a
//! [`ConfigPatch`], replacing only the supplied fields; merging never
//! re-renders already-built structure (the backend reads the config on the
//! next pointer event).
//!
//! The container reference (selector string or element handle) is a backend
//! concern and deliberately not part of this record, keeping the core crate
//! free of platform types.

use alloc::string::String;

/// A container width or height.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Extent {
    /// A pixel count, rendered as `"{n}px"`.
    Px(f64),
    /// A CSS length passed through verbatim (e.g. `"60vh"`).
    Css(String),
    /// Unspecified; the backend substitutes its per-axis fallback
    /// (`100%` width, `400px` height).
    #[default]
    Auto,
}

/// Options for a diorama scene widget.
///
/// Construct with struct-update syntax over [`Default`]:
///
/// ```
/// use diorama_core::config::SceneConfig;
///
/// let config = SceneConfig {
///     max_rotation: 20.0,
///     fill_background: true,
///     ..SceneConfig::default()
/// };
/// assert_eq!(config.parallax_strength, 0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Container width.
    pub width: Extent,
    /// Container height.
    pub height: Extent,
    /// Maximum scene rotation in degrees, reached when the normalized
    /// pointer offset saturates at ±1.
    pub max_rotation: f64,
    /// Unitless multiplier on the shared parallax magnitude.
    pub parallax_strength: f64,
    /// Enlarges and blurs the background layer (1.3× instead of 1.05×) so
    /// rotation never reveals empty edges, at the cost of peripheral crop.
    pub fill_background: bool,
    /// Whether a document-wide touch-move listener is registered.
    pub enable_touch: bool,
    /// Whether a live diagnostic overlay is created in the container.
    pub show_debug_info: bool,
    /// Whether construction itself performs initialization.
    pub auto_init: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: Extent::Auto,
            height: Extent::Auto,
            max_rotation: 15.0,
            parallax_strength: 0.5,
            fill_background: false,
            enable_touch: true,
            show_debug_info: false,
            auto_init: true,
        }
    }
}

impl SceneConfig {
    /// Shallow-merges `patch` into `self`, replacing only the supplied fields.
    pub fn apply(&mut self, patch: ConfigPatch) {
        let ConfigPatch {
            width,
            height,
            max_rotation,
            parallax_strength,
            fill_background,
            enable_touch,
            show_debug_info,
            auto_init,
        } = patch;
        if let Some(v) = width {
            self.width = v;
        }
        if let Some(v) = height {
            self.height = v;
        }
        if let Some(v) = max_rotation {
            self.max_rotation = v;
        }
        if let Some(v) = parallax_strength {
            self.parallax_strength = v;
        }
        if let Some(v) = fill_background {
            self.fill_background = v;
        }
        if let Some(v) = enable_touch {
            self.enable_touch = v;
        }
        if let Some(v) = show_debug_info {
            self.show_debug_info = v;
        }
        if let Some(v) = auto_init {
            self.auto_init = v;
        }
    }
}

/// A partial [`SceneConfig`] for post-construction updates.
///
/// Every field is optional; `None` leaves the current value untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigPatch {
    /// New container width, if any.
    pub width: Option<Extent>,
    /// New container height, if any.
    pub height: Option<Extent>,
    /// New maximum rotation in degrees, if any.
    pub max_rotation: Option<f64>,
    /// New parallax strength, if any.
    pub parallax_strength: Option<f64>,
    /// New background-fill setting, if any.
    pub fill_background: Option<bool>,
    /// New touch-support setting, if any. Takes effect on the next
    /// initialize cycle; an already-attached listener set is not reshaped.
    pub enable_touch: Option<bool>,
    /// New debug-overlay setting, if any. Takes effect on the next
    /// initialize cycle.
    pub show_debug_info: Option<bool>,
    /// New auto-init setting, if any.
    pub auto_init: Option<bool>,
}
