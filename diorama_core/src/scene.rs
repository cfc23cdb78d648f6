// Copyright 2026 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer roles and the pointer-to-pose math.
//!
//! The scene is a fixed stack of three layers ([`LayerRole::ALL`], background
//! first). Each role carries constant depth, baseline scale, parallax
//! fraction, filter, and opacity; the illusion of depth comes entirely from
//! the foreground translating further than the background for the same
//! pointer offset (1 : 0.6 : 0.3).
//!
//! [`compute_pose`] is a pure function from (configuration, normalized
//! offset) to a [`ScenePose`]. Backends apply poses as CSS; nothing here
//! touches a rendering surface, so every property below is testable on the
//! native host.

use kurbo::{Point, Vec2};

use crate::config::SceneConfig;

/// Planar translation in CSS px produced by a fully saturated offset at
/// parallax strength 1.0, before the per-layer fraction is applied.
pub const PARALLAX_RANGE: f64 = 20.0;

/// One of the three stacked visual planes.
///
/// Variants are declared in stacking order: background behind, foreground in
/// front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerRole {
    /// Rearmost plane; enlarged and blurred so rotation never reveals its
    /// edges.
    Background,
    /// Middle plane at the scene's own depth.
    Midground,
    /// Nearest plane; slightly shrunk and sharpened.
    Foreground,
}

impl LayerRole {
    /// All roles in stacking order (background first).
    pub const ALL: [Self; 3] = [Self::Background, Self::Midground, Self::Foreground];

    /// Baseline depth along the view axis (CSS `translateZ`), in px.
    #[inline]
    #[must_use]
    pub const fn depth(self) -> f64 {
        match self {
            Self::Background => -50.0,
            Self::Midground => 0.0,
            Self::Foreground => 30.0,
        }
    }

    /// Baseline planar scale.
    ///
    /// The background trades scale for edge coverage: 1.05 normally, 1.3 when
    /// `fill_background` masks edges aggressively.
    #[inline]
    #[must_use]
    pub const fn base_scale(self, fill_background: bool) -> f64 {
        match self {
            Self::Background => {
                if fill_background {
                    1.3
                } else {
                    1.05
                }
            }
            Self::Midground => 1.0,
            Self::Foreground => 0.95,
        }
    }

    /// Fraction of the shared parallax magnitude this layer receives.
    ///
    /// Nearer layers move more against a fixed viewpoint.
    #[inline]
    #[must_use]
    pub const fn parallax_fraction(self) -> f64 {
        match self {
            Self::Background => 0.3,
            Self::Midground => 0.6,
            Self::Foreground => 1.0,
        }
    }

    /// Layer opacity.
    #[inline]
    #[must_use]
    pub const fn opacity(self) -> f64 {
        match self {
            Self::Background => 1.0,
            Self::Midground => 0.8,
            Self::Foreground => 0.6,
        }
    }

    /// CSS filter for this layer's visual treatment.
    #[inline]
    #[must_use]
    pub const fn filter(self, fill_background: bool) -> &'static str {
        match self {
            Self::Background => {
                if fill_background {
                    "blur(3px) brightness(0.7)"
                } else {
                    "blur(2px) brightness(0.8)"
                }
            }
            Self::Midground => "none",
            Self::Foreground => "brightness(1.1) contrast(1.1)",
        }
    }

    /// CSS class name suffix for this layer's element.
    #[inline]
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Midground => "midground",
            Self::Foreground => "foreground",
        }
    }
}

/// Viewport dimensions in CSS px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Inner width.
    pub width: f64,
    /// Inner height.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport from inner dimensions.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Normalizes a pointer position against the widget center.
///
/// Each component is the pointer's displacement from `center` divided by half
/// the corresponding *viewport* dimension (not the container's), then clamped
/// to `[-1, 1]`. Sensitivity is therefore independent of widget size and
/// saturates at the viewport edges, so coordinates far outside the viewport
/// cannot over-rotate the scene.
///
/// A degenerate (zero or negative) viewport dimension yields a zero component
/// rather than a non-finite one.
#[must_use]
pub fn normalized_offset(pointer: Point, center: Point, viewport: Viewport) -> Vec2 {
    let component = |delta: f64, extent: f64| {
        if extent > 0.0 {
            (delta / (extent / 2.0)).clamp(-1.0, 1.0)
        } else {
            0.0
        }
    };
    Vec2::new(
        component(pointer.x - center.x, viewport.width),
        component(pointer.y - center.y, viewport.height),
    )
}

/// The computed placement of a single layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerPose {
    /// Depth along the view axis (CSS `translateZ`), in px.
    pub depth: f64,
    /// Planar scale.
    pub scale: f64,
    /// Planar parallax translation, in px.
    pub translation: Vec2,
}

/// The computed pose of the whole scene for one pointer sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenePose {
    /// Rotation around the horizontal axis, in degrees. Positive tilts the
    /// top of the scene away from the viewer.
    pub rotate_x: f64,
    /// Rotation around the vertical axis, in degrees.
    pub rotate_y: f64,
    /// Per-layer placements, in [`LayerRole::ALL`] order.
    pub layers: [LayerPose; 3],
}

/// Computes the scene pose for a clamped normalized offset.
///
/// Rotation maps the offset linearly onto `±max_rotation`, with the X
/// rotation sign-inverted so downward pointer motion tilts the top of the
/// scene away from the viewer. The parallax translation shared by all layers
/// is `offset × PARALLAX_RANGE × parallax_strength`; each layer takes its
/// [`parallax_fraction`](LayerRole::parallax_fraction) of it on top of its
/// baseline depth and scale.
#[must_use]
pub fn compute_pose(config: &SceneConfig, offset: Vec2) -> ScenePose {
    let parallax = offset * (PARALLAX_RANGE * config.parallax_strength);
    let layers = LayerRole::ALL.map(|role| LayerPose {
        depth: role.depth(),
        scale: role.base_scale(config.fill_background),
        translation: parallax * role.parallax_fraction(),
    });
    // The `+ 0.0` folds the negative zero produced by negating a zero offset,
    // so a centered pointer formats as `rotateX(0deg)`.
    ScenePose {
        rotate_x: -offset.y * config.max_rotation + 0.0,
        rotate_y: offset.x * config.max_rotation,
        layers,
    }
}

/// The pose every layer returns to on reset: zero rotation, zero parallax,
/// baseline depth and scale.
#[must_use]
pub fn baseline_pose(config: &SceneConfig) -> ScenePose {
    compute_pose(config, Vec2::ZERO)
}

#[cfg(test)]
mod tests {
    #[cfg(not(feature = "std"))]
    use kurbo::common::FloatFuncs as _;

    use super::*;
    use crate::config::ConfigPatch;

    const VIEWPORT: Viewport = Viewport::new(1920.0, 1080.0);

    #[test]
    fn offset_is_zero_at_center() {
        let center = Point::new(250.0, 175.0);
        let offset = normalized_offset(center, center, VIEWPORT);
        assert_eq!(offset, Vec2::ZERO);
    }

    #[test]
    fn offset_components_always_clamped() {
        let center = Point::new(960.0, 540.0);
        let far = [
            Point::new(1e9, -1e9),
            Point::new(-40_000.0, 90_000.0),
            Point::new(f64::MAX, f64::MIN),
        ];
        for pointer in far {
            let offset = normalized_offset(pointer, center, VIEWPORT);
            assert!((-1.0..=1.0).contains(&offset.x), "x out of range: {offset:?}");
            assert!((-1.0..=1.0).contains(&offset.y), "y out of range: {offset:?}");
        }
    }

    #[test]
    fn offset_scales_with_viewport_not_container() {
        let center = Point::new(960.0, 540.0);
        let pointer = Point::new(1440.0, 540.0);
        // 480px right of center = half of the viewport half-width.
        let offset = normalized_offset(pointer, center, VIEWPORT);
        assert_eq!(offset, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn degenerate_viewport_yields_zero_offset() {
        let offset = normalized_offset(
            Point::new(100.0, 100.0),
            Point::ORIGIN,
            Viewport::new(0.0, 0.0),
        );
        assert_eq!(offset, Vec2::ZERO);
    }

    #[test]
    fn rotation_sign_law() {
        let config = SceneConfig::default();
        // Pointer above center: smaller y, negative offset.y, rotate_x >= 0.
        let above = compute_pose(&config, Vec2::new(0.0, -0.4));
        assert!(above.rotate_x >= 0.0, "rotate_x: {}", above.rotate_x);
        // Pointer right of center: rotate_y >= 0.
        let right = compute_pose(&config, Vec2::new(0.4, 0.0));
        assert!(right.rotate_y >= 0.0, "rotate_y: {}", right.rotate_y);
    }

    #[test]
    fn rotation_saturates_at_max_rotation() {
        let config = SceneConfig::default();
        let pose = compute_pose(&config, Vec2::new(1.0, -1.0));
        assert_eq!(pose.rotate_y, config.max_rotation);
        assert_eq!(pose.rotate_x, config.max_rotation);
    }

    #[test]
    fn parallax_ratios_are_exact() {
        let config = SceneConfig::default();
        let pose = compute_pose(&config, Vec2::new(0.7, -0.2));
        let [bg, mid, fg] = pose.layers;
        assert_eq!(bg.translation, fg.translation * 0.3);
        assert_eq!(mid.translation, fg.translation * 0.6);
        assert!(fg.translation.hypot2() >= mid.translation.hypot2());
        assert!(mid.translation.hypot2() >= bg.translation.hypot2());
    }

    #[test]
    fn foreground_translation_matches_shared_magnitude() {
        let config = SceneConfig {
            parallax_strength: 0.5,
            ..SceneConfig::default()
        };
        let pose = compute_pose(&config, Vec2::new(1.0, 0.0));
        // 1.0 × 20 × 0.5 = 10px, full fraction for the foreground.
        assert_eq!(pose.layers[2].translation, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn baseline_pose_has_zero_rotation_and_translation() {
        for fill_background in [false, true] {
            let config = SceneConfig {
                fill_background,
                ..SceneConfig::default()
            };
            let pose = baseline_pose(&config);
            assert_eq!(pose.rotate_x, 0.0);
            assert_eq!(pose.rotate_y, 0.0);
            // Not the negative zero that plain negation would produce.
            assert!(pose.rotate_x.is_sign_positive(), "rotate_x must format as 0");
            for layer in pose.layers {
                assert_eq!(layer.translation, Vec2::ZERO);
            }
        }
    }

    #[test]
    fn baseline_matches_role_constants() {
        let config = SceneConfig::default();
        let pose = baseline_pose(&config);
        for (layer, role) in pose.layers.iter().zip(LayerRole::ALL) {
            assert_eq!(layer.depth, role.depth());
            assert_eq!(layer.scale, role.base_scale(false));
        }
        assert_eq!(pose.layers[0].depth, -50.0);
        assert_eq!(pose.layers[0].scale, 1.05);
        assert_eq!(pose.layers[1].depth, 0.0);
        assert_eq!(pose.layers[2].depth, 30.0);
        assert_eq!(pose.layers[2].scale, 0.95);
    }

    #[test]
    fn fill_background_changes_scale_and_filter() {
        assert_eq!(LayerRole::Background.base_scale(true), 1.3);
        assert_eq!(
            LayerRole::Background.filter(true),
            "blur(3px) brightness(0.7)"
        );
        assert_eq!(
            LayerRole::Background.filter(false),
            "blur(2px) brightness(0.8)"
        );
        // The other layers are unaffected by fill_background.
        assert_eq!(LayerRole::Midground.base_scale(true), 1.0);
        assert_eq!(LayerRole::Foreground.base_scale(true), 0.95);
    }

    #[test]
    fn updated_max_rotation_takes_effect() {
        let mut config = SceneConfig::default();
        config.apply(ConfigPatch {
            max_rotation: Some(30.0),
            ..ConfigPatch::default()
        });
        let pose = compute_pose(&config, Vec2::new(1.0, 0.0));
        assert_eq!(pose.rotate_y, 30.0);
    }

    #[test]
    fn pose_is_linear_in_offset_below_saturation() {
        let config = SceneConfig::default();
        let half = compute_pose(&config, Vec2::new(0.5, 0.5));
        let full = compute_pose(&config, Vec2::new(1.0, 1.0));
        assert!((full.rotate_y - 2.0 * half.rotate_y).abs() < 1e-12);
        assert!((full.rotate_x - 2.0 * half.rotate_x).abs() < 1e-12);
        let [_, _, fg_half] = half.layers;
        let [_, _, fg_full] = full.layers;
        assert!((fg_full.translation.x - 2.0 * fg_half.translation.x).abs() < 1e-12);
    }

    #[test]
    fn stacking_order_is_back_to_front() {
        let [a, b, c] = LayerRole::ALL;
        assert_eq!(a, LayerRole::Background);
        assert_eq!(b, LayerRole::Midground);
        assert_eq!(c, LayerRole::Foreground);
        assert!(a.depth() < b.depth() && b.depth() < c.depth());
    }
}
