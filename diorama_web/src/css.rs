// Copyright 2026 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS string formatting.
//!
//! Pure functions from pose records to CSS property values, separated from
//! the style-writing side effects so the exact strings are testable on the
//! native host. Baseline poses and reset poses go through the same
//! formatter, so a reset layer's `transform` is byte-equal to its initial
//! one.

use alloc::format;
use alloc::string::String;

use diorama_core::config::Extent;
use diorama_core::scene::{LayerPose, ScenePose};
use kurbo::Vec2;

/// Formats the scene element's rotation transform.
pub(crate) fn scene_rotation(pose: &ScenePose) -> String {
    format!("rotateX({}deg) rotateY({}deg)", pose.rotate_x, pose.rotate_y)
}

/// Formats a layer's composed transform.
///
/// The depth is always present; `scale(1)` and a zero planar translation are
/// omitted, so baseline transforms keep the compact documented form
/// (e.g. `translateZ(0px)` for the midground at rest).
pub(crate) fn layer_transform(layer: &LayerPose) -> String {
    let mut out = format!("translateZ({}px)", layer.depth);
    if layer.scale != 1.0 {
        out.push_str(&format!(" scale({})", layer.scale));
    }
    if layer.translation != Vec2::ZERO {
        out.push_str(&format!(
            " translate({}px, {}px)",
            layer.translation.x, layer.translation.y
        ));
    }
    out
}

/// Formats a configured extent, substituting `fallback` for [`Extent::Auto`].
pub(crate) fn extent_css(extent: &Extent, fallback: &str) -> String {
    match extent {
        Extent::Px(n) => format!("{n}px"),
        Extent::Css(s) => s.clone(),
        Extent::Auto => String::from(fallback),
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;

    use diorama_core::config::SceneConfig;
    use diorama_core::scene::{baseline_pose, compute_pose};

    use super::*;

    #[test]
    fn baseline_layer_transforms() {
        let pose = baseline_pose(&SceneConfig::default());
        let [bg, mid, fg] = pose.layers;
        assert_eq!(layer_transform(&bg), "translateZ(-50px) scale(1.05)");
        assert_eq!(layer_transform(&mid), "translateZ(0px)");
        assert_eq!(layer_transform(&fg), "translateZ(30px) scale(0.95)");
    }

    #[test]
    fn fill_background_baseline_scale() {
        let config = SceneConfig {
            fill_background: true,
            ..SceneConfig::default()
        };
        let pose = baseline_pose(&config);
        assert_eq!(layer_transform(&pose.layers[0]), "translateZ(-50px) scale(1.3)");
    }

    #[test]
    fn zero_pose_rotation() {
        let pose = baseline_pose(&SceneConfig::default());
        assert_eq!(scene_rotation(&pose), "rotateX(0deg) rotateY(0deg)");
    }

    #[test]
    fn saturated_offset_rotation() {
        let pose = compute_pose(&SceneConfig::default(), Vec2::new(1.0, 0.0));
        assert_eq!(scene_rotation(&pose), "rotateX(0deg) rotateY(15deg)");
    }

    #[test]
    fn parallax_translation_appears_in_transform() {
        // Offset (0.5, 0.5) at default strength: shared magnitude 5px,
        // midground takes 0.6 of it.
        let pose = compute_pose(&SceneConfig::default(), Vec2::new(0.5, 0.5));
        assert_eq!(
            layer_transform(&pose.layers[1]),
            "translateZ(0px) translate(3px, 3px)"
        );
        assert_eq!(
            layer_transform(&pose.layers[2]),
            "translateZ(30px) scale(0.95) translate(5px, 5px)"
        );
    }

    #[test]
    fn reset_transform_is_byte_equal_to_initial() {
        let config = SceneConfig::default();
        let initial = baseline_pose(&config);
        // Simulate pointer activity, then reset back to baseline.
        let _moved = compute_pose(&config, Vec2::new(0.8, -0.3));
        let reset = baseline_pose(&config);
        for (a, b) in initial.layers.iter().zip(reset.layers.iter()) {
            assert_eq!(layer_transform(a), layer_transform(b));
        }
    }

    #[test]
    fn extent_rendering() {
        assert_eq!(extent_css(&Extent::Px(500.0), "100%"), "500px");
        assert_eq!(extent_css(&Extent::Css("60vh".to_string()), "100%"), "60vh");
        assert_eq!(extent_css(&Extent::Auto, "100%"), "100%");
        assert_eq!(extent_css(&Extent::Auto, "400px"), "400px");
    }
}
