// Copyright 2026 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget lifecycle state.
//!
//! The widget has exactly two states: [`Idle`] (structure not built, no
//! listeners attached) and [`Live`]. Every public operation pattern-matches
//! on the state instead of consulting a scattered boolean flag; operations
//! that arrive while [`Idle`] are silent no-ops, because the widget is a
//! best-effort visual embellishment and never raises failures at its caller.
//!
//! [`Idle`]: Lifecycle::Idle
//! [`Live`]: Lifecycle::Live

use kurbo::Point;

use crate::config::SceneConfig;

/// The two-state widget lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Structure not built; pointer, resize, reset, and load operations are
    /// no-ops.
    #[default]
    Idle,
    /// Structure built and listeners attached.
    Live,
}

impl Lifecycle {
    /// Returns `true` in the [`Live`](Self::Live) state.
    #[inline]
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }
}

/// A point-in-time report of the widget's state.
///
/// Returned by the widget's `state()` accessor; owning copies, not live
/// references, so the snapshot stays coherent while the widget keeps moving.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSnapshot {
    /// Current lifecycle state.
    pub lifecycle: Lifecycle,
    /// Last known absolute pointer position, in viewport coordinates.
    pub pointer: Point,
    /// Absolute viewport position of the widget's visual center.
    pub center: Point,
    /// Copy of the active configuration.
    pub config: SceneConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(Lifecycle::default(), Lifecycle::Idle);
        assert!(!Lifecycle::default().is_live());
        assert!(Lifecycle::Live.is_live());
    }

    #[test]
    fn snapshot_is_an_owning_copy() {
        let snapshot = SceneSnapshot {
            lifecycle: Lifecycle::Live,
            pointer: Point::new(12.0, 34.0),
            center: Point::new(250.0, 175.0),
            config: SceneConfig::default(),
        };
        let copy = snapshot.clone();
        assert_eq!(copy, snapshot);
    }
}
