// Copyright 2026 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The embeddable scene widget.
//!
//! [`SceneWidget`] wires the pieces together: it resolves the host container,
//! builds the three-layer DOM structure, attaches the global listeners as a
//! [`ListenerGuard`], and applies poses computed by [`diorama_core`] as CSS
//! on every pointer sample.
//!
//! Widget state shared with the event closures lives in an
//! `Rc<RefCell<WidgetState>>`; the closures hold clones of the `Rc` while the
//! widget itself owns the guard, so dropping the widget (or calling
//! [`teardown`](SceneWidget::teardown)) detaches every listener exactly once
//! and no reference cycle forms.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use diorama_core::config::{ConfigPatch, SceneConfig};
use diorama_core::lifecycle::{Lifecycle, SceneSnapshot};
use diorama_core::scene::{
    LayerPose, LayerRole, ScenePose, Viewport, baseline_pose, compute_pose, normalized_offset,
};
use kurbo::{Point, Vec2};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, HtmlElement, Window, console};

use crate::css;
use crate::listeners::ListenerGuard;
use crate::loader;

/// Caption shown on each layer before an image is loaded.
const PLACEHOLDER_CAPTION: &str = "Waiting for image\u{2026}";

/// Height substituted when the configured height is [`Auto`](diorama_core::config::Extent::Auto).
const FALLBACK_HEIGHT: &str = "400px";

/// The host container for a widget.
#[derive(Clone, Debug)]
pub enum ContainerTarget {
    /// A CSS selector resolved via `document.querySelector` at initialize
    /// time.
    Selector(String),
    /// A direct element handle.
    Element(HtmlElement),
}

/// The live DOM structure: one scene element owning exactly three layers.
pub(crate) struct SceneDom {
    pub(crate) container: HtmlElement,
    pub(crate) scene: HtmlElement,
    /// Layer elements in [`LayerRole::ALL`] order.
    pub(crate) layers: [HtmlElement; 3],
    pub(crate) debug: Option<HtmlElement>,
}

/// Widget state shared between the public API and the event closures.
pub(crate) struct WidgetState {
    pub(crate) config: SceneConfig,
    pub(crate) lifecycle: Lifecycle,
    /// Last known absolute pointer position, in viewport coordinates.
    pub(crate) pointer: Point,
    /// Absolute viewport position of the container's visual center.
    pub(crate) center: Point,
    pub(crate) dom: Option<SceneDom>,
    /// Monotonic stamp for image loads; only the completion carrying the
    /// latest stamp may touch the layers.
    pub(crate) load_seq: u64,
}

/// A pointer-driven pseudo-3D parallax scene.
///
/// The widget builds a three-layer stack (background, midground, foreground)
/// inside a host container and tilts it toward the pointer, with each layer
/// translating by a depth-dependent fraction of a shared parallax magnitude.
/// Listeners are document-wide, so movement anywhere on the page drives the
/// effect.
///
/// ```rust,ignore
/// let config = SceneConfig { width: Extent::Px(500.0), ..SceneConfig::default() };
/// let widget = SceneWidget::new(ContainerTarget::Selector("#scene".into()), config)?;
/// widget.load_image("photo.jpg");
/// ```
pub struct SceneWidget {
    target: ContainerTarget,
    state: Rc<RefCell<WidgetState>>,
    listeners: Option<ListenerGuard>,
}

impl SceneWidget {
    /// Creates a widget for the given container.
    ///
    /// When `config.auto_init` is set (the default), construction performs
    /// [`initialize`](Self::initialize) as well.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for environmental DOM failures (no `window`,
    /// element creation rejected). An unresolvable container is *not* an
    /// error: it is logged and leaves the widget idle, matching the
    /// best-effort contract.
    pub fn new(target: ContainerTarget, config: SceneConfig) -> Result<Self, JsValue> {
        let auto_init = config.auto_init;
        let mut widget = Self {
            target,
            state: Rc::new(RefCell::new(WidgetState {
                config,
                lifecycle: Lifecycle::Idle,
                pointer: Point::ORIGIN,
                center: Point::ORIGIN,
                dom: None,
                load_seq: 0,
            })),
            listeners: None,
        };
        if auto_init {
            widget.initialize()?;
        }
        Ok(widget)
    }

    /// Builds the structure, attaches listeners, and goes live.
    ///
    /// Idempotent: a second call while live is a no-op. If the configured
    /// container does not resolve, logs to the console and returns `Ok`
    /// with the widget still idle; there is no retry path short of calling
    /// `initialize` again.
    ///
    /// # Errors
    ///
    /// Returns `Err` for environmental DOM failures only.
    pub fn initialize(&mut self) -> Result<(), JsValue> {
        if self.state.borrow().lifecycle.is_live() {
            return Ok(());
        }

        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document on window"))?;

        let Some(container) = resolve_target(&self.target, &document) else {
            console::error_1(&JsValue::from_str(
                "diorama: container element not found; widget stays idle",
            ));
            return Ok(());
        };

        let dom = build_structure(&document, container, &self.state.borrow().config)?;

        {
            let mut state = self.state.borrow_mut();
            state.dom = Some(dom);
            update_center(&mut state);
        }

        // Listeners attach before the state goes live; their handlers are
        // no-ops until the flip below, so no event can observe a half-built
        // widget.
        self.listeners = Some(ListenerGuard::attach(&window, &document, &self.state)?);
        self.state.borrow_mut().lifecycle = Lifecycle::Live;
        Ok(())
    }

    /// Detaches all listeners, clears the container, and returns to idle.
    ///
    /// No-op unless live. The configuration is retained, so a later
    /// [`initialize`](Self::initialize) rebuilds the structure.
    pub fn teardown(&mut self) {
        let mut state = self.state.borrow_mut();
        match state.lifecycle {
            Lifecycle::Idle => return,
            Lifecycle::Live => {}
        }
        // Dropping the guard deregisters document/window listeners.
        self.listeners = None;
        if let Some(dom) = state.dom.take() {
            dom.container.set_inner_html("");
        }
        state.lifecycle = Lifecycle::Idle;
    }

    /// Starts loading `src` and applies it to all three layers on success.
    ///
    /// Fire-and-forget; see [`loader`](crate::loader) for the supersession
    /// policy. A no-op (with a console error) while idle.
    pub fn load_image(&self, src: &str) {
        loader::start_load(&self.state, src);
    }

    /// Restores zero rotation and every layer's baseline transform.
    ///
    /// Pointer state and configuration are untouched. No-op while idle.
    pub fn reset(&self) {
        let state = self.state.borrow();
        if !state.lifecycle.is_live() {
            return;
        }
        let pose = baseline_pose(&state.config);
        if let Some(dom) = &state.dom {
            write_pose(dom, &pose);
        }
    }

    /// Shallow-merges `patch` into the active configuration.
    ///
    /// Existing structure is not re-rendered; numeric options (rotation,
    /// parallax strength) take effect on the next pointer sample, structural
    /// ones (touch, debug overlay, extents) on the next initialize cycle.
    pub fn update_config(&self, patch: ConfigPatch) {
        self.state.borrow_mut().config.apply(patch);
    }

    /// Returns a snapshot of the widget's current state.
    #[must_use]
    pub fn state(&self) -> SceneSnapshot {
        let state = self.state.borrow();
        SceneSnapshot {
            lifecycle: state.lifecycle,
            pointer: state.pointer,
            center: state.center,
            config: state.config.clone(),
        }
    }
}

impl Drop for SceneWidget {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl core::fmt::Debug for SceneWidget {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("SceneWidget")
            .field("lifecycle", &state.lifecycle)
            .field("pointer", &state.pointer)
            .field("center", &state.center)
            .field("config", &state.config)
            .finish_non_exhaustive()
    }
}

/// Stores a pointer sample and recomputes the scene pose.
///
/// Called from the mousemove and touchmove closures. The handler itself has
/// no proximity guard: every document-wide move recomputes, and only the
/// lifecycle check inside [`refresh_pose`] can turn it into a no-op.
pub(crate) fn apply_pointer(state: &Rc<RefCell<WidgetState>>, x: f64, y: f64) {
    let mut state = state.borrow_mut();
    if !state.lifecycle.is_live() {
        return;
    }
    state.pointer = Point::new(x, y);
    refresh_pose(&mut state);
}

/// Recomputes the container center from its bounding rect.
///
/// Called on initialize and viewport resize. Deliberately *not* called on
/// scroll: staleness between resizes is accepted by design.
pub(crate) fn refresh_center(state: &Rc<RefCell<WidgetState>>) {
    let mut state = state.borrow_mut();
    if !state.lifecycle.is_live() {
        return;
    }
    update_center(&mut state);
}

fn update_center(state: &mut WidgetState) {
    if let Some(dom) = &state.dom {
        let rect = dom.container.get_bounding_client_rect();
        state.center = Point::new(
            rect.left() + rect.width() / 2.0,
            rect.top() + rect.height() / 2.0,
        );
    }
}

/// Computes and applies the pose for the current pointer/center state.
fn refresh_pose(state: &mut WidgetState) {
    if !state.lifecycle.is_live() {
        return;
    }
    let offset = normalized_offset(state.pointer, state.center, viewport());
    let pose = compute_pose(&state.config, offset);
    if let Some(dom) = &state.dom {
        write_pose(dom, &pose);
        if let Some(debug) = &dom.debug {
            debug.set_text_content(Some(&debug_text(state.pointer, offset, &pose)));
        }
    }
}

/// Writes a pose to the scene and layer elements.
fn write_pose(dom: &SceneDom, pose: &ScenePose) {
    let _ = dom
        .scene
        .style()
        .set_property("transform", &css::scene_rotation(pose));
    for (element, layer) in dom.layers.iter().zip(pose.layers.iter()) {
        let _ = element
            .style()
            .set_property("transform", &css::layer_transform(layer));
    }
}

/// Formats the debug overlay text for one pointer sample.
pub(crate) fn debug_text(pointer: Point, offset: Vec2, pose: &ScenePose) -> String {
    format!(
        "pointer: ({:.0}, {:.0})\nnormalized: ({:.2}, {:.2})\nrotation: x={:.1}\u{b0} y={:.1}\u{b0}",
        pointer.x, pointer.y, offset.x, offset.y, pose.rotate_x, pose.rotate_y,
    )
}

/// Reads the viewport dimensions, zero when unavailable.
fn viewport() -> Viewport {
    let dims = window().ok().map(|w| {
        (
            w.inner_width().ok().and_then(|v| v.as_f64()),
            w.inner_height().ok().and_then(|v| v.as_f64()),
        )
    });
    match dims {
        Some((Some(width), Some(height))) => Viewport::new(width, height),
        _ => Viewport::new(0.0, 0.0),
    }
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// Resolves the configured container to a live element, if possible.
fn resolve_target(target: &ContainerTarget, document: &Document) -> Option<HtmlElement> {
    match target {
        ContainerTarget::Selector(selector) => document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
        ContainerTarget::Element(el) => Some(el.clone()),
    }
}

/// Builds the widget tree inside `container`.
///
/// Exactly one scene element owning exactly three layer elements in
/// background/midground/foreground order, plus the optional debug overlay as
/// a sibling of the scene.
fn build_structure(
    document: &Document,
    container: HtmlElement,
    config: &SceneConfig,
) -> Result<SceneDom, JsValue> {
    let width = css::extent_css(&config.width, "100%");
    let height = css::extent_css(&config.height, FALLBACK_HEIGHT);
    container.style().set_css_text(&format!(
        "position: relative; width: {width}; height: {height}; perspective: 1000px; \
         overflow: hidden; border-radius: 20px; background: #000;"
    ));

    let scene = create_div(document)?;
    scene.set_class_name("diorama-scene");
    scene.style().set_css_text(
        "width: 100%; height: 100%; position: relative; transform-style: preserve-3d; \
         transition: transform 0.1s ease-out;",
    );

    let pose = baseline_pose(config);
    let layers = [
        build_layer(document, LayerRole::Background, &pose.layers[0], config)?,
        build_layer(document, LayerRole::Midground, &pose.layers[1], config)?,
        build_layer(document, LayerRole::Foreground, &pose.layers[2], config)?,
    ];
    for layer in &layers {
        scene.append_child(layer)?;
    }
    container.append_child(&scene)?;

    let debug = if config.show_debug_info {
        let overlay = create_div(document)?;
        overlay.style().set_css_text(
            "position: absolute; top: 10px; left: 10px; background: rgba(0,0,0,0.7); \
             color: white; padding: 10px; border-radius: 5px; font-family: monospace; \
             font-size: 12px; z-index: 10; white-space: pre;",
        );
        container.append_child(&overlay)?;
        Some(overlay)
    } else {
        None
    };

    Ok(SceneDom {
        container,
        scene,
        layers,
        debug,
    })
}

/// Builds one layer element in its placeholder state.
fn build_layer(
    document: &Document,
    role: LayerRole,
    pose: &LayerPose,
    config: &SceneConfig,
) -> Result<HtmlElement, JsValue> {
    let layer = create_div(document)?;
    layer.set_class_name(&format!("diorama-layer {}", role.class_name()));
    let border = if config.fill_background {
        "none"
    } else {
        "2px dashed #444"
    };
    layer.style().set_css_text(&format!(
        "position: absolute; width: 100%; height: 100%; background-size: cover; \
         background-position: center; background-repeat: no-repeat; \
         transform: {}; filter: {}; opacity: {}; \
         display: flex; align-items: center; justify-content: center; \
         color: #666; font-size: 16px; border: {border};",
        css::layer_transform(pose),
        role.filter(config.fill_background),
        role.opacity(),
    ));
    let _ = layer.class_list().add_1("placeholder");
    layer.set_text_content(Some(PLACEHOLDER_CAPTION));
    Ok(layer)
}

fn create_div(document: &Document) -> Result<HtmlElement, JsValue> {
    Ok(document.create_element("div")?.unchecked_into())
}

#[cfg(test)]
mod tests {
    use diorama_core::config::SceneConfig;
    use diorama_core::scene::compute_pose;

    use super::*;

    #[test]
    fn idle_state_ignores_pointer_and_center_updates() {
        let state = Rc::new(RefCell::new(WidgetState {
            config: SceneConfig::default(),
            lifecycle: Lifecycle::Idle,
            pointer: Point::new(12.0, 34.0),
            center: Point::new(320.0, 240.0),
            dom: None,
            load_seq: 0,
        }));
        apply_pointer(&state, 900.0, 700.0);
        refresh_center(&state);
        let state = state.borrow();
        assert_eq!(state.pointer, Point::new(12.0, 34.0));
        assert_eq!(state.center, Point::new(320.0, 240.0));
    }

    #[test]
    fn debug_text_rounds_as_documented() {
        let config = SceneConfig::default();
        let offset = Vec2::new(0.5, -0.25);
        let pose = compute_pose(&config, offset);
        let text = debug_text(Point::new(960.4, 270.6), offset, &pose);
        assert_eq!(
            text,
            "pointer: (960, 271)\nnormalized: (0.50, -0.25)\nrotation: x=3.8\u{b0} y=7.5\u{b0}"
        );
    }

    #[test]
    fn debug_text_zero_sample() {
        let config = SceneConfig::default();
        let pose = compute_pose(&config, Vec2::ZERO);
        let text = debug_text(Point::ORIGIN, Vec2::ZERO, &pose);
        assert_eq!(
            text,
            "pointer: (0, 0)\nnormalized: (0.00, 0.00)\nrotation: x=0.0\u{b0} y=0.0\u{b0}"
        );
    }
}
