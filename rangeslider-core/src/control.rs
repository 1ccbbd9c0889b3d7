//! The dual-handle range slider control.
//!
//! A [`RangeSlider`] mounts a fixed element structure under a target element,
//! owns two [`RangeInput`]s, and keeps the filled range and tooltips in sync
//! with them:
//!
//! ```text
//! div.rs-container
//!   div.rs-tooltip.rs-tooltip-min
//!   div.rs-tooltip.rs-tooltip-max
//!   div.rs-track
//!     div.rs-range
//!   input.rs-input.rs-input-min
//!   input.rs-input.rs-input-max
//! ```
//!
//! Input signals recompute the derived state; change signals commit it to the
//! registered callback. A slider whose target does not resolve is detached:
//! every method on it is a no-op.

use std::fmt;

use thiserror::Error;
use tracing::{debug, error, trace};

use crate::config::SliderConfig;
use crate::dom::{Document, Element, NodeId, SelectorError};
use crate::geometry::{format_value, DerivedVisual, Selection};
use crate::handle::{HandleRole, KeyAction, RangeInput};
use crate::tooltip::{PointerSignal, PointerTracker, TooltipState, TOOLTIP_VISIBLE_CLASS};

/// Committed-change callback, called with `(low, high)`.
pub type ChangeCallback = Box<dyn FnMut(f64, f64)>;

/// Where a slider is mounted: a selector or an element already in hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountTarget {
    Selector(String),
    Node(NodeId),
}

impl From<&str> for MountTarget {
    fn from(selector: &str) -> Self {
        MountTarget::Selector(selector.to_string())
    }
}

impl From<String> for MountTarget {
    fn from(selector: String) -> Self {
        MountTarget::Selector(selector)
    }
}

impl From<NodeId> for MountTarget {
    fn from(node: NodeId) -> Self {
        MountTarget::Node(node)
    }
}

impl fmt::Display for MountTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountTarget::Selector(s) => write!(f, "{s}"),
            MountTarget::Node(id) => write!(f, "node #{}", id.index()),
        }
    }
}

/// Errors from mounting a slider.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("RangeSlider: no element found with the selector \"{0}\"")]
    NotFound(String),
    #[error("RangeSlider: invalid selector: {0}")]
    Selector(#[from] SelectorError),
}

fn resolve_target(doc: &Document, target: &MountTarget) -> Result<NodeId, MountError> {
    match target {
        MountTarget::Selector(selector) => doc
            .query_selector(selector)?
            .ok_or_else(|| MountError::NotFound(selector.clone())),
        MountTarget::Node(node) if doc.contains(*node) => Ok(*node),
        MountTarget::Node(_) => Err(MountError::NotFound(target.to_string())),
    }
}

/// Signals a host delivers to a mounted slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderEvent {
    /// The handle moved to `value` mid-gesture.
    Input { handle: HandleRole, value: f64 },
    /// The gesture on `handle` ended; commit the selection.
    Change { handle: HandleRole },
    /// Keyboard adjustment of `handle`: input then change when the value moves.
    Key { handle: HandleRole, action: KeyAction },
    /// Pointer interaction with `handle`.
    Pointer { handle: HandleRole, signal: PointerSignal },
}

/// Element ids of a mounted slider's structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderParts {
    /// The mount point; its previous children were replaced.
    pub container: NodeId,
    pub root: NodeId,
    pub min_tooltip: NodeId,
    pub max_tooltip: NodeId,
    pub track: NodeId,
    pub range: NodeId,
    pub min_input: NodeId,
    pub max_input: NodeId,
}

impl SliderParts {
    pub fn input(&self, role: HandleRole) -> NodeId {
        match role {
            HandleRole::Min => self.min_input,
            HandleRole::Max => self.max_input,
        }
    }

    pub fn tooltip(&self, role: HandleRole) -> NodeId {
        match role {
            HandleRole::Min => self.min_tooltip,
            HandleRole::Max => self.max_tooltip,
        }
    }

    fn build(doc: &mut Document, container: NodeId) -> Self {
        let root = doc.create(Element::new("div").with_class("rs-container"));
        let min_tooltip = doc.create(Element::new("div").with_class("rs-tooltip rs-tooltip-min"));
        let max_tooltip = doc.create(Element::new("div").with_class("rs-tooltip rs-tooltip-max"));
        let track = doc.create(Element::new("div").with_class("rs-track"));
        let range = doc.create(Element::new("div").with_class("rs-range"));
        let [min_input, max_input] = HandleRole::BOTH.map(|role| {
            doc.create(
                Element::new("input")
                    .with_class("rs-input")
                    .with_class(role.input_class())
                    .with_attribute("type", "range")
                    .with_attribute("aria-label", role.aria_label()),
            )
        });

        doc.append_child(track, range);
        for child in [min_tooltip, max_tooltip, track, min_input, max_input] {
            doc.append_child(root, child);
        }
        doc.replace_children(container, &[root]);

        Self {
            container,
            root,
            min_tooltip,
            max_tooltip,
            track,
            range,
            min_input,
            max_input,
        }
    }
}

/// State that only exists once the structure is attached.
#[derive(Debug, Clone)]
struct Mounted {
    parts: SliderParts,
    inputs: [RangeInput; 2],
    pointers: [PointerTracker; 2],
    derived: DerivedVisual,
}

impl Mounted {
    /// Domain the inputs actually hold, after their min/max fallbacks.
    fn domain(inputs: &[RangeInput; 2]) -> (f64, f64) {
        (inputs[0].min(), inputs[0].max())
    }

    fn compute(inputs: &[RangeInput; 2]) -> DerivedVisual {
        let (minimum, maximum) = Self::domain(inputs);
        DerivedVisual::compute(minimum, maximum, inputs[0].value(), inputs[1].value())
    }

    /// Write the derived visuals into the element tree.
    fn render(&self, doc: &mut Document) {
        let d = &self.derived;
        doc.set_style(self.parts.range, "left", d.filled_left_css());
        doc.set_style(self.parts.range, "width", d.filled_width_css());
        doc.set_text(self.parts.min_tooltip, d.min_tooltip.text.clone());
        doc.set_style(self.parts.min_tooltip, "left", d.min_tooltip.css_left());
        doc.set_text(self.parts.max_tooltip, d.max_tooltip.text.clone());
        doc.set_style(self.parts.max_tooltip, "left", d.max_tooltip.css_left());
        trace!(low = d.selection.low, high = d.selection.high, "slider updated");
    }
}

/// Builder for a [`RangeSlider`] with an initial callback.
#[derive(Default)]
pub struct RangeSliderBuilder {
    config: SliderConfig,
    on_change: Option<ChangeCallback>,
}

impl RangeSliderBuilder {
    pub fn config(mut self, config: SliderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn on_change(mut self, callback: impl FnMut(f64, f64) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Mount, or report the failure and return a detached slider.
    pub fn mount(self, doc: &mut Document, target: impl Into<MountTarget>) -> RangeSlider {
        let target = target.into();
        match resolve_target(doc, &target) {
            Ok(container) => self.attach(doc, container),
            Err(err) => {
                error!(mount = %target, "{err}");
                RangeSlider {
                    config: self.config,
                    mounted: None,
                    on_change: self.on_change,
                }
            }
        }
    }

    /// Mount, or return why the target did not resolve.
    pub fn try_mount(
        self,
        doc: &mut Document,
        target: impl Into<MountTarget>,
    ) -> Result<RangeSlider, MountError> {
        let container = resolve_target(doc, &target.into())?;
        Ok(self.attach(doc, container))
    }

    fn attach(self, doc: &mut Document, container: NodeId) -> RangeSlider {
        let config = self.config;
        let parts = SliderParts::build(doc, container);

        let mut inputs = [RangeInput::new(config.minimum, config.maximum, config.step); 2];
        inputs[HandleRole::Min.index()].set_value(config.initial_low);
        inputs[HandleRole::Max.index()].set_value(config.initial_high);
        for role in HandleRole::BOTH {
            let input = &inputs[role.index()];
            let node = parts.input(role);
            doc.set_attribute(node, "min", format_value(input.min()));
            doc.set_attribute(node, "max", format_value(input.max()));
            doc.set_attribute(node, "step", format_value(input.step()));
            doc.set_attribute(node, "value", format_value(input.value()));
        }

        let mounted = Mounted {
            parts,
            inputs,
            pointers: [PointerTracker::default(); 2],
            derived: Mounted::compute(&inputs),
        };
        mounted.render(doc);
        let slider = RangeSlider {
            config,
            mounted: Some(mounted),
            on_change: self.on_change,
        };
        debug!(container = container.index(), "range slider mounted");
        slider
    }
}

/// Dual-handle range slider bound to a [`Document`].
pub struct RangeSlider {
    config: SliderConfig,
    mounted: Option<Mounted>,
    on_change: Option<ChangeCallback>,
}

impl fmt::Debug for RangeSlider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSlider")
            .field("config", &self.config)
            .field("mounted", &self.mounted)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl RangeSlider {
    pub fn builder() -> RangeSliderBuilder {
        RangeSliderBuilder::default()
    }

    /// Mount under `target`. An unresolved target is logged and yields a
    /// detached slider.
    pub fn mount(
        doc: &mut Document,
        target: impl Into<MountTarget>,
        config: SliderConfig,
    ) -> Self {
        Self::builder().config(config).mount(doc, target)
    }

    pub fn try_mount(
        doc: &mut Document,
        target: impl Into<MountTarget>,
        config: SliderConfig,
    ) -> Result<Self, MountError> {
        Self::builder().config(config).try_mount(doc, target)
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn parts(&self) -> Option<SliderParts> {
        self.mounted.as_ref().map(|m| m.parts)
    }

    /// `(minimum, maximum)` the handles live on. Differs from the config
    /// when it carried a non-finite bound or `maximum < minimum`.
    pub fn domain(&self) -> Option<(f64, f64)> {
        self.mounted.as_ref().map(|m| Mounted::domain(&m.inputs))
    }

    pub fn input(&self, role: HandleRole) -> Option<&RangeInput> {
        self.mounted.as_ref().map(|m| &m.inputs[role.index()])
    }

    /// Raw value of one handle.
    pub fn value(&self, role: HandleRole) -> Option<f64> {
        self.input(role).map(RangeInput::value)
    }

    /// Raw `(min handle, max handle)` values, not normalized.
    pub fn values(&self) -> Option<(f64, f64)> {
        self.mounted
            .as_ref()
            .map(|m| (m.inputs[0].value(), m.inputs[1].value()))
    }

    /// Selection as of the last `update()`.
    pub fn selection(&self) -> Option<Selection> {
        self.mounted.as_ref().map(|m| m.derived.selection)
    }

    pub fn derived(&self) -> Option<&DerivedVisual> {
        self.mounted.as_ref().map(|m| &m.derived)
    }

    pub fn tooltip_state(&self, role: HandleRole) -> TooltipState {
        self.mounted
            .as_ref()
            .map_or(TooltipState::Hidden, |m| m.pointers[role.index()].tooltip())
    }

    pub fn is_dragging(&self, role: HandleRole) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|m| m.pointers[role.index()].is_dragging())
    }

    /// Register or replace the committed-change callback.
    pub fn on_change(&mut self, callback: impl FnMut(f64, f64) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Recompute the selection and derived visuals from the raw handle values
    /// and write them into the element tree.
    pub fn update(&mut self, doc: &mut Document) {
        let Some(m) = self.mounted.as_mut() else {
            return;
        };
        m.derived = Mounted::compute(&m.inputs);
        m.render(doc);
    }

    /// Route one host signal. Returns the committed selection when the
    /// signal ended a gesture.
    pub fn handle_event(&mut self, doc: &mut Document, event: SliderEvent) -> Option<Selection> {
        match event {
            SliderEvent::Input { handle, value } => {
                self.set_raw(doc, handle, value)?;
                self.update(doc);
                None
            }
            SliderEvent::Change { .. } => self.trigger_on_change(),
            SliderEvent::Key { handle, action } => {
                let m = self.mounted.as_mut()?;
                let input = &mut m.inputs[handle.index()];
                if !input.apply_key(action) {
                    return None;
                }
                let value = input.value();
                doc.set_attribute(m.parts.input(handle), "value", format_value(value));
                self.update(doc);
                self.trigger_on_change()
            }
            SliderEvent::Pointer { handle, signal } => {
                let m = self.mounted.as_mut()?;
                let state = m.pointers[handle.index()].apply(signal);
                let tooltip = m.parts.tooltip(handle);
                match state {
                    TooltipState::Visible => doc.add_class(tooltip, TOOLTIP_VISIBLE_CLASS),
                    TooltipState::Hidden => doc.remove_class(tooltip, TOOLTIP_VISIBLE_CLASS),
                }
                None
            }
        }
    }

    /// Sanitize and store a raw handle value, mirroring it on the input element.
    fn set_raw(&mut self, doc: &mut Document, handle: HandleRole, raw: f64) -> Option<f64> {
        let m = self.mounted.as_mut()?;
        let value = m.inputs[handle.index()].set_value(raw);
        doc.set_attribute(m.parts.input(handle), "value", format_value(value));
        Some(value)
    }

    /// Call the callback with the current `(low, high)`.
    fn trigger_on_change(&mut self) -> Option<Selection> {
        let m = self.mounted.as_ref()?;
        let selection = Selection::from_values(m.inputs[0].value(), m.inputs[1].value());
        debug!(low = selection.low, high = selection.high, "selection committed");
        if let Some(callback) = self.on_change.as_mut() {
            callback(selection.low, selection.high);
        }
        Some(selection)
    }
}
