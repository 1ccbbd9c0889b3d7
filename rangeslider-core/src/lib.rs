//! Range Slider Core — headless dual-handle range slider.
//!
//! This crate contains everything except drawing:
//! - An in-memory element tree the slider mounts into (`dom`)
//! - The range-input primitive with native value sanitization (`handle`)
//! - Selection normalization and track/tooltip geometry (`geometry`)
//! - Per-handle tooltip visibility (`tooltip`)
//! - The control itself, its event routing and change callback (`control`)
//! - Configuration defaults, TOML loading and validation (`config`)

pub mod config;
pub mod control;
pub mod dom;
pub mod geometry;
pub mod handle;
pub mod tooltip;

pub use config::{ConfigError, SliderConfig};
pub use control::{
    ChangeCallback, MountError, MountTarget, RangeSlider, RangeSliderBuilder, SliderEvent,
    SliderParts,
};
pub use dom::{Document, Element, NodeId, SelectorError};
pub use geometry::{DerivedVisual, Selection, TooltipLayout};
pub use handle::{HandleRole, KeyAction, RangeInput};
pub use tooltip::{PointerSignal, TooltipState};
