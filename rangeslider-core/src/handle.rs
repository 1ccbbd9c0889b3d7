//! Range-input primitive: one independently draggable handle.
//!
//! Sanitizes raw values the way a native range input does: clamp into the
//! domain, snap to the step grid anchored at `min`, fall back to the midpoint
//! for non-finite input.

use serde::{Deserialize, Serialize};

/// Which of the two handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleRole {
    Min,
    Max,
}

impl HandleRole {
    pub const BOTH: [HandleRole; 2] = [HandleRole::Min, HandleRole::Max];

    pub fn index(self) -> usize {
        match self {
            HandleRole::Min => 0,
            HandleRole::Max => 1,
        }
    }

    pub fn other(self) -> HandleRole {
        match self {
            HandleRole::Min => HandleRole::Max,
            HandleRole::Max => HandleRole::Min,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HandleRole::Min => "min",
            HandleRole::Max => "max",
        }
    }

    /// Class token of this handle's input element.
    pub fn input_class(self) -> &'static str {
        match self {
            HandleRole::Min => "rs-input-min",
            HandleRole::Max => "rs-input-max",
        }
    }

    /// Class token of this handle's tooltip element.
    pub fn tooltip_class(self) -> &'static str {
        match self {
            HandleRole::Min => "rs-tooltip-min",
            HandleRole::Max => "rs-tooltip-max",
        }
    }

    pub fn aria_label(self) -> &'static str {
        match self {
            HandleRole::Min => "Minimum Value",
            HandleRole::Max => "Maximum Value",
        }
    }
}

/// Keyboard adjustments a range input understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    StepUp,
    StepDown,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Fallbacks for a non-finite `min` / `max`.
const DEFAULT_MIN: f64 = 0.0;
const DEFAULT_MAX: f64 = 100.0;

/// Most decimals kept when cleaning snapped values.
const MAX_DECIMALS: usize = 12;

/// A scalar input bounded by `[min, max]` with an optional step grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeInput {
    min: f64,
    max: f64,
    step: f64,
    value: f64,
}

impl RangeInput {
    /// New input seeded with its default value (the domain midpoint).
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        let min = if min.is_finite() { min } else { DEFAULT_MIN };
        let max = if max.is_finite() { max } else { DEFAULT_MAX };
        let mut input = Self {
            min,
            max,
            step,
            value: min,
        };
        input.value = input.sanitize(f64::NAN);
        input
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    /// Effective maximum: never below `min`.
    pub fn max(&self) -> f64 {
        self.max.max(self.min)
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Step grid spacing, or `None` when any value is allowed.
    pub fn effective_step(&self) -> Option<f64> {
        (self.step.is_finite() && self.step > 0.0).then_some(self.step)
    }

    pub fn default_value(&self) -> f64 {
        self.min + (self.max() - self.min) / 2.0
    }

    /// Store `raw` after sanitization and return the stored value.
    pub fn set_value(&mut self, raw: f64) -> f64 {
        self.value = self.sanitize(raw);
        self.value
    }

    /// Map a raw value onto the closest value this input can hold.
    pub fn sanitize(&self, raw: f64) -> f64 {
        let (min, max) = (self.min, self.max());
        let raw = if raw.is_finite() {
            raw
        } else {
            self.default_value()
        };
        let clamped = raw.clamp(min, max);
        let Some(step) = self.effective_step() else {
            return clamped;
        };

        let mut snapped = min + ((clamped - min) / step).round() * step;
        if snapped > max {
            snapped -= step;
        }
        let cleaned = match self.grid_decimals() {
            Some(places) => round_to(snapped, places),
            None => snapped,
        };
        cleaned.clamp(min, max)
    }

    /// Decimal places that `min` and `step` can produce on the grid, or
    /// `None` when the grid is finer than [`MAX_DECIMALS`].
    fn grid_decimals(&self) -> Option<usize> {
        let places = decimals(self.min).max(decimals(self.step));
        (places <= MAX_DECIMALS).then_some(places)
    }

    /// Apply a keyboard adjustment. Returns true if the value changed.
    pub fn apply_key(&mut self, action: KeyAction) -> bool {
        let range = self.max() - self.min;
        let step = self.effective_step().unwrap_or(range / 100.0);
        let page = (range / 10.0).max(step);
        let target = match action {
            KeyAction::StepUp => self.value + step,
            KeyAction::StepDown => self.value - step,
            KeyAction::PageUp => self.value + page,
            KeyAction::PageDown => self.value - page,
            KeyAction::Home => self.min,
            KeyAction::End => self.max(),
        };
        let before = self.value;
        self.set_value(target) != before
    }
}

fn decimals(x: f64) -> usize {
    let s = format!("{x}");
    s.split_once('.').map_or(0, |(_, frac)| frac.len())
}

fn round_to(x: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let scaled = x * scale;
    if !scaled.is_finite() {
        return x;
    }
    scaled.round() / scale
}
