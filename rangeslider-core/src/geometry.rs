//! Derived geometry — selection normalization, track percentages, tooltip offsets.
//!
//! Everything here is a pure function of the two raw handle values and the
//! configured domain. Nothing is cached between calls.

use serde::{Deserialize, Serialize};

/// Tooltip correction at the left edge of the track, in pixels.
pub const TOOLTIP_EDGE_OFFSET_PX: f64 = 12.0;

/// Pixels of tooltip correction lost per percent of travel.
///
/// The native thumb is 24px wide, so the correction runs from +12px at 0% to
/// -12px at 100%.
pub const TOOLTIP_OFFSET_PER_PERCENT: f64 = 0.24;

/// Normalized selection: `low <= high` regardless of handle order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub low: f64,
    pub high: f64,
}

impl Selection {
    /// Normalize two raw handle values.
    pub fn from_values(a: f64, b: f64) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }
}

/// Position of `value` along `[minimum, maximum]`, in percent.
///
/// An empty or inverted domain maps every value to 0.
pub fn percent(value: f64, minimum: f64, maximum: f64) -> f64 {
    let range = maximum - minimum;
    if range <= 0.0 || !range.is_finite() {
        return 0.0;
    }
    (value - minimum) / range * 100.0
}

/// Horizontal pixel correction for a tooltip at `percent`.
pub fn tooltip_offset_px(percent: f64) -> f64 {
    TOOLTIP_EDGE_OFFSET_PX - percent * TOOLTIP_OFFSET_PER_PERCENT
}

/// Render a number the way tooltip text shows it: shortest round-trip form,
/// integers without a fractional part, no negative zero.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Placement and text of one tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLayout {
    pub text: String,
    pub percent: f64,
    pub offset_px: f64,
}

impl TooltipLayout {
    fn for_value(value: f64, minimum: f64, maximum: f64) -> Self {
        let p = percent(value, minimum, maximum);
        Self {
            text: format_value(value),
            percent: p,
            offset_px: tooltip_offset_px(p),
        }
    }

    /// `left` style value, e.g. `calc(25% + (6px))`.
    pub fn css_left(&self) -> String {
        format!(
            "calc({}% + ({}px))",
            format_value(self.percent),
            format_value(self.offset_px)
        )
    }
}

/// Presentation values for one slider state.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedVisual {
    pub selection: Selection,
    /// Filled range `left`, in percent.
    pub filled_start: f64,
    /// Filled range `width`, in percent.
    pub filled_width: f64,
    /// Tooltip of the min handle; shows that handle's own raw value.
    pub min_tooltip: TooltipLayout,
    /// Tooltip of the max handle; shows that handle's own raw value.
    pub max_tooltip: TooltipLayout,
}

impl DerivedVisual {
    pub fn compute(minimum: f64, maximum: f64, min_value: f64, max_value: f64) -> Self {
        let selection = Selection::from_values(min_value, max_value);
        let low_percent = percent(selection.low, minimum, maximum);
        let high_percent = percent(selection.high, minimum, maximum);
        Self {
            selection,
            filled_start: low_percent,
            filled_width: high_percent - low_percent,
            min_tooltip: TooltipLayout::for_value(min_value, minimum, maximum),
            max_tooltip: TooltipLayout::for_value(max_value, minimum, maximum),
        }
    }

    pub fn filled_left_css(&self) -> String {
        format!("{}%", format_value(self.filled_start))
    }

    pub fn filled_width_css(&self) -> String {
        format!("{}%", format_value(self.filled_width))
    }
}
