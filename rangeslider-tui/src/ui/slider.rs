//! Dual-handle slider widget and terminal hit-testing.
//!
//! The widget occupies two rows: tooltips on top, the track below. Handle
//! columns come from the slider's derived percentages; tooltip text and
//! visibility are read back from the mounted element tree.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use rangeslider_core::tooltip::TOOLTIP_VISIBLE_CLASS;
use rangeslider_core::{Document, HandleRole, RangeSlider};

use crate::theme::Theme;

pub const TRACK_GLYPH: &str = "─";
pub const FILLED_GLYPH: &str = "━";
pub const HANDLE_GLYPH: &str = "●";

/// Column of the cell at `percent` along `area`.
pub fn column_for_percent(area: Rect, percent: f64) -> u16 {
    let span = area.width.saturating_sub(1) as f64;
    let frac = (percent / 100.0).clamp(0.0, 1.0);
    area.x + (frac * span).round() as u16
}

/// Domain value under `column`, clamped to the track ends.
pub fn value_at_column(area: Rect, column: u16, minimum: f64, maximum: f64) -> f64 {
    let span = area.width.saturating_sub(1);
    if span == 0 {
        return minimum;
    }
    let offset = column.saturating_sub(area.x).min(span);
    minimum + offset as f64 / span as f64 * (maximum - minimum)
}

/// Handle a press at `column` grabs: the closer one, the max handle on ties
/// (it is stacked on top).
pub fn nearest_handle(area: Rect, column: u16, min_percent: f64, max_percent: f64) -> HandleRole {
    let min_col = column_for_percent(area, min_percent);
    let max_col = column_for_percent(area, max_percent);
    if column.abs_diff(min_col) < column.abs_diff(max_col) {
        HandleRole::Min
    } else {
        HandleRole::Max
    }
}

/// Row holding the track inside a widget area.
pub fn track_row(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height.saturating_sub(1).min(1),
        height: area.height.min(1),
        ..area
    }
}

/// Renders a mounted [`RangeSlider`].
pub struct RangeSliderView<'a> {
    slider: &'a RangeSlider,
    document: &'a Document,
    focused: Option<HandleRole>,
    theme: Theme,
}

impl<'a> RangeSliderView<'a> {
    pub fn new(slider: &'a RangeSlider, document: &'a Document) -> Self {
        Self {
            slider,
            document,
            focused: None,
            theme: Theme::default(),
        }
    }

    pub fn focused(mut self, role: HandleRole) -> Self {
        self.focused = Some(role);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

fn paint(buf: &mut Buffer, x: u16, y: u16, symbol: &str, style: Style) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_symbol(symbol).set_style(style);
    }
}

impl Widget for RangeSliderView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height < 2 {
            return;
        }
        let track = track_row(area);
        let (Some(derived), Some(parts)) = (self.slider.derived(), self.slider.parts()) else {
            buf.set_string(track.x, track.y, "(slider not mounted)", self.theme.hint());
            return;
        };

        for x in track.left()..track.right() {
            paint(buf, x, track.y, TRACK_GLYPH, self.theme.track());
        }
        let start = column_for_percent(track, derived.filled_start);
        let end = column_for_percent(track, derived.filled_start + derived.filled_width);
        for x in start..=end {
            paint(buf, x, track.y, FILLED_GLYPH, self.theme.filled());
        }

        let layouts = [&derived.min_tooltip, &derived.max_tooltip];
        for role in HandleRole::BOTH {
            let x = column_for_percent(track, layouts[role.index()].percent);
            let style = self.theme.handle(self.focused == Some(role));
            paint(buf, x, track.y, HANDLE_GLYPH, style);
        }

        for role in HandleRole::BOTH {
            let tooltip = parts.tooltip(role);
            if !self.document.has_class(tooltip, TOOLTIP_VISIBLE_CLASS) {
                continue;
            }
            let text = self.document.text(tooltip).unwrap_or_default();
            let label = format!(" {text} ");
            let width = label.chars().count() as u16;
            let center = column_for_percent(track, layouts[role.index()].percent);
            let max_x = area.right().saturating_sub(width).max(area.x);
            let x = center.saturating_sub(width / 2).clamp(area.x, max_x);
            buf.set_string(x, area.y, label, self.theme.tooltip());
        }
    }
}
