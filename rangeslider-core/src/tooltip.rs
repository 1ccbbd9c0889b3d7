//! Per-handle tooltip visibility.
//!
//! A tooltip becomes visible when its handle's drag starts and hides when the
//! drag ends, or when the pointer leaves the handle while no drag is active.

/// Class token toggled on a tooltip element while it is visible.
pub const TOOLTIP_VISIBLE_CLASS: &str = "rs-tooltip--visible";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TooltipState {
    #[default]
    Hidden,
    Visible,
}

impl TooltipState {
    pub fn is_visible(self) -> bool {
        self == TooltipState::Visible
    }
}

/// Pointer interaction signals delivered to one handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSignal {
    /// Drag start.
    Down,
    /// Drag end.
    Up,
    /// Pointer left the handle.
    Leave,
}

/// Pointer bookkeeping for one handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerTracker {
    tooltip: TooltipState,
    dragging: bool,
}

impl PointerTracker {
    pub fn tooltip(&self) -> TooltipState {
        self.tooltip
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Apply a signal and return the resulting tooltip state.
    pub fn apply(&mut self, signal: PointerSignal) -> TooltipState {
        match signal {
            PointerSignal::Down => {
                self.dragging = true;
                self.tooltip = TooltipState::Visible;
            }
            PointerSignal::Up => {
                self.dragging = false;
                self.tooltip = TooltipState::Hidden;
            }
            PointerSignal::Leave if !self.dragging => {
                self.tooltip = TooltipState::Hidden;
            }
            PointerSignal::Leave => {}
        }
        self.tooltip
    }
}
