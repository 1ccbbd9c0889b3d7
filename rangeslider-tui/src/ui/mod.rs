//! Top-level UI layout — slider panel with readout and status bar.

pub mod slider;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use rangeslider_core::geometry::format_value;

use crate::app::AppState;
use crate::theme::Theme;

use self::slider::RangeSliderView;

/// Cells kept free on each side of the track so end handles stay visible.
const TRACK_PADDING: u16 = 2;

/// Screen areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub panel: Rect,
    /// Two rows: tooltips, then track.
    pub slider: Rect,
    pub readout: Rect,
    pub status: Rect,
}

impl UiLayout {
    pub fn track(&self) -> Rect {
        slider::track_row(self.slider)
    }
}

/// Split the terminal area into panel, slider rows, readout and status bar.
pub fn compute_layout(area: Rect) -> UiLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let panel = chunks[0];
    let status = chunks[1];

    let inner = Block::default().borders(Borders::ALL).inner(panel);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let slider_rows = rows[1];
    let slider = Rect {
        x: slider_rows.x + TRACK_PADDING.min(slider_rows.width / 2),
        width: slider_rows.width.saturating_sub(TRACK_PADDING * 2),
        ..slider_rows
    };

    UiLayout {
        panel,
        slider,
        readout: rows[2],
        status,
    }
}

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let theme = Theme::default();
    let layout = compute_layout(f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border(app.drag.is_some()))
        .title(format!(" {} ", app.label))
        .title_style(theme.info());
    f.render_widget(block, layout.panel);

    f.render_widget(
        RangeSliderView::new(&app.slider, &app.document)
            .focused(app.focused)
            .theme(theme),
        layout.slider,
    );

    f.render_widget(Paragraph::new(readout(app, &theme)), layout.readout);
    status_bar::render(f, layout.status, app, &theme);
}

fn readout<'a>(app: &AppState, theme: &Theme) -> Line<'a> {
    let Some(selection) = app.slider.selection() else {
        return Line::from(Span::styled("  no slider", theme.hint()));
    };
    Line::from(vec![
        Span::styled("  Low: ", theme.hint()),
        Span::styled(format_value(selection.low), theme.info()),
        Span::styled("   High: ", theme.hint()),
        Span::styled(format_value(selection.high), theme.info()),
        Span::styled(format!("   Focus: {}", app.focused.label()), theme.hint()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::config::HostConfig;

    #[test]
    fn layout_places_slider_inside_padded_panel() {
        let layout = compute_layout(Rect::new(0, 0, 40, 10));
        assert_eq!(layout.status, Rect::new(0, 9, 40, 1));
        assert_eq!(layout.panel, Rect::new(0, 0, 40, 9));
        assert_eq!(layout.slider, Rect::new(3, 2, 34, 2));
        assert_eq!(layout.track(), Rect::new(3, 3, 34, 1));
        assert_eq!(layout.readout.y, 4);
    }

    #[test]
    fn draw_shows_label_and_readout() {
        let app = AppState::new(&HostConfig {
            label: "Price".into(),
            ..HostConfig::default()
        });
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Price"));
        assert!(text.contains("Low: 25"));
        assert!(text.contains("High: 75"));
        assert!(text.contains("Focus: min"));
    }
}
