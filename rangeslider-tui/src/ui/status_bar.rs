//! Bottom status bar — key hints, last committed selection, status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use rangeslider_core::geometry::format_value;

use crate::app::{AppState, StatusLevel};
use crate::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " Tab:handle ←/→:step PgUp/PgDn:page Home/End q:quit",
        theme.hint(),
    ));

    if let Some(selection) = app.last_commit {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!(
                "[{} – {}] ×{}",
                format_value(selection.low),
                format_value(selection.high),
                app.commit_count
            ),
            theme.info(),
        ));
    }

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme.info(),
            StatusLevel::Warning => theme.warning(),
            StatusLevel::Error => theme.error(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
