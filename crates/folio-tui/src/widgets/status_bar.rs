use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn status_text(app: &App) -> String {
        let current = app.session.current();
        let total = app.session.registry().len();
        let title = app
            .config
            .sections
            .get(current)
            .map(|s| s.title.as_str())
            .unwrap_or("");

        let mode = if app.session.is_locked() { "MOVING" } else { "READY" };

        format!(" {} | {}/{} {}", mode, current + 1, total, title)
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let status_text = Self::status_text(app);

        let help_hint = " q:quit j/k:scroll 1-9:jump g/G:ends ";
        let padding_len = area
            .width
            .saturating_sub(status_text.width() as u16 + help_hint.width() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
