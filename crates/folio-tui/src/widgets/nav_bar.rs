use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

/// First column of the first link
const LEFT_MARGIN: u16 = 1;

pub struct NavBarWidget;

impl NavBarWidget {
    /// Column span `[start, end)` and target id of every link
    fn links(app: &App) -> Vec<(u16, u16, &str)> {
        let mut column = LEFT_MARGIN;
        app.config
            .sections
            .iter()
            .map(|section| {
                let width = section.title.width() as u16 + 2;
                let link = (column, column + width, section.id.as_str());
                column += width + 1;
                link
            })
            .collect()
    }

    /// Section id of the link under `column`, if any
    pub fn hit_test(app: &App, column: u16) -> Option<String> {
        Self::links(app)
            .into_iter()
            .find(|(start, end, _)| (*start..*end).contains(&column))
            .map(|(_, _, id)| id.to_string())
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let current = app.session.current();

        let mut spans = vec![Span::raw(" ".repeat(LEFT_MARGIN as usize))];
        for (i, section) in app.config.sections.iter().enumerate() {
            let style = if i == current {
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg1)
            };
            spans.push(Span::styled(format!(" {} ", section.title), style));
            spans.push(Span::raw(" "));
        }

        let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg1));
        frame.render_widget(paragraph, area);
    }
}
