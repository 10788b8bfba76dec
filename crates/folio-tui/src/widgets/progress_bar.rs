use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct ProgressBarWidget;

impl ProgressBarWidget {
    /// Columns filled at `fill` percent of `width`
    pub fn filled_columns(width: u16, fill: f64) -> u16 {
        ((width as f64 * fill.clamp(0.0, 100.0) / 100.0).round() as u16).min(width)
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let background = Style::default().bg(theme.bg0);

        if !app.session.progress().visible {
            frame.render_widget(Paragraph::new("").style(background), area);
            return;
        }

        let filled = Self::filled_columns(area.width, app.progress_fill) as usize;
        let line = Line::from(vec![
            Span::styled("━".repeat(filled), Style::default().fg(theme.progress)),
            Span::styled(
                "─".repeat(area.width as usize - filled),
                Style::default().fg(theme.bg2),
            ),
        ]);
        frame.render_widget(Paragraph::new(line).style(background), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_columns() {
        assert_eq!(ProgressBarWidget::filled_columns(80, 0.0), 0);
        assert_eq!(ProgressBarWidget::filled_columns(80, 50.0), 40);
        assert_eq!(ProgressBarWidget::filled_columns(80, 100.0), 80);
        assert_eq!(ProgressBarWidget::filled_columns(80, 250.0), 80);
        assert_eq!(ProgressBarWidget::filled_columns(3, 33.0), 1);
    }
}
