//! Section pages stacked vertically and windowed by the viewport offset.
//!
//! During a transition two pages share the screen. Elements that have not yet
//! scrolled into view render as blank rows until the visibility tracker
//! reports them.

use std::time::Instant;

use folio_core::config::{CardConfig, SectionConfig, SectionKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::App;
use crate::layout::ElementId;

const CARD_INDENT: usize = 2;
const MAX_CARD_WIDTH: usize = 72;
const CURSOR_BLINK_MS: u128 = 500;

pub struct SectionViewWidget;

impl SectionViewWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
        let background = Style::default().bg(app.theme.bg0);
        frame.render_widget(Paragraph::new("").style(background), area);

        let page = area.height as i64;
        if page == 0 {
            return;
        }
        let viewport_top = app.viewport_row() as i64;

        for i in 0..app.layouts.len() {
            let y0 = i as i64 * page - viewport_top;
            if y0 >= page || y0 + page <= 0 {
                continue;
            }

            let visible_top = y0.max(0);
            let visible_bottom = (y0 + page).min(page);
            let rect = Rect::new(
                area.x,
                area.y + visible_top as u16,
                area.width,
                (visible_bottom - visible_top) as u16,
            );
            let skip = app.section_scroll(i) + (visible_top - y0) as u16;

            let lines = Self::section_lines(app, i, area.width, area.height, now);
            let paragraph = Paragraph::new(lines).scroll((skip, 0)).style(background);
            frame.render_widget(paragraph, rect);
        }
    }

    fn section_lines(
        app: &App,
        index: usize,
        width: u16,
        page: u16,
        now: Instant,
    ) -> Vec<Line<'static>> {
        match app.config.sections.get(index) {
            Some(section) if section.kind == SectionKind::Hero => Self::hero_lines(app, page, now),
            Some(section) => Self::card_lines(app, index, section, width),
            None => Vec::new(),
        }
    }

    fn hero_lines(app: &App, page: u16, now: Instant) -> Vec<Line<'static>> {
        let theme = &app.theme;
        let writer = &app.typewriter;

        let elapsed = now.saturating_duration_since(app.started_at);
        let blink_phase = elapsed.as_millis() / CURSOR_BLINK_MS;
        let blink_on = blink_phase % 2 == 0;
        let cursor = if writer.cursor_typing() || blink_on { "▌" } else { " " };

        let mut block = vec![
            Line::from(Span::styled("Hi, I'm", Style::default().fg(theme.fg1))).centered(),
            Line::from(vec![
                Span::styled(
                    writer.text().to_string(),
                    Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(cursor, Style::default().fg(theme.accent)),
            ])
            .centered(),
            Line::default(),
            Line::from(Span::styled(
                writer.subtitle().to_string(),
                Style::default().fg(theme.grey1).add_modifier(Modifier::ITALIC),
            ))
            .centered(),
            Line::default(),
        ];

        let shown = writer.visible_tags(now);
        let tag_style = Style::default().fg(theme.green).bg(theme.bg2);
        for (row, tags) in writer.tag_rows().into_iter().enumerate() {
            let mut spans = Vec::new();
            for (col, tag) in tags.iter().enumerate() {
                let n = row * folio_core::typewriter::TAGS_PER_ROW + col;
                if !spans.is_empty() {
                    spans.push(Span::raw("  "));
                }
                if n < shown {
                    spans.push(Span::styled(format!(" {} ", tag), tag_style));
                } else {
                    spans.push(Span::raw(" ".repeat(tag.chars().count() + 2)));
                }
            }
            block.push(Line::from(spans).centered());
        }
        block.push(Line::default());

        let slide_style = Style::default().fg(theme.purple);
        if let Some(slide) = app.config.slideshow.slides.get(app.slideshow.index()) {
            for row in slide.lines() {
                block.push(Line::from(Span::styled(row.to_string(), slide_style)).centered());
            }
        }
        if app.slideshow.len() > 1 {
            let dots: Vec<&str> = (0..app.slideshow.len())
                .map(|i| if i == app.slideshow.index() { "●" } else { "○" })
                .collect();
            let dots = Span::styled(dots.join(" "), Style::default().fg(theme.grey1));
            block.push(Line::from(dots).centered());
        }

        let top = (page as usize).saturating_sub(block.len()) / 2;
        let mut lines = vec![Line::default(); top];
        lines.extend(block);
        lines
    }

    fn card_lines(
        app: &App,
        index: usize,
        section: &SectionConfig,
        width: u16,
    ) -> Vec<Line<'static>> {
        let theme = &app.theme;
        let Some(layout) = app.layouts.get(index) else {
            return Vec::new();
        };
        let mut lines = vec![Line::default(); layout.height as usize];
        let card_width = (width as usize).saturating_sub(CARD_INDENT * 2).min(MAX_CARD_WIDTH);
        let indent = " ".repeat(CARD_INDENT);

        for element in &layout.elements {
            if !app.visibility.is_visible(&element.id) {
                continue;
            }
            let top = element.top as usize;

            let rows = match element.id {
                ElementId { index: 0, .. } => vec![
                    Line::from(Span::styled(
                        format!("{}{}", indent, section.title),
                        Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("{}{}", indent, "─".repeat(section.title.chars().count())),
                        Style::default().fg(theme.grey0),
                    )),
                ],
                ElementId { index: n, .. } => match section.cards.get(n - 1) {
                    Some(card) => Self::card_rows(app, card, &indent, card_width),
                    None => Vec::new(),
                },
            };

            for (offset, row) in rows.into_iter().enumerate() {
                if let Some(slot) = lines.get_mut(top + offset) {
                    *slot = row;
                }
            }
        }
        lines
    }

    fn card_rows(app: &App, card: &CardConfig, indent: &str, width: usize) -> Vec<Line<'static>> {
        let theme = &app.theme;
        let border = Style::default().fg(theme.grey0);
        if width < 4 {
            return Vec::new();
        }
        let inner = width - 4;

        let framed = |text: &str, style: Style| {
            Line::from(vec![
                Span::styled(format!("{}│ ", indent), border),
                Span::styled(fit(text, inner), style),
                Span::styled(" │", border),
            ])
        };

        let mut rows = vec![Line::from(Span::styled(
            format!("{}╭{}╮", indent, "─".repeat(width - 2)),
            border,
        ))];
        rows.push(framed(
            &card.title,
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        ));
        for line in &card.lines {
            rows.push(framed(line, Style::default().fg(theme.fg0)));
        }
        rows.push(Line::from(Span::styled(
            format!("{}╰{}╯", indent, "─".repeat(width - 2)),
            border,
        )));
        rows
    }
}

/// Truncate or pad `text` to exactly `width` columns
fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}
