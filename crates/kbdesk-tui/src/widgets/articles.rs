use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use kbdesk_core::api::Article;
use kbdesk_core::config::KeymapConfig;
use kbdesk_core::session::PageInfo;

use super::{sanitize_block, sanitize_cell, truncate_width};
use crate::app::{App, Mode};
use crate::theme::Theme;

/// Preview length for the content column
const CONTENT_PREVIEW: usize = 80;

pub struct ArticlesWidget;

impl ArticlesWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Search
                Constraint::Min(3),    // Table + detail
                Constraint::Length(1), // Pagination
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        Self::render_search(frame, rows[0], app);
        Self::render_table(frame, columns[0], app);
        Self::render_detail(frame, columns[1], app);
        Self::render_pagination(frame, rows[2], app);
    }

    fn render_search(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let label = Span::styled(" Search: ", Style::default().fg(theme.grey1));

        let line = match &app.mode {
            Mode::Search(term) => {
                let x = area.x + label.width() as u16 + term.width() as u16;
                frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
                Line::from(vec![label, Span::styled(term.clone(), Style::default().fg(theme.fg0))])
            }
            _ => {
                let query = app.kb.listing.search_query();
                if query.is_empty() {
                    Line::from(vec![
                        label,
                        Span::styled("(none, press / to search)", Style::default().fg(theme.grey0)),
                    ])
                } else {
                    Line::from(vec![
                        label,
                        Span::styled(
                            sanitize_cell(query),
                            Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD),
                        ),
                    ])
                }
            }
        };

        frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg1)), area);
    }

    fn render_table(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let listing = &app.kb.listing;

        let block = Block::default()
            .title(" Knowledge Base ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg0));

        if let Some(empty) = listing.empty_state() {
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(empty.message, Style::default().fg(theme.grey1))),
            ];
            if let Some(hint) = empty.hint {
                lines.push(Line::from(Span::styled(hint, Style::default().fg(theme.grey0))));
            }
            let paragraph = Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }

        let widths = [
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ];
        let inner_width = area.width.saturating_sub(2) as usize;
        let title_width = inner_width * 30 / 100;
        let url_width = inner_width * 30 / 100;
        let content_width = (inner_width * 40 / 100).min(CONTENT_PREVIEW);

        let rows: Vec<Row> = listing
            .articles()
            .iter()
            .map(|article| {
                Row::new(vec![
                    Cell::from(truncate_width(&sanitize_cell(article.display_title()), title_width)),
                    Cell::from(truncate_width(&sanitize_cell(article.display_url()), url_width))
                        .style(Style::default().fg(theme.info)),
                    Cell::from(truncate_width(&sanitize_cell(article.display_content()), content_width))
                        .style(Style::default().fg(theme.grey1)),
                ])
            })
            .collect();

        let header = Row::new(vec!["Title", "URL", "Content"]).style(
            Style::default()
                .fg(theme.fg1)
                .add_modifier(Modifier::BOLD),
        );

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .style(Style::default().fg(theme.fg0))
            .row_highlight_style(
                Style::default()
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD),
            );

        let mut state = TableState::default();
        state.select(Some(listing.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_detail(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = Block::default()
            .title(" Article ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg0));

        let content = match app.kb.listing.selected_article() {
            Some(article) => detail_text(article, &app.config.keymap, theme),
            None => Text::from(Line::from(Span::styled(
                "No article selected",
                Style::default().fg(theme.grey1),
            ))),
        };

        let paragraph = Paragraph::new(content)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_pagination(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let Some(info) = app.kb.listing.page_info() else {
            frame.render_widget(Paragraph::new("").style(Style::default().bg(theme.bg1)), area);
            return;
        };

        let summary = format!("{} ", info.summary());
        let parts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(summary.width() as u16)])
            .split(area);

        let bg = Style::default().bg(theme.bg1);
        let controls = Line::from(pagination_spans(info, &app.config.keymap, theme));
        frame.render_widget(Paragraph::new(controls).style(bg), parts[0]);
        frame.render_widget(
            Paragraph::new(Span::styled(summary, Style::default().fg(theme.grey1))).style(bg),
            parts[1],
        );
    }
}

fn pagination_spans<'a>(info: &PageInfo, keymap: &KeymapConfig, theme: &Theme) -> Vec<Span<'a>> {
    let enabled = Style::default().fg(theme.fg0);
    let disabled = Style::default().fg(theme.grey0);

    let mut spans = vec![Span::styled(
        format!(" « Prev ({}) ", keymap.prev_page),
        if info.prev_enabled { enabled } else { disabled },
    )];
    for page in &info.window {
        if *page == info.current_page {
            spans.push(Span::styled(
                format!("[{}]", page),
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(format!(" {} ", page), enabled));
        }
    }
    spans.push(Span::styled(
        format!(" Next ({}) » ", keymap.next_page),
        if info.next_enabled { enabled } else { disabled },
    ));
    spans
}

fn detail_text<'a>(article: &Article, keymap: &KeymapConfig, theme: &Theme) -> Text<'a> {
    let mut lines = vec![
        Line::from(Span::styled(
            sanitize_cell(article.display_title()),
            Style::default()
                .fg(theme.fg1)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            sanitize_cell(article.display_url()),
            Style::default().fg(theme.info).add_modifier(Modifier::UNDERLINED),
        )),
    ];
    if let Some(id) = &article.id {
        lines.push(Line::from(Span::styled(
            format!("id {}", sanitize_cell(&id.to_string())),
            Style::default().fg(theme.grey0),
        )));
    }
    lines.push(Line::from(""));
    lines.extend(
        sanitize_block(article.display_content())
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(theme.fg0)))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "{} open in browser · {} delete",
            keymap.open_browser, keymap.delete_article
        ),
        Style::default().fg(theme.grey0),
    )));
    Text::from(lines)
}
