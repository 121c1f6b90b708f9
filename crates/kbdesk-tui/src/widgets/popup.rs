use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use kbdesk_core::config::KeymapConfig;
use kbdesk_core::session::{PendingDelete, DELETE_PROMPT};

use super::{sanitize_cell, truncate_width};
use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Render a confirmation popup dialog
    pub fn render_confirm(frame: &mut Frame, title: &str, message: &str, detail: &str, theme: &Theme) {
        let popup_area = centered_rect(56, 8, frame.area());
        let inner_area = Self::frame(frame, popup_area, title, theme.error, theme);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Message
                Constraint::Length(1), // Detail
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Hint
            ])
            .split(inner_area);

        let message_paragraph = Paragraph::new(Span::styled(
            message.to_string(),
            Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(message_paragraph, chunks[0]);

        let detail_paragraph = Paragraph::new(Span::styled(
            detail.to_string(),
            Style::default().fg(theme.grey1),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(detail_paragraph, chunks[1]);

        let hint_paragraph = Paragraph::new(Line::from(vec![
            Span::styled("[", Style::default().fg(theme.grey1)),
            Span::styled(
                "y",
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
            ),
            Span::styled("]es  [", Style::default().fg(theme.grey1)),
            Span::styled(
                "n",
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            ),
            Span::styled("]o", Style::default().fg(theme.grey1)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(hint_paragraph, chunks[3]);
    }

    /// Render the delete confirmation for the pending article
    pub fn render_delete_confirm(frame: &mut Frame, pending: &PendingDelete, theme: &Theme) {
        let detail = format!("\"{}\"", truncate_width(&sanitize_cell(&pending.title), 40));
        Self::render_confirm(frame, "Confirm Delete", DELETE_PROMPT, &detail, theme);
    }

    /// Render the add-article modal with its URL field
    pub fn render_add_article(frame: &mut Frame, url: &str, busy: bool, theme: &Theme) {
        let popup_area = centered_rect(64, 7, frame.area());
        let inner_area = Self::frame(frame, popup_area, "Add Article", theme.accent, theme);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Label
                Constraint::Length(1), // Field
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Hint
            ])
            .split(inner_area);

        frame.render_widget(
            Paragraph::new(Span::styled("Article URL", Style::default().fg(theme.grey1))),
            chunks[0],
        );

        let field_width = chunks[1].width.saturating_sub(1) as usize;
        let skip = url.width().saturating_sub(field_width);
        let shown: String = url.chars().skip(skip).collect();
        frame.render_widget(
            Paragraph::new(Span::styled(shown.clone(), Style::default().fg(theme.fg0)))
                .style(Style::default().bg(theme.bg2)),
            chunks[1],
        );
        if !busy {
            let x = chunks[1].x + (shown.width() as u16).min(field_width as u16);
            frame.set_cursor_position((x, chunks[1].y));
        }

        let hint = if busy {
            "Submitting..."
        } else {
            "Enter submit · Esc cancel"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(theme.grey0)))
                .alignment(Alignment::Center),
            chunks[3],
        );
    }

    /// Render the key binding overview
    pub fn render_help(frame: &mut Frame, keymap: &KeymapConfig, theme: &Theme) {
        let entries: [(&str, &str); 17] = [
            (keymap.chat_tab.as_str(), "Chat page"),
            (keymap.knowledge_tab.as_str(), "Knowledge base page"),
            (keymap.next_tab.as_str(), "Next page"),
            (keymap.focus_input.as_str(), "Type a chat message"),
            (keymap.move_down.as_str(), "Down / scroll transcript"),
            (keymap.move_up.as_str(), "Up / scroll transcript"),
            (keymap.jump_to_top.as_str(), "First row / oldest message"),
            (keymap.jump_to_bottom.as_str(), "Last row / newest message"),
            (keymap.prev_page.as_str(), "Previous page"),
            (keymap.next_page.as_str(), "Next page of articles"),
            ("1-9", "Go to page"),
            (keymap.search.as_str(), "Search articles"),
            (keymap.add_article.as_str(), "Add article by URL"),
            (keymap.delete_article.as_str(), "Delete selected article"),
            (keymap.open_browser.as_str(), "Open article URL"),
            (keymap.refresh.as_str(), "Reload"),
            (keymap.quit.as_str(), "Quit"),
        ];

        let height = entries.len() as u16 + 4;
        let popup_area = centered_rect(50, height, frame.area());
        let inner_area = Self::frame(frame, popup_area, "Help", theme.accent, theme);

        let mut lines: Vec<Line> = entries
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>8}  ", key),
                        Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(desc.to_string(), Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled("Press any key to close", Style::default().fg(theme.grey0)))
                .alignment(Alignment::Center),
        );

        frame.render_widget(Paragraph::new(lines), inner_area);
    }

    /// Clear the area, draw the bordered box and return its inner area
    fn frame(frame: &mut Frame, area: Rect, title: &str, border: Color, theme: &Theme) -> Rect {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {} ", title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
