use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use kbdesk_core::session::{Sender, TranscriptEntry};

use super::sanitize_block;
use crate::app::{App, Mode};
use crate::theme::Theme;

pub struct ChatWidget;

impl ChatWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area);

        Self::render_transcript(frame, chunks[0], app);
        Self::render_input(frame, chunks[1], app);
    }

    fn render_transcript(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = Block::default()
            .title(" Chat ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let transcript = app.chat.transcript();
        if transcript.is_empty() {
            let hint = Paragraph::new(Line::from(Span::styled(
                format!(
                    "Ask a question about the knowledge base. Press {} to type.",
                    app.config.keymap.focus_input
                ),
                Style::default().fg(theme.grey1),
            )));
            frame.render_widget(hint, inner);
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        for entry in transcript {
            lines.extend(entry_lines(entry, theme));
        }
        if app.chat.is_sending() {
            lines.push(Line::from(Span::styled(
                "Bot is thinking...",
                Style::default().fg(theme.grey1).add_modifier(Modifier::ITALIC),
            )));
        }

        let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });

        // Anchor to the newest entry, then scroll back
        let height = paragraph.line_count(inner.width).min(u16::MAX as usize) as u16;
        let bottom = height.saturating_sub(inner.height);
        let top = bottom.saturating_sub(app.transcript_scroll.min(bottom));

        let paragraph = paragraph.scroll((top, 0));
        frame.render_widget(paragraph, inner);
    }

    fn render_input(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let focused = app.mode == Mode::ChatInput;

        let (title, border) = if app.chat.is_sending() {
            (" Waiting for reply ", theme.grey0)
        } else if focused {
            (" Message (Enter to send, Esc to leave) ", theme.accent)
        } else {
            (" Message ", theme.grey0)
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(area);

        // Keep the tail of long input visible
        let input = &app.chat.input;
        let visible_width = inner.width.saturating_sub(1) as usize;
        let skip = input.width().saturating_sub(visible_width);
        let shown: String = input.chars().skip(skip).collect();

        let paragraph = Paragraph::new(Line::from(Span::styled(
            shown.clone(),
            Style::default().fg(theme.fg0),
        )))
        .block(block);
        frame.render_widget(paragraph, area);

        if focused {
            let x = inner.x + (shown.width() as u16).min(inner.width.saturating_sub(1));
            frame.set_cursor_position((x, inner.y));
        }
    }
}

fn entry_lines<'a>(entry: &TranscriptEntry, theme: &Theme) -> Vec<Line<'a>> {
    let color = match entry.sender {
        Sender::User => theme.user,
        Sender::Bot => theme.bot,
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{}:", entry.sender.label()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", entry.at.format("%H:%M")),
            Style::default().fg(theme.grey0),
        ),
    ])];

    let content = sanitize_block(&entry.content);
    let style = if entry.sender == Sender::Bot
        && (content.starts_with("Error: ") || content.starts_with("Connection error: "))
    {
        Style::default().fg(theme.error)
    } else {
        Style::default().fg(theme.fg0)
    };
    lines.extend(
        content
            .split('\n')
            .map(|line| Line::from(Span::styled(line.to_string(), style))),
    );
    lines.push(Line::from(""));

    lines
}
