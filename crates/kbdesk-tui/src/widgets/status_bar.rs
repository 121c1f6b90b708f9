use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use kbdesk_core::config::KeymapConfig;
use kbdesk_core::session::{Page, StatusState};

use super::sanitize_cell;
use crate::app::{App, Health, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let bar = Style::default().bg(theme.bg2);

        let mode_str = match &app.mode {
            Mode::Normal => "NORMAL",
            Mode::ChatInput => "INSERT",
            Mode::Search(_) => "SEARCH",
            Mode::AddArticle => "ADD",
            Mode::DeleteConfirm => "DELETE?",
            Mode::Help => "HELP",
        };

        let (health_str, health_color) = match &app.health {
            Health::Unknown => ("● checking".to_string(), theme.grey1),
            Health::Healthy => ("● healthy".to_string(), theme.success),
            Health::Unhealthy(reason) => (format!("● {}", sanitize_cell(reason)), theme.error),
        };

        let mut spans = vec![
            Span::styled(
                format!(" {} ", mode_str),
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {} ", health_str), Style::default().fg(health_color)),
        ];

        match app.kb.status.state() {
            StatusState::Loading(m) => {
                spans.push(Span::styled(format!(" {} ", m), Style::default().fg(theme.info)));
            }
            StatusState::Success(m) => {
                spans.push(Span::styled(format!(" {} ", m), Style::default().fg(theme.success)));
            }
            StatusState::Error(m) => {
                spans.push(Span::styled(
                    format!(" {} ", sanitize_cell(m)),
                    Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
                ));
            }
            StatusState::Idle => {}
        }

        let help_hint = key_hints(app.nav.active(), &app.config.keymap);

        let parts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(help_hint.width() as u16)])
            .split(area);

        frame.render_widget(Paragraph::new(Line::from(spans)).style(bar.fg(theme.fg0)), parts[0]);
        frame.render_widget(
            Paragraph::new(Span::styled(help_hint, Style::default().fg(theme.grey1))).style(bar),
            parts[1],
        );
    }
}

fn key_hints(page: Page, k: &KeymapConfig) -> String {
    match page {
        Page::Chat => format!(
            " {}:quit {}:type {}/{}:scroll {}:articles {}:help ",
            k.quit, k.focus_input, k.move_down, k.move_up, k.knowledge_tab, k.help
        ),
        Page::KnowledgeBase => format!(
            " {}:quit {}:search {}:add {}:delete {}/{}:page {}:help ",
            k.quit, k.search, k.add_article, k.delete_article, k.prev_page, k.next_page, k.help
        ),
    }
}
