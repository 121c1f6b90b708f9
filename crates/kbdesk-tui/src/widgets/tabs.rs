use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use kbdesk_core::session::Page;

use crate::app::App;

pub struct TabsWidget;

impl TabsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let titles: Vec<Line> = Page::ALL
            .iter()
            .enumerate()
            .map(|(i, page)| Line::from(format!(" F{} {} ", i + 1, page.title())))
            .collect();

        let tabs = Tabs::new(titles)
            .block(
                Block::default()
                    .title(Span::styled(
                        " kbdesk ",
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(theme.grey0))
                    .style(Style::default().bg(theme.bg0)),
            )
            .style(Style::default().fg(theme.grey1))
            .highlight_style(
                Style::default()
                    .fg(theme.fg0)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD),
            )
            .select(app.nav.active().index());

        frame.render_widget(tabs, area);
    }
}
