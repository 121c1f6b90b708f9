use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use kbdesk_core::session::Page;
use kbdesk_core::{AppConfig, KnowledgeBaseApi};
use kbdesk_tui::{
    app::{App, Command, Mode},
    event::{ApiEvent, AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    load_theme,
    widgets::{ArticlesWidget, ChatWidget, PopupWidget, StatusBarWidget, TabsWidget},
};

pub async fn run(config: Arc<AppConfig>, api: Arc<dyn KnowledgeBaseApi>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);
    let theme = load_theme(&config.ui.theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("kbdesk"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.clone(), theme);
    let result = event_loop(&mut terminal, &mut app, &keymap, api).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    keymap: &Keymap,
    api: Arc<dyn KnowledgeBaseApi>,
) -> Result<()> {
    let event_handler = EventHandler::new(app.config.ui.tick_rate_ms);

    // Channel for request outcomes
    let (tx, mut rx) = mpsc::unbounded_channel::<ApiEvent>();

    tracing::info!(base_url = %app.config.api.base_url, "Console started");
    for command in app.startup() {
        dispatch(command, &api, &tx);
    }

    loop {
        // Apply completed requests in arrival order (non-blocking)
        while let Ok(event) = rx.try_recv() {
            for command in app.apply_event(event) {
                dispatch(command, &api, &tx);
            }
        }

        terminal.draw(|frame| draw(frame, app))?;

        // Blocks for at most one tick; spawned requests keep running on the runtime
        let event = tokio::task::block_in_place(|| event_handler.next())?;
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    for command in app.handle_action(action) {
                        dispatch(command, &api, &tx);
                    }
                }
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => app.tick(Instant::now()),
            }
        }

        if app.should_quit {
            break;
        }
    }

    tracing::info!("Console closed");
    Ok(())
}

fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    app.viewport_height = size.height;

    // Main layout: tabs + page + status bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);

    TabsWidget::render(frame, layout[0], app);
    match app.nav.active() {
        Page::Chat => ChatWidget::render(frame, layout[1], app),
        Page::KnowledgeBase => ArticlesWidget::render(frame, layout[1], app),
    }
    StatusBarWidget::render(frame, layout[2], app);

    // Render overlays on top
    match &app.mode {
        Mode::DeleteConfirm => {
            if let Some(pending) = app.kb.pending_delete() {
                PopupWidget::render_delete_confirm(frame, pending, &app.theme);
            }
        }
        Mode::AddArticle => {
            if let Some(form) = app.kb.add_form() {
                let busy = matches!(
                    app.kb.status.state(),
                    kbdesk_core::session::StatusState::Loading(_)
                );
                PopupWidget::render_add_article(frame, &form.url, busy, &app.theme);
            }
        }
        Mode::Help => PopupWidget::render_help(frame, &app.config.keymap, &app.theme),
        _ => {}
    }
}

/// Run a command off the UI loop and report its outcome on `tx`
fn dispatch(command: Command, api: &Arc<dyn KnowledgeBaseApi>, tx: &mpsc::UnboundedSender<ApiEvent>) {
    if let Command::OpenUrl(url) = &command {
        if let Err(e) = open::that(url) {
            tracing::warn!(%url, error = %e, "Failed to open browser");
        }
        return;
    }

    let api = Arc::clone(api);
    let tx = tx.clone();
    tokio::spawn(async move {
        let event = match command {
            Command::Ask(query) => ApiEvent::ChatReplied(api.ask(&query).await),
            Command::LoadArticles(query) => ApiEvent::ArticlesLoaded(api.list_articles(&query).await),
            Command::AddArticle(url) => ApiEvent::ArticleAdded(api.scrape(&[url]).await),
            Command::DeleteArticle(id) => {
                let result = api.delete_article(&id).await;
                ApiEvent::ArticleDeleted { id, result }
            }
            Command::CheckHealth => ApiEvent::Health(api.health().await),
            Command::OpenUrl(_) => return,
        };
        // The loop may already have exited
        let _ = tx.send(event);
    });
}
