use std::sync::Arc;
use std::time::Instant;

use kbdesk_core::api::{ArticleId, ArticleQuery, HealthStatus};
use kbdesk_core::session::{describe_failure, ChatSession, KnowledgeBasePanel, Navigation, Page};
use kbdesk_core::AppConfig;

use crate::event::ApiEvent;
use crate::input::Action;
use crate::theme::Theme;

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Normal browsing mode
    Normal,
    /// Typing into the chat input
    ChatInput,
    /// Editing the knowledge base search term
    Search(String),
    /// Add-article modal is open
    AddArticle,
    /// Delete confirmation
    DeleteConfirm,
    /// Help overlay
    Help,
}

/// Work the UI loop must perform off the render thread
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ask(String),
    LoadArticles(ArticleQuery),
    AddArticle(String),
    DeleteArticle(ArticleId),
    CheckHealth,
    OpenUrl(String),
}

/// Service health as last reported by `/health`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Health {
    Unknown,
    Healthy,
    Unhealthy(String),
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub nav: Navigation,
    pub chat: ChatSession,
    pub kb: KnowledgeBasePanel,
    /// Current application mode
    pub mode: Mode,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Transcript lines scrolled back from the newest entry
    pub transcript_scroll: u16,
    /// Height of the last drawn frame, used for half-page jumps
    pub viewport_height: u16,
    pub health: Health,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Self {
        let kb = KnowledgeBasePanel::new(&config);
        Self {
            config,
            theme,
            nav: Navigation::default(),
            chat: ChatSession::new(),
            kb,
            mode: Mode::Normal,
            pending_key: None,
            should_quit: false,
            transcript_scroll: 0,
            viewport_height: 0,
            health: Health::Unknown,
        }
    }

    /// Requests issued when the console opens
    pub fn startup(&mut self) -> Vec<Command> {
        let query = self.kb.begin_load(self.kb.listing.query());
        vec![Command::CheckHealth, Command::LoadArticles(query)]
    }

    /// Check if we're in a mode that accepts text input
    pub fn is_input_mode(&self) -> bool {
        matches!(
            self.mode,
            Mode::ChatInput | Mode::Search(_) | Mode::AddArticle
        )
    }

    /// Clear the pending key
    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }

    fn on_knowledge_base(&self) -> bool {
        self.nav.is_active(Page::KnowledgeBase)
    }

    fn half_page(&self) -> u16 {
        (self.viewport_height / 2).max(1)
    }

    /// Apply a user action, returning the requests it triggers
    pub fn handle_action(&mut self, action: Action) -> Vec<Command> {
        if action != Action::PendingG {
            self.clear_pending_key();
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::Help => self.mode = Mode::Help,
            Action::ExitMode => self.mode = Mode::Normal,
            Action::NextTab => self.nav.next(),
            Action::ShowChat => self.nav.activate(Page::Chat),
            Action::ShowKnowledgeBase => self.nav.activate(Page::KnowledgeBase),
            Action::FocusInput => {
                if !self.on_knowledge_base() {
                    self.mode = Mode::ChatInput;
                }
            }
            Action::PendingG => self.pending_key = Some('g'),
            Action::MoveDown => self.move_down(1),
            Action::MoveUp => self.move_up(1),
            Action::ScrollHalfPageDown => self.move_down(self.half_page()),
            Action::ScrollHalfPageUp => self.move_up(self.half_page()),
            Action::JumpToTop => {
                if self.on_knowledge_base() {
                    self.kb.listing.select_first();
                } else {
                    // Clamped while rendering
                    self.transcript_scroll = u16::MAX;
                }
            }
            Action::JumpToBottom => {
                if self.on_knowledge_base() {
                    self.kb.listing.select_last();
                } else {
                    self.transcript_scroll = 0;
                }
            }
            Action::PrevPage if self.on_knowledge_base() => {
                if let Some(query) = self.kb.listing.prev_page() {
                    return self.load(query);
                }
            }
            Action::NextPage if self.on_knowledge_base() => {
                if let Some(query) = self.kb.listing.next_page() {
                    return self.load(query);
                }
            }
            Action::GoToPage(page) if self.on_knowledge_base() => {
                let max_page = self.kb.listing.page_info().map(|info| info.max_page);
                if max_page.is_some_and(|max| page <= max) {
                    let query = self.kb.listing.go_to_page(page);
                    return self.load(query);
                }
            }
            Action::StartSearch if self.on_knowledge_base() => {
                self.mode = Mode::Search(self.kb.listing.search_query().to_string());
            }
            Action::AddArticle if self.on_knowledge_base() => {
                self.kb.open_add_form();
                self.mode = Mode::AddArticle;
            }
            Action::DeleteArticle if self.on_knowledge_base() => {
                let selected = self.kb.listing.selected_article().cloned();
                if let Some(article) = selected {
                    if self.kb.request_delete(&article) {
                        self.mode = Mode::DeleteConfirm;
                    }
                }
            }
            Action::Refresh => {
                if self.on_knowledge_base() {
                    return self.load(self.kb.listing.query());
                }
                return vec![Command::CheckHealth];
            }
            Action::OpenInBrowser if self.on_knowledge_base() => {
                let link = self
                    .kb
                    .listing
                    .selected_article()
                    .and_then(|a| a.link())
                    .map(str::to_string);
                if let Some(url) = link {
                    return vec![Command::OpenUrl(url)];
                }
            }
            Action::Confirm => return self.confirm(),
            Action::Cancel => self.cancel(),
            Action::InputChar(c) => {
                if let Some(buffer) = self.input_buffer() {
                    buffer.push(c);
                }
            }
            Action::Backspace => {
                if let Some(buffer) = self.input_buffer() {
                    buffer.pop();
                }
            }
            _ => {}
        }

        Vec::new()
    }

    /// Apply the outcome of a spawned request
    pub fn apply_event(&mut self, event: ApiEvent) -> Vec<Command> {
        match event {
            ApiEvent::ChatReplied(result) => {
                self.chat.complete(result);
                self.transcript_scroll = 0;
            }
            ApiEvent::ArticlesLoaded(result) => self.kb.finish_load(result),
            ApiEvent::ArticleAdded(result) => {
                let reload = self.kb.finish_add(result);
                if self.kb.add_form().is_none() && self.mode == Mode::AddArticle {
                    self.mode = Mode::Normal;
                }
                if reload {
                    return vec![Command::LoadArticles(self.kb.begin_refresh())];
                }
            }
            ApiEvent::ArticleDeleted { id, result } => {
                tracing::debug!(%id, ok = result.is_ok(), "Delete settled");
                if self.kb.finish_delete(result) {
                    return vec![Command::LoadArticles(self.kb.begin_refresh())];
                }
            }
            ApiEvent::Health(result) => {
                self.health = match result {
                    Ok(status) => health_from(&status),
                    Err(e) => Health::Unhealthy(describe_failure(&e)),
                };
            }
        }
        Vec::new()
    }

    /// Periodic update: expire the status banner
    pub fn tick(&mut self, now: Instant) {
        self.kb.status.tick(now);
    }

    fn load(&mut self, query: ArticleQuery) -> Vec<Command> {
        vec![Command::LoadArticles(self.kb.begin_load(query))]
    }

    fn move_down(&mut self, n: u16) {
        if self.on_knowledge_base() {
            for _ in 0..n {
                self.kb.listing.select_next();
            }
        } else {
            self.transcript_scroll = self.transcript_scroll.saturating_sub(n);
        }
    }

    fn move_up(&mut self, n: u16) {
        if self.on_knowledge_base() {
            for _ in 0..n {
                self.kb.listing.select_prev();
            }
        } else {
            self.transcript_scroll = self.transcript_scroll.saturating_add(n);
        }
    }

    fn confirm(&mut self) -> Vec<Command> {
        match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::ChatInput => {
                // Input keeps focus after sending
                self.mode = Mode::ChatInput;
                if let Some(query) = self.chat.begin_send() {
                    self.transcript_scroll = 0;
                    return vec![Command::Ask(query)];
                }
            }
            Mode::Search(term) => {
                let query = self.kb.listing.search(term.trim());
                return self.load(query);
            }
            Mode::AddArticle => {
                self.mode = Mode::AddArticle;
                if let Some(url) = self.kb.begin_add() {
                    return vec![Command::AddArticle(url)];
                }
            }
            Mode::DeleteConfirm => {
                if let Some(id) = self.kb.confirm_delete() {
                    return vec![Command::DeleteArticle(id)];
                }
            }
            other => self.mode = other,
        }
        Vec::new()
    }

    fn cancel(&mut self) {
        match self.mode {
            Mode::AddArticle => self.kb.close_add_form(),
            Mode::DeleteConfirm => self.kb.cancel_delete(),
            _ => {}
        }
        self.mode = Mode::Normal;
    }

    fn input_buffer(&mut self) -> Option<&mut String> {
        match &mut self.mode {
            Mode::ChatInput => Some(&mut self.chat.input),
            Mode::Search(term) => Some(term),
            Mode::AddArticle => self.kb.add_form_mut().map(|form| &mut form.url),
            _ => None,
        }
    }
}

fn health_from(status: &HealthStatus) -> Health {
    if status.is_healthy() {
        Health::Healthy
    } else {
        Health::Unhealthy(status.status.clone())
    }
}

#[cfg(test)]
mod tests {
    use kbdesk_core::api::{Article, ChatReply, ScrapeResult};
    use kbdesk_core::session::{DELETED, LOADING};
    use kbdesk_core::Error;

    use super::*;

    fn app() -> App {
        App::new(Arc::new(AppConfig::default()), Theme::default())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_action(Action::InputChar(c));
        }
    }

    fn articles(n: i64) -> Vec<Article> {
        (1..=n)
            .map(|i| Article {
                id: Some(ArticleId::Number(i)),
                title: Some(format!("Article {}", i)),
                url: Some(format!("https://example.com/{}", i)),
                ..Default::default()
            })
            .collect()
    }

    fn kb_app_with(n: i64) -> App {
        let mut app = app();
        app.nav.activate(Page::KnowledgeBase);
        app.apply_event(ApiEvent::ArticlesLoaded(Ok(articles(n))));
        app
    }

    #[test]
    fn test_startup_loads_first_page_and_health() {
        let mut app = app();
        let commands = app.startup();
        assert_eq!(commands[0], Command::CheckHealth);
        assert!(matches!(
            &commands[1],
            Command::LoadArticles(q) if q.offset == 0 && q.limit == 10
        ));
        assert_eq!(app.kb.status.message(), Some(LOADING));
    }

    #[test]
    fn test_empty_chat_sends_nothing() {
        let mut app = app();
        app.handle_action(Action::FocusInput);
        type_text(&mut app, "   ");
        assert!(app.handle_action(Action::Confirm).is_empty());
        assert!(app.chat.transcript().is_empty());
    }

    #[test]
    fn test_chat_round_trip_keeps_input_focus() {
        let mut app = app();
        app.handle_action(Action::FocusInput);
        type_text(&mut app, "hi");

        let commands = app.handle_action(Action::Confirm);
        assert_eq!(commands, vec![Command::Ask("hi".to_string())]);
        assert_eq!(app.mode, Mode::ChatInput);
        assert!(app.chat.is_sending());

        type_text(&mut app, "again");
        assert!(app.handle_action(Action::Confirm).is_empty());

        app.apply_event(ApiEvent::ChatReplied(Ok(ChatReply {
            response: Some("hello".to_string()),
            message: None,
        })));
        assert_eq!(app.chat.transcript().len(), 2);
        assert!(!app.chat.is_sending());
    }

    #[test]
    fn test_search_resets_page() {
        let mut app = kb_app_with(10);
        app.kb.listing.go_to_page(3);
        assert_eq!(app.kb.listing.current_page(), 3);

        app.handle_action(Action::StartSearch);
        type_text(&mut app, "foo");
        let commands = app.handle_action(Action::Confirm);
        assert_eq!(
            commands,
            vec![Command::LoadArticles(ArticleQuery {
                limit: 10,
                offset: 0,
                search: Some("foo".to_string()),
            })]
        );
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = kb_app_with(3);
        app.handle_action(Action::MoveDown);
        assert!(app.handle_action(Action::DeleteArticle).is_empty());
        assert_eq!(app.mode, Mode::DeleteConfirm);
        assert_eq!(app.kb.pending_delete().map(|p| p.title.as_str()), Some("Article 2"));

        assert!(app.handle_action(Action::Cancel).is_empty());
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.kb.pending_delete().is_none());

        app.handle_action(Action::DeleteArticle);
        let commands = app.handle_action(Action::Confirm);
        assert_eq!(commands, vec![Command::DeleteArticle(ArticleId::Number(2))]);
    }

    #[test]
    fn test_delete_success_reloads_and_keeps_message() {
        let mut app = kb_app_with(3);
        let commands = app.apply_event(ApiEvent::ArticleDeleted {
            id: ArticleId::Number(2),
            result: Ok(()),
        });
        assert!(matches!(commands.as_slice(), [Command::LoadArticles(_)]));
        app.apply_event(ApiEvent::ArticlesLoaded(Ok(articles(2))));
        assert_eq!(app.kb.status.message(), Some(DELETED));
    }

    #[test]
    fn test_add_article_flow() {
        let mut app = kb_app_with(1);
        app.handle_action(Action::AddArticle);
        assert_eq!(app.mode, Mode::AddArticle);

        type_text(&mut app, " https://example.com/x ");
        let commands = app.handle_action(Action::Confirm);
        assert_eq!(commands, vec![Command::AddArticle("https://example.com/x".to_string())]);

        let commands = app.apply_event(ApiEvent::ArticleAdded(Ok(vec![ScrapeResult {
            url: "https://example.com/x".to_string(),
            success: true,
        }])));
        assert!(matches!(commands.as_slice(), [Command::LoadArticles(_)]));
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.kb.add_form().is_none());
    }

    #[test]
    fn test_add_failure_keeps_modal() {
        let mut app = kb_app_with(1);
        app.handle_action(Action::AddArticle);
        type_text(&mut app, "https://example.com/x");
        app.handle_action(Action::Confirm);

        let commands = app.apply_event(ApiEvent::ArticleAdded(Err(Error::Api {
            status: 422,
            message: "bad url".to_string(),
        })));
        assert!(commands.is_empty());
        assert_eq!(app.mode, Mode::AddArticle);
        assert_eq!(app.kb.status.message(), Some("Error: bad url"));
    }

    #[test]
    fn test_go_to_page_bounded_by_max_page() {
        let mut app = kb_app_with(10);
        // Full page: one page known
        assert!(app.handle_action(Action::GoToPage(5)).is_empty());
        assert!(!app.handle_action(Action::GoToPage(1)).is_empty());
    }

    #[test]
    fn test_open_in_browser_uses_selected_link() {
        let mut app = kb_app_with(2);
        app.handle_action(Action::JumpToBottom);
        assert_eq!(
            app.handle_action(Action::OpenInBrowser),
            vec![Command::OpenUrl("https://example.com/2".to_string())]
        );
    }

    #[test]
    fn test_health_event() {
        let mut app = app();
        app.apply_event(ApiEvent::Health(Ok(HealthStatus {
            status: "healthy".to_string(),
            timestamp: None,
        })));
        assert_eq!(app.health, Health::Healthy);
    }
}
