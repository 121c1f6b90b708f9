use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use kbdesk_core::api::{Article, ArticleId, ChatReply, HealthStatus, ScrapeResult};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Option<AppEvent>> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

/// Outcome of a request spawned off the UI loop
#[derive(Debug)]
pub enum ApiEvent {
    ChatReplied(kbdesk_core::Result<ChatReply>),
    ArticlesLoaded(kbdesk_core::Result<Vec<Article>>),
    ArticleAdded(kbdesk_core::Result<Vec<ScrapeResult>>),
    ArticleDeleted {
        id: ArticleId,
        result: kbdesk_core::Result<()>,
    },
    Health(kbdesk_core::Result<HealthStatus>),
}
