//! View models behind the console: they hold UI state and turn API
//! outcomes into what the user sees, without touching the terminal.

mod chat;
mod knowledge;
mod listing;
mod mutation;
mod navigation;
mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use chat::{ChatSession, Sender, TranscriptEntry};
pub use knowledge::{KnowledgeBasePanel, LOADING};
pub use listing::{ArticleListing, EmptyState, PageInfo, EMPTY_MESSAGE, SEARCH_HINT};
pub use mutation::{
    scrape_failure, AddArticleForm, PendingDelete, ADDED, ADDING, DELETED, DELETE_PROMPT, DELETING,
};
pub use navigation::{Navigation, Page};
pub use status::{StatusBanner, StatusState};

use crate::Error;

/// Inline text for a failed request: server failures read
/// `Error: <message>`, transport failures `Connection error: <reason>`
pub fn describe_failure(err: &Error) -> String {
    match err {
        Error::Http(e) if err.is_transport() => format!("Connection error: {}", e),
        Error::Io(e) => format!("Connection error: {}", e),
        Error::Api { message, .. } => format!("Error: {}", message),
        other => format!("Error: {}", other),
    }
}
