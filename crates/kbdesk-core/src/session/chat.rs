use chrono::{DateTime, Local};

use super::describe_failure;
use crate::api::{ChatReply, KnowledgeBaseApi};
use crate::Result;

/// Who wrote a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub content: String,
    pub at: DateTime<Local>,
}

/// Chat panel state: the input line, the transcript and the send control
#[derive(Debug, Default)]
pub struct ChatSession {
    /// Current contents of the input line
    pub input: String,
    transcript: Vec<TranscriptEntry>,
    sending: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// True while a request is in flight (send control disabled)
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn can_send(&self) -> bool {
        !self.sending
    }

    /// Start a chat turn from the input line.
    ///
    /// Returns the query to send, or `None` when the trimmed input is empty
    /// or a request is already in flight. On `Some`, the input is cleared,
    /// the send control disabled and the user entry appended.
    pub fn begin_send(&mut self) -> Option<String> {
        if self.sending {
            return None;
        }
        let query = self.input.trim().to_string();
        if query.is_empty() {
            return None;
        }

        self.input.clear();
        self.sending = true;
        self.push(Sender::User, query.clone());
        Some(query)
    }

    /// Finish a chat turn: append the bot entry and re-enable sending
    pub fn complete(&mut self, result: Result<ChatReply>) {
        let content = match result {
            Ok(reply) => reply.text().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Chat request failed");
                describe_failure(&e)
            }
        };
        self.push(Sender::Bot, content);
        self.sending = false;
    }

    /// Full chat turn against the API
    pub async fn send(&mut self, api: &dyn KnowledgeBaseApi) -> bool {
        let Some(query) = self.begin_send() else {
            return false;
        };
        let result = api.ask(&query).await;
        self.complete(result);
        true
    }

    fn push(&mut self, sender: Sender, content: String) {
        self.transcript.push(TranscriptEntry {
            sender,
            content,
            at: Local::now(),
        });
    }
}
