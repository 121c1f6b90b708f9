use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Article identifier as sent by the server (numeric or string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleId {
    Number(i64),
    Text(String),
}

impl ArticleId {
    /// An empty string id cannot be deleted
    pub fn is_empty(&self) -> bool {
        matches!(self, ArticleId::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleId::Number(n) => write!(f, "{}", n),
            ArticleId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ArticleId {
    fn from(s: &str) -> Self {
        match s.trim().parse::<i64>() {
            Ok(n) => ArticleId::Number(n),
            Err(_) => ArticleId::Text(s.trim().to_string()),
        }
    }
}

/// A knowledge base entry.
///
/// The list endpoint is loose about field names, so synonyms are kept side
/// by side and resolved by the accessors below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: Option<ArticleId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// First non-blank value
fn first_present<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|c| Option::as_deref(*c))
        .find(|s| !s.trim().is_empty())
}

impl Article {
    pub fn display_title(&self) -> &str {
        first_present(&[&self.title]).unwrap_or("Untitled")
    }

    /// Source URL, if any
    pub fn link(&self) -> Option<&str> {
        first_present(&[&self.url, &self.source])
    }

    pub fn display_url(&self) -> &str {
        self.link().unwrap_or("No URL")
    }

    pub fn display_content(&self) -> &str {
        first_present(&[&self.content, &self.text]).unwrap_or("No content")
    }

    /// Identifier usable for deletion
    pub fn deletable_id(&self) -> Option<&ArticleId> {
        self.id.as_ref().filter(|id| !id.is_empty())
    }
}

/// Body of a chat turn
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub query: &'a str,
}

/// Successful chat reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatReply {
    pub const FALLBACK: &'static str = "No response received";

    /// Text to show in the transcript
    pub fn text(&self) -> &str {
        // Only empty strings are skipped; whitespace is a real reply
        [&self.response, &self.message]
            .into_iter()
            .filter_map(Option::as_deref)
            .find(|s| !s.is_empty())
            .unwrap_or(Self::FALLBACK)
    }
}

/// Error body returned by the service: `{ detail?, message? }`
///
/// `detail` is not always a string (validation errors carry a list).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

fn value_text(value: &Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

impl ApiErrorBody {
    /// Parse a raw body, tolerating non-JSON payloads
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// `detail`, then `message`, then the given fallback
    pub fn message_or(&self, fallback: &str) -> String {
        value_text(&self.detail)
            .or_else(|| value_text(&self.message))
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Body of a scrape request
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeRequest<'a> {
    pub urls: &'a [String],
}

/// Per-URL outcome of a scrape request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapeResult {
    pub url: String,
    #[serde(default = "default_true")]
    pub success: bool,
}

fn default_true() -> bool {
    true
}

/// Parameters of a listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub limit: u32,
    pub offset: u32,
    pub search: Option<String>,
}

impl ArticleQuery {
    /// Query-string pairs in the order the service expects
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        pairs
    }
}

/// Parameters of a similarity search
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityQuery {
    pub text: String,
    pub limit: u32,
    pub threshold: f64,
}

impl SimilarityQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: 5,
            threshold: 0.7,
        }
    }
}

/// One similarity search hit
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimilarArticle {
    #[serde(default)]
    pub id: Option<ArticleId>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub similarity: f64,
}

/// Health endpoint payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
