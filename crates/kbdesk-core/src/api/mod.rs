mod client;
mod models;

pub use client::HttpApiClient;
pub use models::{
    ApiErrorBody, Article, ArticleId, ArticleQuery, ChatReply, ChatRequest, HealthStatus,
    ScrapeRequest, ScrapeResult, SimilarArticle, SimilarityQuery,
};

use crate::Result;

/// Operations offered by the knowledge base service
#[async_trait::async_trait]
pub trait KnowledgeBaseApi: Send + Sync {
    /// Send one chat turn to the bot
    async fn ask(&self, query: &str) -> Result<ChatReply>;

    /// Fetch one page of articles
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>>;

    /// Ask the service to scrape and ingest the given URLs
    async fn scrape(&self, urls: &[String]) -> Result<Vec<ScrapeResult>>;

    /// Remove an article
    async fn delete_article(&self, id: &ArticleId) -> Result<()>;

    /// Embedding similarity search
    async fn search_similar(&self, query: &SimilarityQuery) -> Result<Vec<SimilarArticle>>;

    /// Service health
    async fn health(&self) -> Result<HealthStatus>;
}
