//! In-memory API double that records every call

use std::sync::Mutex;

use crate::api::*;
use crate::{Error, Result};

#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<String>>,
    chat: Mutex<Option<Result<ChatReply>>>,
    articles: Mutex<Vec<Article>>,
    list_error: Mutex<Option<Error>>,
    delete_error: Mutex<Option<Error>>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Outcome of the next chat turn
    pub fn set_chat(&self, result: Result<ChatReply>) {
        *self.chat.lock().unwrap() = Some(result);
    }

    pub fn set_articles(&self, articles: Vec<Article>) {
        *self.articles.lock().unwrap() = articles;
    }

    /// Fail the next listing request
    pub fn fail_list(&self, error: Error) {
        *self.list_error.lock().unwrap() = Some(error);
    }

    /// Fail the next delete request
    pub fn fail_delete(&self, error: Error) {
        *self.delete_error.lock().unwrap() = Some(error);
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl KnowledgeBaseApi for FakeApi {
    async fn ask(&self, query: &str) -> Result<ChatReply> {
        self.record(format!("POST /bot query={}", query));
        self.chat
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(ChatReply::default()))
    }

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        let params: Vec<String> = query
            .to_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        self.record(format!("GET /data {}", params.join(" ")));
        if let Some(error) = self.list_error.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self.articles.lock().unwrap().clone())
    }

    async fn scrape(&self, urls: &[String]) -> Result<Vec<ScrapeResult>> {
        self.record(format!("POST /scrape urls={}", urls.join(",")));
        Ok(urls
            .iter()
            .map(|url| ScrapeResult {
                url: url.clone(),
                success: true,
            })
            .collect())
    }

    async fn delete_article(&self, id: &ArticleId) -> Result<()> {
        self.record(format!("DELETE /data/{}", id));
        match self.delete_error.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn search_similar(&self, query: &SimilarityQuery) -> Result<Vec<SimilarArticle>> {
        self.record(format!("GET /search text={}", query.text));
        Ok(Vec::new())
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.record("GET /health".to_string());
        Ok(HealthStatus {
            status: "healthy".to_string(),
            timestamp: None,
        })
    }
}
