//! HTTP client for the knowledge base REST API

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::models::*;
use super::KnowledgeBaseApi;
use crate::config::AppConfig;
use crate::{Error, Result};

const API_KEY_HEADER: &str = "X-API-Key";
const UNKNOWN_ERROR: &str = "Unknown error occurred";
const DELETE_FAILED: &str = "Failed to delete article";

/// reqwest-backed implementation of [`KnowledgeBaseApi`]
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl HttpApiClient {
    /// Create a client from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::with_settings(
            &config.api.base_url,
            &config.api.api_key,
            config.api.request_timeout_secs,
        )
    }

    pub fn with_settings(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(Self::default_headers())
            .build()?;

        Ok(Self {
            client,
            base_url: Self::normalize_base(base_url)?,
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Ensure a trailing slash so relative joins keep the version prefix
    fn normalize_base(base_url: &str) -> Result<Url> {
        let trimmed = base_url.trim();
        let with_slash = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{}/", trimmed)
        };
        Ok(Url::parse(&with_slash)?)
    }

    /// Build an absolute endpoint URL from path segments
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::Config(format!("Base URL cannot be a base: {}", self.base_url)))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, with_key: bool) -> RequestBuilder {
        tracing::debug!(%method, %url, "API request");
        let builder = self.client.request(method, url);
        if with_key {
            builder.header(API_KEY_HEADER, &self.api_key)
        } else {
            builder
        }
    }

    /// Build the GET request for a listing page
    pub fn list_request(&self, query: &ArticleQuery) -> Result<RequestBuilder> {
        let url = self.endpoint(&["data"])?;
        Ok(self
            .request(Method::GET, url, true)
            .query(&query.to_pairs()))
    }

    /// Build the DELETE request for an article
    pub fn delete_request(&self, id: &ArticleId) -> Result<RequestBuilder> {
        let id = id.to_string();
        let url = self.endpoint(&["data", &id])?;
        Ok(self.request(Method::DELETE, url, true))
    }

    /// Turn a non-success response into [`Error::Api`]
    async fn check(response: Response, fallback: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = ApiErrorBody::parse(&body).message_or(fallback);
        tracing::warn!(status = status.as_u16(), %message, "API request failed");
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait::async_trait]
impl KnowledgeBaseApi for HttpApiClient {
    async fn ask(&self, query: &str) -> Result<ChatReply> {
        let url = self.endpoint(&["bot"])?;
        let response = self
            .request(Method::POST, url, false)
            .json(&ChatRequest { query })
            .send()
            .await?;
        let response = Self::check(response, UNKNOWN_ERROR).await?;
        Self::json(response).await
    }

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        let response = self.list_request(query)?.send().await?;
        let response = Self::check(response, UNKNOWN_ERROR).await?;
        let articles: Vec<Article> = Self::json(response).await?;
        tracing::debug!(count = articles.len(), offset = query.offset, "Loaded articles");
        Ok(articles)
    }

    async fn scrape(&self, urls: &[String]) -> Result<Vec<ScrapeResult>> {
        let url = self.endpoint(&["scrape"])?;
        let response = self
            .request(Method::POST, url, true)
            .json(&ScrapeRequest { urls })
            .send()
            .await?;
        let response = Self::check(response, UNKNOWN_ERROR).await?;

        // A 2xx with an unexpected body still counts as accepted
        let bytes = response.bytes().await?;
        match serde_json::from_slice::<Vec<ScrapeResult>>(&bytes) {
            Ok(results) => Ok(results),
            Err(e) => {
                tracing::debug!(error = %e, "Scrape response had no per-URL results");
                Ok(Vec::new())
            }
        }
    }

    async fn delete_article(&self, id: &ArticleId) -> Result<()> {
        let response = self.delete_request(id)?.send().await?;
        Self::check(response, DELETE_FAILED).await?;
        tracing::info!(%id, "Deleted article");
        Ok(())
    }

    async fn search_similar(&self, query: &SimilarityQuery) -> Result<Vec<SimilarArticle>> {
        let url = self.endpoint(&["search"])?;
        let response = self
            .request(Method::GET, url, false)
            .query(&[
                ("text", query.text.clone()),
                ("limit", query.limit.to_string()),
                ("threshold", query.threshold.to_string()),
            ])
            .send()
            .await?;
        let response = Self::check(response, UNKNOWN_ERROR).await?;
        Self::json(response).await
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint(&["health"])?;
        let response = self.request(Method::GET, url, false).send().await?;
        let response = Self::check(response, UNKNOWN_ERROR).await?;
        Self::json(response).await
    }
}
