use std::time::Duration;

use super::listing::ArticleListing;
use super::mutation::{self, AddArticleForm, PendingDelete};
use super::status::{StatusBanner, StatusState};
use super::describe_failure;
use crate::api::{Article, ArticleId, ArticleQuery, KnowledgeBaseApi, ScrapeResult};
use crate::config::AppConfig;
use crate::Result;

pub const LOADING: &str = "Loading articles...";

/// Knowledge base page: listing, status banner, add modal and delete confirmation.
///
/// Every network operation is split into a `begin_*` step that updates the
/// view and returns what to send, and a `finish_*` step that applies the
/// outcome. The async helpers chain both for callers that can await inline.
#[derive(Debug)]
pub struct KnowledgeBasePanel {
    pub listing: ArticleListing,
    pub status: StatusBanner,
    add_form: Option<AddArticleForm>,
    pending_delete: Option<PendingDelete>,
}

impl Default for KnowledgeBasePanel {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl KnowledgeBasePanel {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            listing: ArticleListing::new(&config.listing),
            status: StatusBanner::new(Duration::from_secs(config.ui.status_timeout_secs)),
            add_form: None,
            pending_delete: None,
        }
    }

    // Listing

    pub fn begin_load(&mut self, query: ArticleQuery) -> ArticleQuery {
        self.status.loading(LOADING);
        query
    }

    pub fn finish_load(&mut self, result: Result<Vec<Article>>) {
        match result {
            Ok(articles) => {
                self.listing.apply(articles);
                if matches!(self.status.state(), StatusState::Loading(_)) {
                    self.status.hide();
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load articles");
                self.status.error(describe_failure(&e));
                self.listing.clear();
            }
        }
    }

    /// Load the page the listing currently points at
    pub async fn reload(&mut self, api: &dyn KnowledgeBaseApi) {
        let query = self.begin_load(self.listing.query());
        let result = api.list_articles(&query).await;
        self.finish_load(result);
    }

    /// Reload after a mutation; the mutation's outcome stays on the banner
    pub fn begin_refresh(&self) -> ArticleQuery {
        self.listing.query()
    }

    async fn refresh(&mut self, api: &dyn KnowledgeBaseApi) {
        let query = self.begin_refresh();
        let result = api.list_articles(&query).await;
        self.finish_load(result);
    }

    // Add article

    pub fn add_form(&self) -> Option<&AddArticleForm> {
        self.add_form.as_ref()
    }

    pub fn add_form_mut(&mut self) -> Option<&mut AddArticleForm> {
        self.add_form.as_mut()
    }

    pub fn open_add_form(&mut self) {
        self.add_form = Some(AddArticleForm::default());
    }

    /// Hide the modal and reset its field
    pub fn close_add_form(&mut self) {
        self.add_form = None;
    }

    /// Validate the modal and show the loading banner.
    /// Returns the URL to submit, `None` when blank or no modal is open.
    pub fn begin_add(&mut self) -> Option<String> {
        let url = self.add_form.as_ref()?.submission()?;
        self.status.loading(mutation::ADDING);
        Some(url)
    }

    /// Apply a scrape outcome. Returns true when the listing should reload.
    pub fn finish_add(&mut self, result: Result<Vec<ScrapeResult>>) -> bool {
        match result {
            Ok(results) => {
                if let Some(message) = mutation::scrape_failure(&results) {
                    tracing::warn!(%message, "Scrape reported failure");
                    self.status.error(message);
                    return false;
                }
                tracing::info!("Article submitted for ingestion");
                self.status.success(mutation::ADDED);
                self.close_add_form();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to add article");
                self.status.error(describe_failure(&e));
                false
            }
        }
    }

    /// Submit a URL and refresh the listing on success
    pub async fn add_article(&mut self, api: &dyn KnowledgeBaseApi, url: &str) -> bool {
        self.open_add_form();
        if let Some(form) = self.add_form_mut() {
            form.url = url.to_string();
        }
        let Some(url) = self.begin_add() else {
            self.close_add_form();
            return false;
        };

        let result = api.scrape(std::slice::from_ref(&url)).await;
        let added = self.finish_add(result);
        if added {
            self.refresh(api).await;
        }
        added
    }

    // Delete article

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    /// Ask for confirmation before deleting. Articles without an id are ignored.
    pub fn request_delete(&mut self, article: &Article) -> bool {
        match article.deletable_id() {
            Some(id) => {
                self.pending_delete = Some(PendingDelete {
                    id: id.clone(),
                    title: article.display_title().to_string(),
                });
                true
            }
            None => false,
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The user confirmed: show the loading banner and hand back the id to delete
    pub fn confirm_delete(&mut self) -> Option<ArticleId> {
        let pending = self.pending_delete.take()?;
        self.status.loading(mutation::DELETING);
        Some(pending.id)
    }

    /// Apply a delete outcome. Returns true when the listing should reload.
    pub fn finish_delete(&mut self, result: Result<()>) -> bool {
        match result {
            Ok(()) => {
                self.status.success(mutation::DELETED);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to delete article");
                self.status.error(describe_failure(&e));
                false
            }
        }
    }

    /// Delete by id after asking `confirm` with the prompt text.
    /// A declined confirmation sends nothing.
    pub async fn delete_article<F>(
        &mut self,
        api: &dyn KnowledgeBaseApi,
        id: &ArticleId,
        confirm: F,
    ) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        if id.is_empty() || !confirm(mutation::DELETE_PROMPT) {
            return false;
        }

        self.status.loading(mutation::DELETING);
        let result = api.delete_article(id).await;
        let deleted = self.finish_delete(result);
        if deleted {
            self.refresh(api).await;
        }
        deleted
    }
}
