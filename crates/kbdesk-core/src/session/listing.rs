use crate::api::{Article, ArticleQuery};
use crate::config::{ListingConfig, TotalEstimate};

pub const EMPTY_MESSAGE: &str = "No articles found in the knowledge base";
pub const SEARCH_HINT: &str = "Try a different search term";

/// What to show when a page has no rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: &'static str,
    /// Present only while a search filter is active
    pub hint: Option<&'static str>,
}

/// Pagination controls derived from the last page received.
///
/// The service never reports a total, so `total_items` is an estimate (see
/// [`TotalEstimate`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u32,
    pub max_page: u32,
    pub total_items: u32,
    /// True when more items may exist beyond `total_items`
    pub total_is_lower_bound: bool,
    pub start_item: u32,
    pub end_item: u32,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// Page-number buttons around the current page
    pub window: Vec<u32>,
}

impl PageInfo {
    /// "Showing 1-10 of 10 articles"
    pub fn summary(&self) -> String {
        let plus = if self.total_is_lower_bound { "+" } else { "" };
        format!(
            "Showing {}-{} of {}{} articles",
            self.start_item, self.end_item, self.total_items, plus
        )
    }
}

/// Article table state: page, search filter and the rows last received
#[derive(Debug, Clone)]
pub struct ArticleListing {
    current_page: u32,
    items_per_page: u32,
    page_window: u32,
    estimate: TotalEstimate,
    search_query: String,
    articles: Vec<Article>,
    page_info: Option<PageInfo>,
    /// Highlighted row
    pub selected: usize,
}

impl Default for ArticleListing {
    fn default() -> Self {
        Self::new(&ListingConfig::default())
    }
}

impl ArticleListing {
    pub fn new(config: &ListingConfig) -> Self {
        Self {
            current_page: 1,
            items_per_page: config.items_per_page.max(1),
            page_window: config.page_window,
            estimate: config.total_estimate,
            search_query: String::new(),
            articles: Vec::new(),
            page_info: None,
            selected: 0,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn page_info(&self) -> Option<&PageInfo> {
        self.page_info.as_ref()
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.articles.get(self.selected)
    }

    /// Request for the current page and filter
    pub fn query(&self) -> ArticleQuery {
        ArticleQuery {
            limit: self.items_per_page,
            offset: (self.current_page - 1).saturating_mul(self.items_per_page),
            search: if self.search_query.is_empty() {
                None
            } else {
                Some(self.search_query.clone())
            },
        }
    }

    /// Apply a new search term (trimmed; empty clears the filter) and go back to page 1
    pub fn search(&mut self, term: &str) -> ArticleQuery {
        self.search_query = term.trim().to_string();
        self.current_page = 1;
        self.query()
    }

    pub fn prev_page(&mut self) -> Option<ArticleQuery> {
        if self.current_page > 1 {
            self.current_page -= 1;
            Some(self.query())
        } else {
            None
        }
    }

    pub fn next_page(&mut self) -> Option<ArticleQuery> {
        let max_page = self.page_info.as_ref().map(|p| p.max_page).unwrap_or(0);
        if self.current_page < max_page.min(self.last_addressable_page()) {
            self.current_page += 1;
            Some(self.query())
        } else {
            None
        }
    }

    /// Jump to a page by number (1-based)
    pub fn go_to_page(&mut self, page: u32) -> ArticleQuery {
        self.current_page = page.clamp(1, self.last_addressable_page());
        self.query()
    }

    /// Highest page whose offset still fits the request
    fn last_addressable_page(&self) -> u32 {
        (u32::MAX / self.items_per_page).saturating_add(1)
    }

    /// Replace the rows with a freshly received page
    pub fn apply(&mut self, articles: Vec<Article>) {
        self.page_info = Some(self.compute_page_info(articles.len() as u32));
        self.articles = articles;
        if self.selected >= self.articles.len() {
            self.selected = self.articles.len().saturating_sub(1);
        }
    }

    /// Drop the rows after a failed load; pagination keeps its last state
    pub fn clear(&mut self) {
        self.articles.clear();
        self.selected = 0;
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.articles.is_empty() {
            return None;
        }
        Some(EmptyState {
            message: EMPTY_MESSAGE,
            hint: if self.search_query.is_empty() {
                None
            } else {
                Some(SEARCH_HINT)
            },
        })
    }

    pub fn select_next(&mut self) {
        if !self.articles.is_empty() && self.selected < self.articles.len() - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.articles.len().saturating_sub(1);
    }

    fn compute_page_info(&self, received: u32) -> PageInfo {
        let per_page = self.items_per_page;
        let page = self.current_page;
        let offset = (page - 1).saturating_mul(per_page);

        let (total_items, max_page, lower_bound) = match self.estimate {
            TotalEstimate::PageSize => (received, received.div_ceil(per_page), false),
            TotalEstimate::Lookahead => {
                let total = offset.saturating_add(received);
                if received >= per_page {
                    (total, page.saturating_add(1), true)
                } else {
                    (total, total.div_ceil(per_page), false)
                }
            }
        };

        let start_item = offset.saturating_add(1);
        let end_item = start_item
            .saturating_add(received)
            .saturating_sub(1)
            .min(total_items);

        let first = page.saturating_sub(self.page_window).max(1);
        let last = page.saturating_add(self.page_window).min(max_page);
        let window = (first..=last).collect();

        PageInfo {
            current_page: page,
            max_page,
            total_items,
            total_is_lower_bound: lower_bound,
            start_item,
            end_item,
            prev_enabled: page > 1,
            next_enabled: page < max_page,
            window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article {
                title: Some(format!("Article {}", i)),
                ..Default::default()
            })
            .collect()
    }

    fn lookahead() -> ArticleListing {
        ArticleListing::new(&ListingConfig {
            total_estimate: TotalEstimate::Lookahead,
            ..Default::default()
        })
    }

    #[test]
    fn test_query_uses_page_and_search() {
        let mut listing = ArticleListing::default();
        assert_eq!(
            listing.query(),
            ArticleQuery {
                limit: 10,
                offset: 0,
                search: None
            }
        );

        let query = listing.search("  foo ");
        assert_eq!(query.search.as_deref(), Some("foo"));
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn test_new_search_resets_page() {
        let mut listing = ArticleListing::default();
        listing.go_to_page(3);
        assert_eq!(listing.current_page(), 3);

        listing.search("");
        assert_eq!(listing.current_page(), 1);
        listing.go_to_page(2);
        let query = listing.search("bar");
        assert_eq!(listing.current_page(), 1);
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn test_page_size_estimate_is_last_page_count() {
        let mut listing = ArticleListing::default();
        listing.apply(articles(7));

        let info = listing.page_info().unwrap();
        assert_eq!(info.total_items, 7);
        assert_eq!(info.max_page, 1);
        assert!(!info.prev_enabled);
        assert!(!info.next_enabled);
        assert_eq!(info.window, vec![1]);
        assert_eq!(info.summary(), "Showing 1-7 of 7 articles");
    }

    #[test]
    fn test_page_size_estimate_never_advances() {
        let mut listing = ArticleListing::default();
        listing.apply(articles(10));
        assert_eq!(listing.page_info().unwrap().max_page, 1);
        assert!(listing.next_page().is_none());
        assert!(listing.prev_page().is_none());
    }

    #[test]
    fn test_lookahead_assumes_more_after_full_page() {
        let mut listing = lookahead();
        listing.apply(articles(10));

        let info = listing.page_info().unwrap();
        assert_eq!(info.max_page, 2);
        assert!(info.next_enabled);
        assert_eq!(info.summary(), "Showing 1-10 of 10+ articles");

        let query = listing.next_page().unwrap();
        assert_eq!(query.offset, 10);
        listing.apply(articles(4));

        let info = listing.page_info().unwrap();
        assert_eq!(info.total_items, 14);
        assert_eq!(info.max_page, 2);
        assert!(info.prev_enabled);
        assert!(!info.next_enabled);
        assert_eq!(info.window, vec![1, 2]);
        assert_eq!(info.summary(), "Showing 11-14 of 14 articles");
    }

    #[test]
    fn test_window_centers_on_current_page() {
        let mut listing = lookahead();
        listing.go_to_page(5);
        listing.apply(articles(10));
        assert_eq!(listing.page_info().unwrap().window, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_empty_state_and_search_hint() {
        let mut listing = ArticleListing::default();
        listing.apply(Vec::new());
        assert_eq!(
            listing.empty_state(),
            Some(EmptyState {
                message: EMPTY_MESSAGE,
                hint: None
            })
        );
        assert!(listing.page_info().unwrap().window.is_empty());

        listing.search("zzz");
        listing.apply(Vec::new());
        assert_eq!(listing.empty_state().unwrap().hint, Some(SEARCH_HINT));

        listing.apply(articles(1));
        assert!(listing.empty_state().is_none());
    }

    #[test]
    fn test_selection_clamped_to_rows() {
        let mut listing = ArticleListing::default();
        listing.apply(articles(5));
        listing.select_last();
        assert_eq!(listing.selected, 4);
        listing.select_next();
        assert_eq!(listing.selected, 4);

        listing.apply(articles(2));
        assert_eq!(listing.selected, 1);
        assert_eq!(
            listing.selected_article().unwrap().display_title(),
            "Article 1"
        );
    }

    #[test]
    fn test_go_to_page_zero_clamps() {
        let mut listing = ArticleListing::default();
        let query = listing.go_to_page(0);
        assert_eq!(listing.current_page(), 1);
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn test_huge_page_number_stays_addressable() {
        let mut listing = ArticleListing::default();
        let query = listing.go_to_page(500_000_000);
        assert_eq!(listing.current_page(), u32::MAX / 10 + 1);
        assert_eq!(query.offset, (u32::MAX / 10) * 10);

        listing.apply(articles(10));
        let info = listing.page_info().unwrap();
        assert_eq!(info.start_item, query.offset + 1);
        assert!(info.prev_enabled);
    }

    #[test]
    fn test_lookahead_stops_at_last_addressable_page() {
        let mut listing = lookahead();
        listing.go_to_page(u32::MAX);
        let last = listing.current_page();
        listing.apply(articles(10));
        assert_eq!(listing.next_page(), None);
        assert_eq!(listing.current_page(), last);
    }
}
