use crate::api::{ArticleId, ScrapeResult};

pub const ADDING: &str = "Adding article to knowledge base...";
pub const ADDED: &str = "Article successfully added!";
pub const DELETING: &str = "Deleting article...";
pub const DELETED: &str = "Article deleted successfully!";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this article?";

/// The "add article" modal: a single URL field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddArticleForm {
    pub url: String,
}

impl AddArticleForm {
    /// Trimmed URL, `None` when blank
    pub fn submission(&self) -> Option<String> {
        let url = self.url.trim();
        if url.is_empty() {
            None
        } else {
            Some(url.to_string())
        }
    }
}

/// A delete waiting for the user to confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: ArticleId,
    /// Title shown in the confirmation dialog
    pub title: String,
}

/// Error text when the service accepted the request but every URL failed
pub fn scrape_failure(results: &[ScrapeResult]) -> Option<String> {
    if results.is_empty() || results.iter().any(|r| r.success) {
        return None;
    }
    let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
    Some(format!("Error: Failed to scrape {}", urls.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_submission_trims() {
        let form = AddArticleForm {
            url: "  https://example.com/post  ".to_string(),
        };
        assert_eq!(form.submission().as_deref(), Some("https://example.com/post"));
        assert!(AddArticleForm::default().submission().is_none());
    }

    #[test]
    fn test_scrape_failure_only_when_all_failed() {
        let ok = ScrapeResult {
            url: "a".to_string(),
            success: true,
        };
        let failed = ScrapeResult {
            url: "b".to_string(),
            success: false,
        };
        assert!(scrape_failure(&[]).is_none());
        assert!(scrape_failure(&[ok, failed.clone()]).is_none());
        assert_eq!(
            scrape_failure(&[failed]).as_deref(),
            Some("Error: Failed to scrape b")
        );
    }
}
