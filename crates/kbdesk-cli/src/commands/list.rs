use anyhow::Result;

use kbdesk_core::session::ArticleListing;
use kbdesk_core::{AppConfig, KnowledgeBaseApi};
use kbdesk_tui::widgets::{sanitize_cell, truncate_width};

use super::failure;

pub async fn run(
    api: &dyn KnowledgeBaseApi,
    config: &AppConfig,
    page: u32,
    search: Option<&str>,
) -> Result<()> {
    let mut listing = ArticleListing::new(&config.listing);
    listing.search(search.unwrap_or_default());
    let query = listing.go_to_page(page);
    if listing.current_page() != page.max(1) {
        tracing::warn!(requested = page, page = listing.current_page(), "Page out of range, clamped");
    }

    let articles = api.list_articles(&query).await.map_err(failure)?;
    listing.apply(articles);

    if let Some(empty) = listing.empty_state() {
        println!("{}", empty.message);
        if let Some(hint) = empty.hint {
            println!("{}", hint);
        }
        return Ok(());
    }

    for article in listing.articles() {
        let id = article
            .id
            .as_ref()
            .map(|id| format!("[{}] ", id))
            .unwrap_or_default();
        println!("  {}{}", id, sanitize_cell(article.display_title()));
        println!("    URL: {}", sanitize_cell(article.display_url()));
        println!(
            "    {}",
            truncate_width(&sanitize_cell(article.display_content()), 100)
        );
        println!();
    }

    if let Some(info) = listing.page_info() {
        println!("{} (page {})", info.summary(), info.current_page);
    }

    Ok(())
}
