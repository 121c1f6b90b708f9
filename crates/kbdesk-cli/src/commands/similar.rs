use anyhow::Result;

use kbdesk_core::api::SimilarityQuery;
use kbdesk_core::KnowledgeBaseApi;
use kbdesk_tui::widgets::{sanitize_cell, truncate_width};

use super::failure;

pub async fn run(api: &dyn KnowledgeBaseApi, text: &str, limit: u32, threshold: f64) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Search text must not be empty");
    }
    if !(0.0..=1.0).contains(&threshold) {
        anyhow::bail!("Threshold must be between 0 and 1");
    }

    let query = SimilarityQuery {
        limit: limit.max(1),
        threshold,
        ..SimilarityQuery::new(text.trim())
    };
    let hits = api.search_similar(&query).await.map_err(failure)?;

    if hits.is_empty() {
        println!("No similar articles above {:.2}.", threshold);
        return Ok(());
    }

    println!("Similar articles ({}):\n", hits.len());
    for hit in &hits {
        let id = hit.id.as_ref().map(|id| format!("[{}] ", id)).unwrap_or_default();
        println!(
            "  {:.3}  {}{}",
            hit.similarity,
            id,
            sanitize_cell(hit.url.as_deref().unwrap_or("No URL"))
        );
        if let Some(content) = &hit.content {
            println!("         {}", truncate_width(&sanitize_cell(content), 90));
        }
    }

    Ok(())
}
