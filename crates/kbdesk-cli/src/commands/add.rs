use anyhow::Result;

use kbdesk_core::session::{scrape_failure, ADDED, ADDING};
use kbdesk_core::KnowledgeBaseApi;

use super::failure;

pub async fn run(api: &dyn KnowledgeBaseApi, url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        anyhow::bail!("URL must not be empty");
    }

    println!("{}", ADDING);
    let results = api.scrape(&[url.to_string()]).await.map_err(failure)?;
    if let Some(message) = scrape_failure(&results) {
        anyhow::bail!(message);
    }
    println!("{}", ADDED);

    Ok(())
}
