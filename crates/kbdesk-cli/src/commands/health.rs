use anyhow::Result;

use kbdesk_core::KnowledgeBaseApi;

use super::failure;

pub async fn run(api: &dyn KnowledgeBaseApi) -> Result<()> {
    let health = api.health().await.map_err(failure)?;

    match &health.timestamp {
        Some(ts) => println!("Service status: {} (at {})", health.status, ts),
        None => println!("Service status: {}", health.status),
    }

    if !health.is_healthy() {
        anyhow::bail!("Service reports status '{}'", health.status);
    }
    Ok(())
}
