use anyhow::Result;

use kbdesk_core::KnowledgeBaseApi;

use super::failure;

pub async fn run(api: &dyn KnowledgeBaseApi, query: &str) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("Question must not be empty");
    }

    println!("You: {}", query);
    let reply = api.ask(query).await.map_err(failure)?;
    println!("Bot: {}", reply.text());

    Ok(())
}
