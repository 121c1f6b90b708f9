use std::io::{self, BufRead, Write};

use anyhow::Result;

use kbdesk_core::api::ArticleId;
use kbdesk_core::session::{DELETED, DELETE_PROMPT, DELETING};
use kbdesk_core::KnowledgeBaseApi;

use super::failure;

pub async fn run(api: &dyn KnowledgeBaseApi, id: &str, yes: bool) -> Result<()> {
    let id = ArticleId::from(id);
    if id.is_empty() {
        anyhow::bail!("Article id must not be empty");
    }

    if !yes && !confirm(DELETE_PROMPT, io::stdin().lock())? {
        println!("Cancelled.");
        return Ok(());
    }

    println!("{}", DELETING);
    api.delete_article(&id).await.map_err(failure)?;
    println!("{}", DELETED);

    Ok(())
}

/// Ask a y/N question; anything but "y"/"yes" declines
fn confirm(prompt: &str, mut input: impl BufRead) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
