//! Sentence moderation API commands.

use console::style;

use crate::client::SentenceClient;

/// Restore a soft-deleted sentence.
pub async fn cmd_restore(api_url: &str, id: &str) -> anyhow::Result<()> {
    let client = SentenceClient::new(api_url)?;
    client.restore(id).await?;
    println!("{} Restored sentence {}", style("✓").green(), id);
    Ok(())
}

/// Delete a sentence.
pub async fn cmd_delete(api_url: &str, id: &str) -> anyhow::Result<()> {
    let client = SentenceClient::new(api_url)?;
    client.delete(id).await?;
    println!("{} Deleted sentence {}", style("✓").green(), id);
    Ok(())
}

/// Mark a sentence as validated.
pub async fn cmd_validate(api_url: &str, id: &str) -> anyhow::Result<()> {
    let client = SentenceClient::new(api_url)?;
    client.validate(id).await?;
    println!("{} Validated sentence {}", style("✓").green(), id);
    Ok(())
}
