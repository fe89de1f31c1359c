use poise::CreateReply;

use crate::commands::voice;
use crate::utils::embed;
use crate::{Context, Error};

/// Lists the top YouTube results for a query
#[poise::command(prefix_command)]
pub async fn search(ctx: Context<'_>, #[rest] query: String) -> Result<(), Error> {
    let query = query.trim();
    if query.is_empty() {
        voice::reply_error(ctx, "Tell me what to search for.").await?;
        return Ok(());
    }

    ctx.defer().await?;

    match ctx.data().resolver.search(query).await {
        Ok(tracks) => {
            ctx.send(CreateReply::default().embed(embed::search_results(query, &tracks)))
                .await?;
        }
        Err(e) => {
            tracing::warn!(query, "search failed: {e}");
            voice::reply_error(ctx, &format!("Search failed: {e}")).await?;
        }
    }
    Ok(())
}
