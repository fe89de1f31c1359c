use poise::CreateReply;

use crate::commands::voice;
use crate::utils::embed;
use crate::{Context, Error};

async fn queue_impl(ctx: Context<'_>) -> Result<(), Error> {
    let Some(session) = voice::session_or_reply(ctx).await? else {
        return Ok(());
    };

    let snapshot = session.snapshot().await?;
    ctx.send(CreateReply::default().embed(embed::queue_list(
        snapshot.current.as_ref(),
        &snapshot.upcoming,
        snapshot.looping,
    )))
    .await?;
    Ok(())
}

/// Shows the upcoming tracks
#[poise::command(prefix_command, guild_only)]
pub async fn queue(ctx: Context<'_>) -> Result<(), Error> {
    queue_impl(ctx).await
}

/// Shorthand for queue
#[poise::command(prefix_command, guild_only)]
pub async fn q(ctx: Context<'_>) -> Result<(), Error> {
    queue_impl(ctx).await
}

/// Removes every pending track; the current one keeps playing
#[poise::command(prefix_command, guild_only)]
pub async fn clear(ctx: Context<'_>) -> Result<(), Error> {
    let Some(session) = voice::session_or_reply(ctx).await? else {
        return Ok(());
    };

    let removed = session.clear().await?;
    ctx.say(format!("🧹 Music queue cleared! ({removed} removed)"))
        .await?;
    Ok(())
}
