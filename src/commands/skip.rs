use poise::CreateReply;

use crate::commands::voice;
use crate::music::queue::Advance;
use crate::utils::{components, embed};
use crate::{Context, Error};

async fn skip_impl(ctx: Context<'_>) -> Result<(), Error> {
    let Some(session) = voice::session_or_reply(ctx).await? else {
        return Ok(());
    };

    let outcome = session.skip().await?;
    let Some(skipped) = outcome.skipped else {
        voice::reply_error(ctx, "Nothing is playing.").await?;
        return Ok(());
    };

    let reply = match outcome.next {
        Advance::Next(track) | Advance::Replay(track) => {
            let upcoming = session.snapshot().await?.upcoming.len();
            CreateReply::default()
                .content(format!("⏭️ Skipped **{}**", skipped.title))
                .embed(embed::now_playing(&track, upcoming))
                .components(components::music_components(false))
        }
        Advance::Empty => CreateReply::default()
            .content(format!("⏭️ Skipped **{}**", skipped.title))
            .embed(embed::queue_empty()),
    };
    ctx.send(reply).await?;
    Ok(())
}

/// Skips to the next track, ignoring loop mode
#[poise::command(prefix_command, guild_only)]
pub async fn skip(ctx: Context<'_>) -> Result<(), Error> {
    skip_impl(ctx).await
}

/// Shorthand for skip
#[poise::command(prefix_command, guild_only)]
pub async fn s(ctx: Context<'_>) -> Result<(), Error> {
    skip_impl(ctx).await
}
