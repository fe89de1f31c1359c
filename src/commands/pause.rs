use crate::commands::voice;
use crate::{Context, Error};

/// Pauses the current track
#[poise::command(prefix_command, guild_only)]
pub async fn pause(ctx: Context<'_>) -> Result<(), Error> {
    let Some(session) = voice::session_or_reply(ctx).await? else {
        return Ok(());
    };

    match session.pause().await? {
        Some(track) => {
            ctx.say(format!("⏸️ Paused **{}**", track.title)).await?;
        }
        None => {
            voice::reply_error(ctx, "The bot is not playing anything at the moment.").await?;
        }
    }
    Ok(())
}

/// Resumes a paused track
#[poise::command(prefix_command, guild_only)]
pub async fn resume(ctx: Context<'_>) -> Result<(), Error> {
    let Some(session) = voice::session_or_reply(ctx).await? else {
        return Ok(());
    };

    match session.resume().await? {
        Some(track) => {
            ctx.say(format!("▶️ Resumed **{}**", track.title)).await?;
        }
        None => {
            voice::reply_error(
                ctx,
                &format!(
                    "Nothing was paused. Use `{}play` to start something.",
                    ctx.prefix()
                ),
            )
            .await?;
        }
    }
    Ok(())
}
