use crate::commands::voice;
use crate::{Context, Error};

/// Stops playback and empties the queue, staying in the channel
#[poise::command(prefix_command, guild_only)]
pub async fn stop(ctx: Context<'_>) -> Result<(), Error> {
    let Some(session) = voice::session_or_reply(ctx).await? else {
        return Ok(());
    };

    session.stop().await?;
    ctx.say("⏹️ Stopped playback and cleared the queue.").await?;
    Ok(())
}
