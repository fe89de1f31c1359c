use crate::commands::voice;
use crate::{Context, Error};

/// Stops the music and leaves the voice channel
#[poise::command(prefix_command, guild_only)]
pub async fn leave(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    if voice::disconnect(ctx.serenity_context(), &ctx.data().sessions, guild_id).await {
        ctx.say("👋 Left the voice channel.").await?;
    } else {
        voice::reply_error(ctx, "I am not in a voice channel.").await?;
    }
    Ok(())
}
