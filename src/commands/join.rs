use crate::commands::voice;
use crate::{Context, Error};

/// Joins a voice channel by name, or the one you are in
#[poise::command(prefix_command, guild_only)]
pub async fn join(ctx: Context<'_>, channel_name: Vec<String>) -> Result<(), Error> {
    let name = channel_name.join(" ");

    let channel_id = if name.is_empty() {
        match voice::author_channel(ctx) {
            Some(id) => id,
            None => {
                voice::reply_error(ctx, "You are not connected to a voice channel.").await?;
                return Ok(());
            }
        }
    } else {
        match voice::voice_channel_by_name(ctx, &name) {
            Some(id) => id,
            None => {
                voice::reply_error(ctx, &format!("No voice channel named '{name}'.")).await?;
                return Ok(());
            }
        }
    };

    match voice::connect(ctx, channel_id).await {
        Ok(_) => {
            ctx.say(format!("Joined <#{channel_id}>")).await?;
        }
        Err(e) => {
            tracing::warn!("join failed: {e}");
            voice::reply_error(ctx, &format!("Could not join that channel: {e}")).await?;
        }
    }
    Ok(())
}
