use crate::commands::voice;
use crate::{Context, Error};

/// Toggles looping of the current track
#[poise::command(prefix_command, guild_only, rename = "loop")]
pub async fn loop_cmd(ctx: Context<'_>) -> Result<(), Error> {
    let Some(session) = voice::session_or_reply(ctx).await? else {
        return Ok(());
    };

    let msg = if session.toggle_loop().await? {
        "🔂 Looping is now **enabled**."
    } else {
        "➡️ Looping is now **disabled**."
    };
    ctx.say(msg).await?;
    Ok(())
}
