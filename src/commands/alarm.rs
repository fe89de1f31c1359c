use poise::serenity_prelude as serenity;
use serenity::Mentionable;
use tracing::{info, warn};

use crate::alarm::{parse_time, wait_until};
use crate::commands::voice;
use crate::{Context, Error};

/// Pings you at hh:mm (bot's local time) with a reminder
#[poise::command(prefix_command)]
pub async fn setalarm(ctx: Context<'_>, time: String, #[rest] name: String) -> Result<(), Error> {
    let alarm = match parse_time(&time) {
        Ok(t) => t,
        Err(e) => {
            voice::reply_error(ctx, &format!("{e}.")).await?;
            return Ok(());
        }
    };

    let wait = wait_until(alarm, chrono::Local::now().time());
    let http = ctx.serenity_context().http.clone();
    let channel_id = ctx.channel_id();
    let mention = ctx.author().id.mention().to_string();
    let label = name.trim().to_string();

    info!(%time, %label, secs = wait.as_secs(), "alarm scheduled");
    tokio::spawn(async move {
        tokio::time::sleep(wait).await;
        if let Err(e) = channel_id
            .say(&http, format!("{mention} Alarm! {label}."))
            .await
        {
            warn!("alarm delivery failed: {e}");
        }
    });

    ctx.say(format!("⏰ Alarm **{}** set for {}.", name.trim(), alarm.format("%H:%M")))
        .await?;
    Ok(())
}
