use poise::CreateReply;
use serenity::builder::{CreateEmbed, CreateEmbedFooter};

use crate::commands::voice;
use crate::utils::embed;
use crate::{Context, Error};

/// Looks up lyrics for a title, or for the current track
#[poise::command(prefix_command)]
pub async fn lyrics(ctx: Context<'_>, title: Vec<String>) -> Result<(), Error> {
    let mut title = title.join(" ");

    if title.is_empty() {
        let current = match ctx.guild_id() {
            Some(guild_id) => match ctx.data().sessions.get(guild_id).await {
                Some(session) => session.snapshot().await?.current,
                None => None,
            },
            None => None,
        };
        match current {
            Some(track) => title = track.title,
            None => {
                voice::reply_error(ctx, "Nothing is playing; give me a song title.").await?;
                return Ok(());
            }
        }
    }

    ctx.defer().await?;

    match ctx.data().lyrics.find(&title).await {
        Ok(Some(found)) => {
            let heading = match &found.artist {
                Some(artist) => format!("🎤 {artist} - {}", found.title),
                None => format!("🎤 {}", found.title),
            };
            let e = CreateEmbed::new()
                .title(heading)
                .description(embed::truncate(&found.text, embed::DESCRIPTION_LIMIT))
                .color(embed::BLUE)
                .footer(CreateEmbedFooter::new("Lyrics from lrclib.net"));
            ctx.send(CreateReply::default().embed(e)).await?;
        }
        Ok(None) => {
            voice::reply_error(ctx, &format!("No lyrics found for '{title}'.")).await?;
        }
        Err(e) => {
            tracing::warn!(title, "lyrics lookup failed: {e}");
            voice::reply_error(ctx, &format!("Lyrics lookup failed: {e}")).await?;
        }
    }
    Ok(())
}
