use poise::CreateReply;

use crate::commands::voice;
use crate::music::queue::Enqueued;
use crate::utils::{components, embed};
use crate::{Context, Error};

async fn play_impl(ctx: Context<'_>, query: String) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;
    let query = query.trim();
    if query.is_empty() {
        voice::reply_error(ctx, "Give me a URL or something to search for.").await?;
        return Ok(());
    }

    let session = match ctx.data().sessions.get(guild_id).await {
        Some(session) => session,
        None => {
            let Some(channel_id) = voice::author_channel(ctx) else {
                voice::reply_error(ctx, "You need to be in a voice channel to play music.")
                    .await?;
                return Ok(());
            };
            match voice::connect(ctx, channel_id).await {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!("join failed: {e}");
                    voice::reply_error(ctx, &format!("Could not join your channel: {e}"))
                        .await?;
                    return Ok(());
                }
            }
        }
    };

    ctx.defer().await?;

    let mut track = match ctx.data().resolver.resolve(query).await {
        Ok(track) => track,
        Err(e) => {
            tracing::warn!(query, "resolution failed: {e}");
            voice::reply_error(ctx, &format!("Could not find that song: {e}")).await?;
            return Ok(());
        }
    };
    track.requester = ctx.author().name.clone();

    match session.enqueue(track.clone()).await {
        Ok(Enqueued::Started(track)) => {
            ctx.send(
                CreateReply::default()
                    .embed(embed::now_playing(&track, 0))
                    .components(components::music_components(false)),
            )
            .await?;
        }
        Ok(Enqueued::Queued { position }) => {
            ctx.send(CreateReply::default().embed(embed::added_to_queue(&track, position)))
                .await?;
        }
        Err(e) => {
            voice::reply_error(ctx, &e.to_string()).await?;
        }
    }

    Ok(())
}

/// Plays a URL or the first search result for a query
#[poise::command(prefix_command, guild_only)]
pub async fn play(ctx: Context<'_>, #[rest] query: String) -> Result<(), Error> {
    play_impl(ctx, query).await
}

/// Shorthand for play
#[poise::command(prefix_command, guild_only)]
pub async fn p(ctx: Context<'_>, #[rest] query: String) -> Result<(), Error> {
    play_impl(ctx, query).await
}
