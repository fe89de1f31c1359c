use std::sync::Arc;

use poise::serenity_prelude as serenity;
use poise::CreateReply;
use serenity::model::channel::ChannelType;
use serenity::model::id::{ChannelId, GuildId};

use crate::music::player::{ChannelAnnouncer, SongbirdTransport, Transport};
use crate::music::session::{Announcer, SessionHandle, Sessions};
use crate::utils::embed;
use crate::{Context, Error};

pub async fn reply_error(ctx: Context<'_>, message: &str) -> Result<(), Error> {
    ctx.send(CreateReply::default().embed(embed::error(message)))
        .await?;
    Ok(())
}

/// The voice channel the command author is sitting in.
pub fn author_channel(ctx: Context<'_>) -> Option<ChannelId> {
    let guild = ctx.guild()?;
    guild
        .voice_states
        .get(&ctx.author().id)
        .and_then(|vs| vs.channel_id)
}

pub fn voice_channel_by_name(ctx: Context<'_>, name: &str) -> Option<ChannelId> {
    let guild = ctx.guild()?;
    guild
        .channels
        .values()
        .find(|c| c.kind == ChannelType::Voice && c.name.eq_ignore_ascii_case(name))
        .map(|c| c.id)
}

/// Joins `channel_id` and returns the guild's session, spawning one bound to
/// the invoking text channel if none is live.
pub async fn connect(ctx: Context<'_>, channel_id: ChannelId) -> Result<SessionHandle, Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;
    let manager = songbird::get(ctx.serenity_context())
        .await
        .ok_or("voice client is not registered")?;

    let call = manager.join(guild_id, channel_id).await?;

    let http_client = ctx.data().http_client.clone();
    let program = ctx.data().resolver.options().program;
    let http = ctx.serenity_context().http.clone();
    let text_channel = ctx.channel_id();
    let session = ctx
        .data()
        .sessions
        .get_or_spawn(guild_id, move || {
            let transport: Arc<dyn Transport> = Arc::new(SongbirdTransport::new(call, http_client, program));
            let announcer: Arc<dyn Announcer> = Arc::new(ChannelAnnouncer::new(http, text_channel));
            (transport, announcer)
        })
        .await;
    Ok(session)
}

/// The live session for this guild, or an error reply when there is none.
pub async fn session_or_reply(ctx: Context<'_>) -> Result<Option<SessionHandle>, Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;
    match ctx.data().sessions.get(guild_id).await {
        Some(session) => Ok(Some(session)),
        None => {
            reply_error(ctx, "I am not in a voice channel.").await?;
            Ok(None)
        }
    }
}

/// Ends the session and leaves voice. Returns whether a session existed.
pub async fn disconnect(ctx: &serenity::Context, sessions: &Sessions, guild_id: GuildId) -> bool {
    let removed = sessions.remove(guild_id).await;
    if let Some(manager) = songbird::get(ctx).await {
        if manager.get(guild_id).is_some() {
            if let Err(e) = manager.remove(guild_id).await {
                tracing::warn!(%guild_id, "leaving voice failed: {e}");
            }
        }
    }
    removed
}
