use std::time::Duration;

use poise::serenity_prelude as serenity;
use serenity::model::id::{ChannelId, GuildId, UserId};
use tracing::info;

use crate::commands::voice;
use crate::{Data, Error};

const ALONE_GRACE: Duration = Duration::from_secs(30);

/// Voice channel the bot is connected to in this guild, if any.
async fn bot_channel(ctx: &serenity::Context, guild_id: GuildId) -> Option<u64> {
    let manager = songbird::get(ctx).await?;
    let call = manager.get(guild_id)?;
    let channel = call.lock().await.current_channel()?;
    Some(channel.0.get())
}

/// Whether nobody but bots shares the bot's voice channel.
fn is_alone(ctx: &serenity::Context, guild_id: GuildId, channel: u64) -> bool {
    let bot_id = ctx.cache.current_user().id;
    let Some(guild) = ctx.cache.guild(guild_id) else {
        return false;
    };
    !guild.voice_states.values().any(|vs| {
        vs.channel_id.is_some_and(|ch| ch.get() == channel)
            && vs.user_id != bot_id
            && !guild.members.get(&vs.user_id).is_some_and(|m| m.user.bot)
    })
}

/// The update says the bot itself left voice, e.g. a moderator kicked it.
fn bot_left_voice(user_id: UserId, channel_id: Option<ChannelId>, bot_id: UserId) -> bool {
    user_id == bot_id && channel_id.is_none()
}

pub async fn handle(
    ctx: &serenity::Context,
    _old: &Option<serenity::VoiceState>,
    new: &serenity::VoiceState,
    data: &Data,
) -> Result<(), Error> {
    let Some(guild_id) = new.guild_id else {
        return Ok(());
    };

    let bot_id = ctx.cache.current_user().id;
    if bot_left_voice(new.user_id, new.channel_id, bot_id) {
        if voice::disconnect(ctx, &data.sessions, guild_id).await {
            info!(%guild_id, "disconnected from voice, session closed");
        }
        return Ok(());
    }

    let Some(channel) = bot_channel(ctx, guild_id).await else {
        return Ok(());
    };
    if !is_alone(ctx, guild_id, channel) {
        return Ok(());
    }

    let ctx = ctx.clone();
    let sessions = data.sessions.clone();
    tokio::spawn(async move {
        tokio::time::sleep(ALONE_GRACE).await;

        // someone may have come back, or the bot moved
        let Some(channel) = bot_channel(&ctx, guild_id).await else {
            return;
        };
        if is_alone(&ctx, guild_id, channel) {
            info!(%guild_id, "alone in voice, leaving");
            voice::disconnect(&ctx, &sessions, guild_id).await;
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_left_voice() {
        let bot = UserId::new(1);
        let member = UserId::new(2);
        let channel = Some(ChannelId::new(10));

        assert!(bot_left_voice(bot, None, bot));
        assert!(!bot_left_voice(bot, channel, bot));
        assert!(!bot_left_voice(member, None, bot));
        assert!(!bot_left_voice(member, channel, bot));
    }
}
