use poise::serenity_prelude as serenity;
use serenity::builder::CreateEmbed;
use serenity::model::application::ComponentInteraction;
use serenity::model::id::GuildId;

use crate::music::queue::Advance;
use crate::utils::interaction::{respond_error, update_message};
use crate::utils::{components, embed};
use crate::{Data, Error};

/// Whether the presser sits in the voice channel the bot is connected to.
async fn in_bot_channel(
    ctx: &serenity::Context,
    guild_id: GuildId,
    interaction: &ComponentInteraction,
) -> Result<bool, Error> {
    let manager = songbird::get(ctx)
        .await
        .ok_or("voice client is not registered")?;

    let Some(call) = manager.get(guild_id) else {
        return Ok(false);
    };
    let Some(bot_channel) = call.lock().await.current_channel() else {
        return Ok(false);
    };

    let guild = ctx
        .cache
        .guild(guild_id)
        .ok_or("guild is not cached")?;
    Ok(guild
        .voice_states
        .get(&interaction.user.id)
        .and_then(|vs| vs.channel_id)
        .is_some_and(|ch| ch.get() == bot_channel.0.get()))
}

/// Music control buttons on "now playing" messages.
pub async fn handle(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    let guild_id = interaction
        .guild_id
        .ok_or("music buttons only work in a server")?;

    let Some(session) = data.sessions.get(guild_id).await else {
        respond_error(ctx, interaction, "I am not in a voice channel.").await?;
        return Ok(());
    };

    if !in_bot_channel(ctx, guild_id, interaction).await? {
        respond_error(ctx, interaction, "You need to be in my voice channel to do that.").await?;
        return Ok(());
    }

    match interaction.data.custom_id.as_str() {
        components::MUSIC_PAUSE => match session.pause().await? {
            Some(track) => {
                let upcoming = session.snapshot().await?.upcoming.len();
                let e = embed::now_playing(&track, upcoming).title("⏸️ Paused");
                update_message(ctx, interaction, None, Some(e), components::music_components(true))
                    .await?;
            }
            None => respond_error(ctx, interaction, "Nothing is playing.").await?,
        },
        components::MUSIC_RESUME => match session.resume().await? {
            Some(track) => {
                let upcoming = session.snapshot().await?.upcoming.len();
                let e = embed::now_playing(&track, upcoming);
                update_message(ctx, interaction, None, Some(e), components::music_components(false))
                    .await?;
            }
            None => respond_error(ctx, interaction, "Nothing is paused.").await?,
        },
        components::MUSIC_SKIP => {
            let outcome = session.skip().await?;
            if outcome.skipped.is_none() {
                respond_error(ctx, interaction, "Nothing is playing.").await?;
                return Ok(());
            }
            let (e, rows) = match outcome.next {
                Advance::Next(track) | Advance::Replay(track) => {
                    let upcoming = session.snapshot().await?.upcoming.len();
                    (
                        embed::now_playing(&track, upcoming),
                        components::music_components(false),
                    )
                }
                Advance::Empty => (embed::queue_empty(), components::music_components_disabled()),
            };
            update_message(ctx, interaction, None, Some(e), rows).await?;
        }
        components::MUSIC_STOP => {
            session.stop().await?;
            let e = CreateEmbed::new()
                .title("⏹️ Stopped")
                .description("Playback stopped and the queue was cleared.")
                .color(embed::RED);
            update_message(ctx, interaction, None, Some(e), components::music_components_disabled())
                .await?;
        }
        _ => {}
    }

    Ok(())
}
