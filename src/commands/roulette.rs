use std::time::Duration;

use poise::serenity_prelude as serenity;
use poise::{CreateReply, ReplyHandle};
use serenity::builder::{CreateEmbed, CreateEmbedFooter};
use serenity::model::id::UserId;
use serenity::Mentionable;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::games::roulette::{pick_victim, render_chart, MIN_PLAYERS};
use crate::games::stats::leaderboard;
use crate::utils::embed;
use crate::{Context, Error};

async fn show(ctx: Context<'_>, reply: &ReplyHandle<'_>, e: CreateEmbed) -> Result<(), Error> {
    reply.edit(ctx, CreateReply::default().embed(e)).await?;
    Ok(())
}

/// Non-bot members sharing the author's voice channel, with display names.
/// `None` when the author is not in voice.
fn players_in_author_channel(ctx: Context<'_>) -> Option<Vec<(UserId, String)>> {
    let bot_id = ctx.serenity_context().cache.current_user().id;
    let guild = ctx.guild()?;
    let channel = guild
        .voice_states
        .get(&ctx.author().id)
        .and_then(|vs| vs.channel_id)?;

    let players = guild
        .voice_states
        .values()
        .filter(|vs| vs.channel_id == Some(channel) && vs.user_id != bot_id)
        .filter(|vs| {
            !guild
                .members
                .get(&vs.user_id)
                .is_some_and(|m| m.user.bot)
        })
        .map(|vs| {
            let name = guild
                .members
                .get(&vs.user_id)
                .map(|m| m.display_name().to_string())
                .unwrap_or_else(|| vs.user_id.to_string());
            (vs.user_id, name)
        })
        .collect();
    Some(players)
}

/// Russian roulette: someone in your voice channel gets disconnected
#[poise::command(prefix_command, guild_only)]
pub async fn rr(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    let Some(players) = players_in_author_channel(ctx) else {
        ctx.send(CreateReply::default().embed(
            CreateEmbed::new()
                .title("Russian Roulette")
                .description("You are not connected to a voice channel!")
                .color(embed::RED),
        ))
        .await?;
        return Ok(());
    };

    if players.len() < MIN_PLAYERS {
        ctx.send(CreateReply::default().embed(
            CreateEmbed::new()
                .title("Russian Roulette")
                .description("Not enough players in the voice channel!")
                .color(embed::ORANGE),
        ))
        .await?;
        return Ok(());
    }

    let countdown = |n: u32| {
        CreateEmbed::new()
            .title("🔫 Russian Roulette")
            .description(format!("Starting in **{n}**..."))
            .color(embed::ORANGE)
    };
    let reply = ctx.send(CreateReply::default().embed(countdown(3))).await?;
    for n in (1..=2).rev() {
        sleep(Duration::from_secs(1)).await;
        show(ctx, &reply, countdown(n)).await?;
    }
    sleep(Duration::from_secs(1)).await;
    show(
        ctx,
        &reply,
        CreateEmbed::new()
            .title("🎯 FIRE!")
            .color(embed::RED),
    )
    .await?;
    sleep(Duration::from_secs(1)).await;

    let victim = {
        let mut rng = rand::thread_rng();
        pick_victim(&players, &mut rng).cloned()
    };
    let Some((victim_id, victim_name)) = victim else {
        return Ok(());
    };

    let participants: Vec<(String, String)> = players
        .iter()
        .map(|(id, name)| (id.to_string(), name.clone()))
        .collect();
    if let Err(e) = ctx
        .data()
        .stats
        .record_round(&participants, &victim_id.to_string())
        .await
    {
        error!("recording roulette round failed: {e}");
    }

    for _ in 0..3 {
        for (_, name) in &players {
            show(
                ctx,
                &reply,
                CreateEmbed::new()
                    .title("🔄 Selecting...")
                    .description(format!("**{name}**"))
                    .color(embed::BLUE),
            )
            .await?;
            sleep(Duration::from_millis(500)).await;
        }
    }

    show(
        ctx,
        &reply,
        CreateEmbed::new()
            .title("⚡️ Selected for Disconnection")
            .description(format!("{} has been selected!", victim_id.mention()))
            .color(embed::GOLD),
    )
    .await?;
    sleep(Duration::from_secs(1)).await;

    match guild_id
        .disconnect_member(ctx.serenity_context(), victim_id)
        .await
    {
        Ok(_) => {
            info!(%guild_id, victim = %victim_id, "roulette victim disconnected");
            show(
                ctx,
                &reply,
                CreateEmbed::new()
                    .title("🚪 Disconnected")
                    .description(format!(
                        "**{victim_name}** has been disconnected from the voice channel!"
                    ))
                    .color(embed::GREEN),
            )
            .await?;
        }
        Err(e) => {
            warn!(%guild_id, "roulette disconnect failed: {e}");
            show(
                ctx,
                &reply,
                embed::error(&format!(
                    "Couldn't disconnect **{victim_name}**. Do I have the Move Members permission?"
                )),
            )
            .await?;
        }
    }
    Ok(())
}

/// Russian roulette leaderboard
#[poise::command(prefix_command)]
pub async fn rr_stats(ctx: Context<'_>) -> Result<(), Error> {
    let stats = match ctx.data().stats.load().await {
        Ok(stats) => stats,
        Err(e) => {
            error!("loading roulette stats failed: {e}");
            ctx.send(CreateReply::default().embed(embed::error(&format!("Couldn't read stats: {e}"))))
                .await?;
            return Ok(());
        }
    };

    if stats.is_empty() {
        ctx.say("No game statistics available yet.").await?;
        return Ok(());
    }

    let mut e = CreateEmbed::new()
        .title("📊 Russian Roulette Statistics")
        .color(embed::BLUE);
    for (_, record) in leaderboard(&stats).into_iter().take(25) {
        e = e.field(
            embed::truncate(&record.display_name, 250),
            format!(
                "Games played: {}\nTimes disconnected: {}",
                record.games_played, record.times_disconnected
            ),
            true,
        );
    }
    ctx.send(CreateReply::default().embed(e)).await?;
    Ok(())
}

/// Russian roulette chart
#[poise::command(prefix_command)]
pub async fn rr_graph(ctx: Context<'_>) -> Result<(), Error> {
    let stats = match ctx.data().stats.load().await {
        Ok(stats) => stats,
        Err(e) => {
            error!("loading roulette stats failed: {e}");
            ctx.send(CreateReply::default().embed(embed::error(&format!("Couldn't read stats: {e}"))))
                .await?;
            return Ok(());
        }
    };

    if stats.is_empty() {
        ctx.say("No game statistics available yet.").await?;
        return Ok(());
    }

    // code fence plus newlines
    let chart = embed::truncate(&render_chart(&stats), embed::DESCRIPTION_LIMIT - 8);
    let e = CreateEmbed::new()
        .title("📈 Russian Roulette Statistics")
        .description(format!("```\n{chart}\n```"))
        .color(embed::BLUE)
        .footer(CreateEmbedFooter::new(format!("{} players", stats.len())));
    ctx.send(CreateReply::default().embed(e)).await?;
    Ok(())
}
