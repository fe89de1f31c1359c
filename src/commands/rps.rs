use std::time::Duration;

use poise::serenity_prelude as serenity;
use poise::CreateReply;
use serenity::Mentionable;

use crate::games::rps::{Choice, Outcome, Phase, RpsGame};
use crate::utils::{components, interaction};
use crate::{Context, Error};

const GAME_TIMEOUT: Duration = Duration::from_secs(120);

/// Starts a rock-paper-scissors round another member can join
#[poise::command(prefix_command)]
pub async fn rps(ctx: Context<'_>) -> Result<(), Error> {
    let invocation = ctx.id();
    let prefix = format!("{invocation}:");
    let mut game = RpsGame::new(ctx.author().id);

    let reply = ctx
        .send(
            CreateReply::default()
                .content("Rock-Paper-Scissors game started! Another player must join!")
                .components(components::rps_components(invocation, true, false)),
        )
        .await?;

    while let Some(press) = serenity::ComponentInteractionCollector::new(ctx)
        .filter(move |press| press.data.custom_id.starts_with(&format!("{invocation}:")))
        .timeout(GAME_TIMEOUT)
        .await
    {
        let sctx = ctx.serenity_context();
        let user = press.user.id;
        let Some(action) = press.data.custom_id.strip_prefix(prefix.as_str()) else {
            continue;
        };

        if action == "join" {
            match game.join(user) {
                Ok(()) => {
                    interaction::update_message(
                        sctx,
                        &press,
                        None,
                        None,
                        components::rps_components(invocation, false, false),
                    )
                    .await?;
                    interaction::followup(
                        sctx,
                        &press,
                        &format!("{} has joined the game!", user.mention()),
                    )
                    .await?;
                }
                Err(e) => interaction::respond_ephemeral(sctx, &press, &format!("Sorry, {e}.")).await?,
            }
            continue;
        }

        let Ok(choice) = action.parse::<Choice>() else {
            continue;
        };

        match game.choose(user, choice) {
            Err(e) => {
                interaction::respond_ephemeral(sctx, &press, &format!("Sorry, {e}.")).await?;
            }
            Ok(phase) => {
                interaction::respond_ephemeral(sctx, &press, &format!("You chose {choice}!"))
                    .await?;

                if let Phase::Resolved(outcome) = phase {
                    let (p1, p2) = (game.players()[0], game.players()[1]);
                    let (c1, c2) = (game.choice_of(p1), game.choice_of(p2));
                    let line = format!(
                        "{}{} **--** {}{}",
                        p1.mention(),
                        c1.map(Choice::emoji).unwrap_or_default(),
                        p2.mention(),
                        c2.map(Choice::emoji).unwrap_or_default(),
                    );
                    let verdict = match outcome {
                        Outcome::Tie => "It's a **tie**!".to_string(),
                        Outcome::Winner(winner) => format!("{} **wins**!", winner.mention()),
                    };
                    interaction::followup(sctx, &press, &line).await?;
                    interaction::followup(sctx, &press, &verdict).await?;

                    reply
                        .edit(
                            ctx,
                            CreateReply::default()
                                .content("Rock-Paper-Scissors game over.")
                                .components(components::rps_components(invocation, false, true)),
                        )
                        .await?;
                    return Ok(());
                }
            }
        }
    }

    reply
        .edit(
            ctx,
            CreateReply::default()
                .content("Rock-Paper-Scissors game expired.")
                .components(components::rps_components(invocation, false, true)),
        )
        .await?;
    Ok(())
}
