use std::time::Duration;

use poise::serenity_prelude as serenity;
use poise::CreateReply;
use serenity::model::id::UserId;
use serenity::Mentionable;

use crate::games::tictactoe::{BoardState, Mark, TicTacToe};
use crate::utils::components::{self, parse_cell};
use crate::utils::interaction;
use crate::{Context, Error};

const GAME_TIMEOUT: Duration = Duration::from_secs(300);

fn status_line(game: &TicTacToe<UserId>) -> String {
    let turn = game.current_player();
    match game.player(turn) {
        Some(player) => format!(
            "Tic-Tac-Toe: it's {}'s turn ({}).",
            player.mention(),
            Mark::for_player(turn).as_str()
        ),
        None => "Tic-Tac-Toe: waiting for someone to join as O.".to_string(),
    }
}

/// Starts a tic-tac-toe game another member can join
#[poise::command(prefix_command)]
pub async fn xo(ctx: Context<'_>) -> Result<(), Error> {
    let invocation = ctx.id();
    let prefix = format!("{invocation}:");
    let mut game = TicTacToe::new(ctx.author().id);

    let reply = ctx
        .send(
            CreateReply::default()
                .content(format!(
                    "Tic-Tac-Toe game started by {}! Another player must join!",
                    ctx.author().id.mention()
                ))
                .components(components::xo_components(invocation, game.board(), true, false)),
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
                        Some(status_line(&game)),
                        None,
                        components::xo_components(invocation, game.board(), false, false),
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

        let Some((row, col)) = parse_cell(action) else {
            continue;
        };

        let join_open = game.player(1).is_none();
        match game.play(user, row, col) {
            Err(e) => {
                interaction::respond_ephemeral(sctx, &press, &format!("Sorry, {e}.")).await?;
            }
            Ok(BoardState::InProgress) => {
                interaction::update_message(
                    sctx,
                    &press,
                    Some(status_line(&game)),
                    None,
                    components::xo_components(invocation, game.board(), join_open, false),
                )
                .await?;
            }
            Ok(state) => {
                let verdict = match state {
                    BoardState::Won(index) => match game.player(index) {
                        Some(winner) => format!("{} **wins**!", winner.mention()),
                        None => "Game over.".to_string(),
                    },
                    _ => "It's a **tie**!".to_string(),
                };
                interaction::update_message(
                    sctx,
                    &press,
                    Some(format!("Tic-Tac-Toe: {verdict}")),
                    None,
                    components::xo_components(invocation, game.board(), false, true),
                )
                .await?;
                interaction::followup(sctx, &press, &verdict).await?;
                return Ok(());
            }
        }
    }

    reply
        .edit(
            ctx,
            CreateReply::default()
                .content("Tic-Tac-Toe game expired.")
                .components(components::xo_components(invocation, game.board(), false, true)),
        )
        .await?;
    Ok(())
}
