use poise::CreateReply;
use serenity::builder::CreateEmbed;

use crate::utils::embed;
use crate::{Context, Error};

async fn help_impl(ctx: Context<'_>) -> Result<(), Error> {
    let p = ctx.prefix();

    let music_cmds = format!(
        "\
`{p}join [channel]` - join your voice channel or one by name
`{p}leave` - stop and leave the voice channel
`{p}play <url|query>` (`{p}p`) - play or add to the queue
`{p}pause` / `{p}resume` - pause or resume the current track
`{p}skip` (`{p}s`) - skip the current track
`{p}stop` - stop playback and clear the queue
`{p}loop` - toggle looping of the current track
`{p}queue` (`{p}q`) - show the queue
`{p}clear` - clear the pending tracks
`{p}search <query>` - top 5 YouTube results
`{p}lyrics [title]` - lyrics for a title or the current track"
    );

    let game_cmds = format!(
        "\
`{p}rps` - rock paper scissors against another member
`{p}xo` - tic-tac-toe against another member
`{p}dice` - roll a die
`{p}rr` - russian roulette in your voice channel
`{p}rr_stats` - roulette leaderboard
`{p}rr_graph` - roulette chart"
    );

    let other_cmds = format!(
        "\
`{p}setalarm <hh:mm> <name>` - ping you at that time
`{} <prompt>` - ask the chat assistant",
        ctx.data().chat_trigger
    );

    let e = CreateEmbed::new()
        .title("Batrouna help")
        .field("Music", music_cmds, false)
        .field("Games", game_cmds, false)
        .field("Other", other_cmds, false)
        .color(embed::BLUE);

    ctx.send(CreateReply::default().embed(e)).await?;
    Ok(())
}

/// Lists the bot's commands
#[poise::command(prefix_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    help_impl(ctx).await
}
