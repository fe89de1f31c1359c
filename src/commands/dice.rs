use rand::Rng;

use crate::{Context, Error};

const FACES: [&str; 6] = ["⚀", "⚁", "⚂", "⚃", "⚄", "⚅"];

/// Rolls a six-sided die
#[poise::command(prefix_command)]
pub async fn dice(ctx: Context<'_>) -> Result<(), Error> {
    let roll = rand::thread_rng().gen_range(1..=6usize);
    ctx.say(format!("🎲 You rolled a **{roll}** {}", FACES[roll - 1]))
        .await?;
    Ok(())
}
