use poise::serenity_prelude as serenity;
use tracing::{error, info};

use crate::{Data, Error};

/// Discord rejects messages longer than this.
const MESSAGE_LIMIT: usize = 2000;

/// Answers messages that start with the trigger word through the LLM.
pub async fn handle(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
) -> Result<(), Error> {
    let Some(llm) = &data.llm else {
        return Ok(());
    };

    if msg.author.bot {
        return Ok(());
    }

    let Some(prompt) = extract_prompt(&msg.content, &data.chat_trigger) else {
        return Ok(());
    };

    if prompt.is_empty() {
        info!("empty prompt from {}; is MESSAGE_CONTENT intent enabled?", msg.author.name);
        return Ok(());
    }

    info!("[{}] {}: \"{prompt}\"", msg.channel_id, msg.author.name);

    let typing = msg.channel_id.start_typing(&ctx.http);
    let result = llm.complete(prompt).await;
    typing.stop();

    match result {
        Ok(answer) => {
            for chunk in split_message(&answer, MESSAGE_LIMIT) {
                msg.channel_id.say(&ctx.http, chunk).await?;
            }
        }
        Err(e) => error!("LLM request failed: {e}"),
    }

    Ok(())
}

/// Text after the trigger word, trimmed; `None` if the message doesn't start
/// with it.
pub fn extract_prompt<'a>(content: &'a str, trigger: &str) -> Option<&'a str> {
    if trigger.is_empty() {
        return None;
    }
    content.strip_prefix(trigger).map(str::trim)
}

/// Splits on char boundaries into pieces of at most `limit` chars.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(limit.max(1))
        .map(|c| c.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prompt() {
        assert_eq!(extract_prompt("batrouna  what time is it ", "batrouna"), Some("what time is it"));
        assert_eq!(extract_prompt("batrouna", "batrouna"), Some(""));
        assert_eq!(extract_prompt("hey batrouna", "batrouna"), None);
        assert_eq!(extract_prompt("anything", ""), None);
    }

    #[test]
    fn test_split_message() {
        assert_eq!(split_message("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(split_message("", 4), Vec::<String>::new());
        assert_eq!(split_message("ééé", 2), vec!["éé", "é"]);
    }
}
