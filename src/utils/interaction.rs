use poise::serenity_prelude as serenity;
use serenity::builder::{
    CreateActionRow, CreateEmbed, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage,
};
use serenity::model::application::ComponentInteraction;

use crate::Error;

/// Private reply only the presser sees.
pub async fn respond_ephemeral(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    content: &str,
) -> Result<(), Error> {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );
    interaction.create_response(&ctx.http, response).await?;
    Ok(())
}

pub async fn respond_error(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    message: &str,
) -> Result<(), Error> {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .embed(crate::utils::embed::error(message))
            .ephemeral(true),
    );
    interaction.create_response(&ctx.http, response).await?;
    Ok(())
}

/// Rewrites the message the pressed component belongs to.
pub async fn update_message(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    content: Option<String>,
    embed: Option<CreateEmbed>,
    components: Vec<CreateActionRow>,
) -> Result<(), Error> {
    let mut message = CreateInteractionResponseMessage::new().components(components);
    if let Some(content) = content {
        message = message.content(content);
    }
    if let Some(embed) = embed {
        message = message.embed(embed);
    }
    interaction
        .create_response(&ctx.http, CreateInteractionResponse::UpdateMessage(message))
        .await?;
    Ok(())
}

/// Public follow-up after the interaction has been answered.
pub async fn followup(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    content: &str,
) -> Result<(), Error> {
    interaction
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new().content(content),
        )
        .await?;
    Ok(())
}
