use std::process::ExitCode;
use std::sync::Arc;

use batrouna_bot::ai::groq::LlmClient;
use batrouna_bot::games::stats::StatsStore;
use batrouna_bot::music::lyrics::LyricsClient;
use batrouna_bot::music::session::Sessions;
use batrouna_bot::music::source::{MediaResolver, ResolveOptions};
use batrouna_bot::utils::embed;
use batrouna_bot::{commands, config, events, Data, Error};
use poise::serenity_prelude as serenity;
use poise::CreateReply;
use songbird::SerenityInit;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("framework setup failed: {error}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("command `{}` failed: {error}", ctx.command().qualified_name);
            let reply = CreateReply::default()
                .embed(embed::error("Something went wrong while running that command."));
            if let Err(e) = ctx.send(reply).await {
                warn!("error reply failed: {e}");
            }
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = format!(
                "Missing or invalid argument{} for `{}{}`. See `{}help`.",
                input.map(|i| format!(" `{i}`")).unwrap_or_default(),
                ctx.prefix(),
                ctx.command().name,
                ctx.prefix(),
            );
            if let Err(e) = ctx.send(CreateReply::default().embed(embed::error(&usage))).await {
                warn!("usage reply failed: {e}");
            }
        }
        poise::FrameworkError::UnknownCommand {
            ctx,
            msg,
            prefix,
            msg_content,
            ..
        } => {
            let name = msg_content.split_whitespace().next().unwrap_or_default();
            let text = format!("Command `{prefix}{name}` not found. Try `{prefix}help`.");
            if let Err(e) = msg.reply(ctx, text).await {
                warn!("unknown command reply failed: {e}");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("error while handling error: {e}");
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let http_client = reqwest::Client::new();

    let llm = match &config.groq_api_key {
        Some(key) => Some(LlmClient::new(
            http_client.clone(),
            &config.llm_api_url,
            key,
            &config.llm_model,
        )),
        None => {
            warn!("GROQ_API_KEY is not set, chat replies are disabled");
            None
        }
    };

    let data = Data {
        sessions: Sessions::new(),
        http_client: http_client.clone(),
        resolver: MediaResolver::new(ResolveOptions {
            program: Box::leak(config.ytdlp_path.clone().into_boxed_str()),
            ..ResolveOptions::default()
        }),
        lyrics: LyricsClient::new(http_client),
        stats: Arc::new(StatsStore::new(config.stats_path.clone())),
        llm,
        chat_trigger: config.chat_trigger.clone(),
    };

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let prefix = config.prefix.clone();
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix.clone()),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |_ctx, ready, _framework| {
            Box::pin(async move {
                info!("{} is ready with prefix `{prefix}`", ready.user.name);
                Ok(data)
            })
        })
        .build();

    let mut client = match serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .register_songbird()
        .await
    {
        Ok(client) => client,
        Err(e) => {
            error!("client creation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = client.start().await {
        error!("client error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
