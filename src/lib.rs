pub mod ai;
pub mod alarm;
pub mod commands;
pub mod config;
pub mod events;
pub mod games;
pub mod music;
pub mod utils;

use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

pub struct Data {
    pub sessions: music::session::Sessions,
    pub http_client: reqwest::Client,
    pub resolver: music::source::MediaResolver,
    pub lyrics: music::lyrics::LyricsClient,
    pub stats: Arc<games::stats::StatsStore>,
    pub llm: Option<ai::groq::LlmClient>,
    pub chat_trigger: String,
}
