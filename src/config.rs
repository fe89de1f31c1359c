use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
}

pub struct Config {
    pub discord_token: String,
    pub groq_api_key: Option<String>,
    pub prefix: String,
    pub chat_trigger: String,
    pub llm_model: String,
    pub llm_api_url: String,
    pub stats_path: PathBuf,
    pub ytdlp_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let discord_token = std::env::var("DISCORD_TOKEN")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        Ok(Self {
            discord_token,
            groq_api_key: std::env::var("GROQ_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            prefix: env_or("BOT_PREFIX", "/"),
            chat_trigger: env_or("CHAT_TRIGGER", "batrouna"),
            llm_model: env_or("LLM_MODEL", crate::ai::groq::DEFAULT_MODEL),
            llm_api_url: env_or("LLM_API_URL", crate::ai::groq::DEFAULT_API_URL),
            stats_path: PathBuf::from(env_or("RR_STATS_PATH", "russian_roulette_stats.json")),
            ytdlp_path: env_or("YTDLP_PATH", "yt-dlp"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
