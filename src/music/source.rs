use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use super::Track;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("could not run yt-dlp: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("yt-dlp error: {0}")]
    Extractor(String),
    #[error("unreadable yt-dlp output: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no results for `{0}`")]
    NotFound(String),
}

/// Extractor flags, built once and shared by every lookup.
#[derive(Clone, Debug)]
pub struct ResolveOptions {
    /// yt-dlp or a compatible fork. Shared with the playback inputs, which
    /// need it for the life of the process.
    pub program: &'static str,
    pub format: String,
    pub search_prefix: String,
    pub quiet: bool,
    pub search_results: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            program: "yt-dlp",
            format: "bestaudio/best".to_string(),
            search_prefix: "ytsearch".to_string(),
            quiet: true,
            search_results: 5,
        }
    }
}

#[derive(Deserialize)]
struct YtDlpOutput {
    title: Option<String>,
    duration: Option<f64>,
    webpage_url: Option<String>,
    original_url: Option<String>,
    url: Option<String>,
}

impl YtDlpOutput {
    fn into_track(self, fallback_url: &str) -> Track {
        let url = self
            .webpage_url
            .or(self.original_url)
            .or(self.url)
            .unwrap_or_else(|| fallback_url.to_string());

        Track {
            title: self.title.unwrap_or_else(|| "Unknown title".to_string()),
            url,
            duration: self.duration.map(|d| d as u64),
            requester: String::new(),
        }
    }
}

pub fn is_url(query: &str) -> bool {
    query.starts_with("http://") || query.starts_with("https://")
}

#[derive(Clone, Debug, Default)]
pub struct MediaResolver {
    options: ResolveOptions,
}

impl MediaResolver {
    pub fn new(options: ResolveOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// A URL resolves to itself; anything else to its first search hit.
    pub fn target(&self, query: &str) -> String {
        if is_url(query) {
            query.to_string()
        } else {
            format!("{}1:{query}", self.options.search_prefix)
        }
    }

    fn base_args(&self) -> Vec<String> {
        let mut args = vec![
            "-j".to_string(),
            "-f".to_string(),
            self.options.format.clone(),
            "--no-playlist".to_string(),
        ];
        if self.options.quiet {
            args.push("--quiet".to_string());
            args.push("--no-warnings".to_string());
        }
        args
    }

    async fn run(&self, args: Vec<String>) -> Result<Vec<u8>, ResolveError> {
        debug!(?args, "running {}", self.options.program);
        let output = Command::new(self.options.program)
            .args(&args)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ResolveError::Extractor(stderr.trim().to_string()));
        }
        Ok(output.stdout)
    }

    pub async fn resolve(&self, query: &str) -> Result<Track, ResolveError> {
        let target = self.target(query);
        let mut args = self.base_args();
        args.push(target);

        let stdout = self.run(args).await?;
        parse_single(&stdout, query)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Track>, ResolveError> {
        let mut args = self.base_args();
        args.push("--flat-playlist".to_string());
        args.push(format!(
            "{}{}:{query}",
            self.options.search_prefix, self.options.search_results
        ));

        let stdout = self.run(args).await?;
        parse_lines(&stdout)
    }
}

fn parse_single(stdout: &[u8], query: &str) -> Result<Track, ResolveError> {
    let text = String::from_utf8_lossy(stdout);
    let line = text
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| ResolveError::NotFound(query.to_string()))?;
    let info: YtDlpOutput = serde_json::from_str(line)?;
    Ok(info.into_track(query))
}

/// One JSON object per line, as `-j` prints search results.
fn parse_lines(stdout: &[u8]) -> Result<Vec<Track>, ResolveError> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            let info: YtDlpOutput = serde_json::from_str(line)?;
            Ok(info.into_track(""))
        })
        .collect()
}
