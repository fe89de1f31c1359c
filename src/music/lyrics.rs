use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://lrclib.net/api";

#[derive(Debug, thiserror::Error)]
pub enum LyricsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("lyrics service answered {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchHit {
    track_name: Option<String>,
    artist_name: Option<String>,
    plain_lyrics: Option<String>,
    #[serde(default)]
    instrumental: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lyrics {
    pub title: String,
    pub artist: Option<String>,
    pub text: String,
}

#[derive(Clone)]
pub struct LyricsClient {
    http: reqwest::Client,
    base_url: String,
}

impl LyricsClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `Ok(None)` when the service has nothing for `title`.
    pub async fn find(&self, title: &str) -> Result<Option<Lyrics>, LyricsError> {
        let query = clean_title(title);
        let url = format!(
            "{}/search?q={}",
            self.base_url,
            urlencoding::encode(&query)
        );

        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(LyricsError::Status(resp.status()));
        }

        let hits: Vec<SearchHit> = resp.json().await?;
        Ok(pick(hits, &query))
    }
}

fn pick(hits: Vec<SearchHit>, query: &str) -> Option<Lyrics> {
    hits.into_iter()
        .filter(|h| !h.instrumental)
        .find_map(|h| {
            let text = h.plain_lyrics.filter(|t| !t.trim().is_empty())?;
            Some(Lyrics {
                title: h.track_name.unwrap_or_else(|| query.to_string()),
                artist: h.artist_name,
                text,
            })
        })
}

/// Strips video-title noise like "(Official Video)" or "[Lyrics]".
pub fn clean_title(title: &str) -> String {
    const NOISE: &[&str] = &[
        "official", "video", "audio", "lyrics", "lyric", "visualizer", "mv", "hd", "4k",
    ];

    let mut out = String::with_capacity(title.len());
    let mut rest = title;
    while let Some(open) = rest.find(['(', '[']) {
        let close_char = if rest[open..].starts_with('(') { ')' } else { ']' };
        let Some(close) = rest[open..].find(close_char).map(|i| open + i) else {
            break;
        };
        let inner = rest[open + 1..close].to_lowercase();
        out.push_str(&rest[..open]);
        if !NOISE.iter().any(|n| inner.split_whitespace().any(|w| w == *n)) {
            out.push_str(&rest[open..=close]);
        }
        rest = &rest[close + 1..];
    }
    out.push_str(rest);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title_removes_noise() {
        assert_eq!(
            clean_title("Artist - Song (Official Music Video)"),
            "Artist - Song"
        );
        assert_eq!(clean_title("Song [Lyrics] (feat. X)"), "Song (feat. X)");
        assert_eq!(clean_title("Plain Title"), "Plain Title");
        assert_eq!(clean_title("Broken (paren"), "Broken (paren");
    }

    #[test]
    fn test_pick_skips_instrumental_and_empty() {
        let hits = vec![
            SearchHit {
                track_name: Some("Inst".into()),
                artist_name: None,
                plain_lyrics: Some("la".into()),
                instrumental: true,
            },
            SearchHit {
                track_name: Some("Blank".into()),
                artist_name: None,
                plain_lyrics: Some("  ".into()),
                instrumental: false,
            },
            SearchHit {
                track_name: Some("Real".into()),
                artist_name: Some("Band".into()),
                plain_lyrics: Some("words".into()),
                instrumental: false,
            },
        ];
        let lyrics = pick(hits, "q").unwrap();
        assert_eq!(lyrics.title, "Real");
        assert_eq!(lyrics.artist.as_deref(), Some("Band"));
    }

    #[test]
    fn test_pick_none() {
        assert!(pick(Vec::new(), "q").is_none());
    }
}
