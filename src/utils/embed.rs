use serenity::builder::{CreateEmbed, CreateEmbedFooter};

use crate::music::Track;

pub const RED: u32 = 0xED4245;
pub const BLUE: u32 = 0x5865F2;
pub const GREEN: u32 = 0x57F287;
pub const GOLD: u32 = 0xF1C40F;
pub const ORANGE: u32 = 0xE67E22;

/// Discord's cap on an embed description.
pub const DESCRIPTION_LIMIT: usize = 4096;

pub fn now_playing(track: &Track, upcoming: usize) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title("🎵 Now Playing")
        .description(format!(
            "**Title:** [{}]({})\n**Duration:** {}",
            track.title,
            track.url,
            track.duration_label()
        ))
        .color(RED);

    if !track.requester.is_empty() {
        embed = embed.field("Requested by", &track.requester, true);
    }
    if upcoming > 0 {
        embed = embed.field("Up next", format!("{upcoming} in queue"), true);
    }
    embed
}

pub fn added_to_queue(track: &Track, position: usize) -> CreateEmbed {
    CreateEmbed::new()
        .title("Added to Queue")
        .description(format!(
            "**Title:** [{}]({})\n**Duration:** {}\n**Position in Queue:** {position}",
            track.title,
            track.url,
            track.duration_label()
        ))
        .color(RED)
}

pub fn queue_empty() -> CreateEmbed {
    CreateEmbed::new()
        .title("Queue is empty, add more songs!")
        .color(RED)
}

pub fn queue_list(current: Option<&Track>, tracks: &[Track], looping: bool) -> CreateEmbed {
    let mut embed = CreateEmbed::new().title("🎶 Current Music Queue 🎶");

    if let Some(track) = current {
        let loop_tag = if looping { " 🔂" } else { "" };
        embed = embed.field(
            format!("Now playing{loop_tag}"),
            format!("[{}]({}) `{}`", track.title, track.url, track.duration_label()),
            false,
        );
    }

    if tracks.is_empty() {
        return embed
            .description("The queue is currently empty.")
            .color(RED);
    }

    // embeds hold at most 25 fields
    for (i, track) in tracks.iter().take(24).enumerate() {
        embed = embed.field(
            format!("{}. {}", i + 1, truncate(&track.title, 250)),
            format!("**Duration:** {}", track.duration_label()),
            false,
        );
    }

    embed
        .color(BLUE)
        .footer(CreateEmbedFooter::new(format!(
            "Total songs in queue: {}",
            tracks.len()
        )))
}

pub fn search_results(query: &str, tracks: &[Track]) -> CreateEmbed {
    let query = truncate(query, 200);
    if tracks.is_empty() {
        return CreateEmbed::new()
            .title("🔍 YouTube Search Results")
            .description(format!("No results found for '{query}'."))
            .color(RED);
    }

    let mut embed = CreateEmbed::new()
        .title(format!("🔍 Top {} YouTube Results for '{query}'", tracks.len()))
        .color(GREEN);
    for (i, track) in tracks.iter().enumerate() {
        embed = embed.field(
            format!("{}. {}", i + 1, truncate(&track.title, 250)),
            format!(
                "**Duration:** {}\n[Watch]({})",
                track.duration_label(),
                track.url
            ),
            false,
        );
    }
    embed
}

pub fn error(message: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title("❌ Error")
        .description(message)
        .color(RED)
}

pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_search_title_fits_discord_limit() {
        let query = "la ".repeat(400);
        let tracks = vec![Track {
            title: "Song".to_string(),
            url: "https://youtube.com/watch?v=1".to_string(),
            duration: Some(61),
            requester: String::new(),
        }];

        for e in [search_results(&query, &tracks), search_results(&query, &[])] {
            let json = serde_json::to_value(&e).unwrap();
            let title = json["title"].as_str().unwrap();
            assert!(title.chars().count() <= 256, "title has {} chars", title.chars().count());
        }
    }
}
