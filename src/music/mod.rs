pub mod lyrics;
pub mod player;
pub mod queue;
pub mod session;
pub mod source;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub url: String,
    /// Length in seconds, when the extractor reports one.
    pub duration: Option<u64>,
    pub requester: String,
}

impl Track {
    pub fn duration_label(&self) -> String {
        self.duration
            .map_or_else(|| "N/A".to_string(), format_duration)
    }
}

/// `m:ss`, or `h:mm:ss` past the hour.
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let remaining = secs % 60;
    if hours > 0 {
        format!("{hours}:{mins:02}:{remaining:02}")
    } else {
        format!("{mins}:{remaining:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(600), "10:00");
        assert_eq!(format_duration(3725), "1:02:05");
    }

    #[test]
    fn test_duration_label_unknown() {
        let track = Track {
            title: "live".to_string(),
            url: "https://example.com".to_string(),
            duration: None,
            requester: String::new(),
        };
        assert_eq!(track.duration_label(), "N/A");
    }
}
