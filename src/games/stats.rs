use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("stats file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stats file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub games_played: u64,
    pub times_disconnected: u64,
    #[serde(rename = "name", alias = "display_name")]
    pub display_name: String,
}

/// User id (decimal string) to counters.
pub type Stats = HashMap<String, StatsRecord>;

pub fn update(stats: &mut Stats, user_id: &str, display_name: &str, disconnected: bool) {
    let record = stats
        .entry(user_id.to_string())
        .or_insert_with(|| StatsRecord {
            games_played: 0,
            times_disconnected: 0,
            display_name: display_name.to_string(),
        });
    record.games_played += 1;
    if disconnected {
        record.times_disconnected += 1;
    }
    record.display_name = display_name.to_string();
}

/// Entries sorted by games played, most first.
pub fn leaderboard(stats: &Stats) -> Vec<(&String, &StatsRecord)> {
    let mut rows: Vec<_> = stats.iter().collect();
    rows.sort_by(|a, b| {
        b.1.games_played
            .cmp(&a.1.games_played)
            .then_with(|| a.1.display_name.cmp(&b.1.display_name))
    });
    rows
}

/// Russian-roulette counters kept in one JSON file, rewritten whole on
/// every round.
pub struct StatsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl StatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Stats, StatsError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Stats::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, stats: &Stats) -> Result<(), StatsError> {
        let json = serde_json::to_vec_pretty(stats)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), users = stats.len(), "stats saved");
        Ok(())
    }

    /// Records one round for every participant. `(user id, display name)`
    /// pairs; `loser` is the id that got disconnected.
    pub async fn record_round(
        &self,
        participants: &[(String, String)],
        loser: &str,
    ) -> Result<Stats, StatsError> {
        let _guard = self.write_lock.lock().await;
        let mut stats = self.load().await?;
        for (user_id, name) in participants {
            update(&mut stats, user_id, name, user_id == loser);
        }
        self.save(&stats).await?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "batrouna-stats-{}-{name}.json",
            std::process::id()
        ))
    }

    #[test]
    fn test_update_new_user() {
        let mut stats = Stats::new();
        update(&mut stats, "1", "alice", false);
        update(&mut stats, "2", "bob", true);

        assert_eq!(stats["1"].games_played, 1);
        assert_eq!(stats["1"].times_disconnected, 0);
        assert_eq!(stats["2"].games_played, 1);
        assert_eq!(stats["2"].times_disconnected, 1);
    }

    #[test]
    fn test_update_existing_user_refreshes_name() {
        let mut stats = Stats::new();
        update(&mut stats, "1", "alice", true);
        update(&mut stats, "1", "Alice2", false);
        let rec = &stats["1"];
        assert_eq!((rec.games_played, rec.times_disconnected), (2, 1));
        assert_eq!(rec.display_name, "Alice2");
    }

    #[test]
    fn test_leaderboard_order() {
        let mut stats = Stats::new();
        update(&mut stats, "1", "a", false);
        update(&mut stats, "2", "b", false);
        update(&mut stats, "2", "b", false);
        let order: Vec<_> = leaderboard(&stats)
            .into_iter()
            .map(|(id, _)| id.as_str())
            .collect();
        assert_eq!(order, vec!["2", "1"]);
    }

    #[test]
    fn test_record_uses_name_key() {
        let rec = StatsRecord {
            games_played: 3,
            times_disconnected: 1,
            display_name: "carol".to_string(),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["name"], "carol");

        let legacy: StatsRecord = serde_json::from_str(
            r#"{"games_played":1,"times_disconnected":0,"display_name":"dave"}"#,
        )
        .unwrap();
        assert_eq!(legacy.display_name, "dave");
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let store = StatsStore::new(temp_path("missing"));
        let _ = tokio::fs::remove_file(store.path()).await;
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let store = StatsStore::new(temp_path("roundtrip"));
        let mut stats = Stats::new();
        update(&mut stats, "42", "zed", true);
        update(&mut stats, "7", "amy", false);

        store.save(&stats).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, stats);

        let _ = tokio::fs::remove_file(store.path()).await;
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let store = StatsStore::new(temp_path("malformed"));
        tokio::fs::write(store.path(), b"{ not json").await.unwrap();
        assert!(matches!(store.load().await, Err(StatsError::Json(_))));
        let _ = tokio::fs::remove_file(store.path()).await;
    }

    fn round(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_concurrent_rounds_both_recorded() {
        let store = StatsStore::new(temp_path("concurrent"));
        let _ = tokio::fs::remove_file(store.path()).await;

        let first = round(&[("1", "alice"), ("2", "bob")]);
        let second = round(&[("1", "alice"), ("3", "carol")]);
        let (a, b) = tokio::join!(
            store.record_round(&first, "1"),
            store.record_round(&second, "3"),
        );
        a.unwrap();
        b.unwrap();

        let stats = store.load().await.unwrap();
        assert_eq!((stats["1"].games_played, stats["1"].times_disconnected), (2, 1));
        assert_eq!((stats["2"].games_played, stats["2"].times_disconnected), (1, 0));
        assert_eq!((stats["3"].games_played, stats["3"].times_disconnected), (1, 1));
        let total: u64 = stats.values().map(|r| r.times_disconnected).sum();
        assert_eq!(total, 2);

        let _ = tokio::fs::remove_file(store.path()).await;
    }

    #[tokio::test]
    async fn test_record_round_on_malformed_file_leaves_it_alone() {
        let store = StatsStore::new(temp_path("malformed-round"));
        tokio::fs::write(store.path(), b"{ not json").await.unwrap();

        let result = store.record_round(&round(&[("1", "alice"), ("2", "bob")]), "2").await;
        assert!(matches!(result, Err(StatsError::Json(_))));
        assert_eq!(tokio::fs::read(store.path()).await.unwrap(), b"{ not json");

        let _ = tokio::fs::remove_file(store.path()).await;
    }
}
