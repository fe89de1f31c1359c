use std::collections::VecDeque;

use super::Track;

/// What `enqueue` did with the new track.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Enqueued {
    /// The session was idle; this track is now current and must be started.
    Started(Track),
    /// Waiting behind the current track, 1-based.
    Queued { position: usize },
}

/// Result of the continuation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    Replay(Track),
    Next(Track),
    Empty,
}

impl Advance {
    pub fn track(&self) -> Option<&Track> {
        match self {
            Self::Replay(t) | Self::Next(t) => Some(t),
            Self::Empty => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub current: Option<Track>,
    pub upcoming: Vec<Track>,
    pub looping: bool,
    pub playing: bool,
}

/// FIFO of pending tracks plus the loop flag and the current-track slot.
///
/// Owned by exactly one session task; nothing here is shared.
#[derive(Debug, Default)]
pub struct PlaybackQueue {
    pending: VecDeque<Track>,
    current: Option<Track>,
    looping: bool,
    playing: bool,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, track: Track) -> Enqueued {
        self.pending.push_back(track);
        if self.playing {
            return Enqueued::Queued {
                position: self.pending.len(),
            };
        }
        match self.advance() {
            Advance::Next(t) | Advance::Replay(t) => Enqueued::Started(t),
            // just pushed, so the queue can't be empty here
            Advance::Empty => Enqueued::Queued { position: 0 },
        }
    }

    pub fn advance(&mut self) -> Advance {
        if self.looping {
            if let Some(current) = &self.current {
                self.playing = true;
                return Advance::Replay(current.clone());
            }
        }
        self.pop_next()
    }

    /// Like `advance`, but never replays.
    pub fn skip(&mut self) -> Advance {
        self.pop_next()
    }

    fn pop_next(&mut self) -> Advance {
        match self.pending.pop_front() {
            Some(next) => {
                self.current = Some(next.clone());
                self.playing = true;
                Advance::Next(next)
            }
            None => {
                self.current = None;
                self.playing = false;
                Advance::Empty
            }
        }
    }

    pub fn toggle_loop(&mut self) -> bool {
        self.looping = !self.looping;
        self.looping
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Drops pending tracks, leaving the current one alone.
    pub fn clear(&mut self) -> usize {
        let removed = self.pending.len();
        self.pending.clear();
        removed
    }

    pub fn stop(&mut self) {
        self.pending.clear();
        self.current = None;
        self.playing = false;
    }

    pub fn is_idle(&self) -> bool {
        !self.playing
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            current: self.current.clone(),
            upcoming: self.pending.iter().cloned().collect(),
            looping: self.looping,
            playing: self.playing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: &str) -> Track {
        Track {
            title: name.to_string(),
            url: format!("https://youtube.com/watch?v={name}"),
            duration: Some(180),
            requester: "tester".to_string(),
        }
    }

    fn titles(q: &PlaybackQueue) -> Vec<String> {
        q.snapshot().upcoming.into_iter().map(|t| t.title).collect()
    }

    #[test]
    fn test_first_enqueue_starts_rest_wait_in_order() {
        let mut q = PlaybackQueue::new();
        assert_eq!(q.enqueue(track("A")), Enqueued::Started(track("A")));
        assert_eq!(q.enqueue(track("B")), Enqueued::Queued { position: 1 });
        assert_eq!(q.enqueue(track("C")), Enqueued::Queued { position: 2 });

        assert_eq!(q.current(), Some(&track("A")));
        assert_eq!(titles(&q), vec!["B", "C"]);
        assert!(!q.is_idle());
    }

    #[test]
    fn test_advance_on_empty_is_idempotent() {
        let mut q = PlaybackQueue::new();
        assert_eq!(q.advance(), Advance::Empty);
        assert!(q.is_idle());
        assert_eq!(q.advance(), Advance::Empty);
        assert!(q.is_idle());
        assert!(q.current().is_none());
    }

    #[test]
    fn test_loop_replays_without_shrinking() {
        let mut q = PlaybackQueue::new();
        q.enqueue(track("A"));
        q.enqueue(track("B"));
        assert!(q.toggle_loop());

        for _ in 0..5 {
            assert_eq!(q.advance(), Advance::Replay(track("A")));
            assert_eq!(q.len(), 1);
        }
    }

    #[test]
    fn test_skip_ignores_loop() {
        let mut q = PlaybackQueue::new();
        q.enqueue(track("A"));
        q.enqueue(track("B"));
        q.set_loop(true);

        assert_eq!(q.skip(), Advance::Next(track("B")));
        assert_eq!(q.advance(), Advance::Replay(track("B")));
    }

    #[test]
    fn test_loop_with_nothing_current_reports_empty() {
        let mut q = PlaybackQueue::new();
        q.set_loop(true);
        assert_eq!(q.advance(), Advance::Empty);
    }

    #[test]
    fn test_scenario_a_b_c() {
        let mut q = PlaybackQueue::new();
        q.enqueue(track("A"));
        q.enqueue(track("B"));
        q.enqueue(track("C"));

        assert_eq!(q.advance(), Advance::Next(track("B")));
        assert_eq!(titles(&q), vec!["C"]);
        assert_eq!(q.advance(), Advance::Next(track("C")));
        assert!(q.is_empty());
        assert_eq!(q.advance(), Advance::Empty);
        assert!(q.is_idle());
    }

    #[test]
    fn test_clear_keeps_current() {
        let mut q = PlaybackQueue::new();
        q.enqueue(track("A"));
        q.enqueue(track("B"));
        q.enqueue(track("C"));

        assert_eq!(q.clear(), 2);
        assert_eq!(q.current(), Some(&track("A")));
        assert!(!q.is_idle());
    }

    #[test]
    fn test_stop_goes_idle_and_next_enqueue_starts() {
        let mut q = PlaybackQueue::new();
        q.enqueue(track("A"));
        q.enqueue(track("B"));
        q.stop();

        assert!(q.is_idle());
        assert!(q.current().is_none());
        assert_eq!(q.enqueue(track("C")), Enqueued::Started(track("C")));
    }
}
