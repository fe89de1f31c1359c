use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serenity::model::id::GuildId;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender};
use tokio::sync::{oneshot, RwLock};
use tracing::{debug, info, warn};

use super::player::Transport;
use super::queue::{Advance, Enqueued, PlaybackQueue, QueueSnapshot};
use super::Track;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("the voice session has shut down")]
    Closed,
    #[error("could not start playback: {0}")]
    Playback(String),
}

/// Out-of-band messages for transitions nobody asked for, i.e. a track ending
/// on its own.
#[async_trait]
pub trait Announcer: Send + Sync + 'static {
    async fn now_playing(&self, track: &Track, upcoming: &[Track]);
    async fn queue_empty(&self);
    async fn playback_failed(&self, track: &Track, reason: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkipOutcome {
    pub skipped: Option<Track>,
    pub next: Advance,
}

pub(crate) enum SessionCommand {
    Enqueue {
        track: Track,
        reply: oneshot::Sender<Result<Enqueued, SessionError>>,
    },
    Skip {
        reply: oneshot::Sender<SkipOutcome>,
    },
    Pause {
        reply: oneshot::Sender<Option<Track>>,
    },
    Resume {
        reply: oneshot::Sender<Option<Track>>,
    },
    Stop {
        reply: oneshot::Sender<()>,
    },
    Clear {
        reply: oneshot::Sender<usize>,
    },
    ToggleLoop {
        reply: oneshot::Sender<bool>,
    },
    Snapshot {
        reply: oneshot::Sender<QueueSnapshot>,
    },
    TrackEnded {
        generation: u64,
    },
    Shutdown,
}

/// Handed to the transport with every started track. Firing it posts a
/// `TrackEnded` back onto the owning session's channel; it never touches the
/// queue itself.
#[derive(Clone)]
pub struct EndSignal {
    events: WeakUnboundedSender<SessionCommand>,
    generation: u64,
}

impl EndSignal {
    pub fn fire(&self) {
        if let Some(tx) = self.events.upgrade() {
            let _ = tx.send(SessionCommand::TrackEnded {
                generation: self.generation,
            });
        }
    }
}

/// Cheap cloneable front for one guild's session task.
#[derive(Clone)]
pub struct SessionHandle {
    tx: UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    pub fn spawn(transport: Arc<dyn Transport>, announcer: Arc<dyn Announcer>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = SessionTask {
            queue: PlaybackQueue::new(),
            transport,
            announcer,
            generation: 0,
            paused: false,
            events: tx.downgrade(),
        };
        tokio::spawn(task.run(rx));
        Self { tx }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Result<T, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(make(reply)).map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    pub async fn enqueue(&self, track: Track) -> Result<Enqueued, SessionError> {
        self.request(|reply| SessionCommand::Enqueue { track, reply })
            .await?
    }

    pub async fn skip(&self) -> Result<SkipOutcome, SessionError> {
        self.request(|reply| SessionCommand::Skip { reply }).await
    }

    /// Returns the paused track, or `None` if nothing was playing.
    pub async fn pause(&self) -> Result<Option<Track>, SessionError> {
        self.request(|reply| SessionCommand::Pause { reply }).await
    }

    /// Returns the resumed track, or `None` if nothing was paused.
    pub async fn resume(&self) -> Result<Option<Track>, SessionError> {
        self.request(|reply| SessionCommand::Resume { reply }).await
    }

    pub async fn stop(&self) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::Stop { reply }).await
    }

    pub async fn clear(&self) -> Result<usize, SessionError> {
        self.request(|reply| SessionCommand::Clear { reply }).await
    }

    pub async fn toggle_loop(&self) -> Result<bool, SessionError> {
        self.request(|reply| SessionCommand::ToggleLoop { reply })
            .await
    }

    pub async fn snapshot(&self) -> Result<QueueSnapshot, SessionError> {
        self.request(|reply| SessionCommand::Snapshot { reply }).await
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(SessionCommand::Shutdown);
    }
}

struct SessionTask {
    queue: PlaybackQueue,
    transport: Arc<dyn Transport>,
    announcer: Arc<dyn Announcer>,
    generation: u64,
    paused: bool,
    events: WeakUnboundedSender<SessionCommand>,
}

impl SessionTask {
    async fn run(mut self, mut rx: UnboundedReceiver<SessionCommand>) {
        while let Some(command) = rx.recv().await {
            match command {
                SessionCommand::Enqueue { track, reply } => {
                    let result = self.enqueue(track).await;
                    let _ = reply.send(result);
                }
                SessionCommand::Skip { reply } => {
                    let skipped = self.queue.current().cloned();
                    let next = self.queue.skip();
                    let next = self.start_or_skip(next).await;
                    if next == Advance::Empty {
                        self.halt().await;
                    }
                    let _ = reply.send(SkipOutcome { skipped, next });
                }
                SessionCommand::Pause { reply } => {
                    let paused = self.pause().await;
                    let _ = reply.send(paused);
                }
                SessionCommand::Resume { reply } => {
                    let resumed = self.resume().await;
                    let _ = reply.send(resumed);
                }
                SessionCommand::Stop { reply } => {
                    self.queue.stop();
                    self.halt().await;
                    let _ = reply.send(());
                }
                SessionCommand::Clear { reply } => {
                    let _ = reply.send(self.queue.clear());
                }
                SessionCommand::ToggleLoop { reply } => {
                    let _ = reply.send(self.queue.toggle_loop());
                }
                SessionCommand::Snapshot { reply } => {
                    let _ = reply.send(self.queue.snapshot());
                }
                SessionCommand::TrackEnded { generation } => {
                    self.track_ended(generation).await;
                }
                SessionCommand::Shutdown => break,
            }
        }

        self.queue.stop();
        self.halt().await;
        debug!("session task finished");
    }

    async fn enqueue(&mut self, track: Track) -> Result<Enqueued, SessionError> {
        match self.queue.enqueue(track) {
            Enqueued::Started(track) => match self.start(&track).await {
                Ok(()) => Ok(Enqueued::Started(track)),
                Err(reason) => {
                    // Idle means nothing else was pending, so this settles to Empty.
                    let next = self.queue.skip();
                    if self.start_or_skip(next).await == Advance::Empty {
                        self.halt().await;
                    }
                    Err(SessionError::Playback(reason))
                }
            },
            queued => Ok(queued),
        }
    }

    async fn track_ended(&mut self, generation: u64) {
        if generation != self.generation || self.queue.is_idle() {
            debug!(generation, current = self.generation, "ignoring stale track end");
            return;
        }

        let next = self.queue.advance();
        match self.start_or_skip(next).await {
            Advance::Next(track) => {
                let upcoming = self.queue.snapshot().upcoming;
                self.announcer.now_playing(&track, &upcoming).await;
            }
            Advance::Replay(track) => {
                debug!(title = %track.title, "looping track");
            }
            Advance::Empty => {
                info!("queue empty");
                self.halt().await;
                self.announcer.queue_empty().await;
            }
        }
    }

    /// Starts whatever `outcome` names. A track the transport refuses is
    /// announced and skipped until one starts or the queue runs dry.
    async fn start_or_skip(&mut self, mut outcome: Advance) -> Advance {
        loop {
            let Some(track) = outcome.track().cloned() else {
                return outcome;
            };
            match self.start(&track).await {
                Ok(()) => return outcome,
                Err(reason) => {
                    self.announcer.playback_failed(&track, &reason).await;
                    outcome = self.queue.skip();
                }
            }
        }
    }

    async fn start(&mut self, track: &Track) -> Result<(), String> {
        self.generation += 1;
        self.paused = false;
        let signal = EndSignal {
            events: self.events.clone(),
            generation: self.generation,
        };
        match self.transport.start(track, signal).await {
            Ok(()) => {
                info!(title = %track.title, generation = self.generation, "playback started");
                Ok(())
            }
            Err(e) => {
                warn!(title = %track.title, "playback failed to start: {e}");
                Err(e.to_string())
            }
        }
    }

    /// Silences the transport and invalidates any end event still in flight.
    async fn halt(&mut self) {
        self.generation += 1;
        self.paused = false;
        self.transport.stop().await;
    }

    async fn pause(&mut self) -> Option<Track> {
        if self.paused || self.queue.is_idle() {
            return None;
        }
        let track = self.queue.current().cloned()?;
        match self.transport.pause().await {
            Ok(()) => {
                self.paused = true;
                Some(track)
            }
            Err(e) => {
                warn!("pause failed: {e}");
                None
            }
        }
    }

    async fn resume(&mut self) -> Option<Track> {
        if !self.paused {
            return None;
        }
        let track = self.queue.current().cloned()?;
        match self.transport.resume().await {
            Ok(()) => {
                self.paused = false;
                Some(track)
            }
            Err(e) => {
                warn!("resume failed: {e}");
                None
            }
        }
    }
}

/// Live sessions keyed by guild.
#[derive(Clone, Default)]
pub struct Sessions {
    inner: Arc<RwLock<HashMap<GuildId, SessionHandle>>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, guild_id: GuildId) -> Option<SessionHandle> {
        let sessions = self.inner.read().await;
        sessions
            .get(&guild_id)
            .filter(|handle| !handle.is_closed())
            .cloned()
    }

    pub async fn get_or_spawn<F>(&self, guild_id: GuildId, make: F) -> SessionHandle
    where
        F: FnOnce() -> (Arc<dyn Transport>, Arc<dyn Announcer>),
    {
        let mut sessions = self.inner.write().await;
        if let Some(handle) = sessions.get(&guild_id).filter(|h| !h.is_closed()) {
            return handle.clone();
        }
        let (transport, announcer) = make();
        let handle = SessionHandle::spawn(transport, announcer);
        sessions.insert(guild_id, handle.clone());
        info!(%guild_id, "voice session started");
        handle
    }

    pub async fn remove(&self, guild_id: GuildId) -> bool {
        let removed = self.inner.write().await.remove(&guild_id);
        match removed {
            Some(handle) => {
                handle.shutdown();
                info!(%guild_id, "voice session ended");
                true
            }
            None => false,
        }
    }
}
