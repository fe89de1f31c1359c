use std::sync::Arc;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use serenity::builder::CreateMessage;
use serenity::model::id::ChannelId;
use songbird::events::{Event, EventContext, EventHandler, TrackEvent};
use songbird::input::YoutubeDl;
use songbird::tracks::TrackHandle;
use songbird::Call;
use tokio::sync::Mutex;
use tracing::error;

use super::session::{Announcer, EndSignal};
use super::Track;
use crate::utils::{components, embed};
use crate::Error;

/// The audio side of a session: starts tracks and reports when they end.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Replaces whatever is playing with `track`. `on_end` must be fired
    /// exactly when this track stops, for any reason.
    async fn start(&self, track: &Track, on_end: EndSignal) -> Result<(), Error>;
    async fn pause(&self) -> Result<(), Error>;
    async fn resume(&self) -> Result<(), Error>;
    async fn stop(&self);
}

struct TrackEndNotifier {
    signal: EndSignal,
}

#[async_trait]
impl EventHandler for TrackEndNotifier {
    async fn act(&self, _ctx: &EventContext<'_>) -> Option<Event> {
        // Runs on the driver's thread; only posts onto the session channel.
        self.signal.fire();
        None
    }
}

pub struct SongbirdTransport {
    call: Arc<Mutex<Call>>,
    http_client: reqwest::Client,
    program: &'static str,
    current: Mutex<Option<TrackHandle>>,
}

impl SongbirdTransport {
    /// `program` is the yt-dlp binary the driver spawns for each track.
    pub fn new(call: Arc<Mutex<Call>>, http_client: reqwest::Client, program: &'static str) -> Self {
        Self {
            call,
            http_client,
            program,
            current: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Transport for SongbirdTransport {
    async fn start(&self, track: &Track, on_end: EndSignal) -> Result<(), Error> {
        let src = YoutubeDl::new_ytdl_like(
            self.program,
            self.http_client.clone(),
            track.url.clone(),
        );

        let track_handle = {
            let mut handler = self.call.lock().await;
            handler.play_only_input(src.into())
        }; // call lock dropped here

        track_handle.add_event(
            Event::Track(TrackEvent::End),
            TrackEndNotifier {
                signal: on_end.clone(),
            },
        )?;
        track_handle.add_event(
            Event::Track(TrackEvent::Error),
            TrackEndNotifier { signal: on_end },
        )?;

        *self.current.lock().await = Some(track_handle);
        Ok(())
    }

    async fn pause(&self) -> Result<(), Error> {
        match self.current.lock().await.as_ref() {
            Some(handle) => Ok(handle.pause()?),
            None => Err("nothing is playing".into()),
        }
    }

    async fn resume(&self) -> Result<(), Error> {
        match self.current.lock().await.as_ref() {
            Some(handle) => Ok(handle.play()?),
            None => Err("nothing is playing".into()),
        }
    }

    async fn stop(&self) {
        if let Some(handle) = self.current.lock().await.take() {
            let _ = handle.stop();
        }
        self.call.lock().await.stop();
    }
}

/// Posts session announcements into the text channel the session was
/// started from.
pub struct ChannelAnnouncer {
    http: Arc<serenity::Http>,
    channel_id: ChannelId,
}

impl ChannelAnnouncer {
    pub fn new(http: Arc<serenity::Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }

    async fn send(&self, message: CreateMessage) {
        if let Err(e) = self.channel_id.send_message(&self.http, message).await {
            error!("announcement failed: {e}");
        }
    }
}

#[async_trait]
impl Announcer for ChannelAnnouncer {
    async fn now_playing(&self, track: &Track, upcoming: &[Track]) {
        self.send(
            CreateMessage::new()
                .embed(embed::now_playing(track, upcoming.len()))
                .components(components::music_components(false)),
        )
        .await;
    }

    async fn queue_empty(&self) {
        self.send(CreateMessage::new().embed(embed::queue_empty()))
            .await;
    }

    async fn playback_failed(&self, track: &Track, reason: &str) {
        self.send(CreateMessage::new().embed(embed::error(&format!(
            "Could not play **{}**: {reason}",
            track.title
        ))))
        .await;
    }
}
