//! User-facing facade: one object through which the timer, the external
//! player's reports, and user commands all flow, serialized by `&mut self`.

use tracing::debug;

use crate::{
    ambient::{AmbientLyric, AmbientLyrics},
    cues::{CueTable, ResolvedImage, ResolvedLyric},
    transport::{PlaybackMode, PlaybackReport, Reconciled, Transport},
};

/// Command the embedder should forward to the external playback source,
/// which accepts only `play()` and `pause()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    Play,
    Pause,
}

/// Snapshot of what the rendering layer should draw right now.
#[derive(Debug)]
pub struct OverlayFrame<'a> {
    pub elapsed_secs: f64,
    pub playing: bool,
    /// The single timed lyric to show, if any.
    pub lyric: Option<&'a ResolvedLyric>,
    /// All image sprites whose windows contain the current time.
    pub images: Vec<&'a ResolvedImage>,
    /// Transient random-mode items; empty in timed mode.
    pub ambient: &'a [AmbientLyric],
}

pub struct OverlaySession {
    transport: Transport,
    cues: CueTable,
    ambient: AmbientLyrics,
    listening: bool,
}

impl OverlaySession {
    pub fn new(cues: CueTable) -> Self {
        Self::with_ambient_pool(cues, Vec::new(), 0)
    }

    /// `pool` feeds random mode; timed mode never touches it.
    pub fn with_ambient_pool(cues: CueTable, pool: Vec<String>, seed: u64) -> Self {
        Self {
            transport: Transport::new(PlaybackMode::Timed),
            cues,
            ambient: AmbientLyrics::new(pool, seed),
            listening: false,
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn cues(&self) -> &CueTable {
        &self.cues
    }

    pub fn mode(&self) -> PlaybackMode {
        self.transport.mode()
    }

    /// Switching modes resets playback state and clears any ambient items.
    pub fn set_mode(&mut self, mode: PlaybackMode) {
        debug!(?mode, "switching playback mode");
        self.transport.set_mode(mode);
        self.ambient.clear();
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Toggle auto-start: while listening in timed mode, the next frame starts
    /// the timeline if it has never started.
    pub fn toggle_listening(&mut self) {
        self.listening = !self.listening;
    }

    /// Toggle play/pause. Returns the command to forward to the player.
    pub fn toggle_play(&mut self, now_ms: i64) -> Option<PlayerCommand> {
        if self.mode() != PlaybackMode::Timed {
            return None;
        }
        if self.transport.is_playing() {
            self.transport.pause(now_ms);
            Some(PlayerCommand::Pause)
        } else {
            self.transport.start(now_ms);
            Some(PlayerCommand::Play)
        }
    }

    /// Reset to the start. The player is paused so its next report does not
    /// immediately re-sync the timeline.
    pub fn reset(&mut self) -> Option<PlayerCommand> {
        self.transport.reset();
        Some(PlayerCommand::Pause)
    }

    /// Feed one external playback report through the transport.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn handle_report(&mut self, report: PlaybackReport, now_ms: i64) -> Reconciled {
        self.transport.reconcile(report, now_ms)
    }

    /// Advance clocks and snapshot the active cues.
    pub fn frame(&mut self, now_ms: i64) -> OverlayFrame<'_> {
        match self.mode() {
            PlaybackMode::Timed => {
                if self.listening && !self.transport.has_started() {
                    debug!("listening enabled and timeline idle, auto-starting");
                    self.transport.start(now_ms);
                }
                self.transport.tick(now_ms);

                let t = self.transport.elapsed_secs();
                let (lyric, images) = if self.transport.has_started() {
                    (self.cues.lyric_at(t), self.cues.images_at(t))
                } else {
                    (None, Vec::new())
                };
                OverlayFrame {
                    elapsed_secs: t,
                    playing: self.transport.is_playing(),
                    lyric,
                    images,
                    ambient: &[],
                }
            }
            PlaybackMode::Random => {
                self.ambient.tick(now_ms);
                OverlayFrame {
                    elapsed_secs: 0.0,
                    playing: false,
                    lyric: None,
                    images: Vec::new(),
                    ambient: self.ambient.items(),
                }
            }
        }
    }
}
