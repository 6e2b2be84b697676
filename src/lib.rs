#![forbid(unsafe_code)]

pub mod ambient;
pub mod core;
pub mod cues;
pub mod error;
pub mod guide;
pub mod model;
pub mod session;
pub mod text_fx;
pub mod transport;

pub use ambient::{AmbientLyric, AmbientLyrics};
pub use crate::core::{ScreenPos, SeededRng};
pub use cues::{CueTable, ResolvedImage, ResolvedLyric, SpritePose};
pub use error::{VersesyncError, VersesyncResult};
pub use model::{CueSheet, Direction, ImageCue, ImageEffect, LyricCue, LyricTemplate, TextEffect};
pub use session::{OverlayFrame, OverlaySession, PlayerCommand};
pub use transport::{
    DRIFT_SNAP_SECS, PlaybackMode, PlaybackReport, Reconciled, TICK_INTERVAL_MS, Transport,
};
