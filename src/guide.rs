//! # Versesync guide (v0.1.0)
//!
//! Versesync is the timeline core of a music-synced lyric overlay. It owns
//! exactly three things:
//!
//! - [`CueTable`](crate::CueTable): the compiled, immutable schedule of lyric
//!   and image cues
//! - [`Transport`](crate::Transport): the playback state machine that keeps a
//!   single authoritative elapsed time
//! - [`OverlaySession`](crate::OverlaySession): the facade that serializes
//!   timer ticks, external reports, and user commands into one state path
//!
//! Everything visual (DOM/CSS, sprite choreography, easing) lives outside
//! this crate and only consumes [`OverlayFrame`](crate::OverlayFrame)
//! snapshots.
//!
//! ## Time model
//!
//! The crate never reads the system clock. Every time-dependent call takes a
//! `now_ms` wall-clock timestamp from the caller, and elapsed time is
//! extrapolated from an anchor: `elapsed = (now - anchor) / 1000` while
//! playing. Pausing captures the elapsed value; resuming re-derives the
//! anchor so the position is exact regardless of how long the pause lasted.
//!
//! The external player is ground truth for transport actions but reports
//! position asynchronously and imprecisely.
//! [`reconcile`](crate::Transport::reconcile) therefore snaps only when the
//! disagreement
//! exceeds [`DRIFT_SNAP_SECS`](crate::DRIFT_SNAP_SECS) (a seek) or when the
//! timeline is not playing at all; smaller deltas are jitter and leave local
//! extrapolation untouched.
//!
//! ## End to end
//!
//! ```rust
//! use versesync::{CueSheet, CueTable, OverlaySession, PlaybackReport};
//!
//! # fn main() -> versesync::VersesyncResult<()> {
//! let sheet = CueSheet::from_json_str(
//!     r#"{
//!         "seed": 7,
//!         "templates": {
//!             "big_impact": {
//!                 "position": { "x": 50.0, "y": 40.0 },
//!                 "font_size": 3.0,
//!                 "font_family": "Impact, sans-serif",
//!                 "display_secs": 6.0
//!             }
//!         },
//!         "lyrics": [
//!             { "time_secs": 26.0, "text": "Di seluruh tempat", "template": "big_impact" }
//!         ],
//!         "images": []
//!     }"#,
//! )?;
//! let table = CueTable::compile(&sheet)?;
//! let mut session = OverlaySession::new(table);
//!
//! // The embedded player reports it is 27s into the track.
//! session.handle_report(
//!     PlaybackReport {
//!         position_ms: 27_000,
//!         duration_ms: 180_000,
//!         is_buffering: false,
//!         is_paused: false,
//!     },
//!     0,
//! );
//!
//! // 500ms later the 100ms render timer asks what to draw.
//! let frame = session.frame(500);
//! assert!((frame.elapsed_secs - 27.5).abs() < 1e-9);
//! assert_eq!(frame.lyric.unwrap().text, "Di seluruh tempat");
//! # Ok(())
//! # }
//! ```
//!
//! ## Cue semantics
//!
//! Lyric cues have "most recent wins" semantics: the cue with the greatest
//! trigger time `<= t` is active and persists until superseded. Image cues
//! have a bounded window, inclusive at both ends, and overlapping windows are
//! all active at once. Each image cue carries a
//! [`SpritePose`](crate::SpritePose) derived once from the sheet seed, so a
//! renderer re-querying an active cue always sees the same instance.
