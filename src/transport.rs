//! Playback transport: the authoritative elapsed-time state machine,
//! reconciled against an external player's asynchronous position reports.
//!
//! The transport never reads a clock. Callers pass `now_ms` into every
//! time-dependent operation, which keeps the whole state machine
//! deterministic under test.

use tracing::debug;

/// How cues are driven: from the cue table by elapsed time, or ad hoc.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    Random,
    Timed,
}

/// One playback update from the external source, delivered at its own cadence.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct PlaybackReport {
    pub position_ms: u64,
    pub duration_ms: u64,
    pub is_buffering: bool,
    pub is_paused: bool,
}

/// Local/external disagreement beyond this many seconds is treated as an
/// authoritative seek; anything smaller is report jitter and ignored.
pub const DRIFT_SNAP_SECS: f64 = 2.0;

/// Recommended caller cadence for [`Transport::tick`].
pub const TICK_INTERVAL_MS: i64 = 100;

/// What [`Transport::reconcile`] decided to do with a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reconciled {
    /// Track stopped or restarted; state was fully reset.
    Reset,
    /// The report was authoritative (first sync or seek); local clock snapped.
    Snapped,
    /// External source paused; elapsed captured for resume.
    Paused,
    /// Within the drift threshold; local extrapolation stays authoritative.
    Held,
    /// Report does not apply in the current mode/state.
    Ignored,
}

/// Playback state machine.
///
/// Invariants:
/// - `playing` implies `anchor_ms` is set; elapsed time never advances
///   without an anchor.
/// - `paused_at_secs` is set only while `paused`, and is cleared on every
///   resume and reset.
#[derive(Clone, Debug)]
pub struct Transport {
    mode: PlaybackMode,
    playing: bool,
    paused: bool,
    elapsed_secs: f64,
    anchor_ms: Option<i64>,
    paused_at_secs: Option<f64>,
}

impl Transport {
    pub fn new(mode: PlaybackMode) -> Self {
        Self {
            mode,
            playing: false,
            paused: false,
            elapsed_secs: 0.0,
            anchor_ms: None,
            paused_at_secs: None,
        }
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Authoritative position in the timeline, in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Wall-clock anchor the elapsed time extrapolates from while playing.
    pub fn anchor_ms(&self) -> Option<i64> {
        self.anchor_ms
    }

    /// `true` once the timeline has started at least once since the last reset.
    pub fn has_started(&self) -> bool {
        self.anchor_ms.is_some()
    }

    /// Switch modes. Always resets playback state; while `Random`, `tick` and
    /// `reconcile` are ignored until switched back.
    pub fn set_mode(&mut self, mode: PlaybackMode) {
        self.mode = mode;
        self.reset();
    }

    /// Start or resume the timeline.
    ///
    /// Paused: resume from the captured position. Never started: start from
    /// zero. Otherwise: re-anchor at the current elapsed time. Calling while
    /// already playing is a no-op, so repeated calls cannot accumulate drift
    /// from re-anchoring.
    pub fn start(&mut self, now_ms: i64) {
        if self.mode != PlaybackMode::Timed || self.playing {
            return;
        }
        if let Some(at) = self.paused_at_secs.take() {
            self.elapsed_secs = at;
            self.anchor_ms = Some(now_ms - secs_to_ms(at));
        } else if self.anchor_ms.is_none() {
            self.elapsed_secs = 0.0;
            self.anchor_ms = Some(now_ms);
        } else {
            self.anchor_ms = Some(now_ms - secs_to_ms(self.elapsed_secs));
        }
        self.paused = false;
        self.playing = true;
    }

    /// Pause, capturing the elapsed time computed at call time via the anchor.
    /// A subsequent [`Transport::start`] resumes from exactly this position.
    pub fn pause(&mut self, now_ms: i64) {
        self.tick(now_ms);
        self.paused_at_secs = Some(self.elapsed_secs);
        self.paused = true;
        self.playing = false;
    }

    /// Return to the initial state; all cues clear.
    pub fn reset(&mut self) {
        self.playing = false;
        self.paused = false;
        self.elapsed_secs = 0.0;
        self.anchor_ms = None;
        self.paused_at_secs = None;
    }

    /// Advance the local clock by extrapolating from the anchor. Callers run
    /// this on a fixed cadence ([`TICK_INTERVAL_MS`]); it has no other effect.
    pub fn tick(&mut self, now_ms: i64) {
        if self.mode != PlaybackMode::Timed || !self.playing {
            return;
        }
        if let Some(anchor) = self.anchor_ms {
            self.elapsed_secs = (now_ms - anchor) as f64 / 1000.0;
        }
    }

    /// Fold one external playback report into local state.
    ///
    /// The external source is ground truth for transport actions (seek,
    /// external pause, stop) but its reports are noisy and low-frequency, so
    /// disagreements within [`DRIFT_SNAP_SECS`] leave local extrapolation
    /// untouched.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn reconcile(&mut self, report: PlaybackReport, now_ms: i64) -> Reconciled {
        if self.mode != PlaybackMode::Timed {
            return Reconciled::Ignored;
        }
        // Compare against the extrapolated position, not the last tick's.
        self.tick(now_ms);

        if report.position_ms == 0 && report.is_paused {
            debug!("external source stopped at 0, resetting timeline");
            self.reset();
            return Reconciled::Reset;
        }

        if !report.is_paused && !report.is_buffering {
            let reported_secs = report.position_ms as f64 / 1000.0;
            if !self.playing || (self.elapsed_secs - reported_secs).abs() > DRIFT_SNAP_SECS {
                debug!(
                    reported_secs,
                    local_secs = self.elapsed_secs,
                    "snapping to external position"
                );
                self.elapsed_secs = reported_secs;
                self.anchor_ms = Some(now_ms - report.position_ms as i64);
                self.playing = true;
                self.paused = false;
                self.paused_at_secs = None;
                return Reconciled::Snapped;
            }
            return Reconciled::Held;
        }

        if report.is_paused && self.playing {
            debug!(elapsed_secs = self.elapsed_secs, "external source paused");
            self.pause(now_ms);
            return Reconciled::Paused;
        }

        Reconciled::Ignored
    }
}

fn secs_to_ms(secs: f64) -> i64 {
    (secs * 1000.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_report(position_ms: u64) -> PlaybackReport {
        PlaybackReport {
            position_ms,
            duration_ms: 180_000,
            is_buffering: false,
            is_paused: false,
        }
    }

    fn paused_report(position_ms: u64) -> PlaybackReport {
        PlaybackReport {
            is_paused: true,
            ..playing_report(position_ms)
        }
    }

    fn timed() -> Transport {
        Transport::new(PlaybackMode::Timed)
    }

    #[test]
    fn first_start_begins_at_zero() {
        let mut t = timed();
        t.start(1_000);
        assert!(t.is_playing());
        assert_eq!(t.elapsed_secs(), 0.0);
        t.tick(3_500);
        assert_eq!(t.elapsed_secs(), 2.5);
    }

    #[test]
    fn tick_is_monotonic_within_a_session() {
        let mut t = timed();
        t.start(0);
        let mut prev = 0.0;
        for now in (0..5_000).step_by(100) {
            t.tick(now);
            assert!(t.elapsed_secs() >= prev);
            prev = t.elapsed_secs();
        }
    }

    #[test]
    fn tick_without_playing_does_nothing() {
        let mut t = timed();
        t.tick(10_000);
        assert_eq!(t.elapsed_secs(), 0.0);
        assert!(!t.has_started());
    }

    #[test]
    fn pause_then_start_resumes_exactly() {
        let mut t = timed();
        t.start(0);
        t.pause(4_200);
        assert!(t.is_paused());
        assert_eq!(t.elapsed_secs(), 4.2);

        // Wall time keeps moving while paused; resume must not jump.
        t.start(60_000);
        assert_eq!(t.elapsed_secs(), 4.2);
        assert!(!t.is_paused());
        t.tick(61_000);
        assert!((t.elapsed_secs() - 5.2).abs() < 1e-9);
    }

    #[test]
    fn start_while_playing_is_a_noop() {
        let mut t = timed();
        t.start(0);
        t.tick(2_000);
        let anchor = t.anchor_ms();
        t.start(9_999);
        assert_eq!(t.anchor_ms(), anchor);
        assert_eq!(t.elapsed_secs(), 2.0);
    }

    #[test]
    fn start_after_reset_begins_at_zero_again() {
        let mut t = timed();
        t.start(0);
        t.tick(3_000);
        t.reset();
        t.start(100);
        t.tick(1_100);
        assert_eq!(t.elapsed_secs(), 1.0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut t = timed();
        t.start(0);
        t.tick(5_000);
        t.pause(5_000);
        t.reset();
        assert!(!t.is_playing());
        assert!(!t.is_paused());
        assert_eq!(t.elapsed_secs(), 0.0);
        assert_eq!(t.anchor_ms(), None);
    }

    #[test]
    fn reconcile_snaps_when_not_playing() {
        let mut t = timed();
        let action = t.reconcile(playing_report(5_000), 100_000);
        assert_eq!(action, Reconciled::Snapped);
        assert!(t.is_playing());
        assert!((t.elapsed_secs() - 5.0).abs() < 1e-9);
        // Anchor placed so extrapolation continues from the reported position.
        t.tick(101_000);
        assert!((t.elapsed_secs() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn reconcile_holds_within_drift_threshold() {
        let mut t = timed();
        t.start(0);
        t.tick(10_000);
        let anchor = t.anchor_ms();

        // 1.5s disagreement: jitter, not a seek.
        let action = t.reconcile(playing_report(11_500), 10_000);
        assert_eq!(action, Reconciled::Held);
        assert_eq!(t.anchor_ms(), anchor);
        assert_eq!(t.elapsed_secs(), 10.0);
    }

    #[test]
    fn reconcile_snaps_on_large_drift() {
        let mut t = timed();
        t.start(0);
        t.tick(10_000);

        // 35s ahead: user seeked.
        let action = t.reconcile(playing_report(45_000), 10_000);
        assert_eq!(action, Reconciled::Snapped);
        assert!((t.elapsed_secs() - 45.0).abs() < 1e-9);
        assert!(t.is_playing());
    }

    #[test]
    fn reconcile_zero_paused_resets() {
        let mut t = timed();
        t.start(0);
        t.tick(30_000);
        let action = t.reconcile(paused_report(0), 30_000);
        assert_eq!(action, Reconciled::Reset);
        assert_eq!(t.elapsed_secs(), 0.0);
        assert!(!t.is_playing());
        assert_eq!(t.anchor_ms(), None);
    }

    #[test]
    fn reconcile_external_pause_captures_position() {
        let mut t = timed();
        t.start(0);
        let action = t.reconcile(paused_report(7_000), 7_000);
        assert_eq!(action, Reconciled::Paused);
        assert!(t.is_paused());
        assert_eq!(t.elapsed_secs(), 7.0);

        t.start(20_000);
        assert_eq!(t.elapsed_secs(), 7.0);
    }

    #[test]
    fn reconcile_paused_while_not_playing_is_ignored() {
        let mut t = timed();
        let action = t.reconcile(paused_report(7_000), 7_000);
        assert_eq!(action, Reconciled::Ignored);
        assert!(!t.is_paused());
    }

    #[test]
    fn buffering_reports_do_not_snap() {
        let mut t = timed();
        let report = PlaybackReport {
            is_buffering: true,
            ..playing_report(5_000)
        };
        assert_eq!(t.reconcile(report, 0), Reconciled::Ignored);
        assert!(!t.is_playing());
    }

    #[test]
    fn random_mode_ignores_reports_and_ticks() {
        let mut t = Transport::new(PlaybackMode::Random);
        assert_eq!(t.reconcile(playing_report(5_000), 0), Reconciled::Ignored);
        t.start(0);
        t.tick(9_000);
        assert_eq!(t.elapsed_secs(), 0.0);
        assert!(!t.is_playing());
    }

    #[test]
    fn set_mode_resets_state() {
        let mut t = timed();
        t.start(0);
        t.tick(12_000);
        t.set_mode(PlaybackMode::Random);
        assert_eq!(t.elapsed_secs(), 0.0);
        assert!(!t.is_playing());

        t.set_mode(PlaybackMode::Timed);
        assert_eq!(t.reconcile(playing_report(5_000), 0), Reconciled::Snapped);
    }
}
