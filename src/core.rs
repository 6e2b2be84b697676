use crate::error::{VersesyncError, VersesyncResult};

/// Placement on screen as a percentage of the viewport, each axis in `0..=100`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScreenPos {
    pub x: f64,
    pub y: f64,
}

impl ScreenPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both axes into the visible `0..=100` range.
    ///
    /// Non-finite axes clamp to the screen center.
    pub fn clamped(self) -> Self {
        fn clamp_axis(v: f64) -> f64 {
            if v.is_finite() { v.clamp(0.0, 100.0) } else { 50.0 }
        }
        Self {
            x: clamp_axis(self.x),
            y: clamp_axis(self.y),
        }
    }

    pub fn validate(self) -> VersesyncResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(VersesyncError::validation("ScreenPos axes must be finite"));
        }
        if !(0.0..=100.0).contains(&self.x) || !(0.0..=100.0).contains(&self.y) {
            return Err(VersesyncError::validation(
                "ScreenPos axes must be within 0..=100",
            ));
        }
        Ok(())
    }
}

/// Seeded FNV-1a 64 over a string. The crate's stable hash for deriving
/// per-cue randomness streams from a sheet seed.
pub(crate) fn stable_hash64(seed: u64, s: &str) -> u64 {
    let mut h = 0xcbf2_9ce4_8422_2325u64 ^ seed;
    for &b in s.as_bytes() {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x0000_0100_0000_01B3);
    }
    h
}

/// Small deterministic generator (xorshift64*) for presentation randomness.
///
/// Identical seeds produce identical streams, which is what keeps compiled
/// cue tables and ambient-mode output reproducible.
#[derive(Clone, Debug)]
pub struct SeededRng(u64);

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        // xorshift state must be non-zero.
        Self(seed | 1)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[lo, hi)`.
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = (self.next_u64() % items.len() as u64) as usize;
        Some(&items[idx])
    }
}
