//! Ad hoc random-mode lyric generator.
//!
//! Independent of the playback transport: items spawn on a fixed cadence and
//! expire on their own timers. Nothing here synchronizes with elapsed track
//! time, and the generator shares no state with [`crate::Transport`].

use crate::core::{ScreenPos, SeededRng};

/// Steady-state spawn cadence once the initial burst has drained.
pub const SPAWN_INTERVAL_MS: i64 = 800;
/// Items spawned in quick succession when the generator activates.
const BURST_COUNT: usize = 3;
const BURST_SPACING_MS: i64 = 500;
/// Live-item bound; the oldest item is evicted past this.
pub const MAX_ITEMS: usize = 16;

const FONT_FAMILIES: &[&str] = &["monospace", "serif", "sans-serif"];
const CUSTOM_FONTS: &[&str] = &[
    "Arial, sans-serif",
    "Georgia, serif",
    "Times New Roman, serif",
    "Helvetica, sans-serif",
    "Courier New, monospace",
    "Verdana, sans-serif",
    "Impact, sans-serif",
    "Comic Sans MS, cursive",
    "Trebuchet MS, sans-serif",
    "Palatino, serif",
    "Garamond, serif",
    "Futura, sans-serif",
];

/// One transient floating lyric with randomized presentation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AmbientLyric {
    pub id: u64,
    pub text: String,
    pub position: ScreenPos,
    pub scale: f64,
    pub opacity: f64,
    /// Relative size, 1.0 = normal.
    pub font_size: f64,
    pub blur_px: f64,
    pub skew_deg: f64,
    pub font_family: String,
    pub duration_secs: f64,
    expires_at_ms: i64,
}

pub struct AmbientLyrics {
    pool: Vec<String>,
    rng: SeededRng,
    items: Vec<AmbientLyric>,
    next_id: u64,
    next_spawn_ms: Option<i64>,
    burst_remaining: usize,
}

impl AmbientLyrics {
    pub fn new(pool: Vec<String>, seed: u64) -> Self {
        Self {
            pool,
            rng: SeededRng::new(seed),
            items: Vec::new(),
            next_id: 0,
            next_spawn_ms: None,
            burst_remaining: 0,
        }
    }

    pub fn items(&self) -> &[AmbientLyric] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.next_spawn_ms = None;
        self.burst_remaining = 0;
    }

    /// Expire old items and spawn due ones. Safe to call at any cadence.
    pub fn tick(&mut self, now_ms: i64) -> &[AmbientLyric] {
        self.items.retain(|item| item.expires_at_ms > now_ms);
        if self.pool.is_empty() {
            return &self.items;
        }

        if self.next_spawn_ms.is_none() {
            self.next_spawn_ms = Some(now_ms);
            self.burst_remaining = BURST_COUNT;
        }

        loop {
            let Some(due) = self.next_spawn_ms else { break };
            if now_ms < due {
                break;
            }
            self.spawn(due);
            let step = if self.burst_remaining > 1 {
                self.burst_remaining -= 1;
                BURST_SPACING_MS
            } else {
                SPAWN_INTERVAL_MS
            };
            self.next_spawn_ms = Some(due + step);
        }

        &self.items
    }

    fn spawn(&mut self, at_ms: i64) {
        let base = match self.rng.pick(&self.pool) {
            Some(line) => line.clone(),
            None => return,
        };
        let text = self.style_text(&base);

        let duration_secs = self.rng.range_f64(2.0, 5.0);
        let font_family = if self.rng.next_f64() > 0.5 {
            pick_str(&mut self.rng, FONT_FAMILIES)
        } else {
            pick_str(&mut self.rng, CUSTOM_FONTS)
        };

        if self.items.len() >= MAX_ITEMS {
            self.items.remove(0);
        }
        self.items.push(AmbientLyric {
            id: self.next_id,
            text,
            position: ScreenPos::new(
                self.rng.range_f64(10.0, 90.0),
                self.rng.range_f64(10.0, 90.0),
            ),
            scale: self.rng.range_f64(0.5, 1.3),
            opacity: self.rng.range_f64(0.4, 1.0),
            font_size: self.rng.range_f64(0.8, 2.3),
            blur_px: self.rng.range_f64(0.0, 1.0),
            skew_deg: self.rng.range_f64(-10.0, 10.0),
            font_family,
            duration_secs,
            expires_at_ms: at_ms + (duration_secs * 1000.0) as i64,
        });
        self.next_id += 1;
    }

    /// Typewriter-ish styling variants applied to the pooled line.
    fn style_text(&mut self, base: &str) -> String {
        match self.rng.next_u64() % 8 {
            0 => base.to_string(),
            1 => {
                let gap = if self.rng.next_f64() > 0.7 { "___" } else { "_" };
                replace_whitespace(base, gap)
            }
            2 => format!("{base}..."),
            3 => format!("{base}....."),
            4 => {
                let gap = if self.rng.next_f64() > 0.5 { "__" } else { "_" };
                format!("{}...", replace_whitespace(base, gap))
            }
            5 => join_chars(base, "\n"),
            6 => join_chars(base, "\n\n"),
            7 => base
                .split(' ')
                .map(|word| {
                    if self.rng.next_f64() > 0.5 {
                        join_chars(word, "\n")
                    } else {
                        word.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join("  "),
            _ => unreachable!(),
        }
    }
}

fn replace_whitespace(text: &str, gap: &str) -> String {
    let mut out = String::with_capacity(text.len() * gap.len());
    for c in text.chars() {
        if c.is_whitespace() {
            out.push_str(gap);
        } else {
            out.push(c);
        }
    }
    out
}

fn join_chars(text: &str, sep: &str) -> String {
    let mut out = String::with_capacity(text.len() * (1 + sep.len()));
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push(c);
    }
    out
}

fn pick_str(rng: &mut SeededRng, options: &[&str]) -> String {
    rng.pick(options).copied().unwrap_or("sans-serif").to_string()
}
