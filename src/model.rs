use std::collections::BTreeMap;

use crate::{
    core::ScreenPos,
    error::{VersesyncError, VersesyncResult},
};

/// Text transform a template applies to its lyric lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEffect {
    /// Whitespace becomes `___` (typewriter pauses).
    Underscores,
    /// One character per line.
    Vertical,
    /// Trailing ellipsis.
    Dots,
    /// Three layered lines with block characters.
    Glitch,
}

/// Named presentation slot a lyric cue indirects into.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LyricTemplate {
    pub position: ScreenPos,
    /// Relative size, 1.0 = normal.
    pub font_size: f64,
    pub font_family: String,
    /// Transition timing hint for the renderer; does not bound how long the
    /// lyric stays active.
    pub display_secs: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<TextEffect>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LyricCue {
    pub time_secs: f64,
    pub text: String,
    /// Key into [`CueSheet::templates`].
    pub template: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageEffect {
    FadeZoom,
    SlideIn,
    Bounce,
    Pulse,
}

/// Edge a sprite enters from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ImageCue {
    pub time_secs: f64,
    pub image: String,
    pub effect: ImageEffect,
    pub direction: Direction,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ScreenPos>,
}

impl ImageCue {
    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }
}

/// Static overlay configuration: lyric templates, timed lyric cues, and
/// timed image cues. Loaded once at startup and never mutated.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CueSheet {
    /// Determinism seed for per-cue presentation randomness.
    #[serde(default)]
    pub seed: u64,
    pub templates: BTreeMap<String, LyricTemplate>,
    pub lyrics: Vec<LyricCue>,
    pub images: Vec<ImageCue>,
}

impl CueSheet {
    pub fn from_json_str(s: &str) -> VersesyncResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| VersesyncError::config(format!("parse cue sheet JSON: {e}")))
    }

    pub fn validate(&self) -> VersesyncResult<()> {
        for (name, template) in &self.templates {
            template.position.validate()?;
            if !template.font_size.is_finite() || template.font_size <= 0.0 {
                return Err(VersesyncError::validation(format!(
                    "template '{name}' font_size must be > 0"
                )));
            }
            if !template.display_secs.is_finite() || template.display_secs <= 0.0 {
                return Err(VersesyncError::validation(format!(
                    "template '{name}' display_secs must be > 0"
                )));
            }
        }

        let mut prev = f64::NEG_INFINITY;
        for cue in &self.lyrics {
            if !cue.time_secs.is_finite() || cue.time_secs < 0.0 {
                return Err(VersesyncError::validation(format!(
                    "lyric '{}' has invalid trigger time",
                    cue.text
                )));
            }
            if cue.time_secs < prev {
                return Err(VersesyncError::validation(format!(
                    "lyric cues must be ordered ascending by time (violated at {}s)",
                    cue.time_secs
                )));
            }
            prev = cue.time_secs;
            if !self.templates.contains_key(&cue.template) {
                return Err(VersesyncError::validation(format!(
                    "lyric at {}s references missing template '{}'",
                    cue.time_secs, cue.template
                )));
            }
        }

        for cue in &self.images {
            if !cue.time_secs.is_finite() || cue.time_secs < 0.0 {
                return Err(VersesyncError::validation(format!(
                    "image '{}' has invalid trigger time",
                    cue.image
                )));
            }
            if cue.duration_ms == 0 {
                return Err(VersesyncError::validation(format!(
                    "image '{}' duration_ms must be > 0",
                    cue.image
                )));
            }
            if let Some(pos) = cue.position {
                pos.validate()?;
            }
        }

        Ok(())
    }
}
