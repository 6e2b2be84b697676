use crate::{
    core::{ScreenPos, SeededRng, stable_hash64},
    error::{VersesyncError, VersesyncResult},
    model::{CueSheet, Direction, ImageEffect},
    text_fx,
};

/// A lyric cue with its template resolved and text effect applied.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedLyric {
    /// Definition-order index; stable identity for renderers.
    pub id: usize,
    pub time_secs: f64,
    pub text: String,
    pub position: ScreenPos,
    pub font_size: f64,
    pub font_family: String,
    pub display_secs: f64,
}

/// Per-cue presentation randomness, derived once from the sheet seed.
///
/// A pose is a pure function of `(seed, cue index)`, so re-querying an active
/// cue can never hand the renderer a different instance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SpritePose {
    pub scale: f64,
    pub rotation_deg: f64,
    pub origin: ScreenPos,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedImage {
    /// Definition-order index; stable identity for renderers.
    pub id: usize,
    pub time_secs: f64,
    pub duration_secs: f64,
    pub image: String,
    pub effect: ImageEffect,
    pub direction: Direction,
    pub pose: SpritePose,
}

impl ResolvedImage {
    /// Active window is inclusive at both ends.
    pub fn active_at(&self, t_secs: f64) -> bool {
        self.time_secs <= t_secs && t_secs <= self.time_secs + self.duration_secs
    }
}

/// Compiled, immutable cue table answering "what is active at time `t`".
#[derive(Clone, Debug)]
pub struct CueTable {
    lyrics: Vec<ResolvedLyric>,
    images: Vec<ResolvedImage>,
}

impl CueTable {
    pub fn compile(sheet: &CueSheet) -> VersesyncResult<Self> {
        sheet.validate()?;

        let mut lyrics = Vec::with_capacity(sheet.lyrics.len());
        for (id, cue) in sheet.lyrics.iter().enumerate() {
            let template = sheet.templates.get(&cue.template).ok_or_else(|| {
                VersesyncError::validation(format!("missing template '{}'", cue.template))
            })?;
            let mut rng = SeededRng::new(stable_hash64(sheet.seed, &format!("lyric:{id}")));
            lyrics.push(ResolvedLyric {
                id,
                time_secs: cue.time_secs,
                text: text_fx::apply(template.effect, &cue.text, &mut rng),
                position: template.position,
                font_size: template.font_size,
                font_family: template.font_family.clone(),
                display_secs: template.display_secs,
            });
        }

        let mut images = Vec::with_capacity(sheet.images.len());
        for (id, cue) in sheet.images.iter().enumerate() {
            let mut rng = SeededRng::new(stable_hash64(sheet.seed, &format!("image:{id}")));
            let pose = SpritePose {
                scale: rng.range_f64(0.7, 1.3),
                rotation_deg: rng.range_f64(-15.0, 15.0),
                origin: cue
                    .position
                    .map(ScreenPos::clamped)
                    .unwrap_or_else(|| {
                        ScreenPos::new(rng.range_f64(10.0, 90.0), rng.range_f64(10.0, 90.0))
                    }),
            };
            images.push(ResolvedImage {
                id,
                time_secs: cue.time_secs,
                duration_secs: cue.duration_secs(),
                image: cue.image.clone(),
                effect: cue.effect,
                direction: cue.direction,
                pose,
            });
        }

        Ok(Self { lyrics, images })
    }

    pub fn lyrics(&self) -> &[ResolvedLyric] {
        &self.lyrics
    }

    pub fn images(&self) -> &[ResolvedImage] {
        &self.images
    }

    /// The lyric with the greatest trigger time `<= t`, or `None` before the
    /// first cue. A lyric stays active until superseded; ties on trigger time
    /// resolve to the last-defined cue.
    pub fn lyric_at(&self, t_secs: f64) -> Option<&ResolvedLyric> {
        if !t_secs.is_finite() {
            return None;
        }
        let idx = self.lyrics.partition_point(|c| c.time_secs <= t_secs);
        if idx == 0 { None } else { Some(&self.lyrics[idx - 1]) }
    }

    /// All image cues whose window contains `t` (inclusive both ends).
    pub fn images_at(&self, t_secs: f64) -> Vec<&ResolvedImage> {
        if !t_secs.is_finite() {
            return Vec::new();
        }
        self.images.iter().filter(|c| c.active_at(t_secs)).collect()
    }

    /// Time at which the last cue stops changing anything on screen.
    pub fn end_secs(&self) -> f64 {
        let lyric_end = self
            .lyrics
            .last()
            .map(|c| c.time_secs + c.display_secs)
            .unwrap_or(0.0);
        let image_end = self
            .images
            .iter()
            .map(|c| c.time_secs + c.duration_secs)
            .fold(0.0, f64::max);
        lyric_end.max(image_end)
    }
}
