//! Template text effects, applied once when a cue sheet is compiled.

use crate::core::SeededRng;
use crate::model::TextEffect;

const GLITCH_CHARS: &[char] = &[
    '█', '▓', '▒', '░', '▀', '▄', '▌', '▐', '■', '□', '▪', '▫', '●', '○', '◆', '◇', '◼', '◻',
];
const GLITCH_LAYERS: usize = 3;

/// Apply a template's text effect. `rng` is only consumed by [`TextEffect::Glitch`].
pub fn apply(effect: Option<TextEffect>, text: &str, rng: &mut SeededRng) -> String {
    match effect {
        None => text.to_string(),
        Some(TextEffect::Underscores) => underscores(text),
        Some(TextEffect::Vertical) => vertical(text),
        Some(TextEffect::Dots) => format!("{text}..."),
        Some(TextEffect::Glitch) => glitch(text, rng),
    }
}

fn underscores(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    for c in text.chars() {
        if c.is_whitespace() {
            out.push_str("___");
        } else {
            out.push(c);
        }
    }
    out
}

fn vertical(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push(c);
    }
    out
}

fn glitch(text: &str, rng: &mut SeededRng) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(GLITCH_LAYERS);
    for _ in 0..GLITCH_LAYERS {
        let mut line = String::with_capacity(text.len() * 3);
        for c in text.chars() {
            if c == ' ' {
                // Keep spaces as gaps.
                line.push_str("   ");
                continue;
            }
            let roll = rng.next_f64();
            if roll < 0.3 {
                line.push(pick_char(rng, GLITCH_CHARS));
            } else if roll < 0.5 {
                line.push(c);
                line.push(c);
            } else if roll < 0.7 {
                line.push(pick_char(rng, &GLITCH_CHARS[..4]));
                line.push(c);
                line.push(pick_char(rng, &GLITCH_CHARS[..4]));
            } else {
                line.push(c);
            }
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn pick_char(rng: &mut SeededRng, chars: &[char]) -> char {
    rng.pick(chars).copied().unwrap_or('█')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> SeededRng {
        SeededRng::new(99)
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(apply(None, "halo dunia", &mut rng()), "halo dunia");
    }

    #[test]
    fn underscores_replace_whitespace() {
        assert_eq!(
            apply(Some(TextEffect::Underscores), "a b c", &mut rng()),
            "a___b___c"
        );
    }

    #[test]
    fn vertical_splits_chars_onto_lines() {
        assert_eq!(apply(Some(TextEffect::Vertical), "abc", &mut rng()), "a\nb\nc");
    }

    #[test]
    fn dots_append_ellipsis() {
        assert_eq!(apply(Some(TextEffect::Dots), "pelan", &mut rng()), "pelan...");
    }

    #[test]
    fn glitch_emits_three_layers_and_is_deterministic() {
        let a = apply(Some(TextEffect::Glitch), "ombak biru", &mut rng());
        let b = apply(Some(TextEffect::Glitch), "ombak biru", &mut rng());
        assert_eq!(a, b);
        assert_eq!(a.lines().count(), 3);
    }

    #[test]
    fn glitch_keeps_spaces_as_gaps() {
        let out = apply(Some(TextEffect::Glitch), "a b", &mut rng());
        for line in out.lines() {
            assert!(line.contains("   "));
        }
    }
}
