// Copyright (c) 2026 matrixdeck contributors

use crossterm::style::Color;

use crate::runtime::ColorMode;

pub const SCHEME_COUNT: usize = 12;
pub const TRAIL_LEN: usize = 6;

/// Fade strengths for the six trail cells, dimmest at the top of the trail,
/// brightest at the leading edge.
pub const TRAIL_ALPHA: [f32; TRAIL_LEN] = [0.1, 0.2, 0.4, 0.6, 0.6, 0.8];

/// The rotating scheme cycle. One full rotation visits all twelve in order.
pub const SCHEMES: [(u8, u8, u8); SCHEME_COUNT] = [
    (255, 0, 0),   // red
    (0, 255, 0),   // green
    (0, 255, 255), // cyan
    (255, 0, 255), // magenta
    (255, 255, 0), // yellow
    (0, 0, 255),   // blue
    (255, 128, 0), // orange
    (128, 0, 255), // purple
    (0, 255, 128), // spring green
    (255, 0, 128), // hot pink
    (128, 255, 0), // lime
    (0, 128, 255), // sky blue
];

pub const SCHEME_NAMES: [&str; SCHEME_COUNT] = [
    "red",
    "green",
    "cyan",
    "magenta",
    "yellow",
    "blue",
    "orange",
    "purple",
    "spring-green",
    "hot-pink",
    "lime",
    "sky-blue",
];

/// Colors for one rendered frame: the six trail stops of the active scheme,
/// the full-strength accent used for text and borders, and the background.
#[derive(Clone, Debug)]
pub struct Palette {
    pub trail: [Option<Color>; TRAIL_LEN],
    pub accent: Option<Color>,
    pub bg: Option<Color>,
}

fn dist2(r0: u8, g0: u8, b0: u8, r1: u8, g1: u8, b1: u8) -> i32 {
    let dr = (r0 as i32) - (r1 as i32);
    let dg = (g0 as i32) - (g1 as i32);
    let db = (b0 as i32) - (b1 as i32);
    (dr * dr) + (dg * dg) + (db * db)
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    let r6 = ((r as u16 * 5) + 127) / 255;
    let g6 = ((g as u16 * 5) + 127) / 255;
    let b6 = ((b as u16 * 5) + 127) / 255;

    let cr = CUBE_LEVELS[r6 as usize];
    let cg = CUBE_LEVELS[g6 as usize];
    let cb = CUBE_LEVELS[b6 as usize];
    let cube_idx = 16 + (36 * r6 as u8) + (6 * g6 as u8) + (b6 as u8);
    let cube_dist = dist2(r, g, b, cr, cg, cb);

    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    let gray_idx = if avg < 8 {
        16
    } else if avg > 238 {
        231
    } else {
        232 + ((avg - 8) / 10)
    };
    let (gr, gg, gb) = if gray_idx == 16 {
        (0, 0, 0)
    } else if gray_idx == 231 {
        (255, 255, 255)
    } else {
        let v = 8 + 10 * (gray_idx - 232);
        (v, v, v)
    };
    let gray_dist = dist2(r, g, b, gr, gg, gb);

    if gray_dist < cube_dist {
        gray_idx
    } else {
        cube_idx
    }
}

/// Terminals have no alpha channel; scale the channel values toward black
/// instead, which reads the same over a dark background.
fn fade_rgb(rgb: (u8, u8, u8), alpha: f32) -> (u8, u8, u8) {
    let scale = |v: u8| ((v as f32) * alpha).round().clamp(0.0, 255.0) as u8;
    (scale(rgb.0), scale(rgb.1), scale(rgb.2))
}

fn color_from_rgb(mode: ColorMode, (r, g, b): (u8, u8, u8)) -> Option<Color> {
    match mode {
        ColorMode::Mono => None,
        ColorMode::TrueColor => Some(Color::Rgb { r, g, b }),
        ColorMode::Color256 => Some(Color::AnsiValue(rgb_to_ansi256(r, g, b))),
    }
}

pub fn build_palette(scheme_idx: usize, mode: ColorMode, default_background: bool) -> Palette {
    let rgb = SCHEMES[scheme_idx % SCHEME_COUNT];

    let mut trail = [None; TRAIL_LEN];
    for (stop, slot) in trail.iter_mut().enumerate() {
        *slot = color_from_rgb(mode, fade_rgb(rgb, TRAIL_ALPHA[stop]));
    }

    let bg = if default_background {
        None
    } else {
        Some(match mode {
            ColorMode::TrueColor => Color::Rgb { r: 0, g: 0, b: 0 },
            _ => Color::AnsiValue(16),
        })
    };

    Palette {
        trail,
        accent: color_from_rgb(mode, rgb),
        bg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_schemes_with_matching_names() {
        assert_eq!(SCHEMES.len(), SCHEME_COUNT);
        assert_eq!(SCHEME_NAMES.len(), SCHEME_COUNT);
    }

    #[test]
    fn scheme_index_wraps_modulo_twelve() {
        let a = build_palette(3, ColorMode::TrueColor, true);
        let b = build_palette(3 + SCHEME_COUNT, ColorMode::TrueColor, true);
        assert_eq!(a.accent, b.accent);
    }

    #[test]
    fn trail_fades_toward_the_leading_edge() {
        let p = build_palette(1, ColorMode::TrueColor, true);
        let greens: Vec<u8> = p
            .trail
            .iter()
            .map(|c| match c {
                Some(Color::Rgb { g, .. }) => *g,
                other => panic!("expected rgb trail color, got {:?}", other),
            })
            .collect();
        assert_eq!(greens.len(), TRAIL_LEN);
        assert!(greens.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(greens[0], 26); // 255 * 0.1, rounded
        assert_eq!(greens[TRAIL_LEN - 1], 204); // 255 * 0.8
    }

    #[test]
    fn mono_mode_has_no_colors() {
        let p = build_palette(0, ColorMode::Mono, true);
        assert!(p.accent.is_none());
        assert!(p.trail.iter().all(|c| c.is_none()));
    }

    #[test]
    fn ansi256_quantizes_primaries_into_the_cube() {
        assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
        assert_eq!(rgb_to_ansi256(255, 0, 0), 196);
        assert_eq!(rgb_to_ansi256(0, 255, 0), 46);
        assert_eq!(rgb_to_ansi256(255, 255, 255), 231);
    }
}
