// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Conversions from the cylindrical color models to 8-bit RGB.
//!
//! Both conversions split the hue circle into six sectors of 60
//! degrees each.  Sectors are half-open, `[i, i + 1)` on the scaled
//! hue, and a hue that lands exactly on a full turn wraps back to
//! sector zero.  Within a sector the two channels that are not pinned
//! to the extremes ramp linearly, so adjacent sectors agree on their
//! shared boundary.

use num::clamp;

/// An 8-bit RGB triple.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// All channels off.
    pub const BLACK: Color = Color(0, 0, 0);

    /// A gray with every channel at `v`.
    pub fn gray(v: u8) -> Color {
        Color(v, v, v)
    }
}

/// Pick the channel ordering for one of the six hue sectors.  `top`
/// is the strongest channel, `bottom` the weakest, `falling` ramps
/// down across the sector and `rising` ramps up.
#[inline]
fn sector<T: Copy>(index: usize, top: T, bottom: T, falling: T, rising: T) -> (T, T, T) {
    match index {
        0 => (top, rising, bottom),
        1 => (falling, top, bottom),
        2 => (bottom, top, rising),
        3 => (bottom, falling, top),
        4 => (rising, bottom, top),
        _ => (top, bottom, falling),
    }
}

/// Split a hue, already scaled so a full turn is 6.0, into its sector
/// index and the fractional position inside that sector.
#[inline]
fn split_hue(scaled: f64) -> (usize, f64) {
    let floor = scaled.floor();
    let index = (floor as i64).rem_euclid(6) as usize;
    (index, scaled - floor)
}

#[inline]
fn to_byte(v: f64) -> u8 {
    clamp(v, 0.0, 255.0) as u8
}

/// Hue in degrees, saturation and value as bytes.
///
/// A saturation of zero is a gray of the given value, whatever the hue.
pub fn hsv_to_rgb(hue: f64, sat: u8, val: u8) -> Color {
    if sat == 0 {
        return Color::gray(val);
    }
    let (index, fr) = split_hue(hue / 60.0);
    let (s, v) = (f64::from(sat), f64::from(val));
    let bottom = u32::from(val) * (255 - u32::from(sat)) / 255;
    let falling = v * (255.0 - s * fr) / 255.0;
    let rising = v * (255.0 - s * (1.0 - fr)) / 255.0;
    let (r, g, b) = sector(
        index,
        val,
        bottom as u8,
        to_byte(falling),
        to_byte(rising),
    );
    Color(r, g, b)
}

/// Hue, saturation and lightness, all normalized to `[0, 1]`, to
/// normalized RGB.  The hue wraps; saturation and lightness are
/// clamped.
pub fn hsl_to_unit_rgb(hue: f64, sat: f64, light: f64) -> (f64, f64, f64) {
    let sat = clamp(sat, 0.0, 1.0);
    let light = clamp(light, 0.0, 1.0);
    let v = if light <= 0.5 {
        light * (1.0 + sat)
    } else {
        light + sat - light * sat
    };
    if v <= 0.0 {
        return (light, light, light);
    }

    let m = light + light - v;
    let sv = (v - m) / v;
    let (index, fract) = split_hue(hue * 6.0);
    let vsf = v * sv * fract;
    let mid1 = m + vsf;
    let mid2 = v - vsf;
    sector(index, v, m, mid2, mid1)
}

/// Hue, saturation and lightness, all normalized to `[0, 1]`, to 8-bit
/// RGB.  Channels are scaled to 255 and rounded.
pub fn hsl_to_rgb(hue: f64, sat: f64, light: f64) -> Color {
    let (r, g, b) = hsl_to_unit_rgb(hue, sat, light);
    let scale = |c: f64| to_byte((c * 255.0).round());
    Color(scale(r), scale(g), scale(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn distance(a: (f64, f64, f64), b: (f64, f64, f64)) -> f64 {
        (a.0 - b.0)
            .abs()
            .max((a.1 - b.1).abs())
            .max((a.2 - b.2).abs())
    }

    #[test]
    fn hsv_zero_saturation_is_gray() {
        for val in (0..=255).step_by(17) {
            for hue in &[0.0, 59.9, 120.0, 300.0, 359.0] {
                assert_eq!(hsv_to_rgb(*hue, 0, val as u8), Color::gray(val as u8));
            }
        }
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 255, 255), Color(255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 255, 255), Color(0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 255, 255), Color(0, 0, 255));
        assert_eq!(hsv_to_rgb(60.0, 255, 255), Color(255, 255, 0));
    }

    #[test]
    fn hsv_full_turn_wraps_to_red() {
        assert_eq!(hsv_to_rgb(360.0, 255, 255), hsv_to_rgb(0.0, 255, 255));
    }

    #[test]
    fn hsv_is_continuous_across_sectors() {
        for k in 1..6 {
            let edge = 60.0 * f64::from(k);
            let below = hsv_to_rgb(edge - 1e-9, 200, 220);
            let at = hsv_to_rgb(edge, 200, 220);
            for (a, b) in [(below.0, at.0), (below.1, at.1), (below.2, at.2)].iter() {
                assert!((i32::from(*a) - i32::from(*b)).abs() <= 1, "sector {}", k);
            }
        }
    }

    #[test]
    fn hsl_zero_saturation_is_gray() {
        for step in 0..=10 {
            let light = f64::from(step) / 10.0;
            let (r, g, b) = hsl_to_unit_rgb(0.3, 0.0, light);
            assert!((r - light).abs() < EPSILON);
            assert!((g - light).abs() < EPSILON);
            assert!((b - light).abs() < EPSILON);
            let expected = (light * 255.0).round() as u8;
            assert_eq!(hsl_to_rgb(0.7, 0.0, light), Color::gray(expected));
        }
    }

    #[test]
    fn hsl_black_and_white() {
        assert_eq!(hsl_to_rgb(0.25, 0.6, 0.0), Color::BLACK);
        assert_eq!(hsl_to_rgb(0.25, 0.6, 1.0), Color::gray(255));
    }

    #[test]
    fn hsl_is_continuous_at_every_sector_boundary() {
        for k in 0..6 {
            let edge = f64::from(k) / 6.0;
            let below = if k == 0 { 1.0 - 1e-12 } else { edge - 1e-12 };
            let a = hsl_to_unit_rgb(below, 0.6, 0.4);
            let b = hsl_to_unit_rgb(edge, 0.6, 0.4);
            assert!(distance(a, b) < 1e-9, "discontinuity at sector {}", k);
        }
    }

    #[test]
    fn hsl_full_turn_matches_zero() {
        let a = hsl_to_unit_rgb(0.0, 0.6, 0.5);
        let b = hsl_to_unit_rgb(1.0, 0.6, 0.5);
        assert!(distance(a, b) < EPSILON);
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Color(255, 0, 0));
        assert_eq!(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), Color(0, 255, 0));
        assert_eq!(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), Color(0, 0, 255));
    }
}
