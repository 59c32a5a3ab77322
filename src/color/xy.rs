//! CIE 1931 chromaticity to sRGB.

use super::Rgb;
use crate::attributes::LEVEL_MAX;
use crate::math::{nth_root, power, round_half_up};

const SRGB_LINEAR_THRESHOLD: f32 = 0.003_130_8;

/// XYZ to linear sRGB, D65 reference white
const XYZ_TO_SRGB: [[f32; 3]; 3] = [
    [3.240_454_2, -1.537_138_5, -0.498_531_4],
    [-0.969_266, 1.876_010_8, 0.041_556],
    [0.055_643_4, -0.204_025_9, 1.057_225_2],
];

/// sRGB transfer function for a linear component
///
/// The `1/2.4` exponent is approximated as `5/11`. A failed root yields `0.0`.
pub fn linear_to_srgb(value: f32) -> f32 {
    if value <= SRGB_LINEAR_THRESHOLD {
        return 12.92 * value;
    }
    let root = nth_root(value, 11);
    if root.is_nan() {
        return 0.0;
    }
    1.055 * power(root, 5) - 0.055
}

/// Convert `CurrentX`/`CurrentY` (scaled by 65536) and a level to RGB
///
/// Out of gamut colors are rescaled so the brightest component is 255,
/// which keeps the hue instead of clipping it.
pub fn xy_to_rgb(x: u16, y: u16, level: u8) -> Rgb {
    let cx = f32::from(x) / 65536.0;
    let cy = f32::from(y) / 65536.0;
    let cz = 1.0 - cx - cy;

    let luminance = f32::from(level) / f32::from(LEVEL_MAX);
    let (big_x, big_z) = if y == 0 {
        (0.0, 0.0)
    } else {
        (cx * luminance / cy, cz * luminance / cy)
    };

    let mut rgb = XYZ_TO_SRGB.map(|row| {
        let linear = big_x * row[0] + luminance * row[1] + big_z * row[2];
        linear_to_srgb(libm::fmaxf(linear, 0.0))
    });

    let peak = libm::fmaxf(rgb[0], libm::fmaxf(rgb[1], rgb[2]));
    if peak > 1.0 {
        for component in &mut rgb {
            *component /= peak;
        }
    }

    Rgb::new(to_channel(rgb[0]), to_channel(rgb[1]), to_channel(rgb[2]))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(component: f32) -> u8 {
    round_half_up(component * 255.0).clamp(0, 255) as u8
}
