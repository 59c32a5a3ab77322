use super::Rgb;
use crate::attributes::{ENHANCED_HUE_MAX, HUE_MAX};

/// Scale the hue attribute is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HueDomain {
    /// 8-bit `CurrentHue`, full circle at `HUE_MAX`
    Standard,
    /// 16-bit `EnhancedCurrentHue`, full circle at `ENHANCED_HUE_MAX`
    Enhanced,
}

impl HueDomain {
    /// Attribute value that corresponds to a full turn
    pub const fn max(self) -> u32 {
        match self {
            Self::Standard => HUE_MAX as u32,
            Self::Enhanced => ENHANCED_HUE_MAX as u32,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn degrees(self, hue: u16) -> u16 {
        ((u32::from(hue) * 360 / self.max()) % 360) as u16
    }
}

/// Convert hue/saturation/value to RGB with 8-bit fixed point arithmetic
///
/// `hue` is interpreted in `domain`; `value` is usually the current level.
#[allow(clippy::cast_possible_truncation)]
pub fn hsv_to_rgb(hue: u16, saturation: u8, value: u8, domain: HueDomain) -> Rgb {
    if saturation == 0 {
        return Rgb::new(value, value, value);
    }

    let degrees = domain.degrees(hue);
    let region = degrees / 60;
    let remainder = (degrees - region * 60) * 4;

    let v = u16::from(value);
    let s = u16::from(saturation);
    let p = ((v * (255 - s)) >> 8) as u8;
    let q = ((v * (255 - ((s * remainder) >> 8))) >> 8) as u8;
    let t = ((v * (255 - ((s * (255 - remainder)) >> 8))) >> 8) as u8;

    match region {
        0 => Rgb::new(value, t, p),
        1 => Rgb::new(q, value, p),
        2 => Rgb::new(p, value, t),
        3 => Rgb::new(p, q, value),
        4 => Rgb::new(t, p, value),
        _ => Rgb::new(value, p, q),
    }
}
