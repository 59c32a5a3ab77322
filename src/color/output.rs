use super::{CoolWarm, Rgb};
use crate::attributes::LEVEL_MAX;

/// Duty units per gamma corrected level step
pub const FULL_DUTY_CYCLE: u16 = 100;

const FULL_SCALE: u32 = LEVEL_MAX as u32 * FULL_DUTY_CYCLE as u32;

/// Quadratic perceptual correction, `value² / LEVEL_MAX`
pub const fn gamma_correct(value: u8) -> u16 {
    (value as u16 * value as u16) / LEVEL_MAX as u16
}

/// PWM channels of the bulb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmChannel {
    Red,
    Green,
    Blue,
    Cool,
    Warm,
}

impl PwmChannel {
    pub const ALL: [Self; 5] = [Self::Red, Self::Green, Self::Blue, Self::Cool, Self::Warm];
}

/// Duty value in `level × FULL_DUTY_CYCLE` units
///
/// Full scale is `LEVEL_MAX × FULL_DUTY_CYCLE`. Hardware drivers convert it
/// with [`Duty::percent`] or [`Duty::compare_ticks`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duty(u16);

impl Duty {
    pub const OFF: Self = Self(0);

    /// Gamma correct an 8-bit channel value and scale it to duty units
    pub const fn from_channel(value: u8) -> Self {
        Self(gamma_correct(value) * FULL_DUTY_CYCLE)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Duty cycle in percent, saturating at 100
    #[allow(clippy::cast_possible_truncation)]
    pub fn percent(self) -> u8 {
        (u32::from(self.0) * 100 / FULL_SCALE).min(100) as u8
    }

    /// Compare value for a PWM counter with the given period
    #[allow(clippy::cast_possible_truncation)]
    pub fn compare_ticks(self, period: u32) -> u32 {
        let ticks = u64::from(self.0) * u64::from(period) / u64::from(FULL_SCALE);
        ticks.min(u64::from(period)) as u32
    }
}

/// Duty values for every channel after one refresh
///
/// The RGB and white paths are exclusive, the unused group is always zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorOutput {
    pub red: Duty,
    pub green: Duty,
    pub blue: Duty,
    pub cool: Duty,
    pub warm: Duty,
}

impl ColorOutput {
    pub const fn from_rgb(color: Rgb) -> Self {
        Self {
            red: Duty::from_channel(color.r),
            green: Duty::from_channel(color.g),
            blue: Duty::from_channel(color.b),
            cool: Duty::OFF,
            warm: Duty::OFF,
        }
    }

    pub const fn from_cool_warm(white: CoolWarm) -> Self {
        Self {
            red: Duty::OFF,
            green: Duty::OFF,
            blue: Duty::OFF,
            cool: Duty::from_channel(white.cool),
            warm: Duty::from_channel(white.warm),
        }
    }

    pub const fn duty(&self, channel: PwmChannel) -> Duty {
        match channel {
            PwmChannel::Red => self.red,
            PwmChannel::Green => self.green,
            PwmChannel::Blue => self.blue,
            PwmChannel::Cool => self.cool,
            PwmChannel::Warm => self.warm,
        }
    }
}
