#![no_std]

pub mod attributes;
pub mod blink;
pub mod color;
pub mod command;
pub mod controller;
pub mod math;
pub mod queue;
pub mod ramp;
pub mod timer;

pub use attributes::{ColorMode, EnhancedColorMode, LightAttributes};
pub use color::{ColorOutput, Duty, PwmChannel, Rgb};
pub use command::{AddressInfo, Command, DecodeError, Status};
pub use controller::{ColorRamps, LightConfig, LightController, PollResult};
pub use queue::{CommandEnvelope, CommandQueue, CommandReceiver, CommandSender};
pub use ramp::{DualRampState, RampBounds, RampState};
pub use timer::{TimerAction, TimerEvent};

pub use embassy_time::{Duration, Instant};

/// Abstract PWM driver trait
///
/// Implement this trait to drive the red, green, blue, cool white and warm
/// white channels of a bulb. The light controller is generic over it.
pub trait ActuatorDriver {
    /// Set the duty of one channel
    fn set_duty(&mut self, channel: PwmChannel, duty: Duty);
    /// Enable the output of one channel
    fn start(&mut self, channel: PwmChannel);
    /// Disable the output of one channel
    fn stop(&mut self, channel: PwmChannel);
}

/// Status indicator notified whenever a command selects a color mode
pub trait Indicator {
    fn show_color_mode(&mut self, mode: EnhancedColorMode);
}

/// Status LEDs lit for a color mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusPattern {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl StatusPattern {
    /// XY is green, hue/saturation (plain or enhanced) blue, color
    /// temperature red
    pub const fn for_mode(mode: EnhancedColorMode) -> Self {
        match mode.color_mode() {
            ColorMode::Xy => Self {
                red: false,
                green: true,
                blue: false,
            },
            ColorMode::HueSaturation => Self {
                red: false,
                green: false,
                blue: true,
            },
            ColorMode::ColorTemperature => Self {
                red: true,
                green: false,
                blue: false,
            },
        }
    }
}
