mod hsv;
mod output;
mod temperature;
mod xy;

pub use hsv::{HueDomain, hsv_to_rgb};
pub use output::{ColorOutput, Duty, FULL_DUTY_CYCLE, PwmChannel, gamma_correct};
use smart_leds::RGB8;
pub use temperature::{CoolWarm, MiredsRange, temperature_to_cool_warm};
pub use xy::{linear_to_srgb, xy_to_rgb};

pub type Rgb = RGB8;
