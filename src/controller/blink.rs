use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::LightController;
use crate::blink::BlinkStep;
use crate::timer::{TimerAction, TimerEvent};
use crate::{ActuatorDriver, Indicator};

impl<D, U, const COMMANDS: usize> LightController<'_, D, U, COMMANDS>
where
    D: ActuatorDriver,
    U: Indicator,
{
    /// Blink the outputs for identify or status indication
    ///
    /// `cycles == 0` blinks until [`Self::stop_blink`]. The on/off attribute
    /// is not touched.
    pub fn start_blink(&mut self, cycles: u16, on_time: Duration, off_time: Duration) {
        let on_off = self.attributes.on_off.on_off;
        if let Some(BlinkStep::Toggle { output, next }) =
            self.blink.start(on_off, cycles, on_time, off_time)
        {
            #[cfg(feature = "esp32-log")]
            println!("[LightController.start_blink] {} cycles", cycles);

            self.apply_power(output);
            self.start_timer(TimerEvent::Blink, next);
        }
    }

    /// Cancel blinking and restore the output state from before it started
    pub fn stop_blink(&mut self) {
        if let Some(output) = self.blink.stop() {
            #[cfg(feature = "esp32-log")]
            println!("[LightController.stop_blink] restoring {}", output);

            self.stop_timer(TimerEvent::Blink);
            self.apply_power(output);
        }
    }

    pub const fn is_blinking(&self) -> bool {
        self.blink.is_running()
    }

    pub(super) fn blink_tick(&mut self) -> TimerAction {
        match self.blink.tick() {
            BlinkStep::Toggle { output, next } => {
                self.apply_power(output);
                TimerAction::Continue(next)
            }
            BlinkStep::Finish { output } => {
                self.apply_power(output);
                TimerAction::Stop
            }
        }
    }
}
