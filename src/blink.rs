//! Square-wave on/off override used for identify and status indication.

use embassy_time::Duration;

/// What the controller should do after a blink transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkStep {
    /// Drive the outputs to `output` and wait `next`
    Toggle { output: bool, next: Duration },
    /// Restore the outputs to `output` and stop the timer
    Finish { output: bool },
}

/// Blink oscillator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkState {
    pub on_time: Duration,
    pub off_time: Duration,
    /// Full cycles left, zero blinks until stopped
    pub remaining_cycles: u16,
    pub original_on_off: bool,
    pub current_on_off: bool,
    running: bool,
}

impl BlinkState {
    pub const fn new() -> Self {
        Self {
            on_time: Duration::from_ticks(0),
            off_time: Duration::from_ticks(0),
            remaining_cycles: 0,
            original_on_off: false,
            current_on_off: false,
            running: false,
        }
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Start blinking from `on_off`
    ///
    /// While already running only the original state and the cycle count are
    /// captured again and `None` is returned. Otherwise the output flips
    /// right away.
    pub fn start(
        &mut self,
        on_off: bool,
        cycles: u16,
        on_time: Duration,
        off_time: Duration,
    ) -> Option<BlinkStep> {
        self.original_on_off = on_off;
        self.remaining_cycles = cycles;
        if self.running {
            return None;
        }

        self.running = true;
        self.on_time = on_time;
        self.off_time = off_time;
        self.current_on_off = !on_off;
        Some(self.toggle_step())
    }

    /// Advance on timer expiry
    ///
    /// Each return to the original state completes one cycle.
    pub fn tick(&mut self) -> BlinkStep {
        if self.current_on_off == self.original_on_off && self.remaining_cycles > 0 {
            self.remaining_cycles -= 1;
            if self.remaining_cycles == 0 {
                self.running = false;
                return BlinkStep::Finish {
                    output: self.original_on_off,
                };
            }
        }

        self.current_on_off = !self.current_on_off;
        self.toggle_step()
    }

    /// Force stop; returns the output to restore if a blink was running
    pub fn stop(&mut self) -> Option<bool> {
        if !self.running {
            return None;
        }
        self.running = false;
        self.remaining_cycles = 0;
        Some(self.original_on_off)
    }

    const fn toggle_step(&self) -> BlinkStep {
        let next = if self.current_on_off {
            self.on_time
        } else {
            self.off_time
        };
        BlinkStep::Toggle {
            output: self.current_on_off,
            next,
        }
    }
}

impl Default for BlinkState {
    fn default() -> Self {
        Self::new()
    }
}
