#![allow(dead_code)]

use myrtio_zigbee_light::{
    ActuatorDriver, AddressInfo, CommandQueue, Duty, EnhancedColorMode, Indicator, Instant,
    LightAttributes, LightConfig, LightController, PwmChannel,
};

pub const ENDPOINT: AddressInfo = AddressInfo { endpoint: 0x01 };
pub const OTHER_ENDPOINT: AddressInfo = AddressInfo { endpoint: 0x02 };

pub const QUEUE_SIZE: usize = 4;

pub type TestLight<'a> = LightController<'a, RecordingDriver, RecordingIndicator, QUEUE_SIZE>;

/// PWM driver that remembers the last duty and output state per channel
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub duties: [Duty; 5],
    pub running: [bool; 5],
    pub writes: usize,
}

impl RecordingDriver {
    pub fn duty(&self, channel: PwmChannel) -> Duty {
        self.duties[index(channel)]
    }

    pub fn is_running(&self, channel: PwmChannel) -> bool {
        self.running[index(channel)]
    }

    pub fn all_running(&self) -> bool {
        self.running.iter().all(|running| *running)
    }

    pub fn all_stopped(&self) -> bool {
        self.running.iter().all(|running| !*running)
    }
}

impl ActuatorDriver for RecordingDriver {
    fn set_duty(&mut self, channel: PwmChannel, duty: Duty) {
        self.duties[index(channel)] = duty;
        self.writes += 1;
    }

    fn start(&mut self, channel: PwmChannel) {
        self.running[index(channel)] = true;
    }

    fn stop(&mut self, channel: PwmChannel) {
        self.running[index(channel)] = false;
    }
}

/// Indicator that records every color mode it was shown
#[derive(Debug, Default)]
pub struct RecordingIndicator {
    pub modes: Vec<EnhancedColorMode>,
}

impl Indicator for RecordingIndicator {
    fn show_color_mode(&mut self, mode: EnhancedColorMode) {
        self.modes.push(mode);
    }
}

fn index(channel: PwmChannel) -> usize {
    match channel {
        PwmChannel::Red => 0,
        PwmChannel::Green => 1,
        PwmChannel::Blue => 2,
        PwmChannel::Cool => 3,
        PwmChannel::Warm => 4,
    }
}

pub fn light(queue: &CommandQueue<QUEUE_SIZE>) -> TestLight<'_> {
    light_with(queue, LightAttributes::default())
}

pub fn light_with(
    queue: &CommandQueue<QUEUE_SIZE>,
    attributes: LightAttributes,
) -> TestLight<'_> {
    LightController::new(
        RecordingDriver::default(),
        RecordingIndicator::default(),
        queue.receiver(),
        &LightConfig::default(),
        attributes,
    )
}

pub fn at(millis: u64) -> Instant {
    Instant::from_millis(millis)
}

/// Poll once per default tick (20 ms) for `ticks` ticks after `start_ms`
///
/// Returns the time of the last poll in milliseconds.
pub fn run_ticks(light: &mut TestLight<'_>, start_ms: u64, ticks: u64) -> u64 {
    let mut now = start_ms;
    for _ in 0..ticks {
        now += 20;
        light.poll(at(now));
    }
    now
}
