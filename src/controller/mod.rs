mod blink;
mod color;
mod level;

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::attributes::{ColorMode, EnhancedColorMode, LightAttributes};
use crate::blink::BlinkState;
use crate::color::{
    ColorOutput, HueDomain, PwmChannel, hsv_to_rgb, temperature_to_cool_warm, xy_to_rgb,
};
use crate::command::{AddressInfo, ColorCommand, Command, LevelCommand, OnOffCommand, Status};
use crate::queue::CommandReceiver;
use crate::ramp::RampState;
use crate::timer::{TimerAction, TimerError, TimerEvent, TimerHandle, TimerQueue};
use crate::{ActuatorDriver, Indicator};

pub use color::ColorRamps;

/// One slot per [`TimerEvent`]
const TIMER_SLOTS: usize = 4;

/// Configuration for the light controller
#[derive(Debug, Clone)]
pub struct LightConfig {
    /// Endpoint the light answers on, other endpoints are ignored
    pub endpoint: u8,
    /// Period of the level and color ramp ticks
    pub tick_interval: Duration,
    /// Period of the color loop tick
    pub color_loop_interval: Duration,
}

impl LightConfig {
    /// Ramp ticks per second derived from `tick_interval`
    #[allow(clippy::cast_possible_truncation)]
    pub fn ticks_per_second(&self) -> u32 {
        (1_000_000 / self.tick_interval.as_micros().max(1)) as u32
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            endpoint: 0x01,
            tick_interval: Duration::from_millis(20),
            color_loop_interval: Duration::from_millis(20),
        }
    }
}

/// Timing information returned by [`LightController::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollResult {
    /// Earliest pending timer deadline, `None` when every timer is idle
    pub next_deadline: Option<Instant>,
    /// How long the caller may sleep, zero if a deadline already passed
    pub sleep_duration: Option<Duration>,
}

#[derive(Debug, Clone, Copy)]
struct LevelRamp {
    ramp: RampState,
    with_on_off: bool,
}

/// Light controller - owns the attributes and animates them
///
/// Commands come either directly through the per-command methods, through
/// [`LightController::handle`] / [`LightController::handle_frame`] or from
/// the command queue drained by [`LightController::poll`].
///
/// # Usage
///
/// ```ignore
/// let mut light = LightController::new(pwm, leds, queue.receiver(), &config, restored);
/// light.adjust();
///
/// loop {
///     let result = light.poll(Instant::now());
///     if light.take_changed() {
///         persist(light.attributes());
///     }
///     wait(result.sleep_duration);
/// }
/// ```
pub struct LightController<'a, D, U, const COMMANDS: usize>
where
    D: ActuatorDriver,
    U: Indicator,
{
    // External dependencies and configuration
    driver: D,
    indicator: U,
    commands: CommandReceiver<'a, COMMANDS>,
    config: LightConfig,

    // Internal state
    attributes: LightAttributes,
    level: LevelRamp,
    color: ColorRamps,
    blink: BlinkState,
    timers: TimerQueue<TIMER_SLOTS>,
    level_timer: Option<TimerHandle>,
    color_timer: Option<TimerHandle>,
    color_loop_timer: Option<TimerHandle>,
    blink_timer: Option<TimerHandle>,
    changed: bool,
    now: Instant,
}

impl<'a, D, U, const COMMANDS: usize> LightController<'a, D, U, COMMANDS>
where
    D: ActuatorDriver,
    U: Indicator,
{
    /// Create a controller around restored attribute values
    ///
    /// Nothing is written to the driver until [`Self::adjust`] or the first
    /// command.
    pub fn new(
        driver: D,
        indicator: U,
        commands: CommandReceiver<'a, COMMANDS>,
        config: &LightConfig,
        attributes: LightAttributes,
    ) -> Self {
        Self {
            driver,
            indicator,
            commands,
            config: config.clone(),
            level: LevelRamp {
                ramp: RampState::idle(attributes.level.current_level),
                with_on_off: false,
            },
            color: ColorRamps::resting(&attributes.color),
            attributes,
            blink: BlinkState::new(),
            timers: TimerQueue::new(),
            level_timer: None,
            color_timer: None,
            color_loop_timer: None,
            blink_timer: None,
            changed: false,
            now: Instant::from_ticks(0),
        }
    }

    /// Startup synchronisation of ramps and outputs
    ///
    /// Re-seeds every ramp from the attributes, switches to color
    /// temperature mode and drives the outputs.
    pub fn adjust(&mut self) {
        self.stop_timer(TimerEvent::Level);
        self.stop_timer(TimerEvent::Color);
        self.attributes.level.remaining_time = 0;
        self.level.ramp = RampState::idle(self.attributes.level.current_level);
        self.advance_level();

        self.color = ColorRamps::resting(&self.attributes.color);
        self.attributes
            .color
            .set_mode(EnhancedColorMode::ColorTemperature);
        self.advance_temperature();
        self.refresh();
    }

    /// Drain queued commands, fire due timers and report the next wake-up
    pub fn poll(&mut self, now: Instant) -> PollResult {
        self.now = now;

        while let Ok(envelope) = self.commands.try_receive() {
            self.handle(envelope.address, envelope.command);
        }

        while let Some(expired) = self.timers.pop_due(now) {
            let action = match expired.event {
                TimerEvent::Level => self.level_tick(),
                TimerEvent::Color => self.color_tick(),
                TimerEvent::ColorLoop => self.color_loop_tick(),
                TimerEvent::Blink => self.blink_tick(),
            };
            let rearmed = match action {
                TimerAction::Continue(interval) => {
                    self.timers.rearm(expired, interval, now).is_ok()
                }
                TimerAction::Stop => false,
            };
            if !rearmed {
                let slot = self.timer_slot(expired.event);
                if *slot == Some(expired.handle) {
                    *slot = None;
                }
            }
        }

        let next_deadline = self.timers.next_deadline();
        PollResult {
            next_deadline,
            sleep_duration: next_deadline.map(|deadline| {
                if deadline > now {
                    deadline - now
                } else {
                    Duration::from_ticks(0)
                }
            }),
        }
    }

    /// Decode a raw cluster command and dispatch it
    ///
    /// Undecodable payloads are ignored; the protocol layer always gets
    /// [`Status::Success`].
    pub fn handle_frame(
        &mut self,
        address: AddressInfo,
        cluster: u16,
        command_id: u8,
        payload: &[u8],
    ) -> Status {
        match Command::decode(cluster, command_id, payload) {
            Ok(command) => self.handle(address, command),
            Err(_error) => {
                #[cfg(feature = "esp32-log")]
                println!("[LightController.handle_frame] ignoring command: {:?}", _error);
                Status::Success
            }
        }
    }

    /// Dispatch a decoded command to its entry point
    pub fn handle(&mut self, address: AddressInfo, command: Command) -> Status {
        match command {
            Command::OnOff(OnOffCommand::On) => self.on(address),
            Command::OnOff(OnOffCommand::Off) => self.off(address),
            Command::OnOff(OnOffCommand::Toggle) => self.toggle(address),
            Command::Level(command) => match command {
                LevelCommand::MoveToLevel(cmd) => self.move_to_level(address, cmd),
                LevelCommand::Move(cmd) => self.move_level(address, cmd),
                LevelCommand::Step(cmd) => self.step_level(address, cmd),
                LevelCommand::Stop(cmd) => self.stop_level(address, cmd),
            },
            Command::Color(command) => match command {
                ColorCommand::MoveToHue(cmd) => self.move_to_hue(address, cmd),
                ColorCommand::MoveHue(cmd) => self.move_hue(address, cmd),
                ColorCommand::StepHue(cmd) => self.step_hue(address, cmd),
                ColorCommand::MoveToSaturation(cmd) => self.move_to_saturation(address, cmd),
                ColorCommand::MoveSaturation(cmd) => self.move_saturation(address, cmd),
                ColorCommand::StepSaturation(cmd) => self.step_saturation(address, cmd),
                ColorCommand::MoveToHueAndSaturation(cmd) => {
                    self.move_to_hue_and_saturation(address, cmd)
                }
                ColorCommand::MoveToColor(cmd) => self.move_to_color(address, cmd),
                ColorCommand::MoveColor(cmd) => self.move_color(address, cmd),
                ColorCommand::StepColor(cmd) => self.step_color(address, cmd),
                ColorCommand::MoveToColorTemperature(cmd) => {
                    self.move_to_color_temperature(address, cmd)
                }
                ColorCommand::EnhancedMoveToHue(cmd) => self.enhanced_move_to_hue(address, cmd),
                ColorCommand::EnhancedMoveHue(cmd) => self.enhanced_move_hue(address, cmd),
                ColorCommand::EnhancedStepHue(cmd) => self.enhanced_step_hue(address, cmd),
                ColorCommand::EnhancedMoveToHueAndSaturation(cmd) => {
                    self.enhanced_move_to_hue_and_saturation(address, cmd)
                }
                ColorCommand::ColorLoopSet(cmd) => self.color_loop_set(address, cmd),
                ColorCommand::StopMoveStep => self.stop_move_step(address),
                ColorCommand::MoveColorTemperature(cmd) => {
                    self.move_color_temperature(address, cmd)
                }
                ColorCommand::StepColorTemperature(cmd) => {
                    self.step_color_temperature(address, cmd)
                }
            },
        }
    }

    /// On/off cluster `On`
    pub fn on(&mut self, address: AddressInfo) -> Status {
        if self.accepts(address) {
            self.set_on_off(true);
        }
        Status::Success
    }

    /// On/off cluster `Off`
    pub fn off(&mut self, address: AddressInfo) -> Status {
        if self.accepts(address) {
            self.set_on_off(false);
        }
        Status::Success
    }

    /// On/off cluster `Toggle`
    pub fn toggle(&mut self, address: AddressInfo) -> Status {
        if self.accepts(address) {
            self.set_on_off(!self.attributes.on_off.on_off);
        }
        Status::Success
    }

    pub const fn attributes(&self) -> &LightAttributes {
        &self.attributes
    }

    /// Mutable attribute access for the attribute store layer
    ///
    /// Changes take effect on the next refresh.
    pub const fn attributes_mut(&mut self) -> &mut LightAttributes {
        &mut self.attributes
    }

    /// Returns and clears the "light attributes changed" flag
    pub const fn take_changed(&mut self) -> bool {
        let changed = self.changed;
        self.changed = false;
        changed
    }

    pub const fn config(&self) -> &LightConfig {
        &self.config
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub const fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub const fn indicator(&self) -> &U {
        &self.indicator
    }

    pub const fn level_ramp(&self) -> &RampState {
        &self.level.ramp
    }

    pub const fn color_ramps(&self) -> &ColorRamps {
        &self.color
    }

    /// Whether the timer for `event` is currently scheduled
    pub fn is_timer_running(&self, event: TimerEvent) -> bool {
        let slot = match event {
            TimerEvent::Level => self.level_timer,
            TimerEvent::Color => self.color_timer,
            TimerEvent::ColorLoop => self.color_loop_timer,
            TimerEvent::Blink => self.blink_timer,
        };
        slot.is_some_and(|handle| self.timers.is_scheduled(handle))
    }

    /// Recompute every channel from the attributes and apply on/off
    fn refresh(&mut self) {
        let output = self.color_output();
        for channel in PwmChannel::ALL {
            self.driver.set_duty(channel, output.duty(channel));
        }

        let on = if self.blink.is_running() {
            self.blink.current_on_off
        } else {
            self.attributes.on_off.on_off
        };
        self.apply_power(on);
        self.changed = true;
    }

    fn color_output(&self) -> ColorOutput {
        let color = &self.attributes.color;
        let level = self.attributes.level.current_level;
        match color.color_mode {
            ColorMode::Xy => {
                ColorOutput::from_rgb(xy_to_rgb(color.current_x, color.current_y, level))
            }
            ColorMode::HueSaturation => {
                let (hue, domain) =
                    if color.enhanced_color_mode == EnhancedColorMode::EnhancedHueSaturation {
                        (color.enhanced_current_hue, HueDomain::Enhanced)
                    } else {
                        (u16::from(color.current_hue), HueDomain::Standard)
                    };
                ColorOutput::from_rgb(hsv_to_rgb(hue, color.current_saturation, level, domain))
            }
            ColorMode::ColorTemperature => ColorOutput::from_cool_warm(temperature_to_cool_warm(
                color.color_temperature_mireds,
                level,
                color.physical_mireds(),
            )),
        }
    }

    /// Start or stop every PWM channel
    fn apply_power(&mut self, on: bool) {
        for channel in PwmChannel::ALL {
            if on {
                self.driver.start(channel);
            } else {
                self.driver.stop(channel);
            }
        }
    }

    fn set_on_off(&mut self, on: bool) {
        self.attributes.on_off.on_off = on;
        self.refresh();
    }

    fn accepts(&self, address: AddressInfo) -> bool {
        if address.endpoint == self.config.endpoint {
            return true;
        }
        #[cfg(feature = "esp32-log")]
        println!(
            "[LightController.accepts] ignoring command for endpoint {}",
            address.endpoint
        );
        false
    }

    fn ticks_per_second(&self) -> u32 {
        self.config.ticks_per_second()
    }

    const fn timer_slot(&mut self, event: TimerEvent) -> &mut Option<TimerHandle> {
        match event {
            TimerEvent::Level => &mut self.level_timer,
            TimerEvent::Color => &mut self.color_timer,
            TimerEvent::ColorLoop => &mut self.color_loop_timer,
            TimerEvent::Blink => &mut self.blink_timer,
        }
    }

    fn stop_timer(&mut self, event: TimerEvent) {
        if let Some(handle) = self.timer_slot(event).take() {
            self.timers.cancel(handle);
        }
    }

    /// (Re)start the timer for `event`, cancelling any pending one
    fn start_timer(&mut self, event: TimerEvent, interval: Duration) {
        self.stop_timer(event);
        match self.timers.schedule(event, interval, self.now) {
            Ok(handle) => *self.timer_slot(event) = Some(handle),
            Err(TimerError::QueueFull) => {
                #[cfg(feature = "esp32-log")]
                println!("[LightController.start_timer] {:?} left without a tick", event);
            }
        }
    }
}
