#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::LightController;
use crate::attributes::{LEVEL_MAX, LEVEL_MIN};
use crate::command::{
    AddressInfo, LevelDirection, MoveLevel, MoveToLevel, Status, StepLevel, StopLevel,
};
use crate::ramp::{RUN_FOREVER, RampBounds, RampState, step_for, transition_ticks};
use crate::timer::{TimerAction, TimerEvent};
use crate::{ActuatorDriver, Indicator};

const LEVEL_BOUNDS: RampBounds<u8> = RampBounds::clamped(LEVEL_MIN, LEVEL_MAX);

impl<D, U, const COMMANDS: usize> LightController<'_, D, U, COMMANDS>
where
    D: ActuatorDriver,
    U: Indicator,
{
    /// Level control `MoveToLevel` and `MoveToLevelWithOnOff`
    pub fn move_to_level(&mut self, address: AddressInfo, cmd: MoveToLevel) -> Status {
        if !self.accepts(address) {
            return Status::Success;
        }

        let current = self.attributes.level.current_level;
        let ticks = transition_ticks(cmd.transition_time, self.ticks_per_second());
        let step = step_for(i32::from(cmd.level) - i32::from(current), ticks);

        #[cfg(feature = "esp32-log")]
        println!(
            "[LightController.move_to_level] {} -> {} in {} ticks",
            current, cmd.level, ticks
        );

        self.run_level(
            RampState::start(current, step, ticks),
            cmd.with_on_off,
            step > 0,
        );
        Status::Success
    }

    /// Level control `Move` and `MoveWithOnOff`
    ///
    /// Ramps to the end of the range in `delta × 10 / rate` ticks. A zero
    /// rate stops the level ramp.
    #[allow(clippy::cast_possible_truncation)]
    pub fn move_level(&mut self, address: AddressInfo, cmd: MoveLevel) -> Status {
        if !self.accepts(address) {
            return Status::Success;
        }
        if cmd.rate == 0 {
            return self.stop_level(
                address,
                StopLevel {
                    with_on_off: cmd.with_on_off,
                },
            );
        }

        let current = self.attributes.level.current_level;
        let target = match cmd.direction {
            LevelDirection::Up => LEVEL_MAX,
            LevelDirection::Down => LEVEL_MIN,
        };
        let delta = i32::from(target) - i32::from(current);
        let ticks = (delta.unsigned_abs() * 10 / u32::from(cmd.rate))
            .clamp(1, u32::from(RUN_FOREVER - 1)) as u16;

        self.run_level(
            RampState::start(current, step_for(delta, ticks), ticks),
            cmd.with_on_off,
            cmd.direction == LevelDirection::Up,
        );
        Status::Success
    }

    /// Level control `Step` and `StepWithOnOff`
    pub fn step_level(&mut self, address: AddressInfo, cmd: StepLevel) -> Status {
        if !self.accepts(address) {
            return Status::Success;
        }

        let ticks = transition_ticks(cmd.transition_time, self.ticks_per_second());
        let step = match cmd.direction {
            LevelDirection::Up => step_for(i32::from(cmd.step_size), ticks),
            LevelDirection::Down => -step_for(i32::from(cmd.step_size), ticks),
        };

        self.run_level(
            RampState::start(self.attributes.level.current_level, step, ticks),
            cmd.with_on_off,
            cmd.direction == LevelDirection::Up,
        );
        Status::Success
    }

    /// Level control `Stop` and `StopWithOnOff`
    pub fn stop_level(&mut self, address: AddressInfo, _cmd: StopLevel) -> Status {
        if !self.accepts(address) {
            return Status::Success;
        }

        self.stop_timer(TimerEvent::Level);
        self.level.ramp = RampState::idle(self.attributes.level.current_level);
        self.attributes.level.remaining_time = 0;
        Status::Success
    }

    /// Arm a level ramp, apply its first tick and schedule the rest
    fn run_level(&mut self, ramp: RampState, with_on_off: bool, switch_on: bool) {
        self.level.with_on_off = with_on_off;
        if with_on_off && switch_on {
            self.attributes.on_off.on_off = true;
        }

        self.level.ramp = ramp;
        self.advance_level();
        self.switch_off_at_minimum();

        self.stop_timer(TimerEvent::Level);
        if self.level.ramp.is_active() {
            self.start_timer(TimerEvent::Level, self.config.tick_interval);
        }
        self.refresh();
    }

    pub(super) fn level_tick(&mut self) -> TimerAction {
        if self.level.ramp.is_active() {
            self.advance_level();
        }
        self.switch_off_at_minimum();
        self.refresh();

        if self.level.ramp.is_active() {
            TimerAction::Continue(self.config.tick_interval)
        } else {
            TimerAction::Stop
        }
    }

    pub(super) fn advance_level(&mut self) {
        let (level, ramp) = self.level.ramp.advance(&LEVEL_BOUNDS);
        self.level.ramp = ramp;
        self.attributes.level.current_level = level;
        self.attributes.level.remaining_time = ramp.remaining_ticks;
    }

    fn switch_off_at_minimum(&mut self) {
        if self.level.with_on_off && self.attributes.level.current_level == LEVEL_MIN {
            self.attributes.on_off.on_off = false;
        }
    }
}
