#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::LightController;
use crate::attributes::{
    ColorAttributes, ENHANCED_HUE_MAX, ENHANCED_HUE_MIN, EnhancedColorMode, HUE_MAX, HUE_MIN,
    SATURATION_MAX, SATURATION_MIN, XY_MAX, XY_MIN,
};
use crate::color::MiredsRange;
use crate::command::{
    AddressInfo, ColorLoopAction, ColorLoopSet, EnhancedMoveHue, EnhancedMoveToHue,
    EnhancedMoveToHueAndSaturation, EnhancedStepHue, HueDirection, MoveColor,
    MoveColorTemperature, MoveHue, MoveMode, MoveSaturation, MoveToColor, MoveToColorTemperature,
    MoveToHue, MoveToHueAndSaturation, MoveToSaturation, Status, StepColor, StepColorTemperature,
    StepHue, StepMode, StepSaturation,
};
use crate::ramp::{
    DualRampState, RUN_FOREVER, RampBounds, RampState, RampValue, rate_step, step_for,
    transition_ticks,
};
use crate::timer::{TimerAction, TimerEvent};
use crate::{ActuatorDriver, Indicator};

const HUE_BOUNDS: RampBounds<u8> = RampBounds::wrapping(HUE_MIN, HUE_MAX);
const SATURATION_BOUNDS: RampBounds<u8> = RampBounds::clamped(SATURATION_MIN, SATURATION_MAX);
const ENHANCED_HUE_BOUNDS: RampBounds<u16> =
    RampBounds::wrapping(ENHANCED_HUE_MIN, ENHANCED_HUE_MAX);
const XY_BOUNDS: RampBounds<u16> = RampBounds::clamped(XY_MIN, XY_MAX);

/// Ramp state of every color attribute
///
/// Ramps of one color mode keep their state while another mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRamps {
    pub hue: RampState,
    pub saturation: RampState,
    pub enhanced_hue: RampState,
    pub temperature: RampState,
    /// Limits of the running color temperature ramp
    pub temperature_range: MiredsRange,
    pub xy: DualRampState,
}

impl ColorRamps {
    pub(super) fn resting(color: &ColorAttributes) -> Self {
        Self {
            hue: RampState::idle(color.current_hue),
            saturation: RampState::idle(color.current_saturation),
            enhanced_hue: RampState::idle(color.enhanced_current_hue),
            temperature: RampState::idle(color.color_temperature_mireds),
            temperature_range: color.physical_mireds(),
            xy: DualRampState::idle(color.current_x, color.current_y),
        }
    }

    pub const fn any_active(&self) -> bool {
        self.hue.is_active()
            || self.saturation.is_active()
            || self.enhanced_hue.is_active()
            || self.temperature.is_active()
            || self.xy.is_active()
    }
}

/// Signed hue distance from `current` to `target` for a direction
///
/// `max` is the largest hue value, the circle has `max + 1` steps.
fn hue_delta(current: u16, target: u16, direction: HueDirection, max: u16) -> i32 {
    let full = i32::from(max) + 1;
    let half = i32::from(max) / 2;
    let delta = i32::from(target) - i32::from(current);
    match direction {
        HueDirection::ShortestDistance if delta > half => delta - full,
        HueDirection::ShortestDistance if delta < -half => delta + full,
        HueDirection::LongestDistance if delta > 0 && delta < half => delta - full,
        HueDirection::LongestDistance if delta < 0 && delta > -half => delta + full,
        HueDirection::Up if delta < 0 => delta + full,
        HueDirection::Down if delta > 0 => delta - full,
        _ => delta,
    }
}

/// Ramp for a Move command; `Stop` idles on the current value
fn move_ramp<T: RampValue>(current: T, mode: MoveMode, rate: u16) -> RampState {
    match mode {
        MoveMode::Stop => RampState::idle(current),
        MoveMode::Up => RampState::start(current, rate_step(rate), RUN_FOREVER),
        MoveMode::Down => RampState::start(current, -rate_step(rate), RUN_FOREVER),
    }
}

fn step_ramp<T: RampValue>(
    current: T,
    mode: StepMode,
    step_size: u16,
    ticks: u16,
) -> RampState {
    let step = step_for(i32::from(step_size), ticks);
    match mode {
        StepMode::Up => RampState::start(current, step, ticks),
        StepMode::Down => RampState::start(current, -step, ticks),
    }
}

/// Temperature limits of a Move/Step command within the physical range
///
/// Zero selects the physical limit; an inverted range falls back to the
/// physical one.
fn temperature_limits(physical: MiredsRange, min: u16, max: u16) -> MiredsRange {
    let min = if min == 0 { physical.min } else { min.max(physical.min) };
    let max = if max == 0 { physical.max } else { max.min(physical.max) };
    if min > max {
        physical
    } else {
        MiredsRange { min, max }
    }
}

impl<D, U, const COMMANDS: usize> LightController<'_, D, U, COMMANDS>
where
    D: ActuatorDriver,
    U: Indicator,
{
    /// Color control `MoveToHue`
    pub fn move_to_hue(&mut self, address: AddressInfo, cmd: MoveToHue) -> Status {
        if self.accepts(address) {
            self.arm_move_to_hue(cmd);
            self.commit_color();
        }
        Status::Success
    }

    /// Color control `MoveHue`
    pub fn move_hue(&mut self, address: AddressInfo, cmd: MoveHue) -> Status {
        if self.accepts(address) {
            self.enter_mode(EnhancedColorMode::HueSaturation);
            let current = self.attributes.color.current_hue;
            self.color.hue = move_ramp(current, cmd.mode, u16::from(cmd.rate));
            self.advance_hue();
            self.commit_color();
        }
        Status::Success
    }

    /// Color control `StepHue`
    pub fn step_hue(&mut self, address: AddressInfo, cmd: StepHue) -> Status {
        if self.accepts(address) {
            self.enter_mode(EnhancedColorMode::HueSaturation);
            let ticks = self.transition_ticks(cmd.transition_time);
            let current = self.attributes.color.current_hue;
            self.color.hue = step_ramp(current, cmd.mode, u16::from(cmd.step_size), ticks);
            self.advance_hue();
            self.commit_color();
        }
        Status::Success
    }

    /// Color control `MoveToSaturation`
    pub fn move_to_saturation(&mut self, address: AddressInfo, cmd: MoveToSaturation) -> Status {
        if self.accepts(address) {
            self.arm_move_to_saturation(cmd, false);
            self.commit_color();
        }
        Status::Success
    }

    /// Color control `MoveSaturation`
    pub fn move_saturation(&mut self, address: AddressInfo, cmd: MoveSaturation) -> Status {
        if self.accepts(address) {
            self.enter_mode(EnhancedColorMode::HueSaturation);
            let current = self.attributes.color.current_saturation;
            self.color.saturation = move_ramp(current, cmd.mode, u16::from(cmd.rate));
            self.advance_saturation();
            self.commit_color();
        }
        Status::Success
    }

    /// Color control `StepSaturation`
    pub fn step_saturation(&mut self, address: AddressInfo, cmd: StepSaturation) -> Status {
        if self.accepts(address) {
            self.enter_mode(EnhancedColorMode::HueSaturation);
            let ticks = self.transition_ticks(cmd.transition_time);
            let current = self.attributes.color.current_saturation;
            self.color.saturation =
                step_ramp(current, cmd.mode, u16::from(cmd.step_size), ticks);
            self.advance_saturation();
            self.commit_color();
        }
        Status::Success
    }

    /// Color control `MoveToHueAndSaturation`, hue takes the shortest path
    pub fn move_to_hue_and_saturation(
        &mut self,
        address: AddressInfo,
        cmd: MoveToHueAndSaturation,
    ) -> Status {
        if self.accepts(address) {
            self.arm_move_to_hue(MoveToHue {
                hue: cmd.hue,
                direction: HueDirection::ShortestDistance,
                transition_time: cmd.transition_time,
            });
            self.arm_move_to_saturation(
                MoveToSaturation {
                    saturation: cmd.saturation,
                    transition_time: cmd.transition_time,
                },
                false,
            );
            self.commit_color();
        }
        Status::Success
    }

    /// Color control `MoveToColor`, both axes share one countdown
    pub fn move_to_color(&mut self, address: AddressInfo, cmd: MoveToColor) -> Status {
        if self.accepts(address) {
            self.enter_mode(EnhancedColorMode::Xy);
            let ticks = self.transition_ticks(cmd.transition_time);
            let x = self.attributes.color.current_x;
            let y = self.attributes.color.current_y;
            let step_x = step_for(i32::from(cmd.x) - i32::from(x), ticks);
            let step_y = step_for(i32::from(cmd.y) - i32::from(y), ticks);
            self.color.xy = DualRampState::start((x, step_x), (y, step_y), ticks);
            self.advance_xy();
            self.commit_color();
        }
        Status::Success
    }

    /// Color control `MoveColor`, accepted without effect
    pub fn move_color(&mut self, address: AddressInfo, _cmd: MoveColor) -> Status {
        if self.accepts(address) {
            #[cfg(feature = "esp32-log")]
            println!("[LightController.move_color] not supported");
        }
        Status::Success
    }

    /// Color control `StepColor`, accepted without effect
    pub fn step_color(&mut self, address: AddressInfo, _cmd: StepColor) -> Status {
        if self.accepts(address) {
            #[cfg(feature = "esp32-log")]
            println!("[LightController.step_color] not supported");
        }
        Status::Success
    }

    /// Color control `MoveToColorTemperature` within the physical range
    pub fn move_to_color_temperature(
        &mut self,
        address: AddressInfo,
        cmd: MoveToColorTemperature,
    ) -> Status {
        if self.accepts(address) {
            self.enter_mode(EnhancedColorMode::ColorTemperature);
            self.color.temperature_range = self.attributes.color.physical_mireds();
            let ticks = self.transition_ticks(cmd.transition_time);
            let current = self.attributes.color.color_temperature_mireds;
            let step = step_for(i32::from(cmd.mireds) - i32::from(current), ticks);

            #[cfg(feature = "esp32-log")]
            println!(
                "[LightController.move_to_color_temperature] {} -> {} in {} ticks",
                current, cmd.mireds, ticks
            );

            self.color.temperature = RampState::start(current, step, ticks);
            self.advance_temperature();
            self.commit_color();
        }
        Status::Success
    }

    /// Color control `EnhancedMoveToHue`
    pub fn enhanced_move_to_hue(&mut self, address: AddressInfo, cmd: EnhancedMoveToHue) -> Status {
        if self.accepts(address) {
            self.arm_enhanced_move_to_hue(cmd);
            self.commit_color();
        }
        Status::Success
    }

    /// Color control `EnhancedMoveHue`
    pub fn enhanced_move_hue(&mut self, address: AddressInfo, cmd: EnhancedMoveHue) -> Status {
        if self.accepts(address) {
            self.enter_mode(EnhancedColorMode::EnhancedHueSaturation);
            let current = self.attributes.color.enhanced_current_hue;
            self.color.enhanced_hue = move_ramp(current, cmd.mode, cmd.rate);
            self.advance_enhanced_hue();
            self.commit_color();
        }
        Status::Success
    }

    /// Color control `EnhancedStepHue`
    pub fn enhanced_step_hue(&mut self, address: AddressInfo, cmd: EnhancedStepHue) -> Status {
        if self.accepts(address) {
            self.enter_mode(EnhancedColorMode::EnhancedHueSaturation);
            let ticks = self.transition_ticks(cmd.transition_time);
            let current = self.attributes.color.enhanced_current_hue;
            self.color.enhanced_hue = step_ramp(current, cmd.mode, cmd.step_size, ticks);
            self.advance_enhanced_hue();
            self.commit_color();
        }
        Status::Success
    }

    /// Color control `EnhancedMoveToHueAndSaturation`, hue takes the
    /// shortest path
    pub fn enhanced_move_to_hue_and_saturation(
        &mut self,
        address: AddressInfo,
        cmd: EnhancedMoveToHueAndSaturation,
    ) -> Status {
        if self.accepts(address) {
            self.arm_move_to_saturation(
                MoveToSaturation {
                    saturation: cmd.saturation,
                    transition_time: cmd.transition_time,
                },
                true,
            );
            self.arm_enhanced_move_to_hue(EnhancedMoveToHue {
                enhanced_hue: cmd.enhanced_hue,
                direction: HueDirection::ShortestDistance,
                transition_time: cmd.transition_time,
            });
            self.commit_color();
        }
        Status::Success
    }

    /// Color control `ColorLoopSet`
    ///
    /// Updates the loop attributes selected by the update flags and
    /// activates or deactivates the loop tick.
    pub fn color_loop_set(&mut self, address: AddressInfo, cmd: ColorLoopSet) -> Status {
        if !self.accepts(address) {
            return Status::Success;
        }

        let color = &mut self.attributes.color;
        if cmd.update.direction() {
            color.color_loop_direction = cmd.direction;
        }
        if cmd.update.time() {
            color.color_loop_time = cmd.time;
        }
        if cmd.update.start_hue() {
            color.color_loop_start_enhanced_hue = cmd.start_hue;
        }
        if cmd.update.action() {
            match cmd.action {
                ColorLoopAction::Deactivate => {
                    color.color_loop_active = false;
                    self.stop_timer(TimerEvent::ColorLoop);
                }
                ColorLoopAction::ActivateFromStartHue | ColorLoopAction::ActivateFromCurrentHue => {
                    color.color_loop_active = true;
                    color.color_loop_stored_enhanced_hue = color.enhanced_current_hue;
                    self.start_timer(TimerEvent::ColorLoop, self.config.color_loop_interval);
                }
            }
        }
        self.changed = true;
        Status::Success
    }

    /// Color control `MoveColorTemperature`
    pub fn move_color_temperature(
        &mut self,
        address: AddressInfo,
        cmd: MoveColorTemperature,
    ) -> Status {
        if self.accepts(address) {
            self.enter_mode(EnhancedColorMode::ColorTemperature);
            self.color.temperature_range = temperature_limits(
                self.attributes.color.physical_mireds(),
                cmd.min_mireds,
                cmd.max_mireds,
            );
            let current = self.attributes.color.color_temperature_mireds;
            self.color.temperature = move_ramp(current, cmd.mode, cmd.rate);
            self.advance_temperature();
            self.commit_color();
        }
        Status::Success
    }

    /// Color control `StepColorTemperature`
    pub fn step_color_temperature(
        &mut self,
        address: AddressInfo,
        cmd: StepColorTemperature,
    ) -> Status {
        if self.accepts(address) {
            self.enter_mode(EnhancedColorMode::ColorTemperature);
            self.color.temperature_range = temperature_limits(
                self.attributes.color.physical_mireds(),
                cmd.min_mireds,
                cmd.max_mireds,
            );
            let ticks = self.transition_ticks(cmd.transition_time);
            let current = self.attributes.color.color_temperature_mireds;
            self.color.temperature = step_ramp(current, cmd.mode, cmd.step_size, ticks);
            self.advance_temperature();
            self.commit_color();
        }
        Status::Success
    }

    /// Color control `StopMoveStep`
    ///
    /// Stops the hue, saturation and color temperature ramps and cancels the
    /// color tick. X/Y and enhanced hue ramps keep their countdown.
    pub fn stop_move_step(&mut self, address: AddressInfo) -> Status {
        if self.accepts(address) {
            let color = &self.attributes.color;
            self.color.hue = RampState::idle(color.current_hue);
            self.color.saturation = RampState::idle(color.current_saturation);
            self.color.temperature = RampState::idle(color.color_temperature_mireds);
            self.stop_timer(TimerEvent::Color);
        }
        Status::Success
    }

    fn arm_move_to_hue(&mut self, cmd: MoveToHue) {
        self.enter_mode(EnhancedColorMode::HueSaturation);
        let current = self.attributes.color.current_hue;
        let delta = hue_delta(
            u16::from(current),
            u16::from(cmd.hue),
            cmd.direction,
            u16::from(HUE_MAX),
        );
        let ticks = self.transition_ticks(cmd.transition_time);
        self.color.hue = RampState::start(current, step_for(delta, ticks), ticks);
        self.advance_hue();
    }

    fn arm_enhanced_move_to_hue(&mut self, cmd: EnhancedMoveToHue) {
        self.enter_mode(EnhancedColorMode::EnhancedHueSaturation);
        let current = self.attributes.color.enhanced_current_hue;
        let delta = hue_delta(current, cmd.enhanced_hue, cmd.direction, ENHANCED_HUE_MAX);
        let ticks = self.transition_ticks(cmd.transition_time);
        self.color.enhanced_hue = RampState::start(current, step_for(delta, ticks), ticks);
        self.advance_enhanced_hue();
    }

    fn arm_move_to_saturation(&mut self, cmd: MoveToSaturation, preserve_mode: bool) {
        if !preserve_mode {
            self.enter_mode(EnhancedColorMode::HueSaturation);
        }
        let current = self.attributes.color.current_saturation;
        let ticks = self.transition_ticks(cmd.transition_time);
        let step = step_for(i32::from(cmd.saturation) - i32::from(current), ticks);
        self.color.saturation = RampState::start(current, step, ticks);
        self.advance_saturation();
    }

    /// Switch both color mode attributes and notify the indicator
    fn enter_mode(&mut self, mode: EnhancedColorMode) {
        self.attributes.color.set_mode(mode);
        self.indicator.show_color_mode(mode);
    }

    /// Restart the color tick if any ramp is still running, then refresh
    fn commit_color(&mut self) {
        self.stop_timer(TimerEvent::Color);
        if self.color.any_active() {
            self.start_timer(TimerEvent::Color, self.config.tick_interval);
        }
        self.refresh();
    }

    fn transition_ticks(&self, transition_time: u16) -> u16 {
        transition_ticks(transition_time, self.ticks_per_second())
    }

    /// Advance the ramps of the active color mode
    ///
    /// Saturation runs before hue and enhanced hue.
    pub(super) fn color_tick(&mut self) -> TimerAction {
        let mode = self.attributes.color.enhanced_color_mode;
        if mode.is_hue_saturation() {
            if self.color.saturation.is_active() {
                self.advance_saturation();
            }
            if self.color.hue.is_active() {
                self.advance_hue();
            }
            if self.color.enhanced_hue.is_active() {
                self.advance_enhanced_hue();
            }
        } else if mode == EnhancedColorMode::ColorTemperature {
            if self.color.temperature.is_active() {
                self.advance_temperature();
            }
        } else if self.color.xy.is_active() {
            self.advance_xy();
        }
        self.refresh();

        if self.color.any_active() {
            TimerAction::Continue(self.config.tick_interval)
        } else {
            TimerAction::Stop
        }
    }

    /// The loop keeps ticking while active; the animation itself is not
    /// defined
    pub(super) fn color_loop_tick(&mut self) -> TimerAction {
        if self.attributes.color.color_loop_active {
            TimerAction::Continue(self.config.color_loop_interval)
        } else {
            TimerAction::Stop
        }
    }

    fn advance_hue(&mut self) {
        let (hue, ramp) = self.color.hue.advance(&HUE_BOUNDS);
        self.color.hue = ramp;
        self.attributes.color.current_hue = hue;
    }

    fn advance_saturation(&mut self) {
        let (saturation, ramp) = self.color.saturation.advance(&SATURATION_BOUNDS);
        self.color.saturation = ramp;
        self.attributes.color.current_saturation = saturation;
    }

    fn advance_enhanced_hue(&mut self) {
        let (hue, ramp) = self.color.enhanced_hue.advance(&ENHANCED_HUE_BOUNDS);
        self.color.enhanced_hue = ramp;
        self.attributes.color.enhanced_current_hue = hue;
    }

    pub(super) fn advance_temperature(&mut self) {
        let range = self.color.temperature_range;
        let bounds = RampBounds::clamped(range.min, range.max);
        let (mireds, ramp) = self.color.temperature.advance(&bounds);
        self.color.temperature = ramp;
        self.attributes.color.color_temperature_mireds = mireds;
    }

    fn advance_xy(&mut self) {
        let (x, y, ramp) = self.color.xy.advance(&XY_BOUNDS);
        self.color.xy = ramp;
        self.attributes.color.current_x = x;
        self.attributes.color.current_y = y;
    }
}
