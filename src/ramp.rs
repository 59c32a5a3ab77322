//! Fixed point linear ramps.
//!
//! Every animatable attribute keeps its value scaled by 256 together with a
//! signed per-tick step and a tick countdown. One tick adds the step, resolves
//! overshoot by clamping or wrapping, derives the integer attribute value and
//! counts down. The functions here are pure: they return the new state and
//! value instead of mutating the attribute store.

/// Countdown value for ramps that run until stopped or clamped
pub const RUN_FOREVER: u16 = 0xFFFF;

const FIXED_SHIFT: u32 = 8;
const FIXED_ONE: i64 = 1 << FIXED_SHIFT;
const MOVE_RATE_DIVISOR: i32 = 10;

/// Attribute value types a ramp can drive
pub trait RampValue: Copy {
    fn widen(self) -> i64;
    fn narrow(value: i64) -> Self;
}

impl RampValue for u8 {
    fn widen(self) -> i64 {
        i64::from(self)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn narrow(value: i64) -> Self {
        value.clamp(0, i64::from(u8::MAX)) as u8
    }
}

impl RampValue for u16 {
    fn widen(self) -> i64 {
        i64::from(self)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn narrow(value: i64) -> Self {
        value.clamp(0, i64::from(u16::MAX)) as u16
    }
}

/// Domain of a ramped attribute and its overshoot policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampBounds<T> {
    pub min: T,
    pub max: T,
    /// Wrap around the range instead of clamping (hue)
    pub wrap: bool,
}

impl<T> RampBounds<T> {
    pub const fn clamped(min: T, max: T) -> Self {
        Self {
            min,
            max,
            wrap: false,
        }
    }

    pub const fn wrapping(min: T, max: T) -> Self {
        Self {
            min,
            max,
            wrap: true,
        }
    }
}

/// One fixed point accumulator and its per-tick step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Axis {
    pub current_fixed: u32,
    pub step_fixed: i32,
}

impl Axis {
    /// Accumulator resting exactly on `value`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn settled<T: RampValue>(value: T) -> Self {
        Self {
            current_fixed: (value.widen() << FIXED_SHIFT) as u32,
            step_fixed: 0,
        }
    }

    /// Accumulator starting at `value` moving by `step_fixed` per tick
    pub fn moving<T: RampValue>(value: T, step_fixed: i32) -> Self {
        Self {
            step_fixed,
            ..Self::settled(value)
        }
    }

    /// Add one step and derive the attribute value
    ///
    /// Returns the new axis, the value and whether a clamp bound was hit.
    /// Values round half up while stepping up and truncate otherwise.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn step<T: RampValue>(self, bounds: &RampBounds<T>) -> (Self, T, bool) {
        let min = bounds.min.widen();
        let max = bounds.max.widen();
        let step = i64::from(self.step_fixed);
        let candidate = i64::from(self.current_fixed) + step;
        let whole = candidate.div_euclid(FIXED_ONE);

        let overshoot = (step > 0 && whole > max) || (step < 0 && whole < min);
        let next = if !overshoot {
            candidate
        } else if bounds.wrap {
            let span = (max - min + 1) * FIXED_ONE;
            min * FIXED_ONE + (candidate - min * FIXED_ONE).rem_euclid(span)
        } else if step > 0 {
            max * FIXED_ONE
        } else {
            min * FIXED_ONE
        };

        let mut value = if step > 0 {
            (next + FIXED_ONE / 2 - 1).div_euclid(FIXED_ONE)
        } else {
            next.div_euclid(FIXED_ONE)
        };
        if value > max {
            value = if bounds.wrap { min } else { max };
        }

        let axis = Self {
            current_fixed: next as u32,
            step_fixed: self.step_fixed,
        };
        (axis, T::narrow(value), overshoot && !bounds.wrap)
    }
}

/// Per-attribute ramp state
///
/// `remaining_ticks == 0` means idle; the accumulator then rests on the
/// attribute value with a zero step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RampState {
    pub axis: Axis,
    pub remaining_ticks: u16,
}

impl RampState {
    /// Idle ramp resting on `value`
    pub fn idle<T: RampValue>(value: T) -> Self {
        Self {
            axis: Axis::settled(value),
            remaining_ticks: 0,
        }
    }

    /// Ramp starting at `value` with the given step and countdown
    pub fn start<T: RampValue>(value: T, step_fixed: i32, remaining_ticks: u16) -> Self {
        Self {
            axis: Axis::moving(value, step_fixed),
            remaining_ticks,
        }
    }

    pub const fn is_active(&self) -> bool {
        self.remaining_ticks != 0
    }

    pub const fn runs_forever(&self) -> bool {
        self.remaining_ticks == RUN_FOREVER
    }

    /// Advance one tick, returning the new attribute value
    ///
    /// Hitting a clamp bound ends the ramp.
    #[must_use]
    pub fn advance<T: RampValue>(self, bounds: &RampBounds<T>) -> (T, Self) {
        let (axis, value, clamped) = self.axis.step(bounds);
        let remaining_ticks = if clamped { 0 } else { self.remaining_ticks };
        let (axis, remaining_ticks) = count_down(axis, value, remaining_ticks);
        (value, Self { axis, remaining_ticks })
    }
}

/// Two axes sharing one countdown (`CurrentX`/`CurrentY`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DualRampState {
    pub x: Axis,
    pub y: Axis,
    pub remaining_ticks: u16,
}

impl DualRampState {
    pub fn idle<T: RampValue>(x: T, y: T) -> Self {
        Self {
            x: Axis::settled(x),
            y: Axis::settled(y),
            remaining_ticks: 0,
        }
    }

    pub fn start<T: RampValue>(x: (T, i32), y: (T, i32), remaining_ticks: u16) -> Self {
        Self {
            x: Axis::moving(x.0, x.1),
            y: Axis::moving(y.0, y.1),
            remaining_ticks,
        }
    }

    pub const fn is_active(&self) -> bool {
        self.remaining_ticks != 0
    }

    /// Advance both axes, then count down once
    ///
    /// Both axes stop together when either one hits a clamp bound.
    #[must_use]
    pub fn advance<T: RampValue>(self, bounds: &RampBounds<T>) -> (T, T, Self) {
        let (x_axis, x, x_clamped) = self.x.step(bounds);
        let (y_axis, y, y_clamped) = self.y.step(bounds);
        let remaining_ticks = if x_clamped || y_clamped {
            0
        } else {
            self.remaining_ticks
        };

        let (x_axis, countdown) = count_down(x_axis, x, remaining_ticks);
        let (y_axis, _) = count_down(y_axis, y, remaining_ticks);
        let state = Self {
            x: x_axis,
            y: y_axis,
            remaining_ticks: countdown,
        };
        (x, y, state)
    }
}

/// Shared countdown: snap once it reaches zero, never touch `RUN_FOREVER`
fn count_down<T: RampValue>(axis: Axis, value: T, remaining_ticks: u16) -> (Axis, u16) {
    let remaining_ticks = match remaining_ticks {
        0 | RUN_FOREVER => remaining_ticks,
        ticks => ticks - 1,
    };
    if remaining_ticks == 0 {
        (Axis::settled(value), 0)
    } else {
        (axis, remaining_ticks)
    }
}

/// Number of ticks for a transition time given in tenths of a second
///
/// Zero and the "as fast as possible" value `0xFFFF` both map to a single
/// tick. The result never reaches [`RUN_FOREVER`].
#[allow(clippy::cast_possible_truncation)]
pub fn transition_ticks(transition_time: u16, ticks_per_second: u32) -> u16 {
    if transition_time == 0 || transition_time == 0xFFFF {
        return 1;
    }
    let ticks = u32::from(transition_time) * ticks_per_second / 10;
    ticks.clamp(1, u32::from(RUN_FOREVER - 1)) as u16
}

/// Per-tick fixed point step covering `delta` in `ticks` ticks
pub fn step_for(delta: i32, ticks: u16) -> i32 {
    (delta << FIXED_SHIFT) / i32::from(ticks.max(1))
}

/// Per-tick fixed point step for a Move command rate, `rate / 10` per tick
pub fn rate_step(rate: u16) -> i32 {
    (i32::from(rate) << FIXED_SHIFT) / MOVE_RATE_DIVISOR
}
