//! Floating point primitives for targets without a full math library.
//!
//! Fractional exponents are expressed as an integer power of an integer
//! root: `a^(m/n) == nth_root(a, n)^m`.

/// Newton iteration stops once the correction drops below this value
const ROOT_EPSILON: f32 = 1e-4;

/// Hard cap on Newton iterations
const ROOT_MAX_ITERATIONS: u32 = 256;

/// Zigbee dimming curve normalisation, `10^2` minus the curve's rounding
const DIMMING_CURVE_SCALE: f32 = 99.998_39;

/// Raise `base` to a non-negative integer power
pub fn power(base: f32, exponent: u32) -> f32 {
    let mut result = 1.0;
    for _ in 0..exponent {
        result *= base;
    }
    result
}

/// Real `n`-th root of `x` using Newton's method seeded at `1.0`
///
/// Returns `NaN` when `n < 1` or when `x` is negative and `n` is even.
/// Callers must check for `NaN` before using the result.
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn nth_root(x: f32, n: i32) -> f32 {
    if x == 0.0 {
        return 0.0;
    }
    if n < 1 || (x < 0.0 && n % 2 == 0) {
        return f32::NAN;
    }

    let degree = n as f32;
    let exponent = n.unsigned_abs() - 1;
    let mut root = 1.0;
    for _ in 0..ROOT_MAX_ITERATIONS {
        let delta = (x / power(root, exponent) - root) / degree;
        root += delta;
        if libm::fabsf(delta) < ROOT_EPSILON {
            break;
        }
    }
    root
}

/// Round half up and convert to a signed 16-bit integer
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn round_half_up(value: f32) -> i16 {
    libm::floorf(value + 0.5) as i16
}

/// Fraction of full light output (`0.0..=1.0`) for a level on the Zigbee
/// dimming curve `10^((level - 1) / (253 / 3) - 1) / 100`
pub fn dimming_curve(level: u8) -> f32 {
    let exponent = 3 * i32::from(level) - 256;
    let step = nth_root(10.0, 253);
    if step.is_nan() {
        return 0.0;
    }

    let output = if exponent < 0 {
        power(1.0 / step, exponent.unsigned_abs())
    } else {
        power(step, exponent.unsigned_abs())
    };
    output / DIMMING_CURVE_SCALE
}
