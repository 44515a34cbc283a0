//! Tick helpers using the 1-2-5 stepping of d3-array

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Generate approximately `count` nicely spaced ticks within `[start, stop]`
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if count <= 0.0 || count.is_nan() {
        return vec![];
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    if !(i2 >= i1) {
        return vec![];
    }

    let n = (i2 - i1 + 1.0) as usize;
    let value = |i: usize| {
        let k = if reverse { i2 - i as f64 } else { i1 + i as f64 };
        if inc < 0.0 {
            k / -inc
        } else {
            k * inc
        }
    };
    (0..n).map(value).collect()
}

/// Index range and increment of the ticks. A negative increment is the inverse of the step,
/// which keeps fractional steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let factor = step_factor(step / 10.0_f64.powf(power));

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let temp_inc = 10.0_f64.powf(-power) / factor;
        i1 = (start * temp_inc).round();
        i2 = (stop * temp_inc).round();
        if i1 / temp_inc < start {
            i1 += 1.0;
        }
        if i2 / temp_inc > stop {
            i2 -= 1.0;
        }
        inc = -temp_inc;
    } else {
        inc = 10.0_f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && 0.5 <= count && count < 2.0 {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn step_factor(error: f64) -> f64 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// Tick increment for the range and count. Negative values are inverse steps.
pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    if !(count > 0.0) {
        return f64::NAN;
    }
    if start == stop {
        return f64::NEG_INFINITY;
    }

    let step = (stop - start) / count;
    if step == 0.0 {
        return f64::NAN;
    }

    let power = step.log10().floor();
    let factor = step_factor(step / 10.0_f64.powf(power));
    if power >= 0.0 {
        10.0_f64.powf(power) * factor
    } else {
        -10.0_f64.powf(-power) / factor
    }
}

/// Positive step size for the range and count, or `None` when no finite step exists
pub fn tick_step(start: f64, stop: f64, count: f64) -> Option<f64> {
    let inc = tick_increment(start, stop, count);
    if !inc.is_finite() {
        None
    } else if inc >= 0.0 {
        Some(inc)
    } else {
        Some(-1.0 / inc)
    }
}
