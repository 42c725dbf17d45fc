//! Axis upper-bound computation.
//!
//! Charts want a "nice" round upper bound: the raw maximum padded by 10%
//! and rounded up to a fixed step, so ticks stay human-readable. The bound
//! is recomputed from the filtered data on every update, with hysteresis so
//! it never collapses under already-visible bars mid-transition.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::Metric;

/// Step for monetary and volume axes.
pub const VALUE_AXIS_STEP: f64 = 5_000_000.0;

const AXIS_PAD: f64 = 1.1;

/// Largest allowed single-update shrink factor.
const MAX_SHRINK_PER_UPDATE: f64 = 0.8;

/// Step ladder for ASP axes, chosen by the padded maximum.
fn asp_step(padded_max: f64) -> f64 {
    if padded_max < 10.0 {
        1.0
    } else if padded_max < 50.0 {
        5.0
    } else if padded_max < 100.0 {
        10.0
    } else {
        50.0
    }
}

fn step_for(metric: Metric, padded_max: f64) -> f64 {
    match metric {
        Metric::Asp => asp_step(padded_max),
        Metric::SalesValue | Metric::Volume => VALUE_AXIS_STEP,
    }
}

fn round_up_to_step(value: f64, step: f64) -> f64 {
    let rounded = (value / step).ceil() * step;
    if rounded == 0.0 {
        step
    } else {
        rounded
    }
}

/// Nice upper bound for an axis: +10% pad, rounded up to the metric's
/// step. Zero or invalid input still yields one full step.
pub fn nice_axis_max(raw_max: f64, metric: Metric) -> f64 {
    let raw = if raw_max.is_finite() && raw_max > 0.0 {
        raw_max
    } else {
        0.0
    };
    let padded = raw * AXIS_PAD;
    round_up_to_step(padded, step_for(metric, padded))
}

/// Recomputed-with-hysteresis axis bound: follows [`nice_axis_max`]
/// upward immediately, but never shrinks by more than 20% per update.
#[derive(Debug, Default, Clone, Copy)]
pub struct AxisHold {
    last: f64,
}

impl AxisHold {
    pub fn apply(&mut self, raw_max: f64, metric: Metric) -> f64 {
        let candidate = nice_axis_max(raw_max, metric);
        let effective = if self.last > 0.0 && candidate < self.last {
            let shrunk = self.last * MAX_SHRINK_PER_UPDATE;
            candidate.max(round_up_to_step(shrunk, step_for(metric, shrunk)))
        } else {
            candidate
        };
        self.last = effective;
        effective
    }
}

/// One [`AxisHold`] per chart-data stream, keyed by the caller.
#[derive(Default)]
pub struct AxisRegistry {
    holds: Mutex<HashMap<String, AxisHold>>,
}

impl AxisRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, key: &str, raw_max: f64, metric: Metric) -> f64 {
        match self.holds.lock() {
            Ok(mut holds) => holds.entry(key.to_string()).or_default().apply(raw_max, metric),
            Err(_) => nice_axis_max(raw_max, metric),
        }
    }
}
