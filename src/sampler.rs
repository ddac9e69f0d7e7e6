//! Random border sizes and cycle lengths.
//!
//! Sizes follow `scale * log2(2 / (1 - x))` for uniform `x`, which puts the
//! floor of the distribution at `scale` and gives it a long tail towards the
//! configured maximum. Half of all draws land below `2 * scale`.

use crate::config::{BoundsConfig, TimingConfig};
use rand::Rng;

pub const SCALE: f64 = 500.0;
pub const DEBUG_SCALE: f64 = 50.0;
pub const DEBUG_MIN_SECS: u64 = 20;
pub const DEBUG_MAX_SECS: u64 = 60;

/// Maps a point `x` of the unit interval onto a border size.
pub fn border_size_at(x: f64, scale: f64, min: f64, max: f64) -> f64 {
    let raw = scale * ((1.0 - x) / 2.0).ln() / 0.5f64.ln();
    if !raw.is_finite() {
        return min;
    }
    // not f64::clamp: that one panics on min > max
    raw.min(max).max(min)
}

pub fn sample_border_size(rng: &mut impl Rng, debug: bool, bounds: &BoundsConfig) -> f64 {
    let scale = if debug { DEBUG_SCALE } else { SCALE };
    border_size_at(rng.random::<f64>(), scale, bounds.min_border_size, bounds.max_border_size)
}

pub fn sample_debug_secs(rng: &mut impl Rng) -> u64 {
    rng.random_range(DEBUG_MIN_SECS..=DEBUG_MAX_SECS)
}

pub fn sample_duration_secs(rng: &mut impl Rng, debug: bool, timing: &TimingConfig) -> u64 {
    if debug {
        return sample_debug_secs(rng);
    }
    let unit = timing.unit.secs();
    let floor = 1.0 / unit;
    let mut min = timing.min_minutes.max(floor);
    let mut max = timing.max_minutes.max(floor);
    if max < min {
        core::mem::swap(&mut min, &mut max);
    }
    if (max - min).abs() < 1e-9 {
        return ((min * unit).round() as u64).max(1);
    }
    let units = rng.random_range(min..max);
    ((units * unit).round() as u64).max(1)
}
