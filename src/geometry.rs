use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// `min(hi, max(lo, v))`. Unlike `f64::clamp` this never panics; when the
/// bounds are inverted the upper bound wins.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    hi.min(lo.max(v))
}

pub fn radius_for_chord(n: usize, chord: f64) -> f64 {
    if n <= 1 {
        return 0.0;
    }

    chord / (2.0 * (PI / n as f64).sin())
}

pub fn slot_angle(index: usize, offset: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }

    TAU * (index as f64 + offset) / count as f64
}

pub fn ring_point(radius: f64, angle: f64) -> Point {
    Point {
        x: (radius * angle.cos()).round() as i32,
        y: (radius * angle.sin()).round() as i32,
    }
}
