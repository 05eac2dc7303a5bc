//! Inertial flight step for manual control.
//!
//! Toy physics: no mass, just per-frame tuning constants scaled by the
//! elapsed time relative to a 16ms reference frame.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DAMPING, FORWARD_THRUST, FRAME_MS, PLANE_MAX, PLANE_MIN, REVERSE_THRUST, TURN_RATE_DEG,
};
use crate::input::{Controls, Thrust};
use crate::vector::Vec2;

/// Position, velocity and heading of the craft.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Degrees in `[0, 360)`, 0 = nose up.
    pub heading: f64,
}

impl Kinematics {
    pub fn at_rest(position: Vec2) -> Self {
        Self {
            position: position.clamp(PLANE_MIN, PLANE_MAX),
            velocity: Vec2::ZERO,
            heading: 0.0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_heading(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Frame-rate normalization factor. Non-finite or negative elapsed time
/// counts as no time at all.
pub fn time_scale(elapsed_ms: f64) -> f64 {
    if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
        elapsed_ms / FRAME_MS
    } else {
        0.0
    }
}

/// Advance the craft by one tick.
///
/// Thrust is applied along the heading as it was at the start of the tick;
/// the new heading only affects the next tick's thrust.
pub fn integrate(state: Kinematics, controls: Controls, elapsed_ms: f64) -> Kinematics {
    let scale = time_scale(elapsed_ms);

    let heading = wrap_heading(state.heading + controls.turn.sign() * TURN_RATE_DEG * scale);

    let nose = Vec2::from_heading(state.heading);
    let acceleration = match controls.thrust {
        Thrust::Forward => nose * (FORWARD_THRUST * scale),
        Thrust::Reverse => nose * (-REVERSE_THRUST * scale),
        Thrust::Idle => Vec2::ZERO,
    };

    let mut velocity = (state.velocity + acceleration) * DAMPING.powf(scale);
    if !velocity.is_finite() {
        velocity = Vec2::ZERO;
    }

    let position = (state.position + velocity).clamp(PLANE_MIN, PLANE_MAX);

    Kinematics {
        position,
        velocity,
        heading,
    }
}
