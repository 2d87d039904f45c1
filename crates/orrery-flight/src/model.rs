use orrery_geom::Vec2;
use serde::Deserialize;

/// Per-tick command, independent of where it came from (keyboard glue, a
/// pursuit policy, or a script).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlIntent {
    pub thrust: bool,
    pub brake: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// Named physical parameters of a ship model. Configuration only; never
/// mutated by the integrator. Degenerate values (negative max speed, zero
/// turn rate where turning is expected) are a caller error.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ShipSpec {
    pub name: String,
    /// World units per second squared; also the braking strength.
    pub accel: f32,
    pub max_speed: f32,
    /// Quadratic drag coefficient; 0 disables drag.
    pub drag: f32,
    /// Degrees per second.
    pub turn_rate: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipState {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees, normalized to [0, 360). 90 is the sprite's rest orientation.
    pub heading: f32,
}

impl ShipState {
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            heading: 90.0,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

impl Default for ShipState {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance one tick. The step order is load-bearing: thrust lands before
/// brake so a same-tick thrust+brake pair runs the reversal guard against
/// the velocity that already includes the thrust. `dt` is seconds and the
/// caller clamps it against frame hitches.
pub fn integrate(state: &mut ShipState, spec: &ShipSpec, intent: ControlIntent, dt: f32) {
    // Turn
    if intent.turn_left {
        state.heading -= spec.turn_rate * dt;
    }
    if intent.turn_right {
        state.heading += spec.turn_rate * dt;
    }
    state.heading = state.heading.rem_euclid(360.0);

    // Forward vector; angle measured from the positive x-axis
    let forward = Vec2::from_angle((state.heading - 90.0).to_radians());

    // Thrust
    if intent.thrust {
        state.vel += forward * (spec.accel * dt);
    }

    // Brake, guarding against overshoot past zero
    if intent.brake {
        let speed_sq = state.vel.length_squared();
        if speed_sq > 0.0 {
            let old_vel = state.vel;
            let brake_dir = -state.vel.normalized();
            state.vel += brake_dir * (spec.accel * dt);
            if state.vel.dot(old_vel) < 0.0 {
                state.vel = Vec2::ZERO;
            }
        }
    }

    // Drag opposing velocity, proportional to speed squared
    let speed_sq = state.vel.length_squared();
    if spec.drag > 0.0 && speed_sq > 0.0 {
        let drag_force = -state.vel.normalized() * (spec.drag * speed_sq);
        state.vel += drag_force * dt;
    }

    // Speed cap preserves direction
    if state.vel.length() > spec.max_speed {
        state.vel = state.vel.with_length(spec.max_speed);
    }

    // Integrate position
    state.pos += state.vel * dt;
}
