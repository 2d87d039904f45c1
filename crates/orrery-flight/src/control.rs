use orrery_geom::Vec2;

use crate::model::{ControlIntent, ShipState};

/// Anything that can steer a ship, one intent per tick.
pub trait Controller {
    fn control(&mut self, ship: &ShipState) -> ControlIntent;
}

/// Steers toward a fixed target point: brake on arrival, turn until the
/// bearing error is small, thrust once roughly aligned.
pub struct PursuitController {
    pub target: Vec2,
}

const ARRIVE_RADIUS: f32 = 50.0;
const TURN_DEADBAND_DEG: f32 = 5.0;
const THRUST_CONE_DEG: f32 = 30.0;

impl PursuitController {
    pub fn new(target: Vec2) -> Self {
        Self { target }
    }
}

impl Controller for PursuitController {
    fn control(&mut self, ship: &ShipState) -> ControlIntent {
        let mut intent = ControlIntent::default();

        let to_target = self.target - ship.pos;
        if to_target.length() < ARRIVE_RADIUS {
            intent.brake = true;
            return intent;
        }

        // Bearing in the ship's heading convention (90 = rest orientation)
        let target_heading = (to_target.y.atan2(to_target.x).to_degrees() + 90.0).rem_euclid(360.0);
        // Signed difference normalized into (-180, 180]
        let diff = (target_heading - ship.heading + 180.0).rem_euclid(360.0) - 180.0;

        if diff < -TURN_DEADBAND_DEG {
            intent.turn_left = true;
        } else if diff > TURN_DEADBAND_DEG {
            intent.turn_right = true;
        }
        if diff.abs() < THRUST_CONE_DEG {
            intent.thrust = true;
        }
        intent
    }
}
