use std::fmt;

use nalgebra::{UnitQuaternion, Vector3};
use serde::Serialize;

use crate::dynamics::state::{FlightState, ALT, POS_A, POS_B, VEL_A, VEL_B, VEL_Z};

// ---------------------------------------------------------------------------
// Pilot readout
// ---------------------------------------------------------------------------

/// Derived flight quantities for display and logging. Angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Telemetry {
    pub time: f64,
    pub throttle_pct: f64,
    pub alpha: f64,
    pub bank: f64,
    pub flap: f64,
    pub heading: f64,
    pub climb_angle: f64,
    pub airspeed: f64,
    pub climb_rate: f64,
    pub altitude: f64,
}

impl Telemetry {
    pub fn from_state(state: &FlightState) -> Self {
        let q = &state.q;
        let c = &state.controls;
        let vh = q[VEL_A].hypot(q[VEL_B]);

        Self {
            time: state.time,
            throttle_pct: (c.throttle * 100.0).round(),
            alpha: c.alpha,
            bank: c.bank,
            flap: c.flap,
            heading: q[VEL_B].atan2(q[VEL_A]).to_degrees(),
            // Horizontal speed floored so a vertical or stationary aircraft reads sanely.
            climb_angle: (q[VEL_Z] / vh.clamp(0.001, 50_000.0)).atan().to_degrees(),
            airspeed: state.airspeed(),
            climb_rate: q[VEL_Z],
            altitude: q[ALT],
        }
    }
}

impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Throttle: {}% | Angle of Attack: {} deg | Bank Angle: {} deg | Flap Deflection: {} deg | \
             Heading: {:.1} deg | Climb Angle: {:.1} deg | Air Speed: {:.1} | Climb Rate: {:.2} | Altitude: {:.1}",
            self.throttle_pct,
            self.alpha,
            self.bank,
            self.flap,
            self.heading,
            self.climb_angle,
            self.airspeed,
            self.climb_rate,
            self.altitude,
        )
    }
}

// ---------------------------------------------------------------------------
// Render mapping
// ---------------------------------------------------------------------------

/// Aircraft pose in a Y-up world frame: world X = axis A, world Y =
/// altitude, world Z = axis B.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPose {
    pub position: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
}

impl WorldPose {
    /// Orientation is roll = bank − 90 deg (the model's rest roll),
    /// pitch = heading, yaw = alpha.
    pub fn from_state(state: &FlightState) -> Self {
        let q = &state.q;
        let c = &state.controls;
        let position = Vector3::new(q[POS_A], q[ALT], q[POS_B]);

        let roll = (c.bank - 90.0).to_radians();
        let pitch = q[VEL_B].atan2(q[VEL_A]);
        let yaw = c.alpha.to_radians();

        Self {
            position,
            orientation: UnitQuaternion::from_euler_angles(roll, pitch, yaw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn readout_at_rest() {
        let t = Telemetry::from_state(&FlightState::new());
        assert_eq!(t.heading, 0.0);
        assert_eq!(t.climb_angle, 0.0);
        assert_eq!(t.airspeed, 0.0);
        assert_eq!(t.alpha, 4.0);
        assert_eq!(t.throttle_pct, 0.0);
    }

    #[test]
    fn readout_angles() {
        let mut s = FlightState::new();
        s.q[VEL_B] = 10.0;
        s.q[VEL_Z] = 10.0;
        s.controls.throttle = 0.7;
        let t = Telemetry::from_state(&s);
        assert_relative_eq!(t.heading, 90.0, epsilon = 1e-9);
        assert_relative_eq!(t.climb_angle, 45.0, epsilon = 1e-9);
        assert_relative_eq!(t.airspeed, 200.0_f64.sqrt(), epsilon = 1e-9);
        assert_eq!(t.throttle_pct, 70.0);
    }

    #[test]
    fn vertical_climb_reads_near_ninety() {
        let mut s = FlightState::new();
        s.q[VEL_Z] = 5.0;
        let t = Telemetry::from_state(&s);
        assert!(t.climb_angle > 89.9 && t.climb_angle < 90.0);
    }

    #[test]
    fn display_contains_fields() {
        let line = Telemetry::from_state(&FlightState::new()).to_string();
        assert!(line.starts_with("Throttle: 0%"));
        assert!(line.contains("Angle of Attack: 4 deg"));
        assert!(line.contains("Altitude: 0.0"));
    }

    #[test]
    fn pose_maps_altitude_to_world_up() {
        let mut s = FlightState::new();
        s.q[POS_A] = 100.0;
        s.q[POS_B] = -20.0;
        s.q[ALT] = 35.0;
        let pose = WorldPose::from_state(&s);
        assert_eq!(pose.position, Vector3::new(100.0, 35.0, -20.0));
    }

    #[test]
    fn pose_orientation_level_wings() {
        let mut s = FlightState::new();
        s.controls.alpha = 0.0;
        // Bank 90 cancels the model's rest roll.
        s.controls.bank = 90.0;
        let pose = WorldPose::from_state(&s);
        assert_relative_eq!(pose.orientation.angle(), 0.0, epsilon = 1e-12);

        // At zero bank the body is rolled -90 deg about X.
        s.controls.bank = 0.0;
        let pose = WorldPose::from_state(&s);
        let y = pose.orientation * Vector3::y();
        assert_relative_eq!(y, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
    }
}
