use nalgebra::{Vector3, Vector6};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G: f64 = 9.81;

/// Angle of attack at spawn and after a reset, deg.
pub const DEFAULT_ALPHA: f64 = 4.0;

// ---------------------------------------------------------------------------
// State vector layout
// ---------------------------------------------------------------------------

/// Integrated state `[vA, A, vB, B, vz, altitude]`.
pub type StateVector = Vector6<f64>;

pub const VEL_A: usize = 0;
pub const POS_A: usize = 1;
pub const VEL_B: usize = 2;
pub const POS_B: usize = 3;
pub const VEL_Z: usize = 4;
pub const ALT: usize = 5;

// ---------------------------------------------------------------------------
// Control inputs
// ---------------------------------------------------------------------------

/// Pilot-set orientation and engine parameters. Read-only inside the
/// integrator; clamping is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlInputs {
    pub bank: f64,     // roll angle, deg
    pub alpha: f64,    // angle of attack, deg
    pub throttle: f64, // 0..1
    pub flap: f64,     // flap deflection, deg (0, 20 or 40 for lift)
}

impl Default for ControlInputs {
    fn default() -> Self {
        Self {
            bank: 0.0,
            alpha: DEFAULT_ALPHA,
            throttle: 0.0,
            flap: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Flight state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub time: f64,         // s
    pub q: StateVector,    // see layout above
    pub controls: ControlInputs,
}

impl FlightState {
    /// At rest on the ground at the origin, default controls.
    pub fn new() -> Self {
        Self {
            time: 0.0,
            q: StateVector::zeros(),
            controls: ControlInputs::default(),
        }
    }

    /// Back to the spawn condition: zero time and state, alpha 4 deg,
    /// bank, throttle and flap zero.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Velocity `[vA, vB, vz]`, m/s.
    pub fn velocity(&self) -> Vector3<f64> {
        Vector3::new(self.q[VEL_A], self.q[VEL_B], self.q[VEL_Z])
    }

    /// Position `[A, B, altitude]`, m.
    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.q[POS_A], self.q[POS_B], self.q[ALT])
    }

    pub fn altitude(&self) -> f64 {
        self.q[ALT]
    }

    pub fn airspeed(&self) -> f64 {
        self.velocity().norm()
    }

    pub fn horizontal_speed(&self) -> f64 {
        self.q[VEL_A].hypot(self.q[VEL_B])
    }
}

impl Default for FlightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_state() {
        let s = FlightState::new();
        assert_eq!(s.time, 0.0);
        assert_eq!(s.q, StateVector::zeros());
        assert_eq!(s.controls.alpha, 4.0);
        assert_eq!(s.controls.throttle, 0.0);
        assert_eq!(s.controls.bank, 0.0);
        assert_eq!(s.controls.flap, 0.0);
    }

    #[test]
    fn reset_restores_spawn() {
        let mut s = FlightState::new();
        s.time = 12.5;
        s.q = StateVector::new(30.0, 200.0, -4.0, 10.0, 2.0, 50.0);
        s.controls = ControlInputs { bank: 10.0, alpha: 12.0, throttle: 0.7, flap: 20.0 };
        s.reset();
        assert_eq!(s, FlightState::new());
    }

    #[test]
    fn accessors_follow_layout() {
        let mut s = FlightState::new();
        s.q = StateVector::new(3.0, 1.0, 4.0, 2.0, 12.0, 100.0);
        assert_eq!(s.velocity(), Vector3::new(3.0, 4.0, 12.0));
        assert_eq!(s.position(), Vector3::new(1.0, 2.0, 100.0));
        assert_eq!(s.altitude(), 100.0);
        assert!((s.horizontal_speed() - 5.0).abs() < 1e-12);
        assert!((s.airspeed() - 13.0).abs() < 1e-12);
    }
}
