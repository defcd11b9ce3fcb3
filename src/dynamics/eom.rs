use nalgebra::Vector3;

use crate::dynamics::state::{ControlInputs, StateVector, ALT, G, VEL_A, VEL_B, VEL_Z};
use crate::physics::aerodynamics;
use crate::physics::atmosphere::{atmosphere, Atmo};
use crate::vehicle::AircraftProperties;

// ---------------------------------------------------------------------------
// Force evaluation at a single state
// ---------------------------------------------------------------------------

/// Everything the force model computes for one state, in world axes
/// `[A, B, vertical]`.
#[derive(Debug, Clone, Copy)]
pub struct ForceBreakdown {
    pub atm: Atmo,
    pub airspeed: f64,
    pub horizontal_speed: f64,
    pub thrust: f64,
    pub cl: f64,
    pub cd: f64,
    pub lift: f64,
    pub drag: f64,
    pub cos_climb: f64,
    pub sin_climb: f64,
    pub cos_heading: f64,
    pub sin_heading: f64,
    /// Net force including gravity and the ground clamp, N.
    pub force: Vector3<f64>,
    pub ground_clamped: bool,
}

impl ForceBreakdown {
    /// Flight path angle above the horizon, rad.
    pub fn climb_angle(&self) -> f64 {
        self.sin_climb.atan2(self.cos_climb)
    }

    /// Direction of horizontal travel from axis A towards axis B, rad.
    pub fn heading(&self) -> f64 {
        self.sin_heading.atan2(self.cos_heading)
    }
}

/// Evaluate thrust, lift, drag and gravity at state `q`.
///
/// Forces:
///   1. Thrust minus drag, along the velocity vector
///   2. Lift, perpendicular to velocity and rolled by the bank angle
///   3. Gravity, vertical only
///
/// A stationary aircraft (zero total or horizontal speed) takes climb and
/// heading angles of zero instead of dividing by zero. On or below the
/// ground a net downward force is zeroed, gravity included.
pub fn evaluate(
    props: &AircraftProperties,
    controls: &ControlInputs,
    q: &StateVector,
) -> ForceBreakdown {
    let (vx, vy, vz) = (q[VEL_A], q[VEL_B], q[VEL_Z]);
    let z = q[ALT];
    let vh = (vx * vx + vy * vy).sqrt();
    let vtotal = (vx * vx + vy * vy + vz * vz).sqrt();

    let atm = atmosphere(z);

    // --- Engine ---
    let thrust = aerodynamics::thrust(props, controls.throttle, vtotal, &atm);

    // --- Wing (alpha stays in degrees, the Cl curve is per degree) ---
    let cl = aerodynamics::lift_coefficient(props, controls.alpha, controls.flap, z);
    let cd = aerodynamics::drag_coefficient(props, cl);
    let lift = aerodynamics::wing_force(props, cl, &atm, vtotal);
    let drag = aerodynamics::wing_force(props, cd, &atm, vtotal);

    // --- Orientation ---
    let bank = controls.bank.to_radians();
    let (cos_w, sin_w) = (bank.cos(), bank.sin());

    let (cos_p, sin_p) = if vtotal == 0.0 {
        (1.0, 0.0)
    } else {
        (vh / vtotal, vz / vtotal)
    };
    let (cos_t, sin_t) = if vh == 0.0 {
        (1.0, 0.0)
    } else {
        (vx / vh, vy / vh)
    };

    // Unit vectors along the flight path and along the banked lift direction.
    let along_path = Vector3::new(cos_t * cos_p, sin_t * cos_p, sin_p);
    let lift_dir = Vector3::new(
        sin_t * sin_w - cos_t * sin_p * cos_w,
        -cos_t * sin_w - sin_t * sin_p * cos_w,
        cos_p * cos_w,
    );

    let mut force = along_path * (thrust - drag) + lift_dir * lift;
    force.z -= props.mass * G;

    // The aircraft can't sink into the ground.
    let ground_clamped = z <= 0.0 && force.z <= 0.0;
    if ground_clamped {
        force.z = 0.0;
    }

    ForceBreakdown {
        atm,
        airspeed: vtotal,
        horizontal_speed: vh,
        thrust,
        cl,
        cd,
        lift,
        drag,
        cos_climb: cos_p,
        sin_climb: sin_p,
        cos_heading: cos_t,
        sin_heading: sin_t,
        force,
        ground_clamped,
    }
}

// ---------------------------------------------------------------------------
// Right-hand side for the integrator
// ---------------------------------------------------------------------------

/// State increment over `dt` evaluated at the provisional state
/// `q + scale·delta_q`.
///
/// Velocity entries are `dt·F/m`, position entries are `dt·v`, both taken
/// at the provisional state. Pure: no hidden state, never fails.
pub fn rhs(
    props: &AircraftProperties,
    controls: &ControlInputs,
    q: &StateVector,
    delta_q: &StateVector,
    dt: f64,
    scale: f64,
) -> StateVector {
    let qi: StateVector = q + delta_q.scale(scale);
    let forces = evaluate(props, controls, &qi);
    let accel = forces.force / props.mass;

    StateVector::new(
        dt * accel.x,
        dt * qi[VEL_A],
        dt * accel.y,
        dt * qi[VEL_B],
        dt * accel.z,
        dt * qi[VEL_Z],
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
