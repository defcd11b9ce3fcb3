use std::f64::consts::PI;

use crate::physics::atmosphere::Atmo;
use crate::vehicle::AircraftProperties;

/// Lift increment with flaps at 20 deg.
pub const FLAP_20_CL: f64 = 0.25;
/// Lift increment with flaps at 40 deg.
pub const FLAP_40_CL: f64 = 0.5;
/// Lift increment while in ground effect.
pub const GROUND_EFFECT_CL: f64 = 0.25;
/// Height below which ground effect applies, m.
pub const GROUND_EFFECT_HEIGHT: f64 = 5.0;

/// Dynamic pressure, Pa.
pub fn dynamic_pressure(atm: &Atmo, airspeed: f64) -> f64 {
    0.5 * atm.density * airspeed * airspeed
}

/// Propeller thrust, N.
///
/// Efficiency is the quadratic `a + b·J²` in advance ratio `J`, scaled by
/// the altitude power factor. Not clamped: at high advance ratio or above
/// the derating altitude the result goes negative.
pub fn thrust(props: &AircraftProperties, throttle: f64, airspeed: f64, atm: &Atmo) -> f64 {
    let tip = props.engine_rps * props.prop_diameter;
    let advance_ratio = airspeed / tip;
    throttle * atm.power_factor * props.engine_power
        * (props.a + props.b * advance_ratio * advance_ratio)
        / tip
}

/// Lift coefficient from the two-line Cl-alpha curve plus flap and ground
/// effect increments.
///
/// `alpha` is in degrees (the curve coefficients are per degree). Flap
/// increments trigger on exact 20/40 deg settings only. All increments
/// stack.
pub fn lift_coefficient(props: &AircraftProperties, alpha: f64, flap: f64, altitude: f64) -> f64 {
    let mut cl = if alpha < props.alpha_cl_max {
        props.cl_slope0 * alpha + props.cl0
    } else {
        props.cl_slope1 * alpha + props.cl1
    };

    if flap == 20.0 {
        cl += FLAP_20_CL;
    }
    if flap == 40.0 {
        cl += FLAP_40_CL;
    }
    if altitude < GROUND_EFFECT_HEIGHT {
        cl += GROUND_EFFECT_CL;
    }
    cl
}

/// Parasite plus induced drag coefficient.
pub fn drag_coefficient(props: &AircraftProperties, cl: f64) -> f64 {
    props.cdp + cl * cl / (PI * props.aspect_ratio() * props.eff)
}

/// Aerodynamic force magnitude `q·c·S` for a coefficient on the wing area.
pub fn wing_force(props: &AircraftProperties, coeff: f64, atm: &Atmo, airspeed: f64) -> f64 {
    dynamic_pressure(atm, airspeed) * coeff * props.wing_area
}
