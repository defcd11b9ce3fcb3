use crate::dynamics::eom::rhs;
use crate::dynamics::state::FlightState;
use crate::vehicle::AircraftProperties;

// ---------------------------------------------------------------------------
// Classical 4th-order Runge-Kutta step
// ---------------------------------------------------------------------------

/// Advance `state` by `dt` in place with the controls it currently holds.
///
/// Each stage increment already carries the `dt` factor, so the stages are
/// combined with plain 1-2-2-1 weights over 6. Never fails: invalid aircraft
/// properties show up as non-finite state values.
pub fn rk4_step(props: &AircraftProperties, state: &mut FlightState, dt: f64) {
    let q = state.q;
    let controls = &state.controls;

    let k1 = rhs(props, controls, &q, &q, dt, 0.0);
    let k2 = rhs(props, controls, &q, &k1, dt, 0.5);
    let k3 = rhs(props, controls, &q, &k2, dt, 0.5);
    let k4 = rhs(props, controls, &q, &k3, dt, 1.0);

    state.time += dt;
    state.q = q + (k1 + k2 * 2.0 + k3 * 2.0 + k4) / 6.0;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
