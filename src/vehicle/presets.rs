use crate::control::ControlCommand;

use super::aircraft::AircraftProperties;

// ---------------------------------------------------------------------------
// Preset aircraft and scripts
// ---------------------------------------------------------------------------

/// Cessna 172 Skyhawk coefficients.
pub fn cessna_172() -> AircraftProperties {
    AircraftProperties {
        name: "Cessna 172".into(),
        wing_area: 16.2,
        wing_span: 10.9,
        tail_area: 2.0,
        cl_slope0: 0.0889,
        cl0: 0.178,
        cl_slope1: -0.1,
        cl1: 3.2,
        alpha_cl_max: 16.0,
        cdp: 0.034,
        eff: 0.77,
        mass: 1114.0,
        engine_power: 119_310.0,
        engine_rps: 40.0,
        prop_diameter: 1.905,
        a: 1.83,
        b: -1.32,
    }
}

/// Takeoff and climb-out: full throttle and 20 deg of flap on the roll,
/// rotate to 8 deg once airborne speed is reached, then retract flaps.
///
/// Entries are `(time, command)`; one command is issued per tick, so a
/// burst of entries at the same time spreads over consecutive ticks.
pub fn takeoff_script() -> Vec<(f64, ControlCommand)> {
    let mut script = Vec::new();
    for _ in 0..10 {
        script.push((0.0, ControlCommand::ThrottleUp));
    }
    for _ in 0..20 {
        script.push((0.5, ControlCommand::FlapsDown));
    }
    for _ in 0..4 {
        script.push((20.0, ControlCommand::AlphaUp));
    }
    for _ in 0..20 {
        script.push((40.0, ControlCommand::FlapsUp));
    }
    script
}
