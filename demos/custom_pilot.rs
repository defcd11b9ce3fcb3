use fixed_wing_sim::config::SimConfig;
use fixed_wing_sim::control::{ControlCommand, ControlLimits, Pilot};
use fixed_wing_sim::dynamics::state::FlightState;
use fixed_wing_sim::io::FlightSummary;
use fixed_wing_sim::sim;
use fixed_wing_sim::vehicle::AircraftBuilder;

/// Full throttle on the roll, rotate once past a target speed, then bank
/// into a gentle left turn after reaching a safe height.
struct RotateAndTurn {
    rotate_speed: f64, // m/s
    rotate_alpha: f64, // deg
    turn_height: f64,  // m
    turn_bank: f64,    // deg
}

impl Pilot for RotateAndTurn {
    fn command(&mut self, state: &FlightState, _dt: f64) -> Option<ControlCommand> {
        let c = &state.controls;
        if c.throttle < 1.0 {
            Some(ControlCommand::ThrottleUp)
        } else if state.airspeed() > self.rotate_speed && c.alpha < self.rotate_alpha {
            Some(ControlCommand::AlphaUp)
        } else if state.altitude() > self.turn_height && c.bank < self.turn_bank {
            Some(ControlCommand::BankLeft)
        } else {
            None
        }
    }

    fn name(&self) -> &str {
        "RotateAndTurn"
    }
}

fn main() {
    let aircraft = AircraftBuilder::new("Light Trainer")
        .mass(950.0)
        .engine_power(100_000.0)
        .build();
    let config = SimConfig { dt: 0.02, max_time: 90.0, floor: -1.0 };

    let mut pilot = RotateAndTurn {
        rotate_speed: 28.0,
        rotate_alpha: 10.0,
        turn_height: 50.0,
        turn_bank: 15.0,
    };

    println!("Simulating {} with {} pilot...", aircraft.name, pilot.name());
    let flight = sim::simulate_with(&aircraft, &config, &ControlLimits::default(), &mut pilot);
    let summary = FlightSummary::from_flight(&flight);

    println!("Max altitude: {:.0} m", summary.max_altitude);
    println!("Max airspeed: {:.1} m/s", summary.max_airspeed);
    println!("Max range: {:.0} m", summary.max_range);
    println!("Events: {}", flight.events.len());
    for e in &flight.events {
        println!("  t={:>6.2}s {:?}", e.time, e.kind);
    }
}
