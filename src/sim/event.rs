use serde::Serialize;

use crate::dynamics::state::FlightState;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EventKind {
    Liftoff,
    Touchdown { sink_rate: f64 },
    Stall,
    StallRecovery,
    /// Altitude fell below the configured floor; the state was reset.
    Crash { altitude: f64 },
    /// Reset requested by the pilot.
    Reset,
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub state: FlightState,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive states and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &FlightState, current: &FlightState) -> Option<EventKind>;
}

/// Detects leaving the ground (altitude going from <= 0 to > 0).
pub struct LiftoffDetector;

impl EventDetector for LiftoffDetector {
    fn check(&mut self, prev: &FlightState, current: &FlightState) -> Option<EventKind> {
        if prev.altitude() <= 0.0 && current.altitude() > 0.0 {
            Some(EventKind::Liftoff)
        } else {
            None
        }
    }
}

/// Detects arriving on the ground, reporting the sink rate at contact.
pub struct TouchdownDetector;

impl EventDetector for TouchdownDetector {
    fn check(&mut self, prev: &FlightState, current: &FlightState) -> Option<EventKind> {
        if prev.altitude() > 0.0 && current.altitude() <= 0.0 {
            Some(EventKind::Touchdown { sink_rate: -current.velocity().z })
        } else {
            None
        }
    }
}

/// Detects alpha crossing the stall angle, in either direction.
pub struct StallDetector {
    pub alpha_cl_max: f64,
}

impl StallDetector {
    pub fn new(alpha_cl_max: f64) -> Self {
        Self { alpha_cl_max }
    }

    fn stalled(&self, s: &FlightState) -> bool {
        s.controls.alpha >= self.alpha_cl_max
    }
}

impl EventDetector for StallDetector {
    fn check(&mut self, prev: &FlightState, current: &FlightState) -> Option<EventKind> {
        match (self.stalled(prev), self.stalled(current)) {
            (false, true) => Some(EventKind::Stall),
            (true, false) => Some(EventKind::StallRecovery),
            _ => None,
        }
    }
}
