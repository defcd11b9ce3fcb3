use std::collections::VecDeque;

use crate::dynamics::state::FlightState;

use super::input::ControlCommand;
use super::pid::Pid;

/// Trait for pilots feeding control commands into the tick loop.
///
/// Implement this to drive the simulation with custom inputs. At most one
/// command is issued per tick.
pub trait Pilot {
    /// Pick the command for this tick from the current state.
    fn command(&mut self, state: &FlightState, dt: f64) -> Option<ControlCommand>;

    /// Called after a crash has sent the aircraft back to spawn.
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

// ---------------------------------------------------------------------------
// Scripted pilot: replays a timed command list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ScriptedPilot {
    script: Vec<(f64, ControlCommand)>,
    pending: VecDeque<(f64, ControlCommand)>,
}

impl ScriptedPilot {
    /// Entries are stably sorted by time; entries sharing a time keep their order.
    pub fn new(mut script: Vec<(f64, ControlCommand)>) -> Self {
        script.sort_by(|a, b| a.0.total_cmp(&b.0));
        let pending = script.iter().copied().collect();
        Self { script, pending }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl Pilot for ScriptedPilot {
    fn command(&mut self, state: &FlightState, _dt: f64) -> Option<ControlCommand> {
        let due = matches!(self.pending.front(), Some(&(t, _)) if t <= state.time);
        if due {
            self.pending.pop_front().map(|(_, cmd)| cmd)
        } else {
            None
        }
    }

    /// Replay the script from the start, matching the restarted flight clock.
    fn reset(&mut self) {
        self.pending = self.script.iter().copied().collect();
    }

    fn name(&self) -> &str {
        "ScriptedPilot"
    }
}

// ---------------------------------------------------------------------------
// Altitude hold: PID on altitude error -> alpha target
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AltitudeHold {
    pub target_altitude: f64, // m
    pub throttle: f64,        // held throttle setting
    pub trim_alpha: f64,      // deg, alpha at zero error
    pub pid: Pid,
}

impl AltitudeHold {
    pub fn new(target_altitude: f64, throttle: f64) -> Self {
        Self {
            target_altitude,
            throttle,
            trim_alpha: 6.0,
            // Output in degrees of alpha per metre of error.
            pid: Pid::new(0.08, 0.01, 0.15).with_integral_limit(50.0),
        }
    }

    /// Alpha the controller is steering toward for `state`.
    pub fn desired_alpha(&mut self, state: &FlightState, dt: f64) -> f64 {
        let error = self.target_altitude - state.altitude();
        self.trim_alpha + self.pid.update(error, dt)
    }
}

impl Pilot for AltitudeHold {
    fn command(&mut self, state: &FlightState, dt: f64) -> Option<ControlCommand> {
        let c = &state.controls;
        let alpha = self.desired_alpha(state, dt);

        // Throttle first, then pitch, then wings level.
        if c.throttle < self.throttle - 0.05 {
            Some(ControlCommand::ThrottleUp)
        } else if c.throttle > self.throttle + 0.05 {
            Some(ControlCommand::ThrottleDown)
        } else if alpha > c.alpha + 0.5 {
            Some(ControlCommand::AlphaUp)
        } else if alpha < c.alpha - 0.5 {
            Some(ControlCommand::AlphaDown)
        } else if c.bank > 0.5 {
            Some(ControlCommand::BankRight)
        } else if c.bank < -0.5 {
            Some(ControlCommand::BankLeft)
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.pid.reset();
    }

    fn name(&self) -> &str {
        "AltitudeHold"
    }
}
