use log::{debug, info, warn};
use serde::Serialize;

use crate::config::SimConfig;
use crate::control::{ControlCommand, ControlLimits, Pilot, ScriptedPilot};
use crate::dynamics::state::FlightState;
use crate::io::telemetry::Telemetry;
use crate::physics::atmosphere::atmosphere;
use crate::vehicle::{presets, AircraftProperties};
use super::event::{EventDetector, EventKind, LiftoffDetector, SimEvent, StallDetector, TouchdownDetector};
use super::integrator::rk4_step;

/// Stall-angle Cl jump above which a warning is logged.
const STALL_GAP_WARN: f64 = 1e-3;

// ---------------------------------------------------------------------------
// Simulation context (tick driver)
// ---------------------------------------------------------------------------

/// Owns the single aircraft state and advances it one tick at a time.
pub struct SimContext {
    pub props: AircraftProperties,
    pub config: SimConfig,
    pub limits: ControlLimits,
    state: FlightState,
    /// Total simulated time; unlike `state.time` it survives resets.
    elapsed: f64,
    detectors: Vec<Box<dyn EventDetector>>,
    derate_warned: bool,
}

impl SimContext {
    pub fn new(props: AircraftProperties, config: SimConfig, limits: ControlLimits) -> Self {
        debug_assert!(props.check().is_ok(), "{:?}", props.check());
        debug_assert!(config.check().is_ok(), "{:?}", config.check());

        let gap = props.stall_gap();
        if gap.abs() > STALL_GAP_WARN {
            warn!(
                "{}: lift curve jumps by {:.4} at the stall angle ({} deg)",
                props.name, gap, props.alpha_cl_max
            );
        }
        let detectors: Vec<Box<dyn EventDetector>> = vec![
            Box::new(LiftoffDetector),
            Box::new(TouchdownDetector),
            Box::new(StallDetector::new(props.alpha_cl_max)),
        ];

        Self {
            props,
            config,
            limits,
            state: FlightState::new(),
            elapsed: 0.0,
            detectors,
            derate_warned: false,
        }
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    /// Mutable access for collaborators that set controls directly.
    pub fn state_mut(&mut self) -> &mut FlightState {
        &mut self.state
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Return the aircraft to the spawn condition.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Advance one tick: apply `command`, integrate over `dt`, detect events
    /// and reset if the aircraft dropped below the floor.
    pub fn tick(&mut self, dt: f64, command: Option<ControlCommand>) -> Vec<SimEvent> {
        let mut events = Vec::new();

        if command == Some(ControlCommand::Reset) {
            self.reset();
            events.push(self.event(EventKind::Reset));
        }

        // Taken before the command so control changes reach the detectors.
        let prev = self.state;
        if let Some(cmd) = command.filter(|c| *c != ControlCommand::Reset) {
            cmd.apply(&mut self.state.controls, &self.limits);
        }
        rk4_step(&self.props, &mut self.state, dt);
        self.elapsed += dt;

        for det in self.detectors.iter_mut() {
            if let Some(kind) = det.check(&prev, &self.state) {
                events.push(SimEvent { time: self.state.time, kind, state: self.state });
            }
        }

        let altitude = self.state.altitude();
        if !self.derate_warned
            && self.state.controls.throttle > 0.0
            && atmosphere(altitude).power_factor < 0.0
        {
            warn!("Engine power factor negative at {:.0} m, thrust is reversed", altitude);
            self.derate_warned = true;
        }

        if altitude < self.config.floor {
            events.push(self.event(EventKind::Crash { altitude }));
            self.reset();
        }

        for e in &events {
            info!("t={:.2}s {:?}", e.time, e.kind);
        }
        debug!("{}", Telemetry::from_state(&self.state));

        events
    }

    fn event(&self, kind: EventKind) -> SimEvent {
        SimEvent { time: self.state.time, kind, state: self.state }
    }
}

// ---------------------------------------------------------------------------
// Full flight
// ---------------------------------------------------------------------------

/// One recorded tick.
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    pub elapsed: f64,
    pub state: FlightState,
    pub command: Option<ControlCommand>,
}

/// Recorded trajectory and event log of a run.
#[derive(Debug, Clone, Serialize)]
pub struct Flight {
    pub aircraft: String,
    pub samples: Vec<Sample>,
    pub events: Vec<SimEvent>,
}

/// Fly for `config.max_time` with commands from `pilot`.
///
/// Uses a fixed tick count, since `state.time` restarts whenever the
/// aircraft is reset.
pub fn simulate_with(
    props: &AircraftProperties,
    config: &SimConfig,
    limits: &ControlLimits,
    pilot: &mut dyn Pilot,
) -> Flight {
    let mut ctx = SimContext::new(props.clone(), *config, *limits);
    let ticks = config.ticks();

    info!(
        "Flying {} with {} for {:.1}s ({} ticks, dt={}s)",
        props.name,
        pilot.name(),
        config.max_time,
        ticks,
        config.dt
    );

    let mut samples = Vec::with_capacity((ticks + 1).min(200_000));
    let mut events = Vec::new();
    samples.push(Sample { elapsed: 0.0, state: *ctx.state(), command: None });

    for _ in 0..ticks {
        let command = pilot.command(ctx.state(), config.dt);
        let tick_events = ctx.tick(config.dt, command);

        // Only crashes restart the pilot; a commanded reset came from it.
        if tick_events.iter().any(|e| matches!(e.kind, EventKind::Crash { .. })) {
            pilot.reset();
        }
        events.extend(tick_events);
        samples.push(Sample { elapsed: ctx.elapsed(), state: *ctx.state(), command });
    }

    info!("Finished after {:.1}s with {} events", ctx.elapsed(), events.len());

    Flight { aircraft: props.name.clone(), samples, events }
}

/// Fly the default takeoff script.
pub fn simulate(props: &AircraftProperties, config: &SimConfig) -> Flight {
    let mut pilot = ScriptedPilot::new(presets::takeoff_script());
    simulate_with(props, config, &ControlLimits::default(), &mut pilot)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::AltitudeHold;
    use crate::dynamics::state::{StateVector, ALT, VEL_A};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn ctx() -> SimContext {
        SimContext::new(presets::cessna_172(), SimConfig::default(), ControlLimits::default())
    }

    #[test]
    fn idle_aircraft_sits_still() {
        init_logger();
        let mut c = ctx();
        for _ in 0..100 {
            assert!(c.tick(0.02, None).is_empty());
        }
        assert_eq!(c.state().q, StateVector::zeros());
        assert!((c.state().time - 2.0).abs() < 1e-9);
    }

    #[test]
    fn commands_are_clamped() {
        let mut c = ctx();
        for _ in 0..30 {
            c.tick(0.02, Some(ControlCommand::ThrottleUp));
        }
        assert_eq!(c.state().controls.throttle, 1.0);
    }

    #[test]
    fn reset_command_restores_spawn() {
        let mut c = ctx();
        c.state_mut().q = StateVector::new(30.0, 100.0, 0.0, 0.0, 0.0, 0.0);
        c.state_mut().controls.throttle = 0.5;
        let events = c.tick(0.02, Some(ControlCommand::Reset));
        assert_eq!(events[0].kind, EventKind::Reset);
        // Reset happens before the step, so the tick integrates from rest.
        assert_eq!(c.state().q, StateVector::zeros());
        assert!((c.state().time - 0.02).abs() < 1e-12);
        assert_eq!(c.state().controls.throttle, 0.0);
    }

    #[test]
    fn alpha_sweep_reports_stall_and_recovery() {
        let mut c = ctx();
        let mut kinds = Vec::new();
        for _ in 0..16 {
            kinds.extend(c.tick(0.02, Some(ControlCommand::AlphaUp)).into_iter().map(|e| e.kind));
        }
        assert_eq!(c.state().controls.alpha, 20.0);
        assert_eq!(kinds, vec![EventKind::Stall]);

        for _ in 0..16 {
            kinds.extend(c.tick(0.02, Some(ControlCommand::AlphaDown)).into_iter().map(|e| e.kind));
        }
        assert_eq!(kinds, vec![EventKind::Stall, EventKind::StallRecovery]);
    }

    #[test]
    fn scripted_reset_fires_once() {
        let config = SimConfig { dt: 0.02, max_time: 5.0, floor: -1.0 };
        let mut pilot = ScriptedPilot::new(vec![(1.0, ControlCommand::Reset)]);
        let flight = simulate_with(&presets::cessna_172(), &config, &ControlLimits::default(), &mut pilot);
        let resets = flight.events.iter().filter(|e| e.kind == EventKind::Reset).count();
        assert_eq!(resets, 1);
        assert_eq!(pilot.remaining(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn zero_dt_config_rejected() {
        let config = SimConfig { dt: 0.0, ..SimConfig::default() };
        SimContext::new(presets::cessna_172(), config, ControlLimits::default());
    }

    #[test]
    fn falling_below_floor_resets() {
        init_logger();
        let mut c = ctx();
        c.state_mut().q[ALT] = 20.0;
        let mut crashed = false;
        for _ in 0..500 {
            let events = c.tick(0.02, None);
            if events.iter().any(|e| matches!(e.kind, EventKind::Crash { .. })) {
                crashed = true;
                break;
            }
        }
        assert!(crashed, "aircraft dropped from 20 m should go through the floor");
        assert_eq!(*c.state(), FlightState::new());
        assert!(c.elapsed() > 0.0);
    }

    #[test]
    fn touchdown_reported_before_crash() {
        let mut c = ctx();
        c.state_mut().q[ALT] = 2.0;
        let mut kinds = Vec::new();
        for _ in 0..200 {
            kinds.extend(c.tick(0.02, None).into_iter().map(|e| e.kind));
        }
        let touchdown = kinds.iter().position(|k| matches!(k, EventKind::Touchdown { .. }));
        let crash = kinds.iter().position(|k| matches!(k, EventKind::Crash { .. }));
        assert!(touchdown.is_some());
        assert!(crash.is_some());
        assert!(touchdown < crash);
    }

    #[test]
    fn takeoff_script_gets_airborne() {
        init_logger();
        let config = SimConfig { dt: 0.02, max_time: 60.0, floor: -1.0 };
        let flight = simulate(&presets::cessna_172(), &config);

        assert_eq!(flight.samples.len(), config.ticks() + 1);
        let liftoff = flight.events.iter().find(|e| e.kind == EventKind::Liftoff);
        assert!(liftoff.is_some(), "no liftoff in {:?}", flight.events);
        assert!(!flight.events.iter().any(|e| matches!(e.kind, EventKind::Crash { .. })));

        let last = &flight.samples.last().unwrap().state;
        assert!(last.q[ALT] > 20.0, "altitude {}", last.q[ALT]);
        assert!(last.q[VEL_A] > 30.0);
        assert!((flight.samples.last().unwrap().elapsed - 60.0).abs() < 1e-6);
    }

    #[test]
    fn altitude_hold_climbs_towards_target() {
        let config = SimConfig { dt: 0.02, max_time: 90.0, floor: -1.0 };
        let mut pilot = AltitudeHold::new(150.0, 1.0);
        let flight = simulate_with(&presets::cessna_172(), &config, &ControlLimits::default(), &mut pilot);
        let max_alt = flight.samples.iter().map(|s| s.state.altitude()).fold(0.0_f64, f64::max);
        assert!(max_alt > 50.0, "max altitude {max_alt}");
    }
}
