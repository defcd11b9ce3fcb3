use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::dynamics::state::{POS_A, POS_B, VEL_Z};
use crate::sim::event::{EventKind, SimEvent};
use crate::sim::runner::Flight;

/// Summary statistics computed from a recorded flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightSummary {
    pub aircraft: String,
    pub flight_time: f64,
    pub max_altitude: f64,
    pub max_altitude_time: f64,
    pub max_airspeed: f64,
    pub max_climb_rate: f64,
    /// Largest horizontal distance from the spawn point, m.
    pub max_range: f64,
    pub final_altitude: f64,
    pub final_airspeed: f64,
    pub liftoffs: usize,
    pub touchdowns: usize,
    pub stalls: usize,
    pub crashes: usize,
    pub resets: usize,
}

impl FlightSummary {
    pub fn from_flight(flight: &Flight) -> Self {
        let (max_altitude, max_altitude_time) = flight
            .samples
            .iter()
            .map(|s| (s.state.altitude(), s.elapsed))
            .fold((0.0_f64, 0.0_f64), |best, cur| if cur.0 > best.0 { cur } else { best });

        let max_airspeed = flight.samples.iter().map(|s| s.state.airspeed()).fold(0.0_f64, f64::max);
        let max_climb_rate = flight.samples.iter().map(|s| s.state.q[VEL_Z]).fold(0.0_f64, f64::max);
        let max_range = flight
            .samples
            .iter()
            .map(|s| s.state.q[POS_A].hypot(s.state.q[POS_B]))
            .fold(0.0_f64, f64::max);

        let (flight_time, final_altitude, final_airspeed) = flight
            .samples
            .last()
            .map(|s| (s.elapsed, s.state.altitude(), s.state.airspeed()))
            .unwrap_or_default();

        let count = |pred: fn(&EventKind) -> bool| flight.events.iter().filter(|e| pred(&e.kind)).count();

        Self {
            aircraft: flight.aircraft.clone(),
            flight_time,
            max_altitude,
            max_altitude_time,
            max_airspeed,
            max_climb_rate,
            max_range,
            final_altitude,
            final_airspeed,
            liftoffs: count(|k| matches!(k, EventKind::Liftoff)),
            touchdowns: count(|k| matches!(k, EventKind::Touchdown { .. })),
            stalls: count(|k| matches!(k, EventKind::Stall)),
            crashes: count(|k| matches!(k, EventKind::Crash { .. })),
            resets: count(|k| matches!(k, EventKind::Reset)),
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    summary: &'a FlightSummary,
    events: &'a [SimEvent],
}

/// Write flight summary and event log as pretty JSON.
pub fn write_summary<W: Write>(writer: W, flight: &Flight, summary: &FlightSummary) -> io::Result<()> {
    let report = Report { summary, events: &flight.events };
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

/// Write flight summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, flight: &Flight, summary: &FlightSummary) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, flight, summary)?;
    writeln!(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::{FlightState, ALT, VEL_A};
    use crate::sim::runner::Sample;

    fn sample(elapsed: f64, alt: f64, vel_a: f64, pos_a: f64) -> Sample {
        let mut state = FlightState::new();
        state.time = elapsed;
        state.q[ALT] = alt;
        state.q[VEL_A] = vel_a;
        state.q[POS_A] = pos_a;
        Sample { elapsed, state, command: None }
    }

    fn simple_flight() -> Flight {
        let samples = vec![
            sample(0.0, 0.0, 0.0, 0.0),
            sample(10.0, 120.0, 40.0, 300.0),
            sample(20.0, 80.0, 35.0, 700.0),
        ];
        let events = vec![
            SimEvent { time: 5.0, kind: EventKind::Liftoff, state: samples[1].state },
            SimEvent { time: 15.0, kind: EventKind::Stall, state: samples[2].state },
        ];
        Flight { aircraft: "Test".into(), samples, events }
    }

    #[test]
    fn summary_finds_peaks() {
        let s = FlightSummary::from_flight(&simple_flight());
        assert_eq!(s.max_altitude, 120.0);
        assert_eq!(s.max_altitude_time, 10.0);
        assert_eq!(s.max_airspeed, 40.0);
        assert_eq!(s.max_range, 700.0);
        assert_eq!(s.flight_time, 20.0);
        assert_eq!(s.final_altitude, 80.0);
        assert_eq!((s.liftoffs, s.stalls, s.crashes), (1, 1, 0));
    }

    #[test]
    fn empty_flight_is_all_zero() {
        let flight = Flight { aircraft: "Empty".into(), samples: vec![], events: vec![] };
        let s = FlightSummary::from_flight(&flight);
        assert_eq!(s.flight_time, 0.0);
        assert_eq!(s.max_altitude, 0.0);
    }

    #[test]
    fn json_output_is_valid() {
        let flight = simple_flight();
        let summary = FlightSummary::from_flight(&flight);

        let mut buf = Vec::new();
        write_summary(&mut buf, &flight, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["summary"]["aircraft"], "Test");
        assert_eq!(value["summary"]["max_altitude"], 120.0);
        assert_eq!(value["events"].as_array().unwrap().len(), 2);
        assert_eq!(value["events"][0]["kind"], "Liftoff");
    }
}
