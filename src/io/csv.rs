use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::dynamics::state::{ALT, POS_A, POS_B, VEL_A, VEL_B, VEL_Z};
use crate::sim::runner::Sample;

use super::telemetry::Telemetry;

/// One CSV row per recorded tick.
#[derive(Debug, Serialize)]
struct TrajectoryRecord {
    elapsed: f64,
    time: f64,
    vel_a: f64,
    pos_a: f64,
    vel_b: f64,
    pos_b: f64,
    vel_z: f64,
    altitude: f64,
    throttle: f64,
    alpha_deg: f64,
    bank_deg: f64,
    flap_deg: f64,
    airspeed: f64,
    heading_deg: f64,
    climb_deg: f64,
}

impl From<&Sample> for TrajectoryRecord {
    fn from(s: &Sample) -> Self {
        let q = &s.state.q;
        let c = &s.state.controls;
        let t = Telemetry::from_state(&s.state);
        Self {
            elapsed: s.elapsed,
            time: s.state.time,
            vel_a: q[VEL_A],
            pos_a: q[POS_A],
            vel_b: q[VEL_B],
            pos_b: q[POS_B],
            vel_z: q[VEL_Z],
            altitude: q[ALT],
            throttle: c.throttle,
            alpha_deg: c.alpha,
            bank_deg: c.bank,
            flap_deg: c.flap,
            airspeed: t.airspeed,
            heading_deg: t.heading,
            climb_deg: t.climb_angle,
        }
    }
}

/// Write trajectory samples as CSV with a header row.
pub fn write_trajectory<W: Write>(writer: W, samples: &[Sample]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for s in samples {
        wtr.serialize(TrajectoryRecord::from(s))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: impl AsRef<Path>, samples: &[Sample]) -> csv::Result<()> {
    let file = std::fs::File::create(path)?;
    write_trajectory(file, samples)
}
