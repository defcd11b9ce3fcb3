pub mod csv;
pub mod json;
pub mod telemetry;

pub use json::FlightSummary;
pub use telemetry::{Telemetry, WorldPose};
