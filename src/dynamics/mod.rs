pub mod eom;
pub mod state;

pub use eom::{evaluate, rhs, ForceBreakdown};
pub use state::{ControlInputs, FlightState, StateVector};
