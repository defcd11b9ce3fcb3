pub mod integrator;
pub mod runner;
pub mod event;

pub use event::{EventKind, SimEvent};
pub use runner::{simulate, simulate_with, Flight, Sample, SimContext};
pub use integrator::rk4_step;
