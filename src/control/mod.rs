pub mod input;
pub mod pid;
pub mod pilot;

pub use input::{Bounds, ControlCommand, ControlLimits};
pub use pid::Pid;
pub use pilot::{AltitudeHold, Pilot, ScriptedPilot};
