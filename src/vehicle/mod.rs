pub mod aircraft;
pub mod presets;

pub use aircraft::{AircraftBuilder, AircraftProperties};
