pub mod aerodynamics;
pub mod atmosphere;

pub use atmosphere::{atmosphere, Atmo};
