pub mod config;
pub mod control;
pub mod dynamics;
pub mod io;
pub mod physics;
pub mod sim;
pub mod vehicle;
