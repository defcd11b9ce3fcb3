use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::control::{ControlCommand, ControlLimits};
use crate::vehicle::{presets, AircraftProperties};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid scenario: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Simulation configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub dt: f64,       // integration timestep, s
    pub max_time: f64, // total simulated time, s (not reset on crash)
    pub floor: f64,    // altitude below which the aircraft is reset, m
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.02,        // 50 Hz
            max_time: 120.0, // 2 min
            floor: -1.0,
        }
    }
}

impl SimConfig {
    pub fn check(&self) -> Result<(), String> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(format!("dt must be positive, got {}", self.dt));
        }
        if !(self.max_time.is_finite() && self.max_time >= 0.0) {
            return Err(format!("max_time must be non-negative, got {}", self.max_time));
        }
        if !self.floor.is_finite() {
            return Err(format!("floor must be finite, got {}", self.floor));
        }
        Ok(())
    }

    /// Number of fixed ticks covering `max_time`; zero for a config that
    /// fails [`SimConfig::check`].
    pub fn ticks(&self) -> usize {
        if self.check().is_err() {
            return 0;
        }
        (self.max_time / self.dt).round() as usize
    }
}

// ---------------------------------------------------------------------------
// Scenario file
// ---------------------------------------------------------------------------

/// One timed entry of a scripted flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub time: f64,
    pub command: ControlCommand,
    /// Issue the command this many times (on consecutive ticks).
    #[serde(default = "one")]
    pub repeat: usize,
}

fn one() -> usize {
    1
}

/// Everything needed to run a flight, as read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "presets::cessna_172")]
    pub aircraft: AircraftProperties,
    #[serde(default)]
    pub sim: SimConfig,
    #[serde(default)]
    pub limits: ControlLimits,
    /// `None` flies the default takeoff script.
    #[serde(default)]
    pub script: Option<Vec<ScriptEntry>>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            aircraft: presets::cessna_172(),
            sim: SimConfig::default(),
            limits: ControlLimits::default(),
            script: None,
        }
    }
}

impl Scenario {
    /// Validate everything the numeric core takes on trust.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aircraft.check().map_err(ConfigError::Invalid)?;
        self.sim.check().map_err(ConfigError::Invalid)?;
        self.limits.check().map_err(ConfigError::Invalid)?;
        if let Some(entry) = self.script.iter().flatten().find(|e| !(e.time.is_finite() && e.time >= 0.0)) {
            return Err(ConfigError::Invalid(format!(
                "script entry {:?} has invalid time {}",
                entry.command, entry.time
            )));
        }
        Ok(())
    }

    /// Flattened `(time, command)` list, repeats expanded.
    pub fn script_commands(&self) -> Vec<(f64, ControlCommand)> {
        match &self.script {
            Some(entries) => entries
                .iter()
                .flat_map(|e| std::iter::repeat((e.time, e.command)).take(e.repeat))
                .collect(),
            None => presets::takeoff_script(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }
}

/// Load and validate a scenario from a JSON file.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario, ConfigError> {
    let text = fs::read_to_string(path)?;
    Scenario::from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_gives_defaults() {
        let s = Scenario::from_json("{}").unwrap();
        assert_eq!(s, Scenario::default());
        assert_eq!(s.sim.ticks(), 6000);
        assert_eq!(s.script_commands(), presets::takeoff_script());
    }

    #[test]
    fn partial_sections_fill_in() {
        let s = Scenario::from_json(r#"{ "sim": { "dt": 0.01 }, "limits": { "bank": { "min": -45, "max": 45 } } }"#)
            .unwrap();
        assert_eq!(s.sim.dt, 0.01);
        assert_eq!(s.sim.max_time, 120.0);
        assert_eq!(s.limits.bank.max, 45.0);
        assert_eq!(s.limits.throttle.max, 1.0);
    }

    #[test]
    fn script_repeats_expand() {
        let s = Scenario::from_json(
            r#"{ "script": [
                { "time": 0.0, "command": "ThrottleUp", "repeat": 3 },
                { "time": 5.0, "command": "AlphaUp" }
            ] }"#,
        )
        .unwrap();
        let cmds = s.script_commands();
        assert_eq!(cmds.len(), 4);
        assert_eq!(cmds[2], (0.0, ControlCommand::ThrottleUp));
        assert_eq!(cmds[3], (5.0, ControlCommand::AlphaUp));
    }

    #[test]
    fn rejects_non_physical_aircraft() {
        let mut s = Scenario::default();
        s.aircraft.mass = -5.0;
        let json = serde_json::to_string(&s).unwrap();
        match Scenario::from_json(&json) {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains("mass")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_dt() {
        let err = Scenario::from_json(r#"{ "sim": { "dt": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn invalid_config_runs_no_ticks() {
        assert_eq!(SimConfig { dt: 0.0, ..SimConfig::default() }.ticks(), 0);
        assert_eq!(SimConfig { dt: f64::NAN, ..SimConfig::default() }.ticks(), 0);
        assert_eq!(SimConfig { dt: 0.02, max_time: 1.0, floor: -1.0 }.ticks(), 50);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Scenario::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "sim": {{ "max_time": 10.0 }} }}"#).unwrap();
        let s = load_scenario(file.path()).unwrap();
        assert_eq!(s.sim.max_time, 10.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_scenario("/nonexistent/scenario.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
