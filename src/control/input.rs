use serde::{Deserialize, Serialize};

use crate::dynamics::state::ControlInputs;

// ---------------------------------------------------------------------------
// Discrete control commands (one per tick)
// ---------------------------------------------------------------------------

pub const THROTTLE_STEP: f64 = 0.1;
pub const ALPHA_STEP: f64 = 1.0;
pub const BANK_STEP: f64 = 1.0;
pub const FLAP_STEP: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlCommand {
    ThrottleUp,
    ThrottleDown,
    AlphaUp,
    AlphaDown,
    BankLeft,
    BankRight,
    FlapsDown,
    FlapsUp,
    /// Return aircraft and controls to the spawn condition.
    Reset,
}

impl ControlCommand {
    /// Apply the command to `controls`, clamping the result into `limits`.
    ///
    /// All steps are whole degrees for angles, so flap settings land exactly
    /// on 20 and 40. `Reset` only restores the controls; resetting the state
    /// vector is up to the simulation context.
    pub fn apply(self, controls: &mut ControlInputs, limits: &ControlLimits) {
        match self {
            Self::ThrottleUp => controls.throttle = limits.throttle.clamp(controls.throttle + THROTTLE_STEP),
            Self::ThrottleDown => controls.throttle = limits.throttle.clamp(controls.throttle - THROTTLE_STEP),
            Self::AlphaUp => controls.alpha = limits.alpha.clamp(controls.alpha + ALPHA_STEP),
            Self::AlphaDown => controls.alpha = limits.alpha.clamp(controls.alpha - ALPHA_STEP),
            Self::BankLeft => controls.bank = limits.bank.clamp(controls.bank + BANK_STEP),
            Self::BankRight => controls.bank = limits.bank.clamp(controls.bank - BANK_STEP),
            Self::FlapsDown => controls.flap = limits.flap.clamp(controls.flap + FLAP_STEP),
            Self::FlapsUp => controls.flap = limits.flap.clamp(controls.flap - FLAP_STEP),
            Self::Reset => *controls = ControlInputs::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Control limits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Same as `f64::clamp` but tolerates inverted bounds by pinning to `min`.
    pub fn clamp(&self, v: f64) -> f64 {
        v.min(self.max).max(self.min)
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Ranges the host allows for each control input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlLimits {
    pub throttle: Bounds,
    pub alpha: Bounds, // deg
    pub bank: Bounds,  // deg
    pub flap: Bounds,  // deg
}

impl Default for ControlLimits {
    fn default() -> Self {
        Self {
            throttle: Bounds::new(0.0, 1.0),
            alpha: Bounds::new(0.0, 20.0),
            bank: Bounds::new(-20.0, 20.0),
            flap: Bounds::new(0.0, 40.0),
        }
    }
}

impl ControlLimits {
    pub fn check(&self) -> Result<(), String> {
        let all = [
            ("throttle", self.throttle),
            ("alpha", self.alpha),
            ("bank", self.bank),
            ("flap", self.flap),
        ];
        match all.iter().find(|(_, b)| !b.is_valid()) {
            Some((name, b)) => Err(format!("{name} limits [{}, {}] are not a valid range", b.min, b.max)),
            None => Ok(()),
        }
    }
}
