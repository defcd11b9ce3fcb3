// ---------------------------------------------------------------------------
// Troposphere model (linear lapse) with engine power derating
// ---------------------------------------------------------------------------

const T0: f64 = 288.15;        // sea-level temperature, K
const P0: f64 = 101_325.0;     // sea-level pressure, Pa
const LAPSE: f64 = 0.0065;     // temperature lapse rate, K/m
const EXPONENT: f64 = 5.25;    // barometric exponent (g / (R * lapse), rounded)
const DENSITY_COEFF: f64 = 0.00348; // 1 / R_air, kg·K/J
const RHO0: f64 = 1.225;       // sea-level density, kg/m^3

/// Atmospheric properties at a given altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmo {
    pub temperature: f64,  // K
    pub pressure: f64,     // Pa
    pub density: f64,      // kg/m^3
    pub power_factor: f64, // engine power fraction available (1.0 at sea level)
}

/// Troposphere atmosphere at `altitude` (m).
///
/// Total over the real line: no clamping is applied, so very high or very
/// negative altitudes give physically meaningless (but finite or NaN)
/// values. The power factor is unclamped and turns negative
/// once density drops below 12% of sea level.
pub fn atmosphere(altitude: f64) -> Atmo {
    let temperature = T0 - LAPSE * altitude;
    let pressure = P0 * (1.0 - LAPSE * altitude / T0).powf(EXPONENT);
    let density = DENSITY_COEFF * pressure / temperature;

    let sigma = density / RHO0;
    let power_factor = (sigma - 0.12) / 0.88;

    Atmo {
        temperature,
        pressure,
        density,
        power_factor,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sea_level_standard_values() {
        let a = atmosphere(0.0);
        assert_relative_eq!(a.temperature, 288.15);
        assert_relative_eq!(a.pressure, 101_325.0);
        // 0.00348 is a rounded 1/R, which lands the sea-level value at 1.2237.
        assert!((a.density - 1.225).abs() < 2e-3, "got {}", a.density);
    }

    #[test]
    fn power_factor_near_unity_at_sea_level() {
        let a = atmosphere(0.0);
        assert!((a.power_factor - 1.0).abs() < 2e-3);
    }

    #[test]
    fn density_decreases_with_altitude() {
        let rho_0 = atmosphere(0.0).density;
        let rho_1k = atmosphere(1_000.0).density;
        let rho_5k = atmosphere(5_000.0).density;
        assert!(rho_0 > rho_1k);
        assert!(rho_1k > rho_5k);
    }

    #[test]
    fn lapse_rate_temperature() {
        let a = atmosphere(2_000.0);
        assert_relative_eq!(a.temperature, 275.15, epsilon = 1e-9);
    }

    #[test]
    fn power_factor_goes_negative_high_up() {
        // Density ratio falls below 0.12 somewhere past 17 km; no floor is applied.
        let a = atmosphere(20_000.0);
        assert!(a.power_factor < 0.0, "got {}", a.power_factor);
        assert!(a.power_factor.is_finite());
    }

    #[test]
    fn below_sea_level_is_denser() {
        let a = atmosphere(-100.0);
        assert!(a.density > atmosphere(0.0).density);
        assert!(a.power_factor > 1.0);
    }
}
