use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Aircraft definition (fixed aerodynamic and engine coefficients)
// ---------------------------------------------------------------------------

/// Aerodynamic, mass and engine properties of an aircraft.
///
/// Set once at spawn and never mutated by the simulation. All values must be
/// finite and the areas, span, mass, engine rps and propeller diameter must
/// be strictly positive; the force model does not check this and produces
/// non-finite output otherwise. See [`AircraftProperties::check`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftProperties {
    #[serde(default = "default_name")]
    pub name: String,
    pub wing_area: f64,     // m^2
    pub wing_span: f64,     // m
    pub tail_area: f64,     // m^2
    pub cl_slope0: f64,     // pre-stall Cl-alpha slope, 1/deg
    pub cl0: f64,           // pre-stall intercept
    pub cl_slope1: f64,     // post-stall Cl-alpha slope, 1/deg
    pub cl1: f64,           // post-stall intercept
    pub alpha_cl_max: f64,  // stall angle, deg
    pub cdp: f64,           // parasite drag coefficient
    pub eff: f64,           // induced drag efficiency (Oswald)
    pub mass: f64,          // kg
    pub engine_power: f64,  // W
    pub engine_rps: f64,    // rev/s
    pub prop_diameter: f64, // m
    pub a: f64,             // propeller efficiency coefficient
    pub b: f64,             // propeller efficiency coefficient (advance ratio squared)
}

fn default_name() -> String {
    "aircraft".into()
}

impl AircraftProperties {
    /// Wing aspect ratio, span^2 / area.
    pub fn aspect_ratio(&self) -> f64 {
        self.wing_span * self.wing_span / self.wing_area
    }

    /// Weight at standard gravity, N.
    pub fn weight(&self) -> f64 {
        self.mass * crate::dynamics::state::G
    }

    /// Jump in Cl where the pre-stall and post-stall lines meet.
    ///
    /// Zero for a continuous curve. Reported, never corrected.
    pub fn stall_gap(&self) -> f64 {
        let a = self.alpha_cl_max;
        (self.cl_slope1 * a + self.cl1) - (self.cl_slope0 * a + self.cl0)
    }

    /// Check the physical preconditions of the force model.
    pub fn check(&self) -> Result<(), String> {
        let values = [
            ("wing_area", self.wing_area),
            ("wing_span", self.wing_span),
            ("tail_area", self.tail_area),
            ("cl_slope0", self.cl_slope0),
            ("cl0", self.cl0),
            ("cl_slope1", self.cl_slope1),
            ("cl1", self.cl1),
            ("alpha_cl_max", self.alpha_cl_max),
            ("cdp", self.cdp),
            ("eff", self.eff),
            ("mass", self.mass),
            ("engine_power", self.engine_power),
            ("engine_rps", self.engine_rps),
            ("prop_diameter", self.prop_diameter),
            ("a", self.a),
            ("b", self.b),
        ];
        if let Some((field, v)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{field} must be finite, got {v}"));
        }

        let positive = [
            ("wing_area", self.wing_area),
            ("wing_span", self.wing_span),
            ("tail_area", self.tail_area),
            ("mass", self.mass),
            ("engine_rps", self.engine_rps),
            ("prop_diameter", self.prop_diameter),
        ];
        if let Some((field, v)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(format!("{field} must be positive, got {v}"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Aircraft builder
// ---------------------------------------------------------------------------

/// Builder starting from the Cessna 172 coefficients.
pub struct AircraftBuilder {
    props: AircraftProperties,
}

impl AircraftBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        let mut props = super::presets::cessna_172();
        props.name = name.into();
        Self { props }
    }

    pub fn wing_area(mut self, v: f64) -> Self {
        self.props.wing_area = v;
        self
    }
    pub fn wing_span(mut self, v: f64) -> Self {
        self.props.wing_span = v;
        self
    }
    pub fn tail_area(mut self, v: f64) -> Self {
        self.props.tail_area = v;
        self
    }
    pub fn lift_curve(mut self, slope: f64, intercept: f64) -> Self {
        self.props.cl_slope0 = slope;
        self.props.cl0 = intercept;
        self
    }
    pub fn post_stall(mut self, slope: f64, intercept: f64) -> Self {
        self.props.cl_slope1 = slope;
        self.props.cl1 = intercept;
        self
    }
    pub fn stall_alpha(mut self, v: f64) -> Self {
        self.props.alpha_cl_max = v;
        self
    }
    pub fn parasite_drag(mut self, v: f64) -> Self {
        self.props.cdp = v;
        self
    }
    pub fn efficiency(mut self, v: f64) -> Self {
        self.props.eff = v;
        self
    }
    pub fn mass(mut self, v: f64) -> Self {
        self.props.mass = v;
        self
    }
    pub fn engine_power(mut self, v: f64) -> Self {
        self.props.engine_power = v;
        self
    }
    pub fn engine_rps(mut self, v: f64) -> Self {
        self.props.engine_rps = v;
        self
    }
    pub fn prop_diameter(mut self, v: f64) -> Self {
        self.props.prop_diameter = v;
        self
    }
    pub fn prop_efficiency(mut self, a: f64, b: f64) -> Self {
        self.props.a = a;
        self.props.b = b;
        self
    }

    pub fn build(self) -> AircraftProperties {
        self.props
    }
}
