// ---------------------------------------------------------------------------
// PID Controller (single axis)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Pid {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// Anti-windup bound on the accumulated integral.
    pub integral_limit: f64,
    integral: f64,
    prev_error: Option<f64>,
}

impl Pid {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd, integral_limit: 1.0, prev_error: None, integral: 0.0 }
    }

    pub fn with_integral_limit(mut self, limit: f64) -> Self {
        self.integral_limit = limit.abs();
        self
    }

    pub fn update(&mut self, error: f64, dt: f64) -> f64 {
        self.integral = (self.integral + error * dt).clamp(-self.integral_limit, self.integral_limit);
        // No derivative kick on the first sample.
        let derivative = match self.prev_error {
            Some(prev) if dt > 0.0 => (error - prev) / dt,
            _ => 0.0,
        };
        self.prev_error = Some(error);
        self.kp * error + self.ki * self.integral + self.kd * derivative
    }

    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pid_proportional() {
        let mut pid = Pid::new(1.0, 0.0, 0.0);
        let out = pid.update(0.5, 0.01);
        assert!((out - 0.5).abs() < 1e-10, "Pure P should output Kp * error");
    }

    #[test]
    fn pid_integral_accumulates() {
        let mut pid = Pid::new(0.0, 1.0, 0.0);
        pid.update(1.0, 0.1);
        let out = pid.update(1.0, 0.1);
        assert!((out - 0.2).abs() < 1e-10, "Integral should accumulate");
    }

    #[test]
    fn pid_integral_saturates() {
        let mut pid = Pid::new(0.0, 1.0, 0.0).with_integral_limit(0.5);
        for _ in 0..100 {
            pid.update(10.0, 0.1);
        }
        assert!((pid.update(0.0, 0.1) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn pid_derivative_skips_first_sample() {
        let mut pid = Pid::new(0.0, 0.0, 1.0);
        assert_eq!(pid.update(5.0, 0.1), 0.0);
        assert!((pid.update(6.0, 0.1) - 10.0).abs() < 1e-9);
        pid.reset();
        assert_eq!(pid.update(1.0, 0.1), 0.0);
    }
}
