//! Simulated inertial sensor

use nalgebra::Vector2;

use util::maths::wrap_180;

use super::InertialSensor;

/// Standard gravity, m/s^2
const STANDARD_GRAVITY_MS2: f64 = 9.80665;

/// An inertial sensor whose attitude and acceleration are set directly.
///
/// Displacement is integrated from the set acceleration on each call to [`SimImu::step`], so it
/// accumulates error in the same way a real sensor's does.
#[derive(Debug, Clone, Default)]
pub struct SimImu {
    yaw_deg: f64,
    yaw_zero_deg: f64,
    pitch_deg: f64,
    roll_deg: f64,

    /// World frame linear acceleration, g
    accel_g: Vector2<f64>,

    velocity_ms: Vector2<f64>,
    displacement_m: Vector2<f64>,
}

impl SimImu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the true attitude of the sensor, in degrees.
    pub fn set_attitude(&mut self, yaw_deg: f64, pitch_deg: f64, roll_deg: f64) {
        self.yaw_deg = yaw_deg;
        self.pitch_deg = pitch_deg;
        self.roll_deg = roll_deg;
    }

    /// Set the world frame linear acceleration, in g.
    pub fn set_linear_accel(&mut self, x_g: f64, y_g: f64) {
        self.accel_g = Vector2::new(x_g, y_g);
    }

    /// Integrate the current acceleration over `dt_s` seconds.
    pub fn step(&mut self, dt_s: f64) {
        self.velocity_ms += self.accel_g * STANDARD_GRAVITY_MS2 * dt_s;
        self.displacement_m += self.velocity_ms * dt_s;
    }
}

impl InertialSensor for SimImu {
    fn fused_heading_deg(&self) -> f64 {
        wrap_180(self.yaw_deg - self.yaw_zero_deg)
    }

    fn pitch_deg(&self) -> f64 {
        self.pitch_deg
    }

    fn roll_deg(&self) -> f64 {
        self.roll_deg
    }

    fn zero_yaw(&mut self) {
        self.yaw_zero_deg = self.yaw_deg;
    }

    fn displacement_x_m(&self) -> f64 {
        self.displacement_m.x
    }

    fn displacement_y_m(&self) -> f64 {
        self.displacement_m.y
    }

    fn reset_displacement(&mut self) {
        self.velocity_ms = Vector2::zeros();
        self.displacement_m = Vector2::zeros();
    }

    fn world_linear_accel_g(&self) -> (f64, f64) {
        (self.accel_g.x, self.accel_g.y)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_heading_wraps() {
        let mut imu = SimImu::new();

        imu.set_attitude(170.0, 0.0, 0.0);
        imu.zero_yaw();
        imu.set_attitude(-170.0, 0.0, 0.0);

        assert!((imu.fused_heading_deg() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_integrates() {
        let mut imu = SimImu::new();
        imu.set_linear_accel(1.0, 0.0);

        imu.step(1.0);

        assert!((imu.displacement_x_m() - STANDARD_GRAVITY_MS2).abs() < 1e-9);
        assert_eq!(imu.displacement_y_m(), 0.0);

        // Velocity carries on after the acceleration stops
        imu.set_linear_accel(0.0, 0.0);
        imu.step(1.0);
        assert!((imu.displacement_x_m() - 2.0 * STANDARD_GRAVITY_MS2).abs() < 1e-9);

        imu.reset_displacement();
        imu.step(1.0);
        assert_eq!(imu.displacement_x_m(), 0.0);
    }
}
