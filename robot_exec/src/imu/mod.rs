//! # IMU module
//!
//! Reads orientation and displacement from the inertial measurement unit. Fusion and integration
//! happen in the sensor, this module passes its readings through without caching or filtering.
//!
//! An [`Imu`] only exists once the sensor has been acquired, so code holding one never reads an
//! unacquired sensor. If acquisition fails the rest of the robot runs without it.
//!
//! Displacement is integrated from acceleration and drifts without bound. Only trust it over a
//! few seconds after [`Imu::reset_displacement`].

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod sim;
pub use sim::SimImu;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::fmt::Display;

use log::{info, warn};
use serde::Deserialize;

use crate::dashboard::CollisionSource;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Interface to an inertial sensor driver.
///
/// Angles are in degrees in [-180, 180], distances in meters, accelerations in g.
pub trait InertialSensor {
    /// Fused yaw, positive clockwise.
    fn fused_heading_deg(&self) -> f64;

    /// Pitch, positive when tilted backwards.
    fn pitch_deg(&self) -> f64;

    /// Roll, positive when rolled left.
    fn roll_deg(&self) -> f64;

    /// Make subsequent yaw readings relative to the current yaw.
    fn zero_yaw(&mut self);

    fn displacement_x_m(&self) -> f64;

    fn displacement_y_m(&self) -> f64;

    /// Zero the integrated velocity and displacement.
    fn reset_displacement(&mut self);

    /// Linear acceleration in the world X and Y axes, with gravity removed.
    fn world_linear_accel_g(&self) -> (f64, f64);
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// IMU parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ImuParams {
    /// Where the sensor is acquired from.
    pub source: ImuSource,

    /// Change in horizontal acceleration between two updates above which a collision is
    /// declared.
    ///
    /// Units: g
    pub collision_threshold_g: f64,
}

/// An acquired inertial sensor.
pub struct Imu<S> {
    sensor: S,

    collision_threshold_g: f64,

    last_accel_g: Option<(f64, f64)>,

    collision_happened: bool,
}

/// A single orientation reading.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrientationReading {
    pub heading_deg: f64,
    pub pitch_deg: f64,
    pub roll_deg: f64,
}

/// Displacement since the last reset.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Displacement {
    pub x_m: f64,
    pub y_m: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub enum ImuSource {
    /// The in-process simulated sensor
    Sim,

    /// No sensor is fitted
    None,
}

#[derive(Debug, thiserror::Error)]
pub enum ImuInitError {
    #[error("Error acquiring the inertial sensor: {0}")]
    AcquisitionFailed(String),

    #[error("Collision threshold must be positive, found {0}")]
    InvalidCollisionThreshold(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<S: InertialSensor> Imu<S> {
    /// Acquire the sensor using the given driver constructor.
    pub fn initialize<F, E>(connect: F, params: &ImuParams) -> Result<Self, ImuInitError>
    where
        F: FnOnce() -> Result<S, E>,
        E: Display,
    {
        if params.collision_threshold_g.is_nan() || params.collision_threshold_g <= 0.0 {
            return Err(ImuInitError::InvalidCollisionThreshold(
                params.collision_threshold_g,
            ));
        }

        let sensor = connect().map_err(|e| ImuInitError::AcquisitionFailed(e.to_string()))?;

        info!("Inertial sensor acquired");

        Ok(Self {
            sensor,
            collision_threshold_g: params.collision_threshold_g,
            last_accel_g: None,
            collision_happened: false,
        })
    }

    /// Fused heading in degrees, [-180, 180], positive clockwise.
    pub fn fused_heading(&self) -> f64 {
        self.sensor.fused_heading_deg()
    }

    /// Pitch in degrees, [-180, 180], positive when tilted backwards.
    pub fn pitch(&self) -> f64 {
        self.sensor.pitch_deg()
    }

    /// Roll in degrees, [-180, 180], positive when rolled left.
    pub fn roll(&self) -> f64 {
        self.sensor.roll_deg()
    }

    pub fn reading(&self) -> OrientationReading {
        OrientationReading {
            heading_deg: self.fused_heading(),
            pitch_deg: self.pitch(),
            roll_deg: self.roll(),
        }
    }

    /// Make the current heading the zero heading. Pitch and roll are not affected.
    pub fn zero_heading(&mut self) {
        self.sensor.zero_yaw();
    }

    /// X displacement in meters since the last reset. Drifts quickly.
    pub fn displacement_x(&self) -> f64 {
        self.sensor.displacement_x_m()
    }

    /// Y displacement in meters since the last reset. Drifts quickly.
    pub fn displacement_y(&self) -> f64 {
        self.sensor.displacement_y_m()
    }

    pub fn displacement(&self) -> Displacement {
        Displacement {
            x_m: self.displacement_x(),
            y_m: self.displacement_y(),
        }
    }

    pub fn reset_displacement(&mut self) {
        self.sensor.reset_displacement();
    }

    /// Check the latest acceleration for a collision, should be called once per cycle.
    ///
    /// A collision is declared when the horizontal acceleration changes by more than the
    /// threshold since the previous update. The flag stays set until
    /// [`Imu::clear_collision`] is called. Returns true if a collision was detected by this
    /// update.
    pub fn update_collision(&mut self) -> bool {
        let accel = self.sensor.world_linear_accel_g();

        let detected = match self.last_accel_g {
            Some(last) => {
                let jerk_x = (accel.0 - last.0).abs();
                let jerk_y = (accel.1 - last.1).abs();
                jerk_x > self.collision_threshold_g || jerk_y > self.collision_threshold_g
            }
            None => false,
        };

        self.last_accel_g = Some(accel);

        if detected && !self.collision_happened {
            warn!("Collision detected");
        }
        self.collision_happened |= detected;

        detected
    }

    pub fn clear_collision(&mut self) {
        self.collision_happened = false;
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }
}

impl<S: InertialSensor> CollisionSource for Imu<S> {
    fn collision_happened(&self) -> bool {
        self.collision_happened
    }
}
