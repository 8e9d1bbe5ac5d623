//! # Robot library.
//!
//! This library allows other crates in the workspace to access items defined inside the robot
//! crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Dashboard - exchanges telemetry and operator selections with the driver station console
pub mod dashboard;

/// Global data store for the executable
pub mod data_store;

/// Inertial measurement unit - orientation and short term displacement
pub mod imu;

/// Parameters for the executable
pub mod params;

/// Simulated subsystems - stand-ins for equipment not fitted to the development robot
pub mod sim;
