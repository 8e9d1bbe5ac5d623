//! # Robot Executable Parameters
//!
//! This module provide parameters for the robot executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use crate::imu::ImuParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct RobotExecParams {
    /// Target period of one control cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Length of the match, after which the executable stops.
    ///
    /// Units: seconds
    pub match_length_s: f64,

    /// Maximum number of waypoints waiting for the path follower. Zero for no limit.
    pub waypoint_queue_capacity: usize,

    /// Names of the autonomous routines offered to the drivers.
    pub auto_options: Vec<String>,

    pub imu: ImuParams,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    #[error("Cycle period must be positive and finite, found {0} s")]
    InvalidCyclePeriod(f64),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl RobotExecParams {
    /// Check the values the main loop cannot run with.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.cycle_period_s.is_finite() || self.cycle_period_s <= 0.0 {
            return Err(ParamsError::InvalidCyclePeriod(self.cycle_period_s));
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::imu::ImuSource;

    #[test]
    fn test_load_params_file() {
        let params: RobotExecParams =
            util::params::from_toml_str(include_str!("../../params/robot_exec.toml")).unwrap();

        assert!(params.cycle_period_s > 0.0);
        assert_eq!(params.imu.source, ImuSource::Sim);
        assert_eq!(params.auto_options.len(), 3);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_invalid_cycle_period() {
        let mut params: RobotExecParams =
            util::params::from_toml_str(include_str!("../../params/robot_exec.toml")).unwrap();

        for period in [-0.02, 0.0, f64::NAN, f64::INFINITY] {
            params.cycle_period_s = period;
            assert!(matches!(
                params.validate(),
                Err(ParamsError::InvalidCyclePeriod(_))
            ));
        }
    }
}
