//! # Simulated subsystems
//!
//! Stand-ins for the match timer and the equipment the diagnostics are gathered from, used by the
//! executable when running away from the field.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::time::Instant;

use crate::dashboard::{
    ClimberSource, CollisionSource, MatchTimer, PneumaticsSource, TemperatureSource,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Counts down from the match length, starting when created.
pub struct CountdownTimer {
    start: Instant,
    match_length_s: f64,
}

/// Equipment which never reports a fault and is never moving.
#[derive(Debug, Default)]
pub struct IdleEquipment {
    /// Shown as the pneumatics state
    pub pneumatics_up: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl CountdownTimer {
    pub fn start(match_length_s: f64) -> Self {
        Self {
            start: Instant::now(),
            match_length_s,
        }
    }

    fn remaining_at(&self, elapsed_s: f64) -> f64 {
        (self.match_length_s - elapsed_s).max(0.0)
    }
}

impl MatchTimer for CountdownTimer {
    fn match_time_s(&self) -> f64 {
        self.remaining_at(self.start.elapsed().as_secs_f64())
    }
}

impl CollisionSource for IdleEquipment {
    fn collision_happened(&self) -> bool {
        false
    }
}

impl TemperatureSource for IdleEquipment {
    fn motor_too_hot(&self) -> bool {
        false
    }
}

impl ClimberSource for IdleEquipment {
    fn direction(&self) -> f64 {
        0.0
    }

    fn climb_height(&self) -> f64 {
        0.0
    }
}

impl PneumaticsSource for IdleEquipment {
    fn is_up(&self) -> bool {
        self.pneumatics_up
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_countdown_stops_at_zero() {
        let timer = CountdownTimer::start(150.0);

        assert_eq!(timer.remaining_at(0.0), 150.0);
        assert_eq!(timer.remaining_at(100.5), 49.5);
        assert_eq!(timer.remaining_at(200.0), 0.0);
        assert!(timer.match_time_s() <= 150.0);
    }
}
