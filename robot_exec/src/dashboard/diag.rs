//! # Diagnostics publishing
//!
//! Collects warning flags and equipment state from the robot's subsystems and writes them to the
//! dashboard each cycle. The subsystems are reached through the source traits below.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::dash::{keys, pneumatics, warning_keys};

use super::Dashboard;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Provides the time left in the match.
pub trait MatchTimer {
    /// Seconds remaining in the current match period.
    fn match_time_s(&self) -> f64;
}

pub trait CollisionSource {
    /// True if a collision has been detected.
    fn collision_happened(&self) -> bool;
}

pub trait TemperatureSource {
    /// True if any drive motor is over temperature.
    fn motor_too_hot(&self) -> bool;
}

pub trait ClimberSource {
    /// Direction the climber is spinning, positive when climbing.
    fn direction(&self) -> f64;

    /// Height climbed.
    fn climb_height(&self) -> f64;
}

pub trait PneumaticsSource {
    /// True when the pneumatics should be shown as up (green) on the dashboard.
    fn is_up(&self) -> bool;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The subsystems diagnostics are gathered from.
pub struct DiagSources<'a> {
    pub match_timer: &'a dyn MatchTimer,
    pub collision: &'a dyn CollisionSource,
    pub temperature: &'a dyn TemperatureSource,
    pub climber: &'a dyn ClimberSource,
    pub pneumatics: &'a dyn PneumaticsSource,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Publish one cycle of diagnostics.
pub fn publish_diagnostics(dash: &Dashboard, sources: &DiagSources) {
    let table = dash.table();

    table.put_number(keys::TIME_REMAINING, sources.match_timer.match_time_s());

    // Warnings
    dash.warnings()
        .put_boolean(warning_keys::COLLISION, sources.collision.collision_happened());
    dash.warnings()
        .put_boolean(warning_keys::TEMPERATURE, sources.temperature.motor_too_hot());

    // Climber
    table.put_number(keys::CLIMBING_ROPE, sources.climber.direction());
    table.put_number(keys::CLIMB_HEIGHT, sources.climber.climb_height());

    // Pneumatics
    let colour = match sources.pneumatics.is_up() {
        true => pneumatics::UP,
        false => pneumatics::DOWN,
    };
    table.put_string(keys::PNEUMATICS, colour);
}

/// Tell the console whether the driver has inverted the controls.
pub fn set_controls_reversed(dash: &Dashboard, reversed: bool) {
    dash.table().put_boolean(keys::REVERSED, reversed);
}

/// Publish the names of the autonomous routines drivers can choose between.
pub fn publish_auto_options<S: AsRef<str>>(dash: &Dashboard, options: &[S]) {
    dash.table().put_string_array(keys::OPTIONS, options);
}

/// Publish the air pressure reading.
pub fn publish_pressure_label(dash: &Dashboard, pressure: f64) {
    dash.table().put_number(keys::PRESSURE_LABEL, pressure);
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::table::{TableStore, Value};

    #[derive(Default)]
    struct Fixed {
        time_s: f64,
        collision: bool,
        hot: bool,
        direction: f64,
        height: f64,
        up: bool,
    }

    impl MatchTimer for Fixed {
        fn match_time_s(&self) -> f64 {
            self.time_s
        }
    }

    impl CollisionSource for Fixed {
        fn collision_happened(&self) -> bool {
            self.collision
        }
    }

    impl TemperatureSource for Fixed {
        fn motor_too_hot(&self) -> bool {
            self.hot
        }
    }

    impl ClimberSource for Fixed {
        fn direction(&self) -> f64 {
            self.direction
        }

        fn climb_height(&self) -> f64 {
            self.height
        }
    }

    impl PneumaticsSource for Fixed {
        fn is_up(&self) -> bool {
            self.up
        }
    }

    fn sources(f: &Fixed) -> DiagSources<'_> {
        DiagSources {
            match_timer: f,
            collision: f,
            temperature: f,
            climber: f,
            pneumatics: f,
        }
    }

    #[test]
    fn test_publish_diagnostics() {
        let dash = Dashboard::new(&TableStore::new());
        let fixed = Fixed {
            time_s: 134.5,
            collision: true,
            hot: false,
            direction: -1.0,
            height: 0.75,
            up: true,
        };

        publish_diagnostics(&dash, &sources(&fixed));

        let table = dash.table();
        assert_eq!(table.get_number("timeRemaining", -1.0), 134.5);
        assert_eq!(table.get_number("climbingRope", 0.0), -1.0);
        assert_eq!(table.get_number("climbHeight", 0.0), 0.75);
        assert_eq!(table.get_string("pneumatics", ""), "green");
        assert!(dash.warnings().get_boolean("collision", false));
        assert!(!dash.warnings().get_boolean("temperature", true));
    }

    #[test]
    fn test_publish_defaults() {
        let dash = Dashboard::new(&TableStore::new());
        let fixed = Fixed::default();

        publish_diagnostics(&dash, &sources(&fixed));

        assert_eq!(dash.table().get_number("timeRemaining", -1.0), 0.0);
        assert_eq!(dash.table().get_string("pneumatics", ""), "red");
        assert!(dash.warnings().contains_key("collision"));
        assert!(dash.warnings().contains_key("temperature"));
        assert!(!dash.table().contains_key("pressureLabel"));
    }

    #[test]
    fn test_one_shot_writes() {
        let dash = Dashboard::new(&TableStore::new());

        set_controls_reversed(&dash, true);
        publish_auto_options(&dash, &["Dummy1", "Dummy2", "Dummy3"]);
        publish_pressure_label(&dash, 60.0);

        assert!(dash.table().get_boolean("reversed", false));
        assert_eq!(dash.table().get_number("pressureLabel", 0.0), 60.0);
        assert_eq!(
            dash.table().get_value("options"),
            Some(Value::StringArray(vec![
                "Dummy1".into(),
                "Dummy2".into(),
                "Dummy3".into()
            ]))
        );

        set_controls_reversed(&dash, false);
        assert!(!dash.table().get_boolean("reversed", true));
    }
}
