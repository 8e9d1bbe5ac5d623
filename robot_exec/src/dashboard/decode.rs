//! # Mode and configuration decoding
//!
//! The console writes the routine selection as integer codes. Decoding never fails: a missing or
//! unknown code resolves to the inert default so that absent operator input cannot stop the
//! robot. The result is tagged so callers can tell an operator choice from a fallback.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::info;

use comms_if::{dash::keys, table::Value};

use super::Dashboard;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The hopper to empty during autonomous, if the routine uses one.
///
/// Hoppers are numbered counter-clockwise from 1 at the blue alliance retrieval chute, 0 means no
/// hopper was chosen. The number is not range checked.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct HopperChoice(pub i32);

/// Everything the console selects for the autonomous period.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AutoSelection {
    pub start_point: Decoded<StartPoint>,
    pub auto_mode: Decoded<AutoMode>,
    pub hopper_choice: Decoded<HopperChoice>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Starting position of the robot on the field.
///
/// Codes 1-3 and 4-6 are the same three zones seen from the two alliance stations, so both codes
/// of a pair decode to the same position.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StartPoint {
    RetrievalZone,
    Midline,
    Key,
    Unset,
}

/// Autonomous routine to run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AutoMode {
    HopperBoiler,
    Hopper,
    Gear,
    Cross,
    BeUseless,
}

/// The result of decoding an operator field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    /// The console wrote a recognised code.
    Value(T),

    /// The console wrote a code with no meaning, the fallback is used instead.
    Unrecognised { code: i32, fallback: T },

    /// Nothing usable was written, the default is used.
    Default(T),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl StartPoint {
    /// Map a console code onto a start point, `None` for codes with no meaning.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 | 4 => Some(StartPoint::RetrievalZone),
            2 | 5 => Some(StartPoint::Midline),
            3 | 6 => Some(StartPoint::Key),
            _ => None,
        }
    }
}

impl AutoMode {
    /// Map a console code onto a routine, `None` for codes with no meaning.
    ///
    /// The codes are those used by the console's routine list and do not follow the order of
    /// the variants.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(AutoMode::HopperBoiler),
            2 => Some(AutoMode::Hopper),
            6 => Some(AutoMode::Gear),
            5 => Some(AutoMode::Cross),
            _ => None,
        }
    }
}

impl Default for StartPoint {
    fn default() -> Self {
        StartPoint::Unset
    }
}

impl Default for AutoMode {
    fn default() -> Self {
        AutoMode::BeUseless
    }
}

impl<T: Copy> Decoded<T> {
    /// The value to act on, whichever way it was obtained.
    pub fn value(&self) -> T {
        match *self {
            Decoded::Value(v) => v,
            Decoded::Unrecognised { fallback, .. } => fallback,
            Decoded::Default(v) => v,
        }
    }

    /// True if the value came from a recognised operator code.
    pub fn is_operator_choice(&self) -> bool {
        matches!(self, Decoded::Value(_))
    }
}

impl AutoSelection {
    /// Read the whole selection from the dashboard.
    pub fn read(dash: &Dashboard) -> Self {
        let selection = Self {
            start_point: decode_start_point(dash),
            auto_mode: decode_auto_mode(dash),
            hopper_choice: decode_hopper_choice(dash),
        };

        info!("Autonomous selection:");
        info!("    Start point: {:?}", selection.start_point);
        info!("    Auto mode: {:?}", selection.auto_mode);
        info!("    Hopper: {:?}", selection.hopper_choice);

        selection
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Decode the start position chosen by the drivers.
pub fn decode_start_point(dash: &Dashboard) -> Decoded<StartPoint> {
    decode_code(dash, keys::START_POSITION, StartPoint::from_code)
}

/// Decode the autonomous routine chosen by the drivers.
pub fn decode_auto_mode(dash: &Dashboard) -> Decoded<AutoMode> {
    decode_code(dash, keys::AUTO_MODE, AutoMode::from_code)
}

/// Decode the hopper chosen by the drivers. Any integer is accepted.
pub fn decode_hopper_choice(dash: &Dashboard) -> Decoded<HopperChoice> {
    match read_code(dash, keys::HOPPER_CHOICE) {
        Some(code) => Decoded::Value(HopperChoice(code)),
        None => Decoded::Default(HopperChoice::default()),
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn decode_code<T, F>(dash: &Dashboard, key: &str, from_code: F) -> Decoded<T>
where
    T: Default,
    F: Fn(i32) -> Option<T>,
{
    match read_code(dash, key) {
        Some(code) => match from_code(code) {
            Some(v) => Decoded::Value(v),
            None => Decoded::Unrecognised {
                code,
                fallback: T::default(),
            },
        },
        None => Decoded::Default(T::default()),
    }
}

/// Read a code as an integer, truncating like a cast. `None` if unset or not a number.
fn read_code(dash: &Dashboard, key: &str) -> Option<i32> {
    dash.table()
        .get_value(key)
        .as_ref()
        .and_then(Value::as_number)
        .map(|n| n as i32)
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::table::TableStore;

    fn dash_with(key: &str, value: f64) -> Dashboard {
        let dash = Dashboard::new(&TableStore::new());
        dash.table().put_number(key, value);
        dash
    }

    #[test]
    fn test_start_point_codes() {
        let expected = [
            (1, StartPoint::RetrievalZone),
            (4, StartPoint::RetrievalZone),
            (2, StartPoint::Midline),
            (5, StartPoint::Midline),
            (3, StartPoint::Key),
            (6, StartPoint::Key),
        ];

        for (code, point) in expected.iter() {
            let dash = dash_with("startPosition", *code as f64);
            assert_eq!(decode_start_point(&dash), Decoded::Value(*point));
        }

        for code in [-1, 0, 7, 42, i32::MIN] {
            let dash = dash_with("startPosition", code as f64);
            assert_eq!(decode_start_point(&dash).value(), StartPoint::Unset);
            assert!(!decode_start_point(&dash).is_operator_choice());
        }
    }

    #[test]
    fn test_auto_mode_codes() {
        let expected = [
            (1, AutoMode::HopperBoiler),
            (2, AutoMode::Hopper),
            (6, AutoMode::Gear),
            (5, AutoMode::Cross),
        ];

        for (code, mode) in expected.iter() {
            let dash = dash_with("autoMode", *code as f64);
            assert_eq!(decode_auto_mode(&dash), Decoded::Value(*mode));
        }

        for code in [3, 4, -1, 0, 7] {
            let dash = dash_with("autoMode", code as f64);
            assert_eq!(
                decode_auto_mode(&dash),
                Decoded::Unrecognised {
                    code,
                    fallback: AutoMode::BeUseless
                }
            );
        }
    }

    #[test]
    fn test_missing_codes_default() {
        let dash = Dashboard::new(&TableStore::new());

        assert_eq!(decode_start_point(&dash), Decoded::Default(StartPoint::Unset));
        assert_eq!(decode_auto_mode(&dash), Decoded::Default(AutoMode::BeUseless));
        assert_eq!(decode_hopper_choice(&dash), Decoded::Default(HopperChoice(0)));
    }

    #[test]
    fn test_wrong_type_defaults() {
        let dash = Dashboard::new(&TableStore::new());
        dash.table().put_string("autoMode", "GEAR");

        assert_eq!(decode_auto_mode(&dash), Decoded::Default(AutoMode::BeUseless));
    }

    #[test]
    fn test_codes_are_truncated() {
        let dash = dash_with("autoMode", 6.7);
        assert_eq!(decode_auto_mode(&dash).value(), AutoMode::Gear);
    }

    #[test]
    fn test_hopper_passes_through() {
        for n in [0, 1, 5, -3, 1000] {
            let dash = dash_with("hopperChoice", n as f64);
            assert_eq!(decode_hopper_choice(&dash), Decoded::Value(HopperChoice(n)));
        }
    }

    #[test]
    fn test_auto_selection() {
        let dash = Dashboard::new(&TableStore::new());
        dash.table().put_number("startPosition", 5.0);
        dash.table().put_number("autoMode", 2.0);
        dash.table().put_number("hopperChoice", 3.0);

        let selection = AutoSelection::read(&dash);

        assert_eq!(selection.start_point.value(), StartPoint::Midline);
        assert_eq!(selection.auto_mode.value(), AutoMode::Hopper);
        assert_eq!(selection.hopper_choice.value(), HopperChoice(3));
    }
}
