//! # Dashboard module
//!
//! Exchanges data with the operator console through the shared key/value tables. Upstream the
//! robot publishes diagnostics and its pose, downstream the console writes the autonomous routine
//! selection and waypoint requests, which are polled by the robot.
//!
//! A [`Dashboard`] is built once at startup and passed by reference to everything that publishes
//! or decodes, there is no global instance.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod decode;
pub mod diag;
pub mod pose;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::{
    dash::{ROOT_TABLE, WARNINGS_TABLE},
    table::{Table, TableStore},
};

pub use decode::*;
pub use diag::*;
pub use pose::*;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Handle onto the dashboard's root table and its warnings table.
#[derive(Debug, Clone)]
pub struct Dashboard {
    table: Table,
    warnings: Table,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Dashboard {
    /// Open the dashboard tables in the given store.
    ///
    /// Opening writes nothing, so opening the same store again gives a dashboard over exactly the
    /// same entries.
    pub fn new(store: &TableStore) -> Self {
        let table = store.table(ROOT_TABLE);
        let warnings = table.sub_table(WARNINGS_TABLE);

        Self { table, warnings }
    }

    /// The root table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The warnings table.
    pub fn warnings(&self) -> &Table {
        &self.warnings
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::table::Value;

    #[test]
    fn test_open_is_idempotent() {
        let store = TableStore::new();
        let first = Dashboard::new(&store);
        first.table().put_number("timeRemaining", 90.0);
        first.warnings().put_boolean("collision", false);

        let before = store.snapshot().unwrap();

        let again: Vec<Dashboard> = (0..5).map(|_| Dashboard::new(&store)).collect();

        assert_eq!(store.snapshot().unwrap(), before);
        for dash in again.iter() {
            assert_eq!(dash.table().path(), first.table().path());
            assert_eq!(dash.warnings().path(), first.warnings().path());
            assert_eq!(dash.table().get_number("timeRemaining", -1.0), 90.0);
        }
    }

    #[test]
    fn test_warnings_are_nested() {
        let store = TableStore::new();
        let dash = Dashboard::new(&store);

        dash.warnings().put_boolean("temperature", true);

        assert_eq!(dash.warnings().path(), "/SmartDashboard/warnings");
        assert_eq!(
            dash.table().get_value("warnings/temperature"),
            Some(Value::Boolean(true))
        );
        assert!(!dash.table().contains_key("temperature"));
    }

    #[test]
    fn test_console_writes_are_polled() {
        let store = TableStore::new();
        let dash = Dashboard::new(&store);

        assert_eq!(dash.table().get_integer("neverSet", 7), 7);

        // Another handle on the store, as a transport adapter would hold
        store
            .apply_json(r#"{"/SmartDashboard/autoMode": {"Number": 6.0}}"#)
            .unwrap();

        assert_eq!(dash.table().get_integer("autoMode", -1), 6);
    }
}
