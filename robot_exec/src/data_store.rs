//! # Data Store

use log::info;

use crate::dashboard::{AutoSelection, Dashboard, Pose};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    // Localisation
    pub pose: Option<Pose>,

    // Autonomy
    /// Selection read from the dashboard when autonomous was armed
    pub auto_selection: Option<AutoSelection>,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,

    /// Number of waypoints dropped because the queue was closed
    pub num_dropped_waypoints: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Sets the 1Hz cycle flag.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        let cycles_per_s = (cycle_frequency_hz as u128).max(1);

        self.is_1_hz_cycle = self.num_cycles % cycles_per_s == 0;
    }

    /// Perform actions required at the end of a cycle.
    pub fn cycle_end(&mut self) {
        self.num_cycles += 1;
    }

    /// Read the autonomous selection if it has not already been read.
    ///
    /// The selection is only taken once, later changes on the dashboard are ignored.
    pub fn arm_auto(&mut self, dash: &Dashboard) -> AutoSelection {
        match self.auto_selection {
            Some(s) => s,
            None => {
                info!("Arming autonomous");
                let s = AutoSelection::read(dash);
                self.auto_selection = Some(s);
                s
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dashboard::AutoMode;
    use comms_if::table::TableStore;

    #[test]
    fn test_1_hz_cycle() {
        let mut ds = DataStore::default();
        let mut flags = Vec::new();

        for _ in 0..12 {
            ds.cycle_start(5.0);
            flags.push(ds.is_1_hz_cycle);
            ds.cycle_end();
        }

        let on: Vec<usize> = flags
            .iter()
            .enumerate()
            .filter(|(_, f)| **f)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(on, vec![0, 5, 10]);
    }

    #[test]
    fn test_arm_auto_reads_once() {
        let mut ds = DataStore::default();
        let dash = Dashboard::new(&TableStore::new());

        dash.table().put_number("autoMode", 6.0);
        assert_eq!(ds.arm_auto(&dash).auto_mode.value(), AutoMode::Gear);

        dash.table().put_number("autoMode", 5.0);
        assert_eq!(ds.arm_auto(&dash).auto_mode.value(), AutoMode::Gear);
    }
}
