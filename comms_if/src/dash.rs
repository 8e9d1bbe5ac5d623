//! # Dashboard interface
//!
//! Names of the tables and entries exchanged with the operator console. The console and the robot
//! must agree on these so they are kept in this crate rather than in either executable.

/// Name of the root dashboard table.
pub const ROOT_TABLE: &str = "SmartDashboard";

/// Name of the warnings table, nested inside the root table.
pub const WARNINGS_TABLE: &str = "warnings";

/// Default used when reading operator codes and waypoint coordinates which have not been written.
pub const UNSET_SENTINEL: f64 = -1.0;

/// Entry keys in the root table.
pub mod keys {
    // ---- ROBOT TO CONSOLE ----

    /// Seconds left in the match.
    pub const TIME_REMAINING: &str = "timeRemaining";

    pub const CURRENT_X: &str = "currentX";
    pub const CURRENT_Y: &str = "currentY";

    /// Current heading in radians, [0, 2pi).
    pub const CURRENT_ANGLE: &str = "currentAngle";

    /// Names of the selectable autonomous routines.
    pub const OPTIONS: &str = "options";

    /// Driver requested control inversion.
    pub const REVERSED: &str = "reversed";

    pub const PRESSURE_LABEL: &str = "pressureLabel";

    /// Pneumatics status colour, `"green"` or `"red"`.
    pub const PNEUMATICS: &str = "pneumatics";

    /// Direction the climber is spinning.
    pub const CLIMBING_ROPE: &str = "climbingRope";

    pub const CLIMB_HEIGHT: &str = "climbHeight";

    // ---- CONSOLE TO ROBOT ----

    /// Start position code, 1 to 6.
    pub const START_POSITION: &str = "startPosition";

    pub const AUTO_MODE: &str = "autoMode";

    /// Hopper to empty, 0 when none is chosen.
    pub const HOPPER_CHOICE: &str = "hopperChoice";

    /// Waypoint request gate. A request is pending when both are set.
    pub const TARGET_X: &str = "targetX";
    pub const TARGET_Y: &str = "targetY";

    /// Waypoint coordinates enqueued once a request is pending.
    pub const FIELD_X: &str = "fieldX";
    pub const FIELD_Y: &str = "fieldY";
}

/// Entry keys in the warnings table.
pub mod warning_keys {
    pub const COLLISION: &str = "collision";
    pub const TEMPERATURE: &str = "temperature";
}

/// Pneumatics status colours.
pub mod pneumatics {
    pub const UP: &str = "green";
    pub const DOWN: &str = "red";
}
