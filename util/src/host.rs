//! Host platform utility functions

use std::{env, path::PathBuf};

/// Environment variable giving the root directory of the robot software.
pub const SW_ROOT_ENV_VAR: &str = "ROBOT_SW_ROOT";

/// Get the software root directory, under which the `params` and `sessions` directories live.
pub fn get_sw_root() -> Result<PathBuf, env::VarError> {
    env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}
