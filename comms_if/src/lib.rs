//! # Communications interface crate.
//!
//! Provides the key/value tables shared with the operator console and the names of the entries in
//! them.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Shared key/value table store
pub mod table;

/// Table and entry names used by the dashboard
pub mod dash;
