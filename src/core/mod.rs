//! Core infrastructure shared by the navigator
//!
//! Currently only the logging macros, which are exported at the crate root.

pub mod logging;
