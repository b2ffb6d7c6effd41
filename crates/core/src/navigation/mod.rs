//! Navigation types and utilities
//!
//! Telemetry snapshots, the position setpoint triplet, and geographic math.

pub mod geo;
mod setpoint;
mod types;

pub use setpoint::{PositionSetpoint, PositionSetpointTriplet, SetpointError, SetpointType};
pub use types::{GlobalPosition, HomePosition, TargetPosition, VehicleStatus};
