#![cfg_attr(not(test), no_std)]

//! navigator - Navigation mode lifecycle framework
//!
//! Every navigation behavior (mission, loiter, return-to-launch, takeoff,
//! land, follow) implements [`navigator::NavigatorMode`] and is driven one
//! control cycle at a time by [`navigator::ModeRunner::run`]. The shared
//! [`navigator::Navigator`] context owns the position setpoint triplet, the
//! command mailbox and outbox, and the operator notification queue.
//!
//! Pure data types and geo math live in the `navigator_core` crate.

extern crate alloc;

// Logging macros, operator-independent
pub mod core;

// MAVLink adapters (COMMAND_LONG, STATUSTEXT)
pub mod communication;

// Mode framework
pub mod navigator;
