//! navigator_core - Pure no_std types for the navigator mode framework
//!
//! This crate contains the platform-agnostic data model and algorithms shared
//! by all navigation modes. Everything here can be tested on host without any
//! feature flags.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives
//! - **Pure no_std**: No std library dependencies, no allocation
//! - **Validated writes**: Records consumed by control refuse invalid updates
//!
//! # Modules
//!
//! - [`navigation`]: Telemetry records, position setpoint triplet, geo math
//! - [`command`]: Vehicle command record, inbound mailbox, outbound queue
//! - [`parameters`]: Parameter store, handles, navigator tunables snapshot

#![no_std]

pub mod command;
pub mod navigation;
pub mod parameters;
