//! Communication Protocols
//!
//! The navigator does not own a transport. This module only converts its
//! records to and from MAVLink 2.0 messages:
//!
//! - Command execution (COMMAND_LONG)
//! - Operator notifications (STATUSTEXT)

pub mod mavlink;
