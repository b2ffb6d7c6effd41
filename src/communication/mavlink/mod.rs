//! MAVLink 2.0 adapters
//!
//! # Architecture
//!
//! - **Command**: `COMMAND_LONG` decoding into mailbox records and encoding of
//!   outbox records
//! - **Status notifier**: STATUSTEXT queue with MAVLink 2 chunking
//!
//! # Usage
//!
//! ```ignore
//! use navigator::communication::mavlink::command::{decode_command_long, encode_command_long};
//!
//! // Inbound: publish to the active mode
//! nav.publish_command(decode_command_long(&msg, header.system_id, header.component_id));
//!
//! // Outbound: send everything the modes submitted this cycle
//! for cmd in nav.outbox_mut().drain() {
//!     if let Ok(long) = encode_command_long(&cmd) {
//!         writer.send(MavMessage::COMMAND_LONG(long));
//!     }
//! }
//! ```

pub mod command; // COMMAND_LONG conversion
pub mod status_notifier; // STATUSTEXT notification queue
