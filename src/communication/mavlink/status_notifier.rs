//! MAVLink STATUSTEXT Notification Queue
//!
//! Operator-facing messages raised by navigation modes ("Landing",
//! "Takeoff to 10 m", activation failures). The queue is owned by the
//! navigator and drained by the telemetry side once per cycle.
//!
//! # Architecture
//!
//! - **Owned queue**: no global state, one notifier per navigator
//! - **Heapless**: fixed-capacity queue (16 messages), drop-oldest on overflow
//! - **MAVLink v2 Chunking**: messages up to 200 characters, 50 bytes per frame

use heapless::{Deque, String, Vec};
use mavlink::common::{MavSeverity, STATUSTEXT_DATA};

/// Maximum message length (200 characters)
pub const MAX_MESSAGE_LEN: usize = 200;

/// Queue capacity (16 messages)
pub const QUEUE_CAPACITY: usize = 16;

/// Chunk size for MAVLink STATUSTEXT messages (50 bytes)
const CHUNK_SIZE: usize = 50;

/// Maximum number of chunks per message (200 / 50 = 4)
const MAX_CHUNKS: usize = 4;

/// Upper bound of frames returned by one drain
pub const MAX_PENDING_FRAMES: usize = 32;

/// Queued STATUSTEXT message with severity and text
#[derive(Debug, Clone)]
pub struct QueuedMessage {
    pub severity: MavSeverity,
    pub text: String<MAX_MESSAGE_LEN>,
}

/// Queue of pending STATUSTEXT messages
#[derive(Debug)]
pub struct StatusNotifier {
    queue: Deque<QueuedMessage, QUEUE_CAPACITY>,
    next_chunk_id: u16,
    dropped_count: u32,
}

impl Default for StatusNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Longest prefix of `text` that fits in `max` bytes without splitting a char
fn truncate_to(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

impl StatusNotifier {
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
            // 0 is reserved for non-chunked messages
            next_chunk_id: 1,
            dropped_count: 0,
        }
    }

    /// Enqueue a message with the given severity and text
    ///
    /// If the queue is full, the oldest message is dropped. Messages longer
    /// than 200 bytes are truncated.
    pub fn send(&mut self, severity: MavSeverity, text: &str) {
        if text.len() > MAX_MESSAGE_LEN {
            crate::log_warn!(
                "STATUSTEXT truncated to {} chars (was {} chars)",
                MAX_MESSAGE_LEN,
                text.len()
            );
        }
        let text = truncate_to(text, MAX_MESSAGE_LEN);

        let mut message = QueuedMessage {
            severity,
            text: String::new(),
        };
        // Cannot fail: text was truncated to capacity above.
        let _ = message.text.push_str(text);

        if self.queue.is_full() {
            self.queue.pop_front();
            self.dropped_count = self.dropped_count.saturating_add(1);
            crate::log_warn!(
                "STATUSTEXT queue full, dropped {} messages",
                self.dropped_count
            );
        }

        // Cannot fail: a slot was freed above if the queue was full.
        let _ = self.queue.push_back(message);
    }

    /// Send a CRITICAL severity message
    pub fn send_critical(&mut self, text: &str) {
        self.send(MavSeverity::MAV_SEVERITY_CRITICAL, text);
    }

    /// Send an ERROR severity message
    pub fn send_error(&mut self, text: &str) {
        self.send(MavSeverity::MAV_SEVERITY_ERROR, text);
    }

    /// Send a WARNING severity message
    pub fn send_warning(&mut self, text: &str) {
        self.send(MavSeverity::MAV_SEVERITY_WARNING, text);
    }

    /// Send a NOTICE severity message
    pub fn send_notice(&mut self, text: &str) {
        self.send(MavSeverity::MAV_SEVERITY_NOTICE, text);
    }

    /// Send an INFO severity message
    pub fn send_info(&mut self, text: &str) {
        self.send(MavSeverity::MAV_SEVERITY_INFO, text);
    }

    /// Number of queued (not yet drained) messages
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Messages lost to queue overflow
    pub fn dropped_count(&self) -> u32 {
        self.dropped_count
    }

    /// Pop the oldest queued message without chunking it
    pub fn pop(&mut self) -> Option<QueuedMessage> {
        self.queue.pop_front()
    }

    /// Drain queued messages as STATUSTEXT frames ready to send.
    ///
    /// A message whose chunks do not fit in the returned buffer stays queued
    /// for the next call.
    pub fn take_pending_statustext(&mut self) -> Vec<STATUSTEXT_DATA, MAX_PENDING_FRAMES> {
        let mut frames = Vec::new();

        while let Some(front) = self.queue.front() {
            let needed = front.text.len().div_ceil(CHUNK_SIZE).max(1);
            if frames.len() + needed > frames.capacity() {
                crate::log_debug!("STATUSTEXT frame buffer full, {} pending", self.queue.len());
                break;
            }
            let Some(message) = self.queue.pop_front() else {
                break;
            };
            for frame in self.chunk_message(message.severity, message.text.as_str()) {
                let _ = frames.push(frame);
            }
        }

        frames
    }

    /// Split a message into STATUSTEXT frames
    ///
    /// Messages up to 50 bytes produce a single frame with id=0, chunk_seq=0.
    /// Longer messages share a unique non-zero id with sequential chunk_seq.
    pub fn chunk_message(
        &mut self,
        severity: MavSeverity,
        text: &str,
    ) -> Vec<STATUSTEXT_DATA, MAX_CHUNKS> {
        let bytes = text.as_bytes();
        let len = bytes.len().min(MAX_MESSAGE_LEN);
        let mut chunks = Vec::new();

        if len <= CHUNK_SIZE {
            let mut text_bytes = [0u8; CHUNK_SIZE];
            text_bytes[..len].copy_from_slice(&bytes[..len]);
            let _ = chunks.push(STATUSTEXT_DATA {
                severity,
                text: text_bytes.into(),
                id: 0,
                chunk_seq: 0,
            });
            return chunks;
        }

        let chunk_id = self.next_chunk_id;
        self.next_chunk_id = match self.next_chunk_id.wrapping_add(1) {
            0 => 1,
            id => id,
        };

        let mut offset = 0;
        let mut chunk_seq: u8 = 0;
        while offset < len && usize::from(chunk_seq) < MAX_CHUNKS {
            let chunk_len = (len - offset).min(CHUNK_SIZE);
            let mut text_bytes = [0u8; CHUNK_SIZE];
            text_bytes[..chunk_len].copy_from_slice(&bytes[offset..offset + chunk_len]);

            let _ = chunks.push(STATUSTEXT_DATA {
                severity,
                text: text_bytes.into(),
                id: chunk_id,
                chunk_seq,
            });

            offset += chunk_len;
            chunk_seq += 1;
        }

        chunks
    }
}
