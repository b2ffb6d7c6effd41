//! Command mailbox and outbox
//!
//! Inbound commands are not queued: the mailbox holds only the newest
//! undelivered command, and a publication that lands before the previous one
//! was polled replaces it. Outbound commands go to a bounded FIFO that drops
//! its oldest entry when full.

use heapless::Deque;

use super::VehicleCommand;

/// Outbox capacity (commands)
pub const OUTBOX_CAPACITY: usize = 8;

/// Single-slot, latest-wins inbound command channel
#[derive(Debug, Default)]
pub struct CommandMailbox {
    latest: Option<VehicleCommand>,
    /// Commands replaced before anyone polled them
    overwritten: u32,
}

impl CommandMailbox {
    pub const fn new() -> Self {
        Self {
            latest: None,
            overwritten: 0,
        }
    }

    /// Store a newly received command.
    ///
    /// Returns `true` if an undelivered command was discarded.
    pub fn publish(&mut self, cmd: VehicleCommand) -> bool {
        let replaced = self.latest.replace(cmd).is_some();
        if replaced {
            self.overwritten = self.overwritten.saturating_add(1);
        }
        replaced
    }

    /// Take the newest undelivered command, if any
    pub fn poll_latest(&mut self) -> Option<VehicleCommand> {
        self.latest.take()
    }

    /// True if a command is waiting to be polled
    pub fn has_pending(&self) -> bool {
        self.latest.is_some()
    }

    /// Number of commands lost to a newer publication
    pub fn overwritten_count(&self) -> u32 {
        self.overwritten
    }
}

/// Bounded outbound command queue drained by the transport
#[derive(Debug, Default)]
pub struct CommandOutbox {
    queue: Deque<VehicleCommand, OUTBOX_CAPACITY>,
    dropped: u32,
}

impl CommandOutbox {
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
            dropped: 0,
        }
    }

    /// Queue a command for transmission.
    ///
    /// If the queue is full the oldest command is dropped; returns `true` in
    /// that case.
    pub fn submit(&mut self, cmd: VehicleCommand) -> bool {
        let mut dropped = false;
        if self.queue.is_full() {
            self.queue.pop_front();
            self.dropped = self.dropped.saturating_add(1);
            dropped = true;
        }
        // Cannot fail: a slot was freed above if the queue was full.
        let _ = self.queue.push_back(cmd);
        dropped
    }

    /// Remove and return the oldest queued command
    pub fn pop(&mut self) -> Option<VehicleCommand> {
        self.queue.pop_front()
    }

    /// Drain every queued command in submission order
    pub fn drain(&mut self) -> impl Iterator<Item = VehicleCommand> + '_ {
        core::iter::from_fn(move || self.queue.pop_front())
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Commands dropped because the queue was full
    pub fn dropped_count(&self) -> u32 {
        self.dropped
    }
}
