//! Mode table
//!
//! Holds every mode instance for the lifetime of the navigator and drives
//! them one cycle at a time. Which mode is selected is decided elsewhere; the
//! table only guarantees that at most one mode is active per cycle.
//!
//! ## Cycle order
//!
//! 1. Refresh parameters of every mode if requested
//! 2. `run(active = false)` on every unselected mode
//! 3. `run(active = true)` on the selected mode
//! 4. Poll the command mailbox into the selected mode and call
//!    `execute_vehicle_command()` when a new command arrived
//!
//! A command reaction therefore sees the setpoint produced in the same cycle
//! and may replace it. With no mode selected, pending commands are discarded.

use alloc::boxed::Box;
use alloc::vec::Vec;

use super::{ModeRunner, Navigator, NavigatorMode};

/// Mode selection errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ModeError {
    #[error("unknown mode index {index} ({count} registered)")]
    UnknownMode { index: usize, count: usize },
}

/// Registered modes and the current selection
#[derive(Default)]
pub struct ModeTable {
    modes: Vec<Box<dyn NavigatorMode>>,
    selected: Option<usize>,
}

impl ModeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mode, returning its index
    pub fn register(&mut self, mode: Box<dyn NavigatorMode>) -> usize {
        crate::log_debug!("Mode registered: {}", mode.name());
        self.modes.push(mode);
        self.modes.len() - 1
    }

    /// Select the mode to activate on the next cycle (`None` = no mode)
    pub fn select(&mut self, index: Option<usize>) -> Result<(), ModeError> {
        if let Some(index) = index {
            if index >= self.modes.len() {
                return Err(ModeError::UnknownMode {
                    index,
                    count: self.modes.len(),
                });
            }
        }
        if index != self.selected {
            crate::log_info!(
                "Mode selection: {} -> {}",
                self.selected_mode().map_or("none", |mode| mode.name()),
                index.map_or("none", |i| self.modes[i].name())
            );
        }
        self.selected = index;
        Ok(())
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_mode(&self) -> Option<&dyn NavigatorMode> {
        self.selected.and_then(|i| self.get(i))
    }

    pub fn get(&self, index: usize) -> Option<&dyn NavigatorMode> {
        self.modes.get(index).map(|mode| mode.as_ref())
    }

    /// Index of the first mode with the given name
    pub fn find(&self, name: &str) -> Option<usize> {
        self.modes.iter().position(|mode| mode.name() == name)
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Run one control cycle over every mode.
    ///
    /// Returns `true` if a new command was dispatched to the selected mode.
    pub fn run_cycle(&mut self, nav: &mut Navigator<'_>, parameters_updated: bool) -> bool {
        let selected = self.selected;

        for (index, mode) in self.modes.iter_mut().enumerate() {
            if Some(index) != selected {
                mode.run(nav, false, parameters_updated);
            }
        }

        let Some(mode) = selected.and_then(|index| self.modes.get_mut(index)) else {
            if nav.poll_command().is_some() {
                crate::log_warn!("Command discarded: no active mode");
            }
            return false;
        };

        mode.run(nav, true, parameters_updated);

        if mode.state_mut().update_vehicle_command(nav) {
            mode.execute_vehicle_command(nav);
            return true;
        }
        false
    }
}
