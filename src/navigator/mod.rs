//! Navigation mode framework
//!
//! The [`Navigator`] is the supervisor context shared by all modes. It is not
//! owned by the modes: the orchestrator refreshes its telemetry, then hands a
//! mutable borrow of it to each mode for the duration of one call. Only one
//! mode holds that borrow at a time, which makes the setpoint triplet
//! single-writer by construction.
//!
//! ## Cycle
//!
//! ```rust,ignore
//! nav.global_position = Some(estimator.position());
//! nav.target_position = target_tracker.latest();
//! table.run_cycle(&mut nav, params_changed);
//! controller.follow(nav.pos_sp_triplet());
//! for cmd in nav.outbox_mut().drain() { /* encode and send */ }
//! ```
//!
//! ## Modules
//!
//! - `mode`: `NavigatorMode` contract, `ModeState`, `ModeRunner::run`
//! - `params`: parameter bridge
//! - `commands`: command interpreter and land/takeoff/disarm helpers
//! - `setpoint`: acceptance check and return-to-initial-position
//! - `camera`: gimbal pointing
//! - `mode_table`: cycle harness over a set of modes

mod camera;
mod commands;
mod mode;
mod mode_table;
mod params;
mod setpoint;

pub use mode::{ModeRunner, ModeState, NavigatorMode};
pub use mode_table::{ModeError, ModeTable};

use crate::communication::mavlink::status_notifier::StatusNotifier;
use navigator_core::command::{CommandMailbox, CommandOutbox, VehicleCommand};
use navigator_core::navigation::{
    GlobalPosition, HomePosition, PositionSetpointTriplet, TargetPosition, VehicleStatus,
};
use navigator_core::parameters::ParameterProvider;

/// MAVLink identity used for submitted commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorConfig {
    /// Vehicle system id (command target and source)
    pub system_id: u8,
    /// Autopilot component id
    pub component_id: u8,
    /// Gimbal device addressed by camera pointing commands (0 = all)
    pub gimbal_device_id: u8,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            system_id: 1,
            component_id: 1,
            gimbal_device_id: 0,
        }
    }
}

/// Supervisor context handed to the modes each cycle
pub struct Navigator<'a> {
    /// Vehicle position, `None` until the estimator has a fix
    pub global_position: Option<GlobalPosition>,
    /// Home position, `None` until set
    pub home_position: Option<HomePosition>,
    /// Tracked target, `None` when no target is being followed
    pub target_position: Option<TargetPosition>,
    pub vehicle_status: VehicleStatus,
    initial_position: Option<GlobalPosition>,
    pos_sp_triplet: PositionSetpointTriplet,
    mailbox: CommandMailbox,
    outbox: CommandOutbox,
    notifier: StatusNotifier,
    config: NavigatorConfig,
    params: &'a dyn ParameterProvider,
}

impl<'a> Navigator<'a> {
    /// Create a navigator without telemetry and with an empty triplet
    pub fn new(config: NavigatorConfig, params: &'a dyn ParameterProvider) -> Self {
        Self {
            global_position: None,
            home_position: None,
            target_position: None,
            vehicle_status: VehicleStatus::default(),
            initial_position: None,
            pos_sp_triplet: PositionSetpointTriplet::new(),
            mailbox: CommandMailbox::new(),
            outbox: CommandOutbox::new(),
            notifier: StatusNotifier::new(),
            config,
            params,
        }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// External parameter storage
    pub fn params(&self) -> &'a dyn ParameterProvider {
        self.params
    }

    /// Setpoint triplet consumed by downstream control
    pub fn pos_sp_triplet(&self) -> &PositionSetpointTriplet {
        &self.pos_sp_triplet
    }

    pub fn pos_sp_triplet_mut(&mut self) -> &mut PositionSetpointTriplet {
        &mut self.pos_sp_triplet
    }

    /// Position recorded for return-style behaviors
    pub fn initial_position(&self) -> Option<&GlobalPosition> {
        self.initial_position.as_ref()
    }

    pub fn set_initial_position(&mut self, position: Option<GlobalPosition>) {
        self.initial_position = position;
    }

    /// Record the current vehicle position as the initial position.
    ///
    /// Returns `false` when there is no position fix yet.
    pub fn store_initial_position(&mut self) -> bool {
        match self.global_position {
            Some(position) => {
                self.initial_position = Some(position);
                true
            }
            None => false,
        }
    }

    /// Deliver a received command to the modes
    ///
    /// Latest wins: a command still undelivered from an earlier publication is
    /// replaced. Returns `true` in that case.
    pub fn publish_command(&mut self, cmd: VehicleCommand) -> bool {
        let overwritten = self.mailbox.publish(cmd);
        if overwritten {
            crate::log_warn!(
                "Command {} replaced an undelivered command ({} total)",
                cmd.command.id(),
                self.mailbox.overwritten_count()
            );
        } else {
            crate::log_debug!("Command {} received", cmd.command.id());
        }
        overwritten
    }

    /// Take the newest undelivered command, if any
    pub fn poll_command(&mut self) -> Option<VehicleCommand> {
        self.mailbox.poll_latest()
    }

    pub fn has_pending_command(&self) -> bool {
        self.mailbox.has_pending()
    }

    /// Commands replaced before delivery since startup
    pub fn overwritten_command_count(&self) -> u32 {
        self.mailbox.overwritten_count()
    }

    /// Queue a command for the transport, addressed to this vehicle
    pub fn submit_command(&mut self, cmd: VehicleCommand) {
        let mut cmd = cmd.with_target(self.config.system_id, self.config.component_id);
        cmd.source_system = self.config.system_id;
        cmd.source_component = self.config.component_id;

        if self.outbox.submit(cmd) {
            crate::log_warn!(
                "Command outbox full, dropped oldest ({} total)",
                self.outbox.dropped_count()
            );
        }
        crate::log_debug!("Command {} submitted", cmd.command.id());
    }

    /// Submitted commands waiting for the transport
    pub fn outbox(&self) -> &CommandOutbox {
        &self.outbox
    }

    pub fn outbox_mut(&mut self) -> &mut CommandOutbox {
        &mut self.outbox
    }

    /// Operator message queue
    pub fn notifier(&self) -> &StatusNotifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut StatusNotifier {
        &mut self.notifier
    }
}
