//! Vehicle Command Records
//!
//! Decoded vehicle commands as exchanged with the command transport, plus the
//! single-slot inbound mailbox and bounded outbound queue used by navigation
//! modes.
//!
//! Command IDs follow the MAVLink `MAV_CMD` numbering. IDs at or below
//! `MAV_CMD_NAV_LAST` (95) are NAV commands and carry a location.

mod mailbox;

pub use mailbox::{CommandMailbox, CommandOutbox, OUTBOX_CAPACITY};

/// MAV_CMD_NAV_LAST: command IDs at or below this value are NAV commands.
pub const MAV_CMD_NAV_LAST: u16 = 95;

/// Known vehicle command identifiers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VehicleCommandId {
    /// Placeholder for a record that has never been written
    #[default]
    None,
    /// MAV_CMD_NAV_WAYPOINT (16)
    NavWaypoint,
    /// MAV_CMD_NAV_LOITER_UNLIM (17)
    NavLoiterUnlimited,
    /// MAV_CMD_NAV_RETURN_TO_LAUNCH (20)
    NavReturnToLaunch,
    /// MAV_CMD_NAV_LAND (21)
    NavLand,
    /// MAV_CMD_NAV_TAKEOFF (22)
    NavTakeoff,
    /// MAV_CMD_DO_SET_MODE (176)
    DoSetMode,
    /// MAV_CMD_DO_REPOSITION (192)
    DoReposition,
    /// MAV_CMD_DO_PAUSE_CONTINUE (193)
    DoPauseContinue,
    /// MAV_CMD_COMPONENT_ARM_DISARM (400)
    ComponentArmDisarm,
    /// MAV_CMD_DO_GIMBAL_MANAGER_PITCHYAW (1000)
    DoGimbalManagerPitchYaw,
    /// Any other MAV_CMD value
    Other(u16),
}

impl VehicleCommandId {
    /// Numeric MAV_CMD value (0 for [`VehicleCommandId::None`])
    pub const fn id(self) -> u16 {
        match self {
            VehicleCommandId::None => 0,
            VehicleCommandId::NavWaypoint => 16,
            VehicleCommandId::NavLoiterUnlimited => 17,
            VehicleCommandId::NavReturnToLaunch => 20,
            VehicleCommandId::NavLand => 21,
            VehicleCommandId::NavTakeoff => 22,
            VehicleCommandId::DoSetMode => 176,
            VehicleCommandId::DoReposition => 192,
            VehicleCommandId::DoPauseContinue => 193,
            VehicleCommandId::ComponentArmDisarm => 400,
            VehicleCommandId::DoGimbalManagerPitchYaw => 1000,
            VehicleCommandId::Other(id) => id,
        }
    }

    /// Map a MAV_CMD value to its identifier
    pub const fn from_id(id: u16) -> Self {
        match id {
            0 => VehicleCommandId::None,
            16 => VehicleCommandId::NavWaypoint,
            17 => VehicleCommandId::NavLoiterUnlimited,
            20 => VehicleCommandId::NavReturnToLaunch,
            21 => VehicleCommandId::NavLand,
            22 => VehicleCommandId::NavTakeoff,
            176 => VehicleCommandId::DoSetMode,
            192 => VehicleCommandId::DoReposition,
            193 => VehicleCommandId::DoPauseContinue,
            400 => VehicleCommandId::ComponentArmDisarm,
            1000 => VehicleCommandId::DoGimbalManagerPitchYaw,
            other => VehicleCommandId::Other(other),
        }
    }

    /// NAV commands drive navigation; everything else is an immediate action.
    pub const fn is_nav(self) -> bool {
        !matches!(self, VehicleCommandId::None) && self.id() <= MAV_CMD_NAV_LAST
    }
}

/// Decoded vehicle command
///
/// Parameters 5 and 6 carry latitude/longitude for NAV commands and are kept
/// in double precision.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VehicleCommand {
    pub command: VehicleCommandId,
    pub param1: f32,
    pub param2: f32,
    pub param3: f32,
    pub param4: f32,
    pub param5: f64,
    pub param6: f64,
    pub param7: f32,
    pub target_system: u8,
    pub target_component: u8,
    pub source_system: u8,
    pub source_component: u8,
    pub confirmation: u8,
}

impl VehicleCommand {
    /// Command with all parameters zeroed
    pub fn new(command: VehicleCommandId) -> Self {
        Self {
            command,
            ..Self::default()
        }
    }

    /// Address the command to a system/component
    pub fn with_target(mut self, system: u8, component: u8) -> Self {
        self.target_system = system;
        self.target_component = component;
        self
    }

    /// Location carried by NAV commands as (lat, lon, alt)
    ///
    /// `None` for DO commands or when any coordinate is NaN.
    pub fn location(&self) -> Option<(f64, f64, f32)> {
        if !self.command.is_nav() {
            return None;
        }
        if self.param5.is_nan() || self.param6.is_nan() || self.param7.is_nan() {
            return None;
        }
        Some((self.param5, self.param6, self.param7))
    }
}
