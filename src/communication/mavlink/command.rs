//! COMMAND_LONG <-> VehicleCommand conversion
//!
//! The navigator works on transport-neutral [`VehicleCommand`] records. This
//! module maps them to and from MAVLink `COMMAND_LONG` so that received
//! commands can be published to the mode mailbox and submitted commands can be
//! sent on the wire.
//!
//! # Precision
//!
//! `COMMAND_LONG` carries latitude/longitude (param5/param6) as `f32`. Decoding
//! widens them to `f64`, encoding narrows them again.

use mavlink::common::{MavCmd, COMMAND_LONG_DATA};
use navigator_core::command::{VehicleCommand, VehicleCommandId};

/// Conversion failures between MAVLink and vehicle command records
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The command id has no MAVLink `MavCmd` mapping in this navigator
    #[error("unsupported vehicle command id {0}")]
    Unsupported(u16),
}

/// Decode a received COMMAND_LONG into a vehicle command record
///
/// Unknown MAV_CMD values are kept as [`VehicleCommandId::Other`] so that the
/// active mode can still observe and ignore them.
pub fn decode_command_long(
    msg: &COMMAND_LONG_DATA,
    source_system: u8,
    source_component: u8,
) -> VehicleCommand {
    let command = u16::try_from(msg.command as u32)
        .map(VehicleCommandId::from_id)
        .unwrap_or(VehicleCommandId::None);

    VehicleCommand {
        command,
        param1: msg.param1,
        param2: msg.param2,
        param3: msg.param3,
        param4: msg.param4,
        param5: f64::from(msg.param5),
        param6: f64::from(msg.param6),
        param7: msg.param7,
        target_system: msg.target_system,
        target_component: msg.target_component,
        source_system,
        source_component,
        confirmation: msg.confirmation,
    }
}

fn to_mav_cmd(id: VehicleCommandId) -> Result<MavCmd, CommandError> {
    let cmd = match id {
        VehicleCommandId::NavWaypoint => MavCmd::MAV_CMD_NAV_WAYPOINT,
        VehicleCommandId::NavLoiterUnlimited => MavCmd::MAV_CMD_NAV_LOITER_UNLIM,
        VehicleCommandId::NavReturnToLaunch => MavCmd::MAV_CMD_NAV_RETURN_TO_LAUNCH,
        VehicleCommandId::NavLand => MavCmd::MAV_CMD_NAV_LAND,
        VehicleCommandId::NavTakeoff => MavCmd::MAV_CMD_NAV_TAKEOFF,
        VehicleCommandId::DoSetMode => MavCmd::MAV_CMD_DO_SET_MODE,
        VehicleCommandId::DoReposition => MavCmd::MAV_CMD_DO_REPOSITION,
        VehicleCommandId::DoPauseContinue => MavCmd::MAV_CMD_DO_PAUSE_CONTINUE,
        VehicleCommandId::ComponentArmDisarm => MavCmd::MAV_CMD_COMPONENT_ARM_DISARM,
        VehicleCommandId::DoGimbalManagerPitchYaw => MavCmd::MAV_CMD_DO_GIMBAL_MANAGER_PITCHYAW,
        other => return Err(CommandError::Unsupported(other.id())),
    };
    Ok(cmd)
}

/// Encode a submitted vehicle command as COMMAND_LONG
pub fn encode_command_long(cmd: &VehicleCommand) -> Result<COMMAND_LONG_DATA, CommandError> {
    Ok(COMMAND_LONG_DATA {
        target_system: cmd.target_system,
        target_component: cmd.target_component,
        command: to_mav_cmd(cmd.command)?,
        confirmation: cmd.confirmation,
        param1: cmd.param1,
        param2: cmd.param2,
        param3: cmd.param3,
        param4: cmd.param4,
        param5: cmd.param5 as f32,
        param6: cmd.param6 as f32,
        param7: cmd.param7,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_command_long(command: MavCmd, param1: f32, param7: f32) -> COMMAND_LONG_DATA {
        COMMAND_LONG_DATA {
            target_system: 1,
            target_component: 1,
            command,
            confirmation: 0,
            param1,
            param2: 0.0,
            param3: 0.0,
            param4: 0.0,
            param5: 47.5,
            param6: 8.25,
            param7,
        }
    }

    #[test]
    fn test_decode_land() {
        let msg = create_command_long(MavCmd::MAV_CMD_NAV_LAND, 0.0, 400.0);
        let cmd = decode_command_long(&msg, 255, 190);

        assert_eq!(cmd.command, VehicleCommandId::NavLand);
        assert_eq!(cmd.param5, 47.5);
        assert_eq!(cmd.param6, 8.25);
        assert_eq!(cmd.param7, 400.0);
        assert_eq!(cmd.source_system, 255);
        assert_eq!(cmd.source_component, 190);
        assert_eq!(cmd.location(), Some((47.5, 8.25, 400.0)));
    }

    #[test]
    fn test_decode_unknown_command_kept_as_other() {
        let msg = create_command_long(MavCmd::MAV_CMD_PREFLIGHT_CALIBRATION, 0.0, 0.0);
        let cmd = decode_command_long(&msg, 255, 0);

        assert_eq!(cmd.command, VehicleCommandId::Other(241));
        assert_eq!(cmd.location(), None);
    }

    #[test]
    fn test_encode_disarm() {
        let cmd = VehicleCommand {
            param1: 0.0,
            ..VehicleCommand::new(VehicleCommandId::ComponentArmDisarm)
        }
        .with_target(1, 1);

        let msg = encode_command_long(&cmd).unwrap();
        assert_eq!(msg.command, MavCmd::MAV_CMD_COMPONENT_ARM_DISARM);
        assert_eq!(msg.param1, 0.0);
        assert_eq!(msg.target_system, 1);
        assert_eq!(msg.target_component, 1);
    }

    #[test]
    fn test_encode_gimbal_keeps_nan() {
        let cmd = VehicleCommand {
            param1: -30.0,
            param2: f32::NAN,
            ..VehicleCommand::new(VehicleCommandId::DoGimbalManagerPitchYaw)
        };

        let msg = encode_command_long(&cmd).unwrap();
        assert_eq!(msg.command, MavCmd::MAV_CMD_DO_GIMBAL_MANAGER_PITCHYAW);
        assert_eq!(msg.param1, -30.0);
        assert!(msg.param2.is_nan());
    }

    #[test]
    fn test_encode_unsupported() {
        let none = VehicleCommand::default();
        assert_eq!(encode_command_long(&none), Err(CommandError::Unsupported(0)));

        let other = VehicleCommand::new(VehicleCommandId::Other(241));
        assert_eq!(encode_command_long(&other), Err(CommandError::Unsupported(241)));
    }

    #[test]
    fn test_takeoff_survives_wire_conversion() {
        let cmd = VehicleCommand {
            param5: 47.5,
            param6: 8.25,
            param7: 510.0,
            ..VehicleCommand::new(VehicleCommandId::NavTakeoff)
        };

        let msg = encode_command_long(&cmd).unwrap();
        let back = decode_command_long(&msg, 1, 1);
        assert_eq!(back.command, VehicleCommandId::NavTakeoff);
        assert_eq!(back.location(), Some((47.5, 8.25, 510.0)));
    }
}
