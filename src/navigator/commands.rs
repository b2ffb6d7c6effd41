//! Command interpreter and command-issuing helpers
//!
//! Inbound commands are polled from the navigator mailbox into the mode's
//! command record. Outbound helpers build canonical land/takeoff/disarm
//! commands and submit them without tracking completion; the outcome shows up
//! in later telemetry.

use super::{ModeState, Navigator};
use navigator_core::command::{VehicleCommand, VehicleCommandId};

/// Fill params 5/6/7 with a location, NaN when unknown
fn with_location(mut cmd: VehicleCommand, location: Option<(f64, f64, f32)>) -> VehicleCommand {
    let (lat, lon, alt) = location.unwrap_or((f64::NAN, f64::NAN, f32::NAN));
    cmd.param5 = lat;
    cmd.param6 = lon;
    cmd.param7 = alt;
    cmd
}

impl ModeState {
    /// Poll the mailbox for a command published since the last poll.
    ///
    /// On `true` the command is stored in [`ModeState::vehicle_command`]. On
    /// `false` the stored record is left unchanged.
    pub fn update_vehicle_command(&mut self, nav: &mut Navigator<'_>) -> bool {
        match nav.poll_command() {
            Some(cmd) => {
                crate::log_debug!("{}: command {}", self.name(), cmd.command.id());
                self.vehicle_command = cmd;
                true
            }
            None => false,
        }
    }

    /// Request a landing at the current position
    pub fn land(&self, nav: &mut Navigator<'_>) {
        let location = nav.global_position.map(|pos| (pos.lat, pos.lon, pos.alt));
        let cmd = with_location(VehicleCommand::new(VehicleCommandId::NavLand), location);

        crate::log_info!("{}: land", self.name());
        nav.submit_command(cmd);
        nav.notifier_mut().send_info("Landing");
    }

    /// Request a takeoff to `takeoff_alt` above home (or above the current
    /// altitude when home is unknown).
    ///
    /// Returns `false` without submitting anything when neither altitude is
    /// known.
    pub fn takeoff(&self, nav: &mut Navigator<'_>) -> bool {
        let reference_alt = nav
            .home_position
            .map(|home| home.alt)
            .or(nav.global_position.map(|pos| pos.alt));
        let Some(reference_alt) = reference_alt else {
            crate::log_warn!("{}: takeoff without altitude reference", self.name());
            nav.notifier_mut().send_warning("Takeoff rejected: no altitude");
            return false;
        };

        let target_alt = reference_alt + self.parameters.takeoff_alt;
        let location = nav
            .global_position
            .map(|pos| (pos.lat, pos.lon, target_alt))
            .unwrap_or((f64::NAN, f64::NAN, target_alt));
        let cmd = with_location(VehicleCommand::new(VehicleCommandId::NavTakeoff), Some(location));

        crate::log_info!("{}: takeoff to {} m", self.name(), target_alt);
        nav.submit_command(cmd);
        let text = alloc::format!("Takeoff to {:.1} m", self.parameters.takeoff_alt);
        nav.notifier_mut().send_info(&text);
        true
    }

    /// Request disarming
    pub fn disarm(&self, nav: &mut Navigator<'_>) {
        let cmd = VehicleCommand {
            param1: 0.0,
            ..VehicleCommand::new(VehicleCommandId::ComponentArmDisarm)
        };

        crate::log_info!("{}: disarm", self.name());
        nav.submit_command(cmd);
        nav.notifier_mut().send_notice("Disarming");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::NavigatorConfig;
    use mavlink::common::MavSeverity;
    use navigator_core::navigation::{GlobalPosition, HomePosition};
    use navigator_core::parameters::{NavigatorParams, ParameterStore};

    fn store_with_defaults() -> ParameterStore {
        let mut store = ParameterStore::new();
        NavigatorParams::register_defaults(&mut store).unwrap();
        store
    }

    #[test]
    fn test_update_vehicle_command_once_per_publication() {
        let store = store_with_defaults();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        let mut state = ModeState::new("Mission", &store);

        let published = VehicleCommand {
            param1: 1.0,
            ..VehicleCommand::new(VehicleCommandId::DoPauseContinue)
        };
        nav.publish_command(published);

        assert!(state.update_vehicle_command(&mut nav));
        assert_eq!(*state.vehicle_command(), published);

        assert!(!state.update_vehicle_command(&mut nav));
        assert!(!state.update_vehicle_command(&mut nav));
        assert_eq!(*state.vehicle_command(), published);
    }

    #[test]
    fn test_update_vehicle_command_sees_only_latest() {
        let store = store_with_defaults();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        let mut state = ModeState::new("Mission", &store);

        nav.publish_command(VehicleCommand::new(VehicleCommandId::NavLand));
        nav.publish_command(VehicleCommand::new(VehicleCommandId::NavReturnToLaunch));

        assert!(state.update_vehicle_command(&mut nav));
        assert_eq!(
            state.vehicle_command().command,
            VehicleCommandId::NavReturnToLaunch
        );
        assert!(!state.update_vehicle_command(&mut nav));
    }

    #[test]
    fn test_land_at_current_position() {
        let store = store_with_defaults();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        nav.global_position = Some(GlobalPosition::new(47.5, 8.25, 430.0));
        let state = ModeState::new("Land", &store);

        state.land(&mut nav);

        let cmd = nav.outbox_mut().pop().unwrap();
        assert_eq!(cmd.command, VehicleCommandId::NavLand);
        assert_eq!(cmd.location(), Some((47.5, 8.25, 430.0)));
        assert_eq!(nav.notifier_mut().pop().unwrap().text.as_str(), "Landing");
    }

    #[test]
    fn test_land_without_position_uses_nan() {
        let store = store_with_defaults();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        let state = ModeState::new("Land", &store);

        state.land(&mut nav);

        let cmd = nav.outbox_mut().pop().unwrap();
        assert!(cmd.param5.is_nan());
        assert!(cmd.param7.is_nan());
        assert_eq!(cmd.location(), None);
    }

    #[test]
    fn test_takeoff_above_home() {
        let store = store_with_defaults();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        nav.home_position = Some(HomePosition::new(47.5, 8.25, 400.0));
        nav.global_position = Some(GlobalPosition::new(47.5, 8.25, 402.0));
        let state = ModeState::new("Takeoff", &store);

        assert!(state.takeoff(&mut nav));

        let cmd = nav.outbox_mut().pop().unwrap();
        assert_eq!(cmd.command, VehicleCommandId::NavTakeoff);
        assert_eq!(cmd.param7, 410.0);
        assert_eq!(cmd.param5, 47.5);
        assert_eq!(
            nav.notifier_mut().pop().unwrap().text.as_str(),
            "Takeoff to 10.0 m"
        );
    }

    #[test]
    fn test_takeoff_without_home_uses_current_altitude() {
        let store = store_with_defaults();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        nav.global_position = Some(GlobalPosition::new(47.5, 8.25, 402.0));
        let state = ModeState::new("Takeoff", &store);

        assert!(state.takeoff(&mut nav));
        assert_eq!(nav.outbox_mut().pop().unwrap().param7, 412.0);
    }

    #[test]
    fn test_takeoff_without_altitude_rejected() {
        let store = store_with_defaults();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        let state = ModeState::new("Takeoff", &store);

        assert!(!state.takeoff(&mut nav));
        assert!(nav.outbox().is_empty());
        let message = nav.notifier_mut().pop().unwrap();
        assert_eq!(message.severity, MavSeverity::MAV_SEVERITY_WARNING);
    }

    #[test]
    fn test_disarm() {
        let store = store_with_defaults();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        let state = ModeState::new("Land", &store);

        state.disarm(&mut nav);

        let cmd = nav.outbox_mut().pop().unwrap();
        assert_eq!(cmd.command, VehicleCommandId::ComponentArmDisarm);
        assert_eq!(cmd.param1, 0.0);
        assert_eq!(cmd.target_system, 1);
        let message = nav.notifier_mut().pop().unwrap();
        assert_eq!(message.severity, MavSeverity::MAV_SEVERITY_NOTICE);
        assert_eq!(message.text.as_str(), "Disarming");
    }
}
