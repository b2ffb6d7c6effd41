//! Setpoint triplet primitives shared by the modes

use super::{ModeState, Navigator};
use navigator_core::navigation::geo::{distance_3d, distance_bearing, offset_position};
use navigator_core::navigation::{PositionSetpoint, SetpointType};

impl ModeState {
    /// Whether the vehicle has reached the current setpoint.
    ///
    /// `false` while the vehicle position or the current setpoint is unknown.
    /// Radii are inclusive.
    pub fn check_current_pos_sp_reached(&self, nav: &Navigator<'_>) -> bool {
        let (Some(pos), Some(sp)) = (nav.global_position, nav.pos_sp_triplet().current()) else {
            return false;
        };

        match sp.setpoint_type {
            SetpointType::Idle => true,
            SetpointType::Land => nav.vehicle_status.landed,
            SetpointType::Takeoff => {
                // Altitude only
                let d = distance_3d(pos.lat, pos.lon, pos.alt, pos.lat, pos.lon, sp.alt);
                d.vertical <= f64::from(self.parameters.takeoff_acceptance_radius)
            }
            SetpointType::Position | SetpointType::Loiter | SetpointType::Follow => {
                let d = distance_3d(pos.lat, pos.lon, pos.alt, sp.lat, sp.lon, sp.alt);
                d.total <= f64::from(self.parameters.acceptance_radius)
            }
        }
    }

    /// Point the triplet at the stored initial position.
    ///
    /// With `AIRD_INIT_P_USE` set and a known target, the goal is placed
    /// `AIRD_INIT_P_DST` meters from the target towards the initial position
    /// instead. Returns `false` and leaves the triplet alone when the initial
    /// position is unknown or the goal is invalid.
    pub fn go_to_initial_position(&self, nav: &mut Navigator<'_>) -> bool {
        let Some(initial) = nav.initial_position().copied() else {
            crate::log_warn!("{}: no initial position", self.name());
            return false;
        };

        let (lat, lon) = match nav.target_position {
            Some(target) if self.parameters.airdog_init_pos_use => {
                let (_, bearing) = distance_bearing(target.lat, target.lon, initial.lat, initial.lon);
                offset_position(
                    target.lat,
                    target.lon,
                    bearing,
                    f64::from(self.parameters.airdog_init_pos_dst),
                )
            }
            _ => (initial.lat, initial.lon),
        };

        let goal = PositionSetpoint::position(lat, lon, initial.alt);
        match nav.pos_sp_triplet_mut().advance(goal) {
            Ok(()) => true,
            Err(_) => {
                crate::log_warn!("{}: initial position rejected", self.name());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::NavigatorConfig;
    use navigator_core::navigation::{GlobalPosition, TargetPosition};
    use navigator_core::parameters::{NavigatorParams, ParamValue, ParameterStore};

    fn store_with_defaults() -> ParameterStore {
        let mut store = ParameterStore::new();
        NavigatorParams::register_defaults(&mut store).unwrap();
        store
    }

    fn set_current(nav: &mut Navigator<'_>, setpoint_type: SetpointType, alt: f32) {
        let sp = PositionSetpoint::new(setpoint_type, 47.0, 8.0, alt);
        nav.pos_sp_triplet_mut().set_current(sp).unwrap();
    }

    #[test]
    fn test_reached_without_inputs_is_false() {
        let store = store_with_defaults();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        let state = ModeState::new("Mission", &store);

        assert!(!state.check_current_pos_sp_reached(&nav));

        nav.global_position = Some(GlobalPosition::new(47.0, 8.0, 100.0));
        assert!(!state.check_current_pos_sp_reached(&nav));
    }

    #[test]
    fn test_reached_boundary_is_inclusive() {
        let store = store_with_defaults();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        let state = ModeState::new("Mission", &store);
        nav.global_position = Some(GlobalPosition::new(47.0, 8.0, 100.0));

        set_current(&mut nav, SetpointType::Position, 105.0);
        assert!(state.check_current_pos_sp_reached(&nav));

        set_current(&mut nav, SetpointType::Position, 105.01);
        assert!(!state.check_current_pos_sp_reached(&nav));
    }

    #[test]
    fn test_reached_horizontal() {
        let store = store_with_defaults();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        let state = ModeState::new("Mission", &store);
        let (lat, lon) = offset_position(47.0, 8.0, 90.0, 4.0);
        nav.global_position = Some(GlobalPosition::new(lat, lon, 100.0));

        set_current(&mut nav, SetpointType::Loiter, 100.0);
        assert!(state.check_current_pos_sp_reached(&nav));

        let (lat, lon) = offset_position(47.0, 8.0, 90.0, 6.0);
        nav.global_position = Some(GlobalPosition::new(lat, lon, 100.0));
        assert!(!state.check_current_pos_sp_reached(&nav));
    }

    #[test]
    fn test_reached_uses_snapshot_radius() {
        let mut store = store_with_defaults();
        store.set("NAV_ACC_RAD", ParamValue::Float(20.0)).unwrap();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        let state = ModeState::new("Mission", &store);
        nav.global_position = Some(GlobalPosition::new(47.0, 8.0, 100.0));

        set_current(&mut nav, SetpointType::Follow, 115.0);
        assert!(state.check_current_pos_sp_reached(&nav));
    }

    #[test]
    fn test_reached_takeoff_altitude_only() {
        let store = store_with_defaults();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        let state = ModeState::new("Takeoff", &store);
        // Far away horizontally, within 2 m vertically
        nav.global_position = Some(GlobalPosition::new(47.1, 8.1, 108.5));

        set_current(&mut nav, SetpointType::Takeoff, 110.0);
        assert!(state.check_current_pos_sp_reached(&nav));

        nav.global_position = Some(GlobalPosition::new(47.0, 8.0, 105.0));
        assert!(!state.check_current_pos_sp_reached(&nav));
    }

    #[test]
    fn test_reached_land_and_idle() {
        let store = store_with_defaults();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        let state = ModeState::new("Land", &store);
        nav.global_position = Some(GlobalPosition::new(47.0, 8.0, 100.0));

        set_current(&mut nav, SetpointType::Land, 100.0);
        assert!(!state.check_current_pos_sp_reached(&nav));
        nav.vehicle_status.landed = true;
        assert!(state.check_current_pos_sp_reached(&nav));

        nav.vehicle_status.landed = false;
        set_current(&mut nav, SetpointType::Idle, 500.0);
        assert!(state.check_current_pos_sp_reached(&nav));
    }

    #[test]
    fn test_go_to_initial_position() {
        let store = store_with_defaults();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        let state = ModeState::new("RTL", &store);
        set_current(&mut nav, SetpointType::Loiter, 120.0);
        nav.set_initial_position(Some(GlobalPosition::new(47.2, 8.2, 400.0)));

        assert!(state.go_to_initial_position(&mut nav));

        let triplet = nav.pos_sp_triplet();
        let current = triplet.current().unwrap();
        assert_eq!(current.setpoint_type, SetpointType::Position);
        assert_eq!((current.lat, current.lon, current.alt), (47.2, 8.2, 400.0));
        assert_eq!(triplet.previous().unwrap().setpoint_type, SetpointType::Loiter);
        assert!(triplet.next().is_none());
    }

    #[test]
    fn test_go_to_initial_position_near_target() {
        let mut store = store_with_defaults();
        store.set("AIRD_INIT_P_USE", ParamValue::Int(1)).unwrap();
        store.set("AIRD_INIT_P_DST", ParamValue::Float(20.0)).unwrap();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        let state = ModeState::new("Follow", &store);

        let (init_lat, init_lon) = offset_position(47.0, 8.0, 0.0, 500.0);
        nav.set_initial_position(Some(GlobalPosition::new(init_lat, init_lon, 410.0)));
        nav.target_position = Some(TargetPosition::new(47.0, 8.0, 400.0));

        assert!(state.go_to_initial_position(&mut nav));

        let current = *nav.pos_sp_triplet().current().unwrap();
        let (distance, bearing) = distance_bearing(47.0, 8.0, current.lat, current.lon);
        assert!((distance - 20.0).abs() < 0.01);
        assert!(bearing < 0.1 || bearing > 359.9);
        assert_eq!(current.alt, 410.0);
    }

    #[test]
    fn test_go_to_initial_position_unknown() {
        let store = store_with_defaults();
        let mut nav = Navigator::new(NavigatorConfig::default(), &store);
        let state = ModeState::new("RTL", &store);
        set_current(&mut nav, SetpointType::Loiter, 120.0);
        let before = *nav.pos_sp_triplet();

        assert!(!state.go_to_initial_position(&mut nav));
        assert_eq!(*nav.pos_sp_triplet(), before);
    }
}
