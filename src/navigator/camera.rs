//! Camera pointing
//!
//! Aims the vehicle heading and the gimbal at the tracked target. The aim is
//! written into a caller-supplied setpoint and sent to the gimbal manager as
//! `MAV_CMD_DO_GIMBAL_MANAGER_PITCHYAW`; the navigator triplet is not touched.

use super::{ModeState, Navigator};
use navigator_core::command::{VehicleCommand, VehicleCommandId};
use navigator_core::navigation::geo::{distance_bearing, elevation_angle, wrap_180};
use navigator_core::navigation::PositionSetpoint;

/// GIMBAL_MANAGER_FLAGS_YAW_LOCK: yaw is earth-frame (relative to north)
const GIMBAL_MANAGER_FLAGS_YAW_LOCK: f32 = 16.0;

impl ModeState {
    /// Aim heading and camera from the vehicle at the target.
    ///
    /// Yaw is left alone inside `A_YAW_IGNR_R` of the target, where the
    /// bearing is unstable. Pitch (negative looks down) is only set when
    /// `AFOL_USE_CAM_PIT` is enabled. Returns `false` without side effects when
    /// either position is unknown or neither axis applies.
    pub fn point_camera_to_target(&self, nav: &mut Navigator<'_>, sp: &mut PositionSetpoint) -> bool {
        let (Some(vehicle), Some(target)) = (nav.global_position, nav.target_position) else {
            return false;
        };

        let (distance, bearing) = distance_bearing(vehicle.lat, vehicle.lon, target.lat, target.lon);

        let yaw = (distance >= f64::from(self.parameters.a_yaw_ignore_radius)).then_some(bearing as f32);
        let pitch = self.parameters.afol_use_cam_pitch.then(|| {
            let height_diff = f64::from(target.alt) - f64::from(vehicle.alt);
            elevation_angle(distance, height_diff) as f32
        });

        if yaw.is_none() && pitch.is_none() {
            return false;
        }
        if let Some(yaw) = yaw {
            sp.yaw = Some(yaw);
        }
        if let Some(pitch) = pitch {
            sp.camera_pitch = Some(pitch);
        }

        let cmd = VehicleCommand {
            param1: pitch.unwrap_or(f32::NAN),
            param2: yaw.map_or(f32::NAN, |yaw| wrap_180(f64::from(yaw)) as f32),
            param3: f32::NAN,
            param4: f32::NAN,
            param5: f64::from(GIMBAL_MANAGER_FLAGS_YAW_LOCK),
            param6: 0.0,
            param7: f32::from(nav.config().gimbal_device_id),
            ..VehicleCommand::new(VehicleCommandId::DoGimbalManagerPitchYaw)
        };
        nav.submit_command(cmd);
        true
    }
}
