//! Navigator Mode Parameter Definitions
//!
//! Tunables shared by every navigation mode: acceptance radii, takeoff and
//! return altitudes, follow/camera behavior and the "initial position" helper.
//!
//! # Parameters
//!
//! - `NAV_TAKEOFF_ALT` - Takeoff altitude above home (m)
//! - `NAV_TAKEOFF_ACR` - Altitude acceptance for a takeoff setpoint (m)
//! - `NAV_ACC_RAD` - Acceptance radius for position setpoints (m)
//! - `NAV_VEL_LPF` - Velocity low-pass filter coefficient (0..1)
//! - `AFOL_REP_TALT` - Repeat target altitude while following (0/1)
//! - `AFOL_USE_CAM_PIT` - Drive camera pitch when pointing at target (0/1)
//! - `LOI_STEP_LEN` - Loiter reposition step length (m)
//! - `LOI_MIN_ALT` - Minimum loiter altitude (m)
//! - `RTL_RET_ALT` - Return altitude (m)
//! - `AIRD_DST_INV` - Distance invalidation threshold (m)
//! - `AIRD_INIT_P_DST` - Distance from target for the initial position (m)
//! - `AIRD_INIT_P_USE` - Place initial position relative to target (0/1)
//! - `A_YAW_IGNR_R` - Horizontal radius inside which yaw is not re-aimed (m)

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamHandle, ParamValue, ParameterProvider, ParameterStore};

const TAKEOFF_ALT: &str = "NAV_TAKEOFF_ALT";
const TAKEOFF_ACR: &str = "NAV_TAKEOFF_ACR";
const ACC_RAD: &str = "NAV_ACC_RAD";
const VEL_LPF: &str = "NAV_VEL_LPF";
const AFOL_REP_TALT: &str = "AFOL_REP_TALT";
const AFOL_USE_CAM_PIT: &str = "AFOL_USE_CAM_PIT";
const LOI_STEP_LEN: &str = "LOI_STEP_LEN";
const LOI_MIN_ALT: &str = "LOI_MIN_ALT";
const RTL_RET_ALT: &str = "RTL_RET_ALT";
const AIRD_DST_INV: &str = "AIRD_DST_INV";
const AIRD_INIT_P_DST: &str = "AIRD_INIT_P_DST";
const AIRD_INIT_P_USE: &str = "AIRD_INIT_P_USE";
const A_YAW_IGNR_R: &str = "A_YAW_IGNR_R";

/// (name, default, min, max) for every float tunable
const FLOAT_PARAMS: [(&str, f32, f32, f32); 10] = [
    (TAKEOFF_ALT, 10.0, 0.5, 200.0),
    (TAKEOFF_ACR, 2.0, 0.05, 50.0),
    (ACC_RAD, 5.0, 0.05, 200.0),
    (VEL_LPF, 0.5, 0.0, 1.0),
    (LOI_STEP_LEN, 1.0, 0.1, 50.0),
    (LOI_MIN_ALT, 5.0, 0.0, 200.0),
    (RTL_RET_ALT, 30.0, 0.0, 500.0),
    (AIRD_DST_INV, 5.0, 0.0, 100.0),
    (AIRD_INIT_P_DST, 10.0, 0.0, 200.0),
    (A_YAW_IGNR_R, 2.0, 0.0, 50.0),
];

/// (name, default) for every on/off tunable
const FLAG_PARAMS: [(&str, bool); 3] = [
    (AFOL_REP_TALT, false),
    (AFOL_USE_CAM_PIT, true),
    (AIRD_INIT_P_USE, false),
];

fn float_default(name: &str) -> f32 {
    FLOAT_PARAMS
        .iter()
        .find(|(n, ..)| *n == name)
        .map(|(_, default, ..)| *default)
        .unwrap_or(0.0)
}

fn flag_default(name: &str) -> bool {
    FLAG_PARAMS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, default)| *default)
        .unwrap_or(false)
}

fn float_bounds(name: &str) -> (f32, f32) {
    FLOAT_PARAMS
        .iter()
        .find(|(n, ..)| *n == name)
        .map(|(_, _, min, max)| (*min, *max))
        .unwrap_or((f32::MIN, f32::MAX))
}

/// Value snapshot of the navigator tunables.
///
/// Only the parameter bridge writes it; everything else reads.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigatorParams {
    pub takeoff_alt: f32,
    pub takeoff_acceptance_radius: f32,
    pub acceptance_radius: f32,
    pub velocity_lpf: f32,
    pub afol_rep_target_alt: bool,
    pub afol_use_cam_pitch: bool,
    pub loi_step_len: f32,
    pub loi_min_alt: f32,
    pub rtl_ret_alt: f32,
    pub airdog_dst_inv: f32,
    pub airdog_init_pos_dst: f32,
    pub airdog_init_pos_use: bool,
    pub a_yaw_ignore_radius: f32,
}

impl Default for NavigatorParams {
    fn default() -> Self {
        Self {
            takeoff_alt: float_default(TAKEOFF_ALT),
            takeoff_acceptance_radius: float_default(TAKEOFF_ACR),
            acceptance_radius: float_default(ACC_RAD),
            velocity_lpf: float_default(VEL_LPF),
            afol_rep_target_alt: flag_default(AFOL_REP_TALT),
            afol_use_cam_pitch: flag_default(AFOL_USE_CAM_PIT),
            loi_step_len: float_default(LOI_STEP_LEN),
            loi_min_alt: float_default(LOI_MIN_ALT),
            rtl_ret_alt: float_default(RTL_RET_ALT),
            airdog_dst_inv: float_default(AIRD_DST_INV),
            airdog_init_pos_dst: float_default(AIRD_INIT_P_DST),
            airdog_init_pos_use: flag_default(AIRD_INIT_P_USE),
            a_yaw_ignore_radius: float_default(A_YAW_IGNR_R),
        }
    }
}

/// Storage handles for [`NavigatorParams`], resolved once by name.
///
/// A `None` entry means the name was not registered when resolution ran;
/// the matching snapshot field then keeps its previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigatorParamHandles {
    pub takeoff_alt: Option<ParamHandle>,
    pub takeoff_acceptance_radius: Option<ParamHandle>,
    pub acceptance_radius: Option<ParamHandle>,
    pub velocity_lpf: Option<ParamHandle>,
    pub afol_rep_target_alt: Option<ParamHandle>,
    pub afol_use_cam_pitch: Option<ParamHandle>,
    pub loi_step_len: Option<ParamHandle>,
    pub loi_min_alt: Option<ParamHandle>,
    pub rtl_ret_alt: Option<ParamHandle>,
    pub airdog_dst_inv: Option<ParamHandle>,
    pub airdog_init_pos_dst: Option<ParamHandle>,
    pub airdog_init_pos_use: Option<ParamHandle>,
    pub a_yaw_ignore_radius: Option<ParamHandle>,
}

impl NavigatorParamHandles {
    /// Resolve every tunable name against the provider
    pub fn resolve(provider: &dyn ParameterProvider) -> Self {
        Self {
            takeoff_alt: provider.find(TAKEOFF_ALT),
            takeoff_acceptance_radius: provider.find(TAKEOFF_ACR),
            acceptance_radius: provider.find(ACC_RAD),
            velocity_lpf: provider.find(VEL_LPF),
            afol_rep_target_alt: provider.find(AFOL_REP_TALT),
            afol_use_cam_pitch: provider.find(AFOL_USE_CAM_PIT),
            loi_step_len: provider.find(LOI_STEP_LEN),
            loi_min_alt: provider.find(LOI_MIN_ALT),
            rtl_ret_alt: provider.find(RTL_RET_ALT),
            airdog_dst_inv: provider.find(AIRD_DST_INV),
            airdog_init_pos_dst: provider.find(AIRD_INIT_P_DST),
            airdog_init_pos_use: provider.find(AIRD_INIT_P_USE),
            a_yaw_ignore_radius: provider.find(A_YAW_IGNR_R),
        }
    }

    /// Number of tunables that resolved to a storage handle
    pub fn resolved_count(&self) -> usize {
        [
            &self.takeoff_alt,
            &self.takeoff_acceptance_radius,
            &self.acceptance_radius,
            &self.velocity_lpf,
            &self.afol_rep_target_alt,
            &self.afol_use_cam_pitch,
            &self.loi_step_len,
            &self.loi_min_alt,
            &self.rtl_ret_alt,
            &self.airdog_dst_inv,
            &self.airdog_init_pos_dst,
            &self.airdog_init_pos_use,
            &self.a_yaw_ignore_radius,
        ]
        .iter()
        .filter(|handle| handle.is_some())
        .count()
    }
}

fn read_float(
    provider: &dyn ParameterProvider,
    handle: &Option<ParamHandle>,
    field: &mut f32,
) {
    let Some(handle) = handle else {
        return;
    };
    if let Some(value) = provider.value(handle).and_then(|v| v.as_f32()) {
        if value.is_finite() {
            let (min, max) = float_bounds(handle.name());
            *field = value.clamp(min, max);
        }
    }
}

fn read_flag(provider: &dyn ParameterProvider, handle: &Option<ParamHandle>, field: &mut bool) {
    let Some(handle) = handle else {
        return;
    };
    if let Some(value) = provider.value(handle).and_then(|v| v.as_bool()) {
        *field = value;
    }
}

impl NavigatorParams {
    /// Register navigator parameters with default values
    ///
    /// Already registered names keep their stored value.
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        for (name, default, ..) in FLOAT_PARAMS {
            store.register(name, ParamValue::Float(default), ParamFlags::empty())?;
        }
        for (name, default) in FLAG_PARAMS {
            store.register(name, ParamValue::Int(default as i32), ParamFlags::empty())?;
        }
        Ok(())
    }

    /// Copy current values behind `handles` into the snapshot.
    ///
    /// Values of the wrong type or non-finite floats are ignored; numbers are
    /// clamped to their documented range.
    pub fn update_from(&mut self, provider: &dyn ParameterProvider, handles: &NavigatorParamHandles) {
        read_float(provider, &handles.takeoff_alt, &mut self.takeoff_alt);
        read_float(
            provider,
            &handles.takeoff_acceptance_radius,
            &mut self.takeoff_acceptance_radius,
        );
        read_float(provider, &handles.acceptance_radius, &mut self.acceptance_radius);
        read_float(provider, &handles.velocity_lpf, &mut self.velocity_lpf);
        read_flag(
            provider,
            &handles.afol_rep_target_alt,
            &mut self.afol_rep_target_alt,
        );
        read_flag(
            provider,
            &handles.afol_use_cam_pitch,
            &mut self.afol_use_cam_pitch,
        );
        read_float(provider, &handles.loi_step_len, &mut self.loi_step_len);
        read_float(provider, &handles.loi_min_alt, &mut self.loi_min_alt);
        read_float(provider, &handles.rtl_ret_alt, &mut self.rtl_ret_alt);
        read_float(provider, &handles.airdog_dst_inv, &mut self.airdog_dst_inv);
        read_float(
            provider,
            &handles.airdog_init_pos_dst,
            &mut self.airdog_init_pos_dst,
        );
        read_flag(
            provider,
            &handles.airdog_init_pos_use,
            &mut self.airdog_init_pos_use,
        );
        read_float(
            provider,
            &handles.a_yaw_ignore_radius,
            &mut self.a_yaw_ignore_radius,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered_store() -> ParameterStore {
        let mut store = ParameterStore::new();
        NavigatorParams::register_defaults(&mut store).unwrap();
        store
    }

    fn snapshot(store: &ParameterStore) -> NavigatorParams {
        let handles = NavigatorParamHandles::resolve(store);
        let mut params = NavigatorParams::default();
        params.update_from(store, &handles);
        params
    }

    #[test]
    fn test_navigator_params_defaults() {
        let params = NavigatorParams::default();
        assert!((params.acceptance_radius - 5.0).abs() < 0.001);
        assert!((params.takeoff_alt - 10.0).abs() < 0.001);
        assert!(params.afol_use_cam_pitch);
        assert!(!params.airdog_init_pos_use);
    }

    #[test]
    fn test_register_defaults_registers_every_name() {
        let store = registered_store();
        assert_eq!(store.len(), FLOAT_PARAMS.len() + FLAG_PARAMS.len());

        let handles = NavigatorParamHandles::resolve(&store);
        assert_eq!(handles.resolved_count(), 13);
    }

    #[test]
    fn test_snapshot_matches_defaults() {
        let store = registered_store();
        assert_eq!(snapshot(&store), NavigatorParams::default());
    }

    #[test]
    fn test_snapshot_custom_values() {
        let mut store = registered_store();
        store.set("NAV_ACC_RAD", ParamValue::Float(3.5)).unwrap();
        store.set("AIRD_INIT_P_USE", ParamValue::Int(1)).unwrap();
        store.set("AFOL_USE_CAM_PIT", ParamValue::Bool(false)).unwrap();

        let params = snapshot(&store);
        assert!((params.acceptance_radius - 3.5).abs() < 0.001);
        assert!(params.airdog_init_pos_use);
        assert!(!params.afol_use_cam_pitch);
    }

    #[test]
    fn test_snapshot_clamps_out_of_range() {
        let mut store = registered_store();
        store.set("NAV_VEL_LPF", ParamValue::Float(4.0)).unwrap();
        store.set("NAV_ACC_RAD", ParamValue::Float(-1.0)).unwrap();

        let params = snapshot(&store);
        assert!((params.velocity_lpf - 1.0).abs() < 0.001);
        assert!((params.acceptance_radius - 0.05).abs() < 0.001);
    }

    #[test]
    fn test_update_ignores_wrong_type_and_nan() {
        let mut store = registered_store();
        store
            .set(
                "NAV_TAKEOFF_ALT",
                ParamValue::String(heapless::String::try_from("high").unwrap()),
            )
            .unwrap();
        store.set("RTL_RET_ALT", ParamValue::Float(f32::NAN)).unwrap();

        let params = snapshot(&store);
        assert!((params.takeoff_alt - 10.0).abs() < 0.001);
        assert!((params.rtl_ret_alt - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_unresolved_handles_keep_current_values() {
        let empty = ParameterStore::new();
        let handles = NavigatorParamHandles::resolve(&empty);
        assert_eq!(handles.resolved_count(), 0);

        let mut params = NavigatorParams {
            acceptance_radius: 9.0,
            ..NavigatorParams::default()
        };
        params.update_from(&empty, &handles);
        assert!((params.acceptance_radius - 9.0).abs() < 0.001);
    }

    #[test]
    fn test_update_is_idempotent() {
        let store = registered_store();
        let handles = NavigatorParamHandles::resolve(&store);

        let mut params = NavigatorParams::default();
        params.update_from(&store, &handles);
        let first = params.clone();
        params.update_from(&store, &handles);
        assert_eq!(params, first);
    }

    #[test]
    fn test_snapshot_clamps_to_maximum() {
        let mut store = registered_store();
        store.set("NAV_ACC_RAD", ParamValue::Float(500.0)).unwrap();
        store.set("RTL_RET_ALT", ParamValue::Int(9000)).unwrap();

        let params = snapshot(&store);
        assert!((params.acceptance_radius - 200.0).abs() < 0.001);
        assert!((params.rtl_ret_alt - 500.0).abs() < 0.001);
    }
}
