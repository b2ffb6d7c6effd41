//! Navigation mode contract
//!
//! Every navigation behavior implements [`NavigatorMode`] and embeds a
//! [`ModeState`]. The orchestrator drives each mode once per control cycle
//! through [`ModeRunner::run`], which sequences the lifecycle hooks.
//!
//! ## Lifecycle
//!
//! 1. `on_inactive()` - every cycle the mode is not selected; read-only
//!    access to the navigator
//! 2. `on_activation()` - once, on the first selected cycle after being
//!    inactive; must write a current setpoint into the triplet
//! 3. `on_active()` - every following selected cycle
//!
//! ## Example
//!
//! ```rust,ignore
//! pub struct Loiter {
//!     state: ModeState,
//! }
//!
//! impl NavigatorMode for Loiter {
//!     fn state(&self) -> &ModeState {
//!         &self.state
//!     }
//!
//!     fn state_mut(&mut self) -> &mut ModeState {
//!         &mut self.state
//!     }
//!
//!     fn on_activation(&mut self, nav: &mut Navigator<'_>) {
//!         if let Some(pos) = nav.global_position {
//!             let sp = PositionSetpoint::new(SetpointType::Loiter, pos.lat, pos.lon, pos.alt);
//!             let _ = nav.pos_sp_triplet_mut().set(None, Some(sp), None);
//!         }
//!     }
//! }
//! ```

use super::Navigator;
use navigator_core::command::VehicleCommand;
use navigator_core::parameters::{NavigatorParamHandles, NavigatorParams, ParameterProvider};

/// State shared by every mode implementation
///
/// Holds the mode name, the activation edge flag, the parameter snapshot and
/// the last received vehicle command. The snapshot is only written by the
/// parameter bridge.
#[derive(Debug)]
pub struct ModeState {
    name: &'static str,
    pub(super) first_run: bool,
    pub(super) parameters: NavigatorParams,
    pub(super) handles: NavigatorParamHandles,
    pub(super) vehicle_command: VehicleCommand,
}

impl ModeState {
    /// Create the state of an inactive mode.
    ///
    /// Parameter handles are resolved and values loaded from `provider`.
    pub fn new(name: &'static str, provider: &dyn ParameterProvider) -> Self {
        let mut state = Self {
            name,
            first_run: true,
            parameters: NavigatorParams::default(),
            handles: NavigatorParamHandles::default(),
            vehicle_command: VehicleCommand::default(),
        };
        state.update_parameters(provider);
        state
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True between the activation edge and the next inactive cycle
    pub fn is_active(&self) -> bool {
        !self.first_run
    }

    /// Parameter snapshot
    pub fn parameters(&self) -> &NavigatorParams {
        &self.parameters
    }

    /// Last command received through [`ModeState::update_vehicle_command`]
    pub fn vehicle_command(&self) -> &VehicleCommand {
        &self.vehicle_command
    }
}

/// Navigation mode contract
///
/// Hooks never return errors: a hook that cannot produce a valid setpoint
/// leaves the triplet as it was.
pub trait NavigatorMode {
    fn state(&self) -> &ModeState;

    fn state_mut(&mut self) -> &mut ModeState;

    /// Mode name for logging and telemetry
    fn name(&self) -> &'static str {
        self.state().name()
    }

    /// Called every cycle the mode is not active.
    ///
    /// The navigator is read-only here: only the active mode writes the
    /// triplet or submits commands.
    fn on_inactive(&mut self, _nav: &Navigator<'_>) {}

    /// Called once on the inactive to active edge.
    ///
    /// Must write a valid current setpoint before returning. A setpoint left
    /// in the triplet by the previous mode does not count.
    fn on_activation(&mut self, nav: &mut Navigator<'_>);

    /// Called every active cycle after the activation cycle
    fn on_active(&mut self, _nav: &mut Navigator<'_>) {}

    /// React to the command stored by `update_vehicle_command()`.
    ///
    /// Not called from `run`; see `ModeTable::run_cycle` for the ordering.
    fn execute_vehicle_command(&mut self, _nav: &mut Navigator<'_>) {}
}

/// Cycle driver, implemented for every [`NavigatorMode`]
pub trait ModeRunner {
    /// Run one control cycle.
    ///
    /// Refreshes parameters first when `parameters_updated` is set, then calls
    /// exactly one lifecycle hook.
    fn run(&mut self, nav: &mut Navigator<'_>, active: bool, parameters_updated: bool);
}

impl<M: NavigatorMode + ?Sized> ModeRunner for M {
    fn run(&mut self, nav: &mut Navigator<'_>, active: bool, parameters_updated: bool) {
        if parameters_updated {
            self.state_mut().update_parameters(nav.params());
        }

        if !active {
            if !self.state().first_run {
                crate::log_info!("{}: deactivated", self.name());
            }
            self.state_mut().first_run = true;
            self.on_inactive(&*nav);
            return;
        }

        if !self.state().first_run {
            self.on_active(nav);
            return;
        }

        self.state_mut().first_run = false;
        crate::log_info!("{}: activated", self.name());
        let generation = nav.pos_sp_triplet().generation();
        self.on_activation(nav);

        // A setpoint left over from the previous mode does not count
        let triplet = nav.pos_sp_triplet();
        let written = triplet.current().is_some() && triplet.generation() != generation;
        if !written {
            crate::log_error!("{}: activation left no current setpoint", self.name());
            let text = alloc::format!("{}: no setpoint after activation", self.name());
            nav.notifier_mut().send_error(&text);
        }
    }
}
