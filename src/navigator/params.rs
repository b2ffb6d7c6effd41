//! Parameter bridge
//!
//! Keeps a mode's [`NavigatorParams`](navigator_core::parameters::NavigatorParams)
//! snapshot in sync with external storage. Handles are resolved by name, values
//! are copied through them. Refreshing is cheap and idempotent, so the
//! orchestrator may request it on every change notification.

use super::ModeState;
use navigator_core::parameters::{NavigatorParamHandles, ParameterProvider};

impl ModeState {
    /// Resolve storage handles for every tunable
    pub fn update_param_handles(&mut self, provider: &dyn ParameterProvider) {
        self.handles = NavigatorParamHandles::resolve(provider);
        crate::log_debug!(
            "{}: {} parameter handles resolved",
            self.name(),
            self.handles.resolved_count()
        );
    }

    /// Copy the values behind the resolved handles into the snapshot
    pub fn update_param_values(&mut self, provider: &dyn ParameterProvider) {
        self.parameters.update_from(provider, &self.handles);
    }

    /// Re-resolve handles and reload values
    pub fn update_parameters(&mut self, provider: &dyn ParameterProvider) {
        self.update_param_handles(provider);
        self.update_param_values(provider);
        crate::log_trace!("{}: parameters refreshed", self.name());
    }
}
