//! Parameter management types and utilities
//!
//! Named tunables live in a [`ParameterStore`]; navigation modes read them
//! through the [`ParameterProvider`] trait via pre-resolved [`ParamHandle`]s
//! and keep a [`NavigatorParams`] value snapshot.

pub mod error;
pub mod navigator;
pub mod storage;

pub use error::ParameterError;
pub use navigator::{NavigatorParamHandles, NavigatorParams};
pub use storage::{ParamFlags, ParamHandle, ParamValue, ParameterProvider, ParameterStore};
pub use storage::{MAX_PARAMS, MAX_STRING_LEN, PARAM_NAME_LEN};
