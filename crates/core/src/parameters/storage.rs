//! Parameter Storage Types
//!
//! Provides the `ParameterStore` (named tunables with flags), the handle type
//! used to address a tunable without re-building its key every cycle, and the
//! `ParameterProvider` trait through which navigation modes read values.

use core::cell::RefCell;

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length (MAVLink param_id limit)
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 64;

/// Maximum string parameter length
pub const MAX_STRING_LEN: usize = 63;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter is read-only (cannot be modified at runtime)
        const READ_ONLY = 0b00000010;
    }
}

/// Parameter value types
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// String parameter (max 63 chars)
    String(String<MAX_STRING_LEN>),
    /// Boolean parameter
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

impl ParamValue {
    /// Numeric view of the value. Strings have none.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f32),
            ParamValue::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            ParamValue::String(_) => None,
        }
    }

    /// Flag view of the value (non-zero numbers are `true`).
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            ParamValue::Int(v) => Some(*v != 0),
            ParamValue::Float(v) => Some(*v != 0.0),
            ParamValue::String(_) => None,
        }
    }
}

/// Resolved reference to a registered parameter.
///
/// Obtained once through [`ParameterProvider::find`] and reused for every
/// subsequent value lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamHandle {
    key: String<PARAM_NAME_LEN>,
}

impl ParamHandle {
    /// Parameter name this handle refers to
    pub fn name(&self) -> &str {
        self.key.as_str()
    }
}

/// Read access to external parameter storage.
pub trait ParameterProvider {
    /// Resolve a parameter name to a handle. `None` if it is not registered.
    fn find(&self, name: &str) -> Option<ParamHandle>;

    /// Current value behind a handle.
    fn value(&self, handle: &ParamHandle) -> Option<ParamValue>;
}

#[derive(Debug, Clone)]
struct ParamMetadata {
    flags: ParamFlags,
}

/// Parameter store for configuration management
///
/// Stores parameters as key-value pairs with metadata (flags).
pub struct ParameterStore {
    /// Parameter values
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, ParamValue, MAX_PARAMS>,
    /// Parameter metadata
    metadata: FnvIndexMap<String<PARAM_NAME_LEN>, ParamMetadata, MAX_PARAMS>,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

fn make_key(name: &str) -> Option<String<PARAM_NAME_LEN>> {
    let mut key = String::<PARAM_NAME_LEN>::new();
    key.push_str(name).ok()?;
    Some(key)
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
            metadata: FnvIndexMap::new(),
        }
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let key = make_key(name)?;
        self.parameters.get(&key)
    }

    /// Set parameter value
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = make_key(name).ok_or(ParameterError::InvalidConfig)?;

        if !self.parameters.contains_key(&key) {
            return Err(ParameterError::InvalidConfig);
        }

        if let Some(meta) = self.metadata.get(&key) {
            if meta.flags.contains(ParamFlags::READ_ONLY) {
                return Err(ParameterError::ReadOnly);
            }
        }

        self.parameters
            .insert(key, value)
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    /// Register a new parameter with default value and flags
    ///
    /// If the parameter already exists, this is a no-op (idempotent).
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = make_key(name).ok_or(ParameterError::InvalidConfig)?;

        if self.parameters.contains_key(&key) {
            return Ok(());
        }

        self.parameters
            .insert(key.clone(), default_value)
            .map_err(|_| ParameterError::StoreFull)?;
        self.metadata
            .insert(key, ParamMetadata { flags })
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    /// Number of registered parameters
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl ParameterProvider for ParameterStore {
    fn find(&self, name: &str) -> Option<ParamHandle> {
        let key = make_key(name)?;
        self.parameters
            .contains_key(&key)
            .then_some(ParamHandle { key })
    }

    fn value(&self, handle: &ParamHandle) -> Option<ParamValue> {
        self.parameters.get(&handle.key).cloned()
    }
}

/// Shared store that the owner may still modify between control cycles.
impl ParameterProvider for RefCell<ParameterStore> {
    fn find(&self, name: &str) -> Option<ParamHandle> {
        self.borrow().find(name)
    }

    fn value(&self, handle: &ParamHandle) -> Option<ParamValue> {
        self.borrow().value(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_value_numeric_views() {
        assert_eq!(ParamValue::Int(3).as_f32(), Some(3.0));
        assert_eq!(ParamValue::Bool(true).as_f32(), Some(1.0));
        assert_eq!(ParamValue::Float(0.0).as_bool(), Some(false));
        assert_eq!(ParamValue::Int(2).as_bool(), Some(true));
        assert!(ParamValue::String(String::new()).as_f32().is_none());
    }

    #[test]
    fn test_parameter_store_new() {
        let store = ParameterStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_parameter_store_register_and_get() {
        let mut store = ParameterStore::new();
        store
            .register("TEST", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        assert_eq!(store.get("TEST"), Some(&ParamValue::Int(42)));
    }

    #[test]
    fn test_parameter_store_set() {
        let mut store = ParameterStore::new();
        store
            .register("TEST", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        store.set("TEST", ParamValue::Int(100)).unwrap();
        assert_eq!(store.get("TEST"), Some(&ParamValue::Int(100)));
    }

    #[test]
    fn test_parameter_store_set_unknown() {
        let mut store = ParameterStore::new();
        assert_eq!(
            store.set("UNKNOWN", ParamValue::Int(1)),
            Err(ParameterError::InvalidConfig)
        );
    }

    #[test]
    fn test_parameter_store_name_too_long() {
        let mut store = ParameterStore::new();
        let result = store.register(
            "THIS_NAME_IS_TOO_LONG",
            ParamValue::Int(1),
            ParamFlags::empty(),
        );
        assert_eq!(result, Err(ParameterError::InvalidConfig));
    }

    #[test]
    fn test_parameter_store_register_idempotent() {
        let mut store = ParameterStore::new();
        store
            .register("TEST", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        store.set("TEST", ParamValue::Int(100)).unwrap();
        // Re-register should not overwrite
        store
            .register("TEST", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        assert_eq!(store.get("TEST"), Some(&ParamValue::Int(100)));
    }

    #[test]
    fn test_parameter_read_only() {
        let mut store = ParameterStore::new();
        store
            .register("READONLY", ParamValue::Int(42), ParamFlags::READ_ONLY)
            .unwrap();
        assert_eq!(
            store.set("READONLY", ParamValue::Int(100)),
            Err(ParameterError::ReadOnly)
        );
    }

    #[test]
    fn test_provider_find_and_value() {
        let mut store = ParameterStore::new();
        store
            .register("NAV_ACC_RAD", ParamValue::Float(5.0), ParamFlags::empty())
            .unwrap();

        let handle = store.find("NAV_ACC_RAD").unwrap();
        assert_eq!(handle.name(), "NAV_ACC_RAD");
        assert_eq!(store.value(&handle), Some(ParamValue::Float(5.0)));

        store.set("NAV_ACC_RAD", ParamValue::Float(7.5)).unwrap();
        assert_eq!(store.value(&handle), Some(ParamValue::Float(7.5)));

        assert!(store.find("MISSING").is_none());
    }

    #[test]
    fn test_provider_refcell_sees_later_writes() {
        let mut store = ParameterStore::new();
        store
            .register("LOI_MIN_ALT", ParamValue::Float(5.0), ParamFlags::empty())
            .unwrap();
        let shared = RefCell::new(store);

        let handle = shared.find("LOI_MIN_ALT").unwrap();
        shared
            .borrow_mut()
            .set("LOI_MIN_ALT", ParamValue::Float(12.0))
            .unwrap();
        assert_eq!(shared.value(&handle), Some(ParamValue::Float(12.0)));
    }
}
