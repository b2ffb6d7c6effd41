//! Telemetry record types
//!
//! Snapshots owned by the estimation and telemetry subsystems. Navigation modes
//! only read them; the orchestrator refreshes them before each control cycle.

/// Vehicle global position estimate
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlobalPosition {
    /// Latitude in degrees (-90 to +90)
    pub lat: f64,
    /// Longitude in degrees (-180 to +180)
    pub lon: f64,
    /// Altitude AMSL in meters
    pub alt: f32,
    /// Heading in degrees (0-360, true north)
    pub yaw: f32,
}

impl GlobalPosition {
    /// Create a new global position with zero heading
    pub fn new(lat: f64, lon: f64, alt: f32) -> Self {
        Self {
            lat,
            lon,
            alt,
            yaw: 0.0,
        }
    }
}

/// Home (launch) position
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HomePosition {
    pub lat: f64,
    pub lon: f64,
    /// Altitude AMSL in meters
    pub alt: f32,
}

impl HomePosition {
    pub fn new(lat: f64, lon: f64, alt: f32) -> Self {
        Self { lat, lon, alt }
    }
}

/// Position of the tracked target (e.g. the person being followed)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetPosition {
    pub lat: f64,
    pub lon: f64,
    /// Altitude AMSL in meters
    pub alt: f32,
    /// Target velocity north (m/s)
    pub vel_n: f32,
    /// Target velocity east (m/s)
    pub vel_e: f32,
}

impl TargetPosition {
    /// Create a stationary target
    pub fn new(lat: f64, lon: f64, alt: f32) -> Self {
        Self {
            lat,
            lon,
            alt,
            vel_n: 0.0,
            vel_e: 0.0,
        }
    }
}

/// Flight state flags needed by the setpoint acceptance checks
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VehicleStatus {
    pub landed: bool,
}
