//! Geographic calculations for navigation
//!
//! Pure functions over WGS84 coordinates in degrees. Distances are in meters,
//! bearings in degrees clockwise from true north.

use libm::{asin, atan2, cos, fabs, sin, sqrt};

/// Mean earth radius (m)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;
const RAD_TO_DEG: f64 = 180.0 / core::f64::consts::PI;

/// Calculate distance and bearing between two positions using Haversine formula
///
/// # Returns
///
/// Tuple of (distance in meters, bearing in degrees 0-360)
pub fn distance_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> (f64, f64) {
    let lat1_rad = lat1 * DEG_TO_RAD;
    let lat2_rad = lat2 * DEG_TO_RAD;
    let delta_lat = (lat2 - lat1) * DEG_TO_RAD;
    let delta_lon = (lon2 - lon1) * DEG_TO_RAD;

    let sin_dlat = sin(delta_lat / 2.0);
    let sin_dlon = sin(delta_lon / 2.0);
    let a = sin_dlat * sin_dlat + cos(lat1_rad) * cos(lat2_rad) * sin_dlon * sin_dlon;
    let c = 2.0 * atan2(sqrt(a), sqrt(1.0 - a));
    let distance = EARTH_RADIUS_M * c;

    // Forward azimuth
    let y = sin(delta_lon) * cos(lat2_rad);
    let x = cos(lat1_rad) * sin(lat2_rad) - sin(lat1_rad) * cos(lat2_rad) * cos(delta_lon);
    let bearing = wrap_360(atan2(y, x) * RAD_TO_DEG);

    (distance, bearing)
}

/// Horizontal, vertical and combined distance between two 3-D positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance3d {
    /// Great-circle distance (m)
    pub horizontal: f64,
    /// Absolute altitude difference (m)
    pub vertical: f64,
    /// Euclidean combination of both (m)
    pub total: f64,
}

/// Distance between two positions including altitude
pub fn distance_3d(lat1: f64, lon1: f64, alt1: f32, lat2: f64, lon2: f64, alt2: f32) -> Distance3d {
    let (horizontal, _) = distance_bearing(lat1, lon1, lat2, lon2);
    let vertical = fabs(f64::from(alt2) - f64::from(alt1));
    Distance3d {
        horizontal,
        vertical,
        total: sqrt(horizontal * horizontal + vertical * vertical),
    }
}

/// Position reached by travelling `distance_m` from a start along `bearing_deg`
///
/// # Returns
///
/// Tuple of (latitude, longitude) in degrees
pub fn offset_position(lat: f64, lon: f64, bearing_deg: f64, distance_m: f64) -> (f64, f64) {
    let lat_rad = lat * DEG_TO_RAD;
    let lon_rad = lon * DEG_TO_RAD;
    let bearing = bearing_deg * DEG_TO_RAD;
    let angular = distance_m / EARTH_RADIUS_M;

    let lat2 = asin(sin(lat_rad) * cos(angular) + cos(lat_rad) * sin(angular) * cos(bearing));
    let lon2 = lon_rad
        + atan2(
            sin(bearing) * sin(angular) * cos(lat_rad),
            cos(angular) - sin(lat_rad) * sin(lat2),
        );

    (lat2 * RAD_TO_DEG, wrap_180(lon2 * RAD_TO_DEG))
}

/// Angle below (negative) or above (positive) the horizon from an observer
/// to a point `height_diff` meters higher and `horizontal` meters away.
pub fn elevation_angle(horizontal: f64, height_diff: f64) -> f64 {
    atan2(height_diff, horizontal) * RAD_TO_DEG
}

/// Normalize angle to -180 to +180 range
pub fn wrap_180(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a < -180.0 {
        a += 360.0;
    }
    a
}

/// Normalize angle to 0 to 360 range
pub fn wrap_360(angle: f64) -> f64 {
    let a = angle % 360.0;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}
