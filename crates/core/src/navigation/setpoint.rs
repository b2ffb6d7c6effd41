//! Position setpoint triplet
//!
//! The previous/current/next target record consumed by the downstream
//! position controller. Writes go through validating setters: a rejected
//! write leaves the triplet exactly as it was, so the controller always sees
//! the last internally consistent state.
//!
//! Every accepted write bumps a generation counter. Writers can compare it
//! before and after a call to tell whether anything was written, even when
//! the new setpoints equal the old ones.

/// Behavior requested at a setpoint
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SetpointType {
    /// No motion requested; trivially reached
    #[default]
    Idle,
    /// Fly to and hold a position
    Position,
    /// Circle or hover around a position
    Loiter,
    /// Climb to the setpoint altitude
    Takeoff,
    /// Descend and land at the setpoint
    Land,
    /// Track a moving target
    Follow,
}

/// Single target position with attitude hints
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionSetpoint {
    pub setpoint_type: SetpointType,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Altitude AMSL in meters
    pub alt: f32,
    /// Desired heading in degrees, `None` to leave heading to the controller
    pub yaw: Option<f32>,
    /// Desired camera pitch in degrees (negative looks down)
    pub camera_pitch: Option<f32>,
    /// Loiter radius in meters
    pub loiter_radius: f32,
    /// Loiter direction: 1 clockwise, -1 counter-clockwise
    pub loiter_direction: i8,
}

/// Reasons a setpoint write is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetpointError {
    /// Latitude outside -90..=90 or not finite
    InvalidLatitude,
    /// Longitude outside -180..=180 or not finite
    InvalidLongitude,
    /// Altitude not finite
    InvalidAltitude,
    /// Yaw or camera pitch not finite
    InvalidAttitude,
    /// A `next` setpoint was supplied without a `current` one
    MissingCurrent,
}

impl core::fmt::Display for SetpointError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SetpointError::InvalidLatitude => write!(f, "invalid setpoint latitude"),
            SetpointError::InvalidLongitude => write!(f, "invalid setpoint longitude"),
            SetpointError::InvalidAltitude => write!(f, "invalid setpoint altitude"),
            SetpointError::InvalidAttitude => write!(f, "invalid setpoint yaw or pitch"),
            SetpointError::MissingCurrent => write!(f, "next setpoint without current"),
        }
    }
}

impl PositionSetpoint {
    /// Setpoint of the given type at a position
    pub fn new(setpoint_type: SetpointType, lat: f64, lon: f64, alt: f32) -> Self {
        Self {
            setpoint_type,
            lat,
            lon,
            alt,
            loiter_direction: 1,
            ..Self::default()
        }
    }

    /// Position-hold setpoint
    pub fn position(lat: f64, lon: f64, alt: f32) -> Self {
        Self::new(SetpointType::Position, lat, lon, alt)
    }

    /// Builder-style heading override
    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = Some(yaw);
        self
    }

    /// Check that every field is usable by the controller
    pub fn validate(&self) -> Result<(), SetpointError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(SetpointError::InvalidLatitude);
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(SetpointError::InvalidLongitude);
        }
        if !self.alt.is_finite() {
            return Err(SetpointError::InvalidAltitude);
        }
        let attitude_ok = self.yaw.map_or(true, f32::is_finite)
            && self.camera_pitch.map_or(true, f32::is_finite);
        if !attitude_ok {
            return Err(SetpointError::InvalidAttitude);
        }
        Ok(())
    }
}

fn validate_optional(sp: &Option<PositionSetpoint>) -> Result<(), SetpointError> {
    match sp {
        Some(sp) => sp.validate(),
        None => Ok(()),
    }
}

/// Previous/current/next setpoints
///
/// Equality compares the setpoints only, not the write generation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionSetpointTriplet {
    previous: Option<PositionSetpoint>,
    current: Option<PositionSetpoint>,
    next: Option<PositionSetpoint>,
    generation: u32,
}

impl PartialEq for PositionSetpointTriplet {
    fn eq(&self, other: &Self) -> bool {
        self.previous == other.previous && self.current == other.current && self.next == other.next
    }
}

impl PositionSetpointTriplet {
    /// Empty triplet (nothing for the controller to track)
    pub const fn new() -> Self {
        Self {
            previous: None,
            current: None,
            next: None,
            generation: 0,
        }
    }

    /// Number of accepted writes, wrapping
    pub fn generation(&self) -> u32 {
        self.generation
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn previous(&self) -> Option<&PositionSetpoint> {
        self.previous.as_ref()
    }

    pub fn current(&self) -> Option<&PositionSetpoint> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&PositionSetpoint> {
        self.next.as_ref()
    }

    /// Replace all three setpoints at once.
    ///
    /// Nothing is written unless every supplied setpoint validates and a
    /// `next` is only given together with a `current`.
    pub fn set(
        &mut self,
        previous: Option<PositionSetpoint>,
        current: Option<PositionSetpoint>,
        next: Option<PositionSetpoint>,
    ) -> Result<(), SetpointError> {
        if current.is_none() && next.is_some() {
            return Err(SetpointError::MissingCurrent);
        }
        validate_optional(&previous)?;
        validate_optional(&current)?;
        validate_optional(&next)?;

        self.previous = previous;
        self.current = current;
        self.next = next;
        self.bump();
        Ok(())
    }

    /// Overwrite only the current setpoint
    pub fn set_current(&mut self, current: PositionSetpoint) -> Result<(), SetpointError> {
        current.validate()?;
        self.current = Some(current);
        self.bump();
        Ok(())
    }

    /// Overwrite only the next setpoint
    pub fn set_next(&mut self, next: Option<PositionSetpoint>) -> Result<(), SetpointError> {
        if next.is_some() && self.current.is_none() {
            return Err(SetpointError::MissingCurrent);
        }
        validate_optional(&next)?;
        self.next = next;
        self.bump();
        Ok(())
    }

    /// Move to a new leg: current becomes previous, `current` becomes the
    /// target and `next` is cleared.
    pub fn advance(&mut self, current: PositionSetpoint) -> Result<(), SetpointError> {
        current.validate()?;
        self.previous = self.current.take();
        self.current = Some(current);
        self.next = None;
        self.bump();
        Ok(())
    }

    /// Drop every setpoint
    pub fn clear(&mut self) {
        self.previous = None;
        self.current = None;
        self.next = None;
        self.bump();
    }

    /// True when a current setpoint exists and every present entry validates
    pub fn is_consistent(&self) -> bool {
        self.current.is_some()
            && validate_optional(&self.previous).is_ok()
            && validate_optional(&self.current).is_ok()
            && validate_optional(&self.next).is_ok()
    }
}
