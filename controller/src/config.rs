//! Actor movement configuration.
//!
//! `MovementSettings` is the designer-facing form (plain fields, angles in degrees).
//! It is validated once, when the actor is created, into an immutable
//! [`MovementConfig`]. Invalid values are a configuration error and are never
//! corrected mid-simulation.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::constants::{
    DEFAULT_JUMP_HEIGHT, DEFAULT_MAX_ACCELERATION, DEFAULT_MAX_AIR_ACCELERATION,
    DEFAULT_MAX_AIR_JUMPS, DEFAULT_MAX_GROUND_ANGLE_DEG, DEFAULT_MAX_SPEED,
};

const SPEED_RANGE: RangeInclusive<f32> = 0.0..=100.0;
const ACCELERATION_RANGE: RangeInclusive<f32> = 0.0..=100.0;
const JUMP_HEIGHT_RANGE: RangeInclusive<f32> = 0.0..=10.0;
const AIR_JUMPS_RANGE: RangeInclusive<u32> = 0..=5;
const GROUND_ANGLE_RANGE: RangeInclusive<f32> = 0.0..=90.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a finite number")]
    NonFinite { field: &'static str },
    #[error("`{field}` = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Unvalidated movement parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementSettings {
    /// Planar speed reached at full intent (m/s).
    pub max_speed: f32,
    /// Rate of planar speed change while grounded (m/s^2).
    pub max_acceleration: f32,
    /// Rate of planar speed change while airborne (m/s^2).
    pub max_air_acceleration: f32,
    /// Apex height of a jump started at rest (meters).
    pub jump_height: f32,
    /// Extra jumps allowed after leaving the ground.
    pub max_air_jumps: u32,
    /// Steepest surface still treated as ground (degrees from horizontal).
    pub max_ground_angle_deg: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            max_acceleration: DEFAULT_MAX_ACCELERATION,
            max_air_acceleration: DEFAULT_MAX_AIR_ACCELERATION,
            jump_height: DEFAULT_JUMP_HEIGHT,
            max_air_jumps: DEFAULT_MAX_AIR_JUMPS,
            max_ground_angle_deg: DEFAULT_MAX_GROUND_ANGLE_DEG,
        }
    }
}

impl MovementSettings {
    /// Validate every field and derive the ground threshold.
    pub fn validate(self) -> Result<MovementConfig, ConfigError> {
        check_f32("max_speed", self.max_speed, SPEED_RANGE)?;
        check_f32("max_acceleration", self.max_acceleration, ACCELERATION_RANGE)?;
        check_f32(
            "max_air_acceleration",
            self.max_air_acceleration,
            ACCELERATION_RANGE,
        )?;
        check_f32("jump_height", self.jump_height, JUMP_HEIGHT_RANGE)?;
        check_f32(
            "max_ground_angle_deg",
            self.max_ground_angle_deg,
            GROUND_ANGLE_RANGE,
        )?;
        if !AIR_JUMPS_RANGE.contains(&self.max_air_jumps) {
            return Err(ConfigError::OutOfRange {
                field: "max_air_jumps",
                value: self.max_air_jumps as f32,
                min: *AIR_JUMPS_RANGE.start() as f32,
                max: *AIR_JUMPS_RANGE.end() as f32,
            });
        }

        Ok(MovementConfig {
            max_speed: self.max_speed,
            max_acceleration: self.max_acceleration,
            max_air_acceleration: self.max_air_acceleration,
            jump_height: self.jump_height,
            max_air_jumps: self.max_air_jumps,
            min_ground_dot: self.max_ground_angle_deg.to_radians().cos(),
        })
    }
}

fn check_f32(
    field: &'static str,
    value: f32,
    range: RangeInclusive<f32>,
) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if !range.contains(&value) {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}

/// Validated, immutable movement configuration.
///
/// Build with [`MovementSettings::validate`] or `MovementConfig::try_from(settings)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementConfig {
    max_speed: f32,
    max_acceleration: f32,
    max_air_acceleration: f32,
    jump_height: f32,
    max_air_jumps: u32,
    min_ground_dot: f32,
}

impl MovementConfig {
    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    #[inline]
    pub fn max_acceleration(&self) -> f32 {
        self.max_acceleration
    }

    #[inline]
    pub fn max_air_acceleration(&self) -> f32 {
        self.max_air_acceleration
    }

    #[inline]
    pub fn jump_height(&self) -> f32 {
        self.jump_height
    }

    #[inline]
    pub fn max_air_jumps(&self) -> u32 {
        self.max_air_jumps
    }

    /// `cos(max_ground_angle)`: a contact is ground when `dot(normal, up)` reaches this.
    #[inline]
    pub fn min_ground_dot(&self) -> f32 {
        self.min_ground_dot
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        let defaults = MovementSettings::default();
        Self {
            max_speed: defaults.max_speed,
            max_acceleration: defaults.max_acceleration,
            max_air_acceleration: defaults.max_air_acceleration,
            jump_height: defaults.jump_height,
            max_air_jumps: defaults.max_air_jumps,
            min_ground_dot: defaults.max_ground_angle_deg.to_radians().cos(),
        }
    }
}

impl TryFrom<MovementSettings> for MovementConfig {
    type Error = ConfigError;

    fn try_from(settings: MovementSettings) -> Result<Self, Self::Error> {
        settings.validate()
    }
}
