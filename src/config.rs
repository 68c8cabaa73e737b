//! Startup parameters for a puzzle controller.

use crate::animation::ROTATION_SPEED;
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Cells per puzzle edge
    pub columns: usize,
    /// Side length of the square drawing area in pixels
    pub screen_size: f64,
    /// View rotation about y applied on construction, in radians
    pub initial_yaw: f64,
    /// View rotation about x applied after the yaw, in radians
    pub initial_pitch: f64,
    /// Layer turning speed in radians per millisecond
    pub rotation_speed: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            screen_size: 600.0,
            initial_yaw: 0.0,
            initial_pitch: 0.0,
            rotation_speed: ROTATION_SPEED,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(EngineError::InvalidColumns(self.columns));
        }
        if !self.screen_size.is_finite() || self.screen_size <= 0.0 {
            return Err(EngineError::InvalidScreenSize(self.screen_size));
        }
        for angle in [self.initial_yaw, self.initial_pitch] {
            if !angle.is_finite() {
                return Err(EngineError::InvalidViewAngle(angle));
            }
        }
        if !self.rotation_speed.is_finite() || self.rotation_speed <= 0.0 {
            return Err(EngineError::InvalidRotationSpeed(self.rotation_speed));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_each_bad_field() {
        let columns = EngineConfig {
            columns: 0,
            ..EngineConfig::default()
        };
        assert_eq!(columns.validate(), Err(EngineError::InvalidColumns(0)));

        let screen = EngineConfig {
            screen_size: -1.0,
            ..EngineConfig::default()
        };
        assert_eq!(screen.validate(), Err(EngineError::InvalidScreenSize(-1.0)));

        let speed = EngineConfig {
            rotation_speed: 0.0,
            ..EngineConfig::default()
        };
        assert_eq!(speed.validate(), Err(EngineError::InvalidRotationSpeed(0.0)));

        let yaw = EngineConfig {
            initial_yaw: f64::INFINITY,
            ..EngineConfig::default()
        };
        assert_eq!(yaw.validate(), Err(EngineError::InvalidViewAngle(f64::INFINITY)));

        let pitch = EngineConfig {
            initial_pitch: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(matches!(pitch.validate(), Err(EngineError::InvalidViewAngle(a)) if a.is_nan()));

        let infinite = EngineConfig {
            rotation_speed: f64::INFINITY,
            ..EngineConfig::default()
        };
        assert!(infinite.validate().is_err());
    }
}
