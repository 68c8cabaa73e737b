use thiserror::Error;

/// Errors raised when the engine is configured with unusable parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("column count must be at least 1, got {0}")]
    InvalidColumns(usize),

    #[error("screen size must be a positive number of pixels, got {0}")]
    InvalidScreenSize(f64),

    #[error("view angle must be a finite number of radians, got {0}")]
    InvalidViewAngle(f64),

    #[error("rotation speed must be a positive number of radians per millisecond, got {0}")]
    InvalidRotationSpeed(f64),
}

pub type Result<T> = std::result::Result<T, EngineError>;
