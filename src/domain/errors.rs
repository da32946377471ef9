// Domain-level errors for body construction and engine setup.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum BodyError {
    // Radius must be finite and >= 0.
    NegativeRadius(f64),
    // Gravity strength must be finite and >= 0.
    InvalidGravity(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    // Frame rate must be a finite, positive number of ticks per second.
    InvalidFrameRate(f64),
    // `start` was called outside a tokio runtime.
    NoRuntime,
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyError::NegativeRadius(r) => write!(f, "invalid body radius {r}"),
            BodyError::InvalidGravity(g) => write!(f, "invalid gravity strength {g}"),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidFrameRate(fps) => write!(f, "invalid frame rate {fps}"),
            EngineError::NoRuntime => f.write_str("engine scheduling requires a tokio runtime"),
        }
    }
}

impl std::error::Error for BodyError {}
impl std::error::Error for EngineError {}
