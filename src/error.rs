use thiserror::Error;

pub type Result<T, E = CodecError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Width or height is zero or not a multiple of the macroblock size.
    #[error("invalid dimensions {width}x{height}: both sides must be positive multiples of 16")]
    InvalidDimensions { width: usize, height: usize },

    /// Quality parameter that is not a positive finite number.
    #[error("invalid quality parameter {0}: must be a positive finite number")]
    InvalidParameter(f64),

    /// Coded macroblock count does not match the tile grid of the target size.
    #[error("expected {expected} coded macroblocks, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
