// Error
//------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    #[error("Empty data")]
    EmptyData,
    #[error("Input too long for selected error correction level: {bits} bits, capacity {capacity} bits")]
    CapacityExceeded { bits: usize, capacity: usize },
    #[error("Cannot encode in GS1 mode and Reader Initialisation at the same time")]
    ConflictingOptions,
    #[error("Invalid character in input data: {0:?}")]
    InvalidCharacter(char),
    #[error("Invalid version")]
    InvalidVersion,
    #[error("Invalid Reed-Solomon configuration")]
    InvalidCodecConfig,
    #[error("Internal bound exceeded while building symbol")]
    InternalOverflow,
}

pub type QRResult<T> = Result<T, QRError>;
