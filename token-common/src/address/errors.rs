use thiserror::Error;

/// Errors raised while parsing an account identifier from text.
#[derive(Debug, Error, PartialEq)]
pub enum AddressError {
    /// The `0x` prefix is missing.
    #[error("Address must start with 0x: {0}")]
    MissingPrefix(String),

    /// The body is not valid hexadecimal.
    #[error("Invalid hex in address: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Decoded byte length is not 20.
    #[error("Invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}
