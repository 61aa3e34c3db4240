//! Custom error types for the swf-codec crate.

use thiserror::Error;

/// The three failure classes every [`SwfError`] falls into.
///
/// Callers that only care about the class of a failure (retryable I/O versus
/// a malformed file versus a misuse of the API) can match on
/// [`SwfError::kind`] instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwfErrorKind {
    /// The byte source or sink failed, including truncated input.
    Io,
    /// The bytes violate the container or codec format.
    Format,
    /// The operation was invoked in a state it cannot run in.
    State,
}

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum SwfError {
    /// An error originating from I/O operations. Truncated input surfaces
    /// here as `UnexpectedEof`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The first three bytes are neither `FWS` nor `CWS`.
    #[error("Invalid signature: {0:?}")]
    InvalidSignature([u8; 3]),

    /// Whole-file compression is only defined from SWF version 6.
    #[error("Compression requires version 6 or later, file declares version {0}")]
    CompressionUnsupported(u8),

    /// A signed bit field narrower than 2 bits cannot hold both sign and
    /// magnitude.
    #[error("Signed bit field must be at least 2 bits wide, got {0}")]
    InvalidSignedWidth(u32),

    /// A value does not fit the bit width chosen for it.
    #[error("Value {value} does not fit in {width} bits")]
    ValueOverflow { width: u32, value: i64 },

    /// Reserved bits that must be zero were set.
    #[error("Reserved bits must be zero in {0}")]
    ReservedNotZero(&'static str),

    /// The tag stream ran out of bytes without a terminating End tag.
    #[error("Tag stream ended without an End tag")]
    UnterminatedTagStream,

    /// A Screen Video payload declares a codec other than Screen Video.
    #[error("Codec id mismatch: expected {expected}, got {found}")]
    CodecMismatch { expected: u8, found: u8 },

    /// An error occurred during compression or decompression, often due to
    /// corrupted data.
    #[error("Decompression failed: {0}")]
    Decompression(String),

    /// A buffer or payload has an unexpected size after an operation.
    #[error("Size mismatch for {context}: expected {expected}, but found {found}")]
    SizeMismatch {
        context: &'static str,
        expected: u64,
        found: u64,
    },

    /// The data is structurally invalid or does not conform to the SWF
    /// format specification.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Inter-frame coding was requested without a previous frame.
    #[error("Inter frame requires a previous frame")]
    MissingPreviousFrame,

    /// The previous frame's dimensions do not match the current image.
    #[error("Previous frame is {expected:?} pixels, current image is {found:?}")]
    FrameSizeMismatch {
        expected: (u16, u16),
        found: (u16, u16),
    },
}

impl SwfError {
    /// Classifies this error into one of the three [`SwfErrorKind`] classes.
    pub fn kind(&self) -> SwfErrorKind {
        match self {
            SwfError::Io(_) => SwfErrorKind::Io,
            SwfError::MissingPreviousFrame | SwfError::FrameSizeMismatch { .. } => {
                SwfErrorKind::State
            }
            _ => SwfErrorKind::Format,
        }
    }
}

/// A convenience `Result` type alias using the crate's `SwfError` type.
pub type Result<T> = std::result::Result<T, SwfError>;
