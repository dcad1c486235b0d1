//! Error types for the snapmint pipeline

use alloy::primitives::Address;
use thiserror::Error;

/// Errors that can occur anywhere in the minting pipeline.
///
/// Variants fall into three classes: input errors (rejected before any
/// network call), upstream errors (pinning or resolution services), and
/// chain errors (dispatch or inclusion). None of them is retried
/// automatically; retries are always operator-initiated.
#[derive(Error, Debug)]
pub enum MinterError {
    /// No image file was provided (missing or empty field)
    #[error("no image file provided")]
    MissingFile,

    /// Declared media type is not an image
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Payload exceeds the inbound size cap
    #[error("file too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: usize, limit: usize },

    /// Image bytes could not be decoded
    #[error("image decode failed: {0}")]
    ImageDecode(String),

    /// Image could not be re-encoded
    #[error("image encode failed: {0}")]
    ImageEncode(String),

    /// A required form field is empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Recipient string matches neither the address nor the name shape
    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),

    /// Mint was attempted before the recipient resolved
    #[error("recipient not resolved")]
    RecipientNotResolved,

    /// A custom image was chosen but its upload has not completed
    #[error("image upload not completed")]
    UploadIncomplete,

    /// Caller lacks the team-minter capability
    #[error("caller is not an authorized team minter: {0}")]
    NotTeamMinter(Address),

    /// Pinning service rejected the configured credentials.
    /// The message deliberately never carries credential values.
    #[error("pinning service authentication failed; check the relay credential configuration")]
    PinningAuth,

    /// Pinning service rejected the request as malformed
    #[error("pinning service rejected the upload: {0}")]
    PinningRejected(String),

    /// Pinning service unreachable or returned an unexpected failure
    #[error("pinning service unavailable: {0}")]
    PinningUnavailable(String),

    /// Name resolution call failed
    #[error("name resolution failed: {0}")]
    Resolution(String),

    /// Illegal mint request lifecycle transition
    #[error("invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    /// Chain transaction dispatch was rejected
    #[error("transaction dispatch failed: {0}")]
    Dispatch(String),

    /// Transaction was dispatched but inclusion failed or timed out
    #[error("transaction inclusion failed: {0}")]
    Inclusion(String),

    /// Camera device error
    #[error("capture device error: {0}")]
    Capture(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl MinterError {
    /// True for errors that must be reported without any network call
    /// having been attempted.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MinterError::MissingFile
                | MinterError::UnsupportedMediaType(_)
                | MinterError::FileTooLarge { .. }
                | MinterError::ImageDecode(_)
                | MinterError::MissingField(_)
                | MinterError::InvalidRecipient(_)
        )
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, MinterError>;
