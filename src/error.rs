//! Typed failures for the embedding and recovery pipelines.
//!
//! The handler layer wraps these with `anyhow` context for user-facing
//! messages; the core itself never panics across a component boundary.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StegError {
    /// The image does not start with the expected signature. This is the
    /// regular "nothing is hidden here" outcome, not an I/O fault.
    #[error("no embedded data: the signature was not found in the image")]
    SignatureNotFound,

    /// The carrier's pixel payload cannot hold the container.
    #[error(
        "carrier too small: the pixel payload holds {available} bytes but the container needs more than {required}"
    )]
    InsufficientCapacity { required: usize, available: usize },

    /// The header's width/height fields do not describe a usable image.
    #[error("invalid bitmap dimensions {width}x{height} in the carrier header")]
    InvalidDimensions { width: i32, height: i32 },

    /// A field to embed does not fit the container's 32-bit length encoding.
    #[error("{field} of {len} bytes is too large to embed")]
    FieldTooLong { field: &'static str, len: usize },

    /// A recovered length field is negative or implausibly large.
    #[error("implausible {field} value {value}: the container is corrupted")]
    CorruptField { field: &'static str, value: i32 },

    /// A read or write failed mid-stage, including premature end of the
    /// carrier. The stage names the container region being processed.
    #[error("i/o failure while processing the {stage}")]
    Io {
        stage: &'static str,
        #[source]
        source: io::Error,
    },
}

impl StegError {
    pub(crate) fn io(stage: &'static str, source: io::Error) -> Self {
        Self::Io { stage, source }
    }
}
