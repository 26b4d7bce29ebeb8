use thiserror::Error;

/// Every way inspecting an archive can fail.
///
/// The `Display` text of each variant is the message shown to the user in
/// place of an archive summary.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("file not found")]
    NotFound,

    #[error("file too small")]
    TooSmall,

    /// Header tag is neither `IWAD` nor `PWAD`. The dispatcher treats this as
    /// a cue to try the package scanner instead.
    #[error("unrecognized archive signature {0:?}")]
    BadSignature(String),

    #[error("invalid directory offset")]
    BadDirectoryOffset { offset: u32, len: u64 },

    #[error("invalid package archive: {0}")]
    BadPackage(String),

    #[error("read past end of data")]
    OutOfBounds,

    #[error("parse error: {0}")]
    Io(#[from] std::io::Error),
}

pub type InspectResult<T> = Result<T, InspectError>;
