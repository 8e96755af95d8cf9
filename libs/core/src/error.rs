use thiserror::Error;

/// Failure taxonomy shared across the bridge.
///
/// Nothing in this workspace recovers locally: every variant either surfaces
/// as a per-field query error or, for `Configuration`, prevents the resolver
/// set from being constructed at all.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid static configuration; startup-fatal.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A resolver referenced a capability that was never configured.
    #[error("unknown capability: {0}")]
    UnknownCapability(String),

    /// Caller-supplied identifier that the codec never produced.
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(String),

    /// Connection or timeout fault; transient, the caller may retry.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote module function reported a domain failure.
    #[error("remote error: {0}")]
    Remote(String),

    /// Result shape did not match the expected contract; fatal to the call.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A decoded reference did not resolve to a record.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedIdentifier(msg.into())
    }

    /// Whether a retry by the caller could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
