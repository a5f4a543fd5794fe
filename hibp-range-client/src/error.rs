use crate::digest::Prefix;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[cfg(feature = "reqwest")]
    #[error("HTTP request failed for prefix {prefix}: {source}")]
    HttpRequest {
        prefix: Prefix,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for prefix {prefix}")]
    HttpStatus { prefix: Prefix, status: u16 },

    #[error("Request for prefix {prefix} timed out")]
    Timeout { prefix: Prefix },

    #[error("Transport failed for prefix {prefix}: {source}")]
    Transport {
        prefix: Prefix,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid SHA-1 hash: {0}")]
    InvalidHash(String),
}

impl Error {
    /// True for failures of the range request itself.
    ///
    /// These never mean "not pwned"; the caller decides whether to fail open
    /// or closed.
    pub fn is_transport_failure(&self) -> bool {
        match self {
            #[cfg(feature = "reqwest")]
            Self::HttpRequest { .. } => true,
            Self::HttpStatus { .. } | Self::Timeout { .. } | Self::Transport { .. } => true,
            Self::InvalidConfiguration(_) | Self::InvalidHash(_) => false,
        }
    }

    /// The prefix whose lookup failed, for transport failures.
    pub fn prefix(&self) -> Option<&Prefix> {
        match self {
            #[cfg(feature = "reqwest")]
            Self::HttpRequest { prefix, .. } => Some(prefix),
            Self::HttpStatus { prefix, .. }
            | Self::Timeout { prefix }
            | Self::Transport { prefix, .. } => Some(prefix),
            Self::InvalidConfiguration(_) | Self::InvalidHash(_) => None,
        }
    }
}
