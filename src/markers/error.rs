use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarkerError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct ParseMarkerError {
    pub reason: String,
}

impl ParseMarkerError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("malformed marker on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseMarkerError,
    },

    #[error("marker I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("registration serialization failure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no registration transform has been set")]
    NoRegistration,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("coordinate lookup is disabled")]
    Disabled,

    #[error("could not resolve lookup host `{0}`")]
    NoAddress(String),

    #[error("lookup connection failure: {0}")]
    Io(#[from] std::io::Error),
}
