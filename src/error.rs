use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Wrong entry count, unparsable clock value, or entries that do not
    /// share the day and zone of the instant being resolved.
    #[error("malformed schedule: {0}")]
    MalformedSchedule(String),

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    /// A response arrived but its body had an unexpected shape.
    #[error("could not decode response from {source_name}: {message}")]
    Decode {
        source_name: &'static str,
        message: String,
    },

    #[error("unknown city: {0}")]
    UnknownCity(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedSchedule(message.into())
    }
}
