use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The JSON override could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// A config field holds a value the sampler or projection cannot work with.
    #[error("invalid config `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// A drawing call on the host surface failed.
    #[error("surface error: {0}")]
    Surface(String),
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
