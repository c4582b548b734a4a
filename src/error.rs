use thiserror::Error;

/// Every way one pull-and-dump invocation can fail. Nothing here is
/// caught or retried internally; each variant aborts the invocation
/// and surfaces with the originating message.
#[derive(Error, Debug)]
pub enum Error {
    #[error("api request failed with status {status}")]
    ApiRequest { status: u16 },

    #[error("transport error")]
    Transport(#[from] reqwest::Error),

    #[error("api response parse error")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("context statement failed: {0}")]
    Context(String),

    #[error("write rejected: {0}")]
    Write(String),

    #[error("filesystem error")]
    Filesystem(#[from] std::io::Error),
}
