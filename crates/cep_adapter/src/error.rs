use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("http: {0}")]
    Http(String),

    #[error("timeout: adapter '{adapter}' exceeded {timeout_ms}ms")]
    Timeout { adapter: String, timeout_ms: u64 },

    #[error("status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("not found")]
    NotFound,

    #[error("empty response")]
    EmptyResponse,

    #[error("serde: {0}")]
    Serde(#[from] serde_json::Error),
}

impl AdapterError {
    /// True when the service answered that the code does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound | Self::Status { status: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;
