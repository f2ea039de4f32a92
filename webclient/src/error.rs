pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to parse as URL '{url}'")]
    InvalidSyntaxUrl {
        url: String,

        #[source]
        source: url::ParseError,
    },

    #[error("Backend rejected the request (code={code}): {message}")]
    BackendRejected { code: i64, message: String },

    #[error("Empty payload in response from {requested_url}")]
    EmptyPayload { requested_url: String },

    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the round trip itself failed (unreachable host, unparsable body).
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Json(_))
    }
}
