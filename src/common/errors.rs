use lambda_http::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store request failed: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("malformed record: {0}")]
    MalformedRecord(String),
    #[error("no record for spot {0}")]
    Missing(String),
}

impl StoreError {
    pub fn request<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Request(Box::new(err))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error("Spot {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Http(#[from] lambda_http::http::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Status for errors answered with a `{message}` body; `None` means the
    /// invocation itself fails.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Error::Validation(_) => Some(StatusCode::BAD_REQUEST),
            Error::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Error::Store(_) | Error::Http(_) | Error::Json(_) => None,
        }
    }
}
