use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use thiserror::Error;

use queries::StoreError;

use crate::responses::responses::ErrorBody;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything a handler can fail with. Store errors pass through unchanged;
/// the two extra variants come from the form layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("malformed timestamp: {0}")]
    MalformedTimestamp(String),
    #[error("invalid input: {0}")]
    Validation(String),
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::Store(StoreError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Store(_) => StatusCode::NOT_FOUND,
            Error::MalformedTimestamp(_) | Error::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{}", self);
        }
        (status, Json(ErrorBody::new(status.as_u16(), self.to_string()))).into_response()
    }
}
