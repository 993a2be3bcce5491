//! Request extractors that reject with [`BoardError`].

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::BoardError;

/// JSON body extractor that also runs the body's `validator` schema.
///
/// Syntax errors, missing fields, type mismatches, and length or range
/// violations all reject with `400 Bad Request` before the handler runs.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = BoardError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| BoardError::InvalidRequest(e.body_text()))?;
        value
            .validate()
            .map_err(|e| BoardError::InvalidRequest(e.to_string()))?;
        Ok(Self(value))
    }
}
