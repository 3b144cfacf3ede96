use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use service::ServiceError;

use crate::errors::JsonApiError;

/// JSON body extractor whose rejections are server errors.
///
/// Unparsable or mistyped bodies become `ServiceError::Envelope` (500 with the
/// parser message). Content-Type is not inspected.
#[derive(Debug, Clone)]
pub struct Envelope<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Envelope<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ServiceError::Envelope(e.body_text()))?;
        let value =
            serde_json::from_slice(&bytes).map_err(|e| ServiceError::Envelope(e.to_string()))?;
        Ok(Envelope(value))
    }
}
