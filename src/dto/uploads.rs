use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UploadQuery {
    pub filename: String,
}

/// Raw image bytes posted as the request body. Documented as a binary body;
/// the size cap comes from the global request body limit.
#[derive(Debug, ToSchema)]
#[schema(value_type = String, format = Binary)]
pub struct RawUpload(pub Bytes);

impl<S> FromRequest<S> for RawUpload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|err| AppError::BadRequest(err.to_string()))?;
        Ok(Self(bytes))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub path: String,
    pub url: String,
}
