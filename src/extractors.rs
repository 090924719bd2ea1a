//! Request extractors with structured rejections.

use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::ApiError;

/// JSON body extractor that reports malformed or incomplete payloads
/// through [`ApiError`] instead of axum's plain-text rejection, so a
/// missing field comes back as a 400 naming the field.
#[derive(axum::extract::FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
