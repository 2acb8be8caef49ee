use std::convert::Infallible;

use serde::Serialize;
use warp::{
    body::BodyDeserializeError,
    http::StatusCode,
    reject::{LengthRequired, MethodNotAllowed, PayloadTooLarge, UnsupportedMediaType},
    reply, Rejection, Reply,
};

use crate::{constants::INTERNAL_ERROR, database::error::CatalogError};

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps every rejection to `{"error": ...}` with the matching status.
pub async fn handle_rejection(rejection: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if let Some(error) = rejection.find::<CatalogError>() {
        if let CatalogError::Internal(detail) = error {
            log::error!("Request failed: {detail}");
        }
        (error.status(), error.public_message())
    } else if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(error) = rejection.find::<BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid JSON body: {error}"))
    } else if rejection.find::<PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large".to_string())
    } else if rejection.find::<UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Expected a JSON body".to_string())
    } else if rejection.find::<LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length required".to_string())
    } else if rejection.find::<MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        log::error!("Unhandled rejection: {rejection:?}");
        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
    };

    Ok(reply::with_status(reply::json(&ErrorBody { error: message }), status))
}
