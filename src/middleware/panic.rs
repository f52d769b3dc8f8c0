use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Turn a handler panic into the uniform 500 envelope
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::internal(format!("handler panicked: {detail}")).into_response()
}
