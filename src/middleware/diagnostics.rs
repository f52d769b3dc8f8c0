use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::DiagnosticBody;

/// Replace error bodies with their diagnostic form (`stack` included) when the
/// service runs in development mode. Other responses pass through untouched.
pub async fn expose_diagnostics(State(development): State<bool>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if !development {
        return response;
    }

    let Some(DiagnosticBody(body)) = response.extensions().get::<DiagnosticBody>().cloned() else {
        return response;
    };
    let bytes = match serde_json::to_vec(&body) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("failed to serialize diagnostic body: {}", e);
            return response;
        }
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
