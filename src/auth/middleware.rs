use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::auth::JwtService;

/// Attaches `Option<AuthenticatedUser>` to the request; never rejects.
pub async fn optional_auth_middleware(
    State(jwt_service): State<JwtService>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let user = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .and_then(|token| match jwt_service.authenticate(token) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!("Ignoring invalid bearer token: {}", e);
                None
            }
        });

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
