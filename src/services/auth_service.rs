use crate::api::{ApiClient, TokenCell};
use crate::errors::AppError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};

/// Exchanges credentials for a bearer token. Unauthenticated call.
pub async fn login(api: &ApiClient, credentials: &LoginRequest) -> Result<AuthResponse, AppError> {
    api.post("/auth/login", credentials, &TokenCell::anonymous())
        .await
}

pub async fn register(api: &ApiClient, user: &RegisterRequest) -> Result<AuthResponse, AppError> {
    api.post("/auth/register", user, &TokenCell::anonymous())
        .await
}

/// Admin-only role flip, authorized by a shared secret header rather
/// than the caller's bearer token.
pub async fn toggle_role(
    api: &ApiClient,
    email: &str,
    admin_secret: &str,
) -> Result<AuthResponse, AppError> {
    api.post_with_header(
        "/auth/toggle-role",
        &serde_json::json!({ "email": email }),
        ("Admin-Secret", admin_secret),
        &TokenCell::anonymous(),
    )
    .await
}
