use crate::api::{ApiClient, TokenCell};
use crate::errors::AppError;
use crate::models::{UpdateUser, User};

pub async fn profile(api: &ApiClient, auth: &TokenCell) -> Result<User, AppError> {
    api.get("/users/profile", auth).await
}

pub async fn update_profile(
    api: &ApiClient,
    auth: &TokenCell,
    user: &UpdateUser,
) -> Result<User, AppError> {
    api.put("/users/profile", user, auth).await
}

pub async fn change_password(
    api: &ApiClient,
    auth: &TokenCell,
    new_password: &str,
) -> Result<(), AppError> {
    api.post(
        "/users/change-password",
        &serde_json::json!({ "newPassword": new_password }),
        auth,
    )
    .await
}

// Admin endpoints

pub async fn fetch_all(api: &ApiClient, auth: &TokenCell) -> Result<Vec<User>, AppError> {
    api.get("/users/admin/all", auth).await
}

pub async fn admin_update(
    api: &ApiClient,
    auth: &TokenCell,
    id: i64,
    user: &UpdateUser,
) -> Result<User, AppError> {
    api.put(&format!("/users/admin/{}", id), user, auth).await
}

pub async fn toggle_enabled(api: &ApiClient, auth: &TokenCell, id: i64) -> Result<(), AppError> {
    api.post_empty(&format!("/users/admin/{}/toggle-enabled", id), auth)
        .await
}

pub async fn delete(api: &ApiClient, auth: &TokenCell, id: i64) -> Result<(), AppError> {
    api.delete(&format!("/users/admin/{}", id), auth).await
}
