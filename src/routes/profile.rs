use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use http::StatusCode;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::{UpdateUser, User};
use crate::services::user_service;
use crate::session::AuthGate;
use crate::state::AppState;
use crate::views::{self, forms};

pub async fn page(State(state): State<AppState>, auth: AuthGate) -> Result<Html<String>, AppError> {
    let user = user_service::profile(&state.api, &auth.token).await?;
    Ok(Html(render(&user, &ProfileErrors::default(), None)))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
}

#[derive(Debug, Default)]
struct ProfileErrors {
    first_name: Option<String>,
    last_name: Option<String>,
    submit: Option<String>,
}

pub async fn update_action(
    State(state): State<AppState>,
    auth: AuthGate,
    Form(form): Form<ProfileForm>,
) -> Response {
    let mut errors = ProfileErrors::default();
    if form.first_name.trim().is_empty() {
        errors.first_name = Some("First name is required".to_string());
    }
    if form.last_name.trim().is_empty() {
        errors.last_name = Some("Last name is required".to_string());
    }

    // Re-fetch the profile so the page can render around the errors.
    let current = match user_service::profile(&state.api, &auth.token).await {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    if errors.first_name.is_some() || errors.last_name.is_some() {
        return (StatusCode::BAD_REQUEST, Html(render(&current, &errors, None))).into_response();
    }

    let update = UpdateUser {
        first_name: Some(form.first_name.trim().to_string()),
        last_name: Some(form.last_name.trim().to_string()),
        email: None,
    };
    match user_service::update_profile(&state.api, &auth.token, &update).await {
        Ok(updated) => {
            info!("profile updated for {}", updated.email);
            Html(render(&updated, &ProfileErrors::default(), Some("Profile updated"))).into_response()
        }
        Err(AppError::Unauthorized) => AppError::Unauthorized.into_response(),
        Err(e) => {
            errors.submit = Some(e.message());
            (StatusCode::BAD_REQUEST, Html(render(&current, &errors, None))).into_response()
        }
    }
}

fn render(user: &User, errors: &ProfileErrors, notice: Option<&str>) -> String {
    let notice_html = notice
        .map(|n| format!(r#"<p class="gain">{}</p>"#, views::escape(n)))
        .unwrap_or_default();
    let submit_error = errors
        .submit
        .as_deref()
        .map(|e| format!(r#"<p class="error">{}</p>"#, views::escape(e)))
        .unwrap_or_default();

    let body = format!(
        r#"<div class="card" style="max-width: 480px;">
<h1>Your Profile</h1>
<p class="muted">{email} · {role}</p>
{notice}
<form method="post" action="/profile">
{first_name}
{last_name}
{submit_error}
<div class="actions"><button type="submit">Save changes</button></div>
</form>
</div>"#,
        email = views::escape(&user.email),
        role = user.role,
        notice = notice_html,
        first_name = forms::text_field(
            "First Name",
            "firstName",
            "text",
            &user.first_name,
            errors.first_name.as_deref()
        ),
        last_name = forms::text_field(
            "Last Name",
            "lastName",
            "text",
            &user.last_name,
            errors.last_name.as_deref()
        ),
        submit_error = submit_error,
    );
    views::layout("Profile", Some(&user.email), &body)
}
