use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::SignedCookieJar;
use http::StatusCode;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::{LoginRequest, RegisterRequest};
use crate::services::auth_service;
use crate::session::{removal_cookie, session_cookie, MaybeUser, SessionData};
use crate::state::AppState;
use crate::views::{self, forms};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectQuery {
    #[serde(default)]
    redirect_to: Option<String>,
}

/// Only same-site paths are honored as post-login targets.
fn safe_target(target: Option<String>) -> String {
    match target {
        Some(t) if t.starts_with('/') && !t.starts_with("//") => t,
        _ => "/dashboard".to_string(),
    }
}

// --- login -----------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    remember: Option<String>,
    #[serde(default)]
    redirect_to: Option<String>,
}

#[derive(Debug, Default)]
struct LoginErrors {
    email: Option<String>,
    password: Option<String>,
    submit: Option<String>,
}

pub async fn login_page(
    MaybeUser(user): MaybeUser,
    Query(query): Query<RedirectQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(render_login(
        query.redirect_to.as_deref().unwrap_or(""),
        "",
        &LoginErrors::default(),
    ))
    .into_response()
}

pub async fn login_action(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let redirect_to = form.redirect_to.clone().unwrap_or_default();
    let mut errors = LoginErrors::default();
    if form.email.trim().is_empty() {
        errors.email = Some("Email is required".to_string());
    }
    if form.password.is_empty() {
        errors.password = Some("Password is required".to_string());
    }
    if errors.email.is_some() || errors.password.is_some() {
        return (
            StatusCode::BAD_REQUEST,
            Html(render_login(&redirect_to, &form.email, &errors)),
        )
            .into_response();
    }

    let request = LoginRequest {
        email: form.email.trim().to_string(),
        password: form.password,
    };
    match auth_service::login(&state.api, &request).await {
        Ok(auth) => {
            info!("user {} signed in", auth.email);
            let data = SessionData {
                user_id: auth.email,
                token: auth.token,
            };
            let jar = jar.add(session_cookie(&state.config, &data, form.remember.is_some()));
            (jar, Redirect::to(&safe_target(form.redirect_to))).into_response()
        }
        Err(e) => {
            errors.submit = Some(match e {
                AppError::Unauthorized => "Invalid email or password".to_string(),
                other => other.message(),
            });
            (
                StatusCode::BAD_REQUEST,
                Html(render_login(&redirect_to, &request.email, &errors)),
            )
                .into_response()
        }
    }
}

fn render_login(redirect_to: &str, email: &str, errors: &LoginErrors) -> String {
    let submit_error = errors
        .submit
        .as_deref()
        .map(|e| format!(r#"<p class="error">{}</p>"#, views::escape(e)))
        .unwrap_or_default();
    let body = format!(
        r#"<div class="card" style="max-width: 420px; margin: 3rem auto;">
<h1>Sign in to your account</h1>
<p class="muted">Or <a href="/register">create a new account</a></p>
<form method="post" action="/login">
<input type="hidden" name="redirectTo" value="{redirect}">
{email}
{password}
<label><input type="checkbox" name="remember" value="on" style="width: auto;"> Remember me</label>
{submit_error}
<div class="actions"><button type="submit">Sign in</button></div>
</form>
</div>"#,
        redirect = views::escape(redirect_to),
        email = forms::text_field("Email Address", "email", "email", email, errors.email.as_deref()),
        password = forms::text_field("Password", "password", "password", "", errors.password.as_deref()),
        submit_error = submit_error,
    );
    views::layout("Sign In", None, &body)
}

// --- register --------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
}

#[derive(Debug, Default)]
struct RegisterErrors {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    confirm_password: Option<String>,
    submit: Option<String>,
}

impl RegisterErrors {
    fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
            && self.submit.is_none()
    }
}

pub async fn register_page(MaybeUser(user): MaybeUser) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(render_register(
        &RegisterForm::default(),
        &RegisterErrors::default(),
    ))
    .into_response()
}

pub async fn register_action(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let mut errors = RegisterErrors::default();
    if form.first_name.trim().is_empty() {
        errors.first_name = Some("First name is required".to_string());
    }
    if form.last_name.trim().is_empty() {
        errors.last_name = Some("Last name is required".to_string());
    }
    if form.email.trim().is_empty() {
        errors.email = Some("Email is required".to_string());
    }
    if form.password.is_empty() {
        errors.password = Some("Password is required".to_string());
    }
    if form.password != form.confirm_password {
        errors.confirm_password = Some("Passwords don't match".to_string());
    }
    if !errors.is_empty() {
        return (StatusCode::BAD_REQUEST, Html(render_register(&form, &errors))).into_response();
    }

    let request = RegisterRequest {
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
    };
    match auth_service::register(&state.api, &request).await {
        Ok(auth) => {
            info!("registered user {}", auth.email);
            let data = SessionData {
                user_id: auth.email,
                token: auth.token,
            };
            let jar = jar.add(session_cookie(&state.config, &data, false));
            (jar, Redirect::to("/dashboard")).into_response()
        }
        Err(e) => {
            errors.submit = Some(e.message());
            (StatusCode::BAD_REQUEST, Html(render_register(&form, &errors))).into_response()
        }
    }
}

fn render_register(form: &RegisterForm, errors: &RegisterErrors) -> String {
    let submit_error = errors
        .submit
        .as_deref()
        .map(|e| format!(r#"<p class="error">{}</p>"#, views::escape(e)))
        .unwrap_or_default();
    let body = format!(
        r#"<div class="card" style="max-width: 420px; margin: 3rem auto;">
<h1>Create your account</h1>
<p class="muted">Or <a href="/login">sign in to your existing account</a></p>
<form method="post" action="/register">
{first_name}
{last_name}
{email}
{password}
{confirm}
{submit_error}
<div class="actions"><button type="submit">Create account</button></div>
</form>
</div>"#,
        first_name = forms::text_field(
            "First Name",
            "firstName",
            "text",
            &form.first_name,
            errors.first_name.as_deref()
        ),
        last_name = forms::text_field(
            "Last Name",
            "lastName",
            "text",
            &form.last_name,
            errors.last_name.as_deref()
        ),
        email = forms::text_field("Email Address", "email", "email", &form.email, errors.email.as_deref()),
        password = forms::text_field("Password", "password", "password", "", errors.password.as_deref()),
        confirm = forms::text_field(
            "Confirm Password",
            "confirmPassword",
            "password",
            "",
            errors.confirm_password.as_deref()
        ),
        submit_error = submit_error,
    );
    views::layout("Register", None, &body)
}

// --- logout ----------------------------------------------------------

pub async fn logout_action(jar: SignedCookieJar) -> impl IntoResponse {
    (jar.remove(removal_cookie()), Redirect::to("/"))
}

pub async fn logout_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}
