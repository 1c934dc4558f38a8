use axum::response::Html;

use crate::session::MaybeUser;
use crate::views;

pub async fn index(MaybeUser(user): MaybeUser) -> Html<String> {
    let body = r#"<div class="card" style="text-align: center; margin-top: 4rem;">
  <h1>Investment Portfolio Tracker</h1>
  <p class="muted">Manage your investments and track performance in real-time</p>
  <div class="actions" style="justify-content: center;">
    <a class="btn" href="/login">Sign In</a>
    <a class="btn" href="/register">Sign Up</a>
  </div>
</div>"#;
    Html(views::layout(
        "Investment Portfolio Tracker",
        user.as_deref(),
        body,
    ))
}
