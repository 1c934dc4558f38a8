use axum::http::Uri;
use axum::response::{Html, IntoResponse, Json, Response};
use http::StatusCode;

use crate::views;

const DEVTOOLS_PROBE: &str = ".well-known/appspecific/com.chrome.devtools.json";

/// Catch-all 404. Chrome probes a well-known path whenever devtools
/// opens; that one gets a quiet empty body instead of the error page.
pub async fn not_found(uri: Uri) -> Response {
    if uri.path().contains(DEVTOOLS_PROBE) {
        return (StatusCode::NOT_FOUND, Json(serde_json::json!({}))).into_response();
    }
    (
        StatusCode::NOT_FOUND,
        Html(views::error_page(StatusCode::NOT_FOUND, "Not Found")),
    )
        .into_response()
}
