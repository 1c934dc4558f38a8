use std::time::Duration;

use http::StatusCode;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::AppConfig;
use crate::errors::AppError;

use super::token::TokenCell;

/// Response header the backend uses to hand back a rotated token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Single point of outbound HTTP to the backend REST service.
///
/// Every verb takes the per-request [`TokenCell`]: the bearer token is
/// attached on the way out, a rotated token from the response header is
/// written back into the cell, and a 401 clears the cell and surfaces
/// as [`AppError::Unauthorized`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        // Validate up front; the base is kept as a plain string so paths
        // append without Url::join semantics getting in the way.
        Url::parse(&config.api_base_url)
            .map_err(|e| AppError::Validation(format!("invalid API_BASE_URL: {}", e)))?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: &TokenCell,
    ) -> Result<T, AppError> {
        self.execute(self.http.get(self.url(path)), auth).await
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        auth: &TokenCell,
    ) -> Result<T, AppError> {
        self.execute(self.http.get(self.url(path)).query(query), auth)
            .await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: &TokenCell,
    ) -> Result<T, AppError> {
        self.execute(self.http.post(self.url(path)).json(body), auth)
            .await
    }

    /// POST without a body, for action-style endpoints.
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: &TokenCell,
    ) -> Result<T, AppError> {
        self.execute(self.http.post(self.url(path)), auth).await
    }

    /// POST with one extra request header, for endpoints authorized by
    /// a shared secret instead of the bearer token.
    pub async fn post_with_header<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        header: (&str, &str),
        auth: &TokenCell,
    ) -> Result<T, AppError> {
        self.execute(
            self.http
                .post(self.url(path))
                .json(body)
                .header(header.0, header.1),
            auth,
        )
        .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: &TokenCell,
    ) -> Result<T, AppError> {
        self.execute(self.http.put(self.url(path)).json(body), auth)
            .await
    }

    pub async fn put_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: &TokenCell,
    ) -> Result<T, AppError> {
        self.execute(self.http.put(self.url(path)), auth).await
    }

    /// PUT variant for endpoints that answer with a plain string body.
    pub async fn put_text(&self, path: &str, auth: &TokenCell) -> Result<String, AppError> {
        let resp = self.send(self.http.put(self.url(path)), auth).await?;
        resp.text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        auth: &TokenCell,
    ) -> Result<T, AppError> {
        self.execute(self.http.patch(self.url(path)).query(query), auth)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: &TokenCell,
    ) -> Result<T, AppError> {
        self.execute(self.http.delete(self.url(path)), auth).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        auth: &TokenCell,
    ) -> Result<T, AppError> {
        let resp = self.send(req, auth).await?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        parse_body(&bytes)
    }

    async fn send(
        &self,
        req: RequestBuilder,
        auth: &TokenCell,
    ) -> Result<reqwest::Response, AppError> {
        let req = match auth.current() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };

        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Network("request to backend timed out".to_string())
            } else {
                AppError::Network(e.to_string())
            }
        })?;

        if let Some(fresh) = resp
            .headers()
            .get(AUTH_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            auth.rotate(fresh.to_string());
        }

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            auth.invalidate();
            return Err(AppError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            return Err(AppError::Api {
                status,
                message: error_message(&body, status),
            });
        }

        Ok(resp)
    }
}

/// Empty bodies deserialize as JSON null, so `()` and `Option<T>`
/// targets work for void endpoints.
fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let bytes = if bytes.is_empty() {
        b"null" as &[u8]
    } else {
        bytes
    };
    serde_json::from_slice(bytes)
        .map_err(|e| AppError::Network(format!("failed to decode backend response: {}", e)))
}

/// Pulls the backend's error message out of its JSON error body,
/// falling back to the raw text or the status reason.
fn error_message(body: &[u8], status: StatusCode) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        return parsed.message;
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_parses_as_unit() {
        assert!(parse_body::<()>(b"").is_ok());
    }

    #[test]
    fn json_body_parses_into_target_type() {
        let parsed: Vec<i64> = parse_body(b"[1,2,3]").unwrap();
        assert_eq!(parsed, vec![1, 2, 3]);
    }

    #[test]
    fn error_message_prefers_the_json_message_field() {
        let msg = error_message(
            br#"{"message":"Insufficient shares","status":400}"#,
            StatusCode::BAD_REQUEST,
        );
        assert_eq!(msg, "Insufficient shares");
    }

    #[test]
    fn error_message_falls_back_to_raw_text_then_reason() {
        assert_eq!(
            error_message(b"backend on fire", StatusCode::INTERNAL_SERVER_ERROR),
            "backend on fire"
        );
        assert_eq!(
            error_message(b"", StatusCode::BAD_GATEWAY),
            "Bad Gateway"
        );
    }
}
