use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::api::ApiClient;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub config: Arc<AppConfig>,
    cookie_key: Key,
}

impl AppState {
    pub fn new(config: AppConfig, api: ApiClient) -> Self {
        let cookie_key = Key::derive_from(config.session_secret.as_bytes());
        Self {
            api,
            config: Arc::new(config),
            cookie_key,
        }
    }
}

// Lets SignedCookieJar pull its signing key straight out of AppState.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
