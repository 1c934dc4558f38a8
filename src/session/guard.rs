use axum::extract::{Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::debug;

use crate::api::TokenCell;
use crate::state::AppState;

use super::{read_session, removal_cookie, session_cookie, SessionData};

/// Per-request view of the session, parked in request extensions by
/// [`session_middleware`] so the guards below can get at it.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub data: Option<SessionData>,
    pub token: TokenCell,
}

/// Reads the session cookie before the handler runs and settles the
/// token afterwards: a rotated token is written back into the cookie,
/// an invalidated one (the backend said 401) destroys it.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let data = read_session(&jar);
    let token = TokenCell::new(data.as_ref().map(|d| d.token.clone()));
    let ctx = SessionContext {
        data,
        token: token.clone(),
    };
    req.extensions_mut().insert(ctx.clone());

    let response = next.run(req).await;

    if token.is_invalidated() {
        debug!("session invalidated by backend, destroying cookie");
        let jar = jar.remove(removal_cookie());
        return (jar, response).into_response();
    }
    if let Some(fresh) = token.rotated_token() {
        if let Some(data) = ctx.data {
            debug!("persisting rotated auth token");
            let refreshed = SessionData {
                token: fresh,
                ..data
            };
            let jar = jar.add(session_cookie(&state.config, &refreshed, false));
            return (jar, response).into_response();
        }
    }
    response
}

fn login_redirect(path: &str) -> Redirect {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("redirectTo", path)
        .finish();
    Redirect::to(&format!("/login?{}", query))
}

/// Page-only guard: the route just needs a signed-in user, no API call.
/// Missing session redirects to login, returning here afterwards.
pub struct SessionUser {
    pub user_id: String,
}

#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for SessionUser {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts.extensions.get::<SessionContext>().cloned();
        match ctx.and_then(|c| c.data) {
            Some(data) if !data.user_id.is_empty() => Ok(SessionUser {
                user_id: data.user_id,
            }),
            _ => Err(login_redirect(parts.uri.path())),
        }
    }
}

/// Guard for API-calling loaders and actions: requires the bearer
/// token and yields the per-request [`TokenCell`] the client uses.
pub struct AuthGate {
    pub user_id: String,
    pub token: TokenCell,
}

#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for AuthGate {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts.extensions.get::<SessionContext>().cloned();
        match ctx {
            Some(ctx) => match ctx.data {
                Some(data) if !data.token.is_empty() => Ok(AuthGate {
                    user_id: data.user_id,
                    token: ctx.token,
                }),
                _ => Err(login_redirect(parts.uri.path())),
            },
            None => Err(login_redirect(parts.uri.path())),
        }
    }
}

/// Optional view of the session, for public pages that send signed-in
/// users somewhere more useful.
pub struct MaybeUser(pub Option<String>);

#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts.extensions.get::<SessionContext>().cloned();
        Ok(MaybeUser(
            ctx.and_then(|c| c.data).map(|d| d.user_id),
        ))
    }
}
