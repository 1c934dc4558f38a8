use std::sync::Arc;

use parking_lot::Mutex;

#[derive(Debug, Default)]
struct TokenState {
    token: Option<String>,
    rotated: bool,
    invalidated: bool,
}

/// Per-request handle to the bearer token.
///
/// The auth gate fills one of these from the session cookie and hands
/// it to every API call made while serving the request; there is no
/// ambient "current token" anywhere in the process. The backend may
/// rotate the token mid-request (via a response header) or reject it
/// outright (401), and the session-commit middleware reads the final
/// state back out to update or destroy the cookie.
#[derive(Debug, Clone, Default)]
pub struct TokenCell(Arc<Mutex<TokenState>>);

impl TokenCell {
    pub fn new(token: Option<String>) -> Self {
        Self(Arc::new(Mutex::new(TokenState {
            token,
            rotated: false,
            invalidated: false,
        })))
    }

    /// Cell with no token, for unauthenticated calls (login, register).
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.0.lock().token.clone()
    }

    /// Backend issued a fresh token; remember it for the cookie rewrite.
    pub fn rotate(&self, token: String) {
        let mut state = self.0.lock();
        state.token = Some(token);
        state.rotated = true;
    }

    /// Backend rejected the token; drop it and flag the session dead.
    pub fn invalidate(&self) {
        let mut state = self.0.lock();
        state.token = None;
        state.invalidated = true;
    }

    pub fn is_invalidated(&self) -> bool {
        self.0.lock().invalidated
    }

    /// The rotated token to persist, if any survived the request.
    pub fn rotated_token(&self) -> Option<String> {
        let state = self.0.lock();
        if state.rotated && !state.invalidated {
            state.token.clone()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_the_session_token() {
        let cell = TokenCell::new(Some("abc".into()));
        assert_eq!(cell.current().as_deref(), Some("abc"));
        assert!(!cell.is_invalidated());
        assert_eq!(cell.rotated_token(), None);
    }

    #[test]
    fn rotation_is_visible_to_later_calls_and_to_the_committer() {
        let cell = TokenCell::new(Some("old".into()));
        cell.rotate("new".into());
        assert_eq!(cell.current().as_deref(), Some("new"));
        assert_eq!(cell.rotated_token().as_deref(), Some("new"));
    }

    #[test]
    fn invalidation_clears_the_token_and_wins_over_rotation() {
        let cell = TokenCell::new(Some("old".into()));
        cell.rotate("new".into());
        cell.invalidate();
        assert_eq!(cell.current(), None);
        assert!(cell.is_invalidated());
        assert_eq!(cell.rotated_token(), None);
    }

    #[test]
    fn clones_share_state() {
        let cell = TokenCell::new(Some("tok".into()));
        let other = cell.clone();
        other.invalidate();
        assert!(cell.is_invalidated());
    }
}
