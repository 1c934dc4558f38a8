use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::routes::{auth, dashboard, fallback, home, portfolio, profile, stocks, transactions};
use crate::session;
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/login", get(auth::login_page).post(auth::login_action))
        .route(
            "/register",
            get(auth::register_page).post(auth::register_action),
        )
        .route(
            "/logout",
            get(auth::logout_not_allowed).post(auth::logout_action),
        )
        .route("/dashboard", get(dashboard::page))
        .route("/portfolio", get(portfolio::overview))
        .route("/portfolio/performance", get(portfolio::performance))
        .route("/portfolio/positions", get(portfolio::positions))
        .route("/stocks", get(stocks::browse))
        .route("/stocks/:id", get(stocks::detail))
        .route("/transactions", get(transactions::history))
        .route(
            "/transactions/buy",
            get(transactions::buy_page).post(transactions::buy_action),
        )
        .route(
            "/transactions/sell",
            get(transactions::sell_page).post(transactions::sell_action),
        )
        .route("/profile", get(profile::page).post(profile::update_action))
        .fallback(fallback::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
