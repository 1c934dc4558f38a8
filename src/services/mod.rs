pub mod auth_service;
pub mod portfolio_service;
pub mod position_service;
pub mod stock_service;
pub mod transaction_service;
pub mod user_service;
