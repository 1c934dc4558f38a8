mod auth;
mod portfolio;
mod position;
mod stock;
mod transaction;
mod user;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use portfolio::{MonthlyActivity, PortfolioPerformance, PortfolioSummary, SectorAllocation};
pub use position::Position;
pub use stock::{CreateStock, Stock, UpdateStock};
pub use transaction::{Transaction, TransactionType};
pub use user::{UpdateUser, User, UserRole};
