pub(crate) mod client;
pub(crate) mod token;

pub use client::{ApiClient, AUTH_TOKEN_HEADER};
pub use token::TokenCell;
