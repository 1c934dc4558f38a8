pub(crate) mod auth;
pub(crate) mod dashboard;
pub(crate) mod fallback;
pub(crate) mod home;
pub(crate) mod portfolio;
pub(crate) mod profile;
pub(crate) mod stocks;
pub(crate) mod transactions;
