pub mod auth;
pub mod coins;
pub mod community;
pub mod dashboard;
pub mod service;
pub mod transactions;
