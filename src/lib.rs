pub mod app;
pub mod config;
pub mod error;
pub mod meals;
pub mod session;
pub mod state;
pub mod validation;
