pub mod api;
pub mod app;
pub mod auth;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;

pub use app::{router, AppState, RouterOptions};
