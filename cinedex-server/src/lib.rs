//! HTTP surface of the Cinedex movie catalog.

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
