use crate::state::AppState;
use axum::Router;

pub mod cache;
pub mod calories;
mod dto;
pub mod handlers;
pub mod matcher;
pub mod service;
pub mod source;
pub mod types;

pub fn router() -> Router<AppState> {
    handlers::calories_routes()
}
