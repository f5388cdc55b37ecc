mod dto;
mod foods;
pub mod handlers;
mod services;

use crate::state::MockState;
use axum::Router;

pub fn router() -> Router<MockState> {
    handlers::mock_routes()
}
