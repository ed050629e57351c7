//! Web layer for the flight itinerary planner.
//!
//! Provides JSON endpoints for airport lookup and itinerary search.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
