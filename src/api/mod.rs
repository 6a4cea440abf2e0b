//! HTTP interface to the range collection.
//!
//! - [`routes`] - axum router and server
//! - [`handlers`] - request handlers
//! - [`state`] - the shared, lock-protected collection
//! - [`error`] - error to response mapping

mod error;
mod handlers;
mod routes;
mod state;

pub use error::ErrorResponse;
pub use handlers::HealthResponse;
pub use routes::{create_router, start_server};
pub use state::SharedRangeSet;
