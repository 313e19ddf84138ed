pub mod app;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod state;

pub use app::{ApiDoc, build_router};
pub use state::AppState;
