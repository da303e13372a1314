pub mod config;
pub mod observability;
pub mod pipeline;
pub mod routes;

pub use config::Config;
pub use pipeline::ContactPipeline;
pub use routes::{AppState, router};
