pub mod auth;
pub mod chat;
pub mod content;
pub mod finance;
pub mod middleware;
pub mod profile;
pub mod quiz;
pub mod rest;
pub mod state;
pub mod walkthrough;

// Re-export what the binaries need to build and document the server.
pub use middleware::require_auth;
pub use rest::{cors_layer, router, ApiDoc};
pub use state::{AppState, SessionStore};
