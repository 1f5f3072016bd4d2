pub mod auth;
pub mod catalog;
pub mod completion;

pub use auth::SimulatedAuthAdapter;
pub use catalog::StaticCatalogAdapter;
pub use completion::CannedCompletionAdapter;
