// Main library module for Brocante - a classifieds marketplace backend

// Module declarations
pub mod api; // API handlers
pub mod auth; // Authentication endpoints and token service
pub mod middleware; // HTTP middleware
pub mod model; // Configuration, state, and response types
pub mod secured; // Handler-level permission guard
pub mod startup; // Application startup utilities

// Re-export common types to keep handler imports short
pub use brocante_common::{ActionTypes, Role, error};

// Re-export security types
pub use secured::{Secured, SecuredBuilder};
