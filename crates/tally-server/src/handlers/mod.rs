//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analytics;
pub mod auth;
pub mod bills;
pub mod export;
pub mod goals;
pub mod reminders;
pub mod subscriptions;
pub mod transactions;

// Re-export all handlers for use in router
pub use analytics::*;
pub use auth::*;
pub use bills::*;
pub use export::*;
pub use goals::*;
pub use reminders::*;
pub use subscriptions::*;
pub use transactions::*;
