//! Core types and service wiring for launching third-party map apps.

/// Known map providers and the ordered catalogue built from them.
pub mod catalogue;
/// Installed-provider detection on top of a platform launcher.
pub mod availability;
/// Hand-off of translated targets to the platform.
pub mod dispatch;
/// Errors reported to callers.
pub mod error;
/// Domain models and identifiers shared by all platforms.
pub mod model;
/// Traits describing the host platform capabilities.
pub mod ports;
/// High-level service facade used by clients.
pub mod service;
/// Request to launch-target translation.
pub mod translate;

#[cfg(test)]
mod fake;

pub use availability::*;
pub use catalogue::*;
pub use dispatch::*;
pub use error::*;
pub use model::*;
pub use ports::*;
pub use service::*;
pub use translate::*;
