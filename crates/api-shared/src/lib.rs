//! # API Shared
//!
//! Shared request/response shapes for the clinic APIs.
//!
//! Contains:
//! - Wire messages (`messages` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the runner binary so every surface reports the same shapes.

pub mod health;
pub mod messages;

pub use health::HealthService;
pub use messages::*;
