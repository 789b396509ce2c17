//! Display formatting for sessions and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation results get newtype wrappers or their own
//! implementations. Every formatter produces markdown, which the CLI renders
//! with rich styling or as plain text.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Formatted     │
//! │ (Session, Step) │───▶│ Outcomes        │───▶│    Output       │
//! │                 │    │                 │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (Sessions, StepDefinitions)
//! - [`results`]: Operation outcomes (CreateResult, AbortResult, gate and advance results)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{Sessions, StepDefinitions};
pub use datetime::LocalDateTime;
pub use results::{AbortResult, CreateResult};
