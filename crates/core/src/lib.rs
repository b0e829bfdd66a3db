//! `orderform-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the order form
//! crates (no rendering, no timers, no IO).

pub mod aggregate;
pub mod error;
pub mod event;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot, execute};
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::SessionId;
pub use value_object::ValueObject;
