//! # ShopMicro Core
//!
//! Core types, domain model, and error definitions for ShopMicro.
//! This crate provides the foundational abstractions shared by the store,
//! cache, service, and presentation layers.

pub mod domain;
pub mod error;
pub mod result;
pub mod telemetry;

pub use domain::*;
pub use error::*;
pub use result::*;
