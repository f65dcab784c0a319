//! # ShopMicro Server Library
//!
//! Application context construction and server startup utilities for the
//! catalog backend.

pub mod app;
pub mod startup;

pub use app::AppContext;
