//! # ShopMicro Client
//!
//! Loads the storefront view (catalog products plus recommendations for the
//! demo user) from the two backing services and renders it as text.

pub mod config;
pub mod render;
pub mod view_client;

pub use config::ClientConfig;
pub use render::{render_error, render_view};
pub use view_client::{View, ViewClient};
