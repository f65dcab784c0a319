//! Result type aliases for ShopMicro.

use crate::ShopError;

/// A specialized `Result` type for ShopMicro operations.
pub type ShopResult<T> = Result<T, ShopError>;
