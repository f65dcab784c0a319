//! Cache key names.

/// Key holding the serialized full product listing.
pub const PRODUCTS_ALL: &str = "products:all";
