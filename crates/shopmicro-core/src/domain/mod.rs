//! Domain model.

mod product;
mod recommendation;

pub use product::Product;
pub use recommendation::{Recommendations, DEMO_USER_ID};
