//! HTTP middleware.

mod request;

pub use request::track_request;
