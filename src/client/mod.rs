//! Client side of the range service.

mod http;

pub use http::RangeClient;
