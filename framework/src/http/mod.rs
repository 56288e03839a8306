//! HTTP surface: request wrapper, response builder, handler-visible
//! response sink.

pub mod request;
pub mod response;

pub use hyper::Method;
pub use request::{parse_pairs, RequestInfo};
pub use response::{HttpResponse, ResponseSink};
