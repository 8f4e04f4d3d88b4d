//! Request handler module
//!
//! One `Handler` implementation per server variant. A handler is a pure
//! function of (method, path, configuration) plus a log side effect.

pub mod hello;
pub mod region;

use crate::config::Config;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::net::SocketAddr;

// Re-export the variant handlers
pub use hello::HelloHandler;
pub use region::RegionHandler;

/// Per-request contract shared by both server variants.
///
/// Implementations produce exactly one response per request and emit one
/// log entry before returning it. The request body is never read, so the
/// method is generic over the body type; tests build requests with unit
/// bodies.
pub trait Handler: Clone + Send + Sync + 'static {
    fn handle<B>(
        &self,
        req: &Request<B>,
        remote_addr: SocketAddr,
        config: &Config,
    ) -> Response<Full<Bytes>>;
}
