//! Plain-text greeting handler
//!
//! Answers every request, regardless of method or path, with the fixed
//! greeting body.

use crate::config::Config;
use crate::handler::Handler;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::net::SocketAddr;

/// Response body served for every request
pub const GREETING_TEXT: &str = "hello world!";

/// Handler for the minimal variant
#[derive(Debug, Clone, Copy, Default)]
pub struct HelloHandler;

impl Handler for HelloHandler {
    fn handle<B>(
        &self,
        _req: &Request<B>,
        _remote_addr: SocketAddr,
        config: &Config,
    ) -> Response<Full<Bytes>> {
        if config.logging.access_log {
            logger::log_request_received();
        }
        http::build_text_response(GREETING_TEXT)
    }
}
