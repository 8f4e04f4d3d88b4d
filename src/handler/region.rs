//! Region-aware greeting handler
//!
//! Serves a JSON greeting on `GET /` and a JSON not-found payload on every
//! other method or path. The configured deployment region is echoed in
//! both payloads and in the access log.

use crate::config::Config;
use crate::handler::Handler;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};
use std::net::SocketAddr;

/// Handler for the path-aware variant
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionHandler;

impl Handler for RegionHandler {
    fn handle<B>(
        &self,
        req: &Request<B>,
        remote_addr: SocketAddr,
        config: &Config,
    ) -> Response<Full<Bytes>> {
        let region = config.greeting.region.as_str();

        let response = match (req.method(), req.uri().path()) {
            (&Method::GET, "/") => http::build_greeting_response(region),
            _ => http::build_not_found_response(region),
        };

        if config.logging.access_log {
            let mut entry = access_entry(req, remote_addr, region);
            entry.status = response.status().as_u16();
            entry.body_bytes = http::body_len(&response);
            logger::log_access(&entry, &config.logging.access_log_format);
        }

        response
    }
}

/// Assemble an access log entry from the request line and headers
fn access_entry<B>(req: &Request<B>, remote_addr: SocketAddr, region: &str) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        remote_addr.to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = http_version_label(req.version()).to_string();
    entry.user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry.region = Some(region.to_string());
    entry
}

/// Version string without the `HTTP/` prefix, as access log formats expect
fn http_version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn test_addr() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    fn config_with_region(region: &str) -> Config {
        let mut config = Config::default();
        config.greeting.region = region.to_string();
        config.logging.access_log = false;
        config
    }

    async fn json_body(response: Response<Full<Bytes>>) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn get_root_returns_greeting_with_region() {
        let config = config_with_region("us-east");
        let request = Request::builder().method("GET").uri("/").body(()).unwrap();
        let response = RegionHandler.handle(&request, test_addr(), &config);

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "application/json");

        let value = json_body(response).await;
        assert_eq!(value["message"], "Hello World");
        assert_eq!(value["region"], "us-east");
    }

    #[tokio::test]
    async fn post_root_is_not_found_with_default_region() {
        let mut config = Config::default();
        config.logging.access_log = false;
        let request = Request::builder().method("POST").uri("/").body(()).unwrap();
        let response = RegionHandler.handle(&request, test_addr(), &config);

        assert_eq!(response.status(), 404);
        assert_eq!(response.headers()["content-type"], "application/json");

        let value = json_body(response).await;
        assert_eq!(value["error"], "Not Found");
        assert_eq!(value["region"], "unknown");
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let config = config_with_region("eu-central");
        let request = Request::builder().method("GET").uri("/foo").body(()).unwrap();
        let response = RegionHandler.handle(&request, test_addr(), &config);

        assert_eq!(response.status(), 404);
        let value = json_body(response).await;
        assert_eq!(value["error"], "Not Found");
        assert_eq!(value["region"], "eu-central");
    }

    #[tokio::test]
    async fn non_get_methods_are_not_found() {
        let config = config_with_region("us-east");
        for method in ["HEAD", "PUT", "DELETE", "OPTIONS"] {
            let request = Request::builder().method(method).uri("/").body(()).unwrap();
            let response = RegionHandler.handle(&request, test_addr(), &config);
            assert_eq!(response.status(), 404, "{method} /");
        }
    }

    #[tokio::test]
    async fn query_string_does_not_affect_path_match() {
        let config = config_with_region("us-east");
        let request = Request::builder()
            .method("GET")
            .uri("/?verbose=1")
            .body(())
            .unwrap();
        let response = RegionHandler.handle(&request, test_addr(), &config);
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn repeated_requests_get_identical_responses() {
        let config = config_with_region("us-east");
        let make_request = || Request::builder().method("GET").uri("/").body(()).unwrap();

        let first = RegionHandler.handle(&make_request(), test_addr(), &config);
        let second = RegionHandler.handle(&make_request(), test_addr(), &config);

        assert_eq!(first.status(), second.status());
        let first_body = first.into_body().collect().await.unwrap().to_bytes();
        let second_body = second.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(first_body, second_body);
    }

    #[test]
    fn access_entry_records_request_line() {
        let request = Request::builder()
            .method("GET")
            .uri("/?verbose=1")
            .header("User-Agent", "curl/8.5.0")
            .body(())
            .unwrap();
        let entry = access_entry(&request, test_addr(), "us-east");

        assert_eq!(entry.method, "GET");
        assert_eq!(entry.path, "/");
        assert_eq!(entry.query.as_deref(), Some("verbose=1"));
        assert_eq!(entry.user_agent.as_deref(), Some("curl/8.5.0"));
        assert_eq!(entry.region.as_deref(), Some("us-east"));
    }
}
