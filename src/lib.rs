//! Minimal greeting HTTP service.
//!
//! Two server variants share this crate: the `hello` binary answers every
//! request with a fixed plain-text greeting, and the `hello_region` binary
//! serves a JSON greeting on `GET /` that echoes the configured deployment
//! region, answering every other route with a JSON not-found payload.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
