//! Server proxy routing
//!
//! Each registered server gets a dedicated proxy actor addressed by
//! `mcp-proxy:{server_id}`. The registry hands out one handle per address,
//! and the HTTP implementation relays requests to the proxy host.

mod http;
mod registry;

pub use http::{HttpProxyFactory, HttpServerProxy};
pub use registry::{ProxyFactory, ProxyRegistry};
