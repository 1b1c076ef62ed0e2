//! Proxy layer towards the authoritative licensing backend

pub mod client;
pub mod resources;

pub use client::{UpstreamClient, UpstreamError, UpstreamResponse};
pub use resources::ProxyResource;
