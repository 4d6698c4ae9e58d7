//! Core traits for customdns
//!
//! - [`ApiTransport`]: Deliver one request to the custom DNS API

pub mod transport;

pub use transport::ApiTransport;
