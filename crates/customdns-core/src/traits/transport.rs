// # API Transport Trait
//
// Defines the seam between the reconcile logic and the network.
//
// ## Implementations
//
// - Pi-hole admin API over HTTP: `customdns-pihole` crate
//
// ## Usage
//
// ```rust,ignore
// use customdns_core::{ApiRequest, ApiTransport};
//
// async fn dump(transport: &dyn ApiTransport) -> customdns_core::Result<()> {
//     let body = transport.execute(&ApiRequest::list("api-key")).await?;
//     println!("{}", body);
//     Ok(())
// }
// ```

use crate::request::ApiRequest;
use async_trait::async_trait;

/// Trait for delivering requests to the custom DNS API
///
/// A transport knows where the service lives and how to reach it. It does
/// not know what the requests mean: deciding whether a mutation is needed
/// belongs to [`Reconciler`](crate::Reconciler).
///
/// # Contract
///
/// - One call to [`execute`](ApiTransport::execute) issues exactly one request
/// - No retry, no backoff, no caching of responses
/// - The auth parameter never appears in logs or error messages
///
/// # Errors
///
/// - [`Error::Transport`](crate::Error::Transport): the request could not
///   complete, or the body could not be read
/// - [`Error::Protocol`](crate::Error::Protocol): the service answered with a
///   non-success status
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Issue one request and return the response body
    async fn execute(&self, request: &ApiRequest) -> Result<String, crate::Error>;

    /// Get the transport name (for logging/debugging)
    fn transport_name(&self) -> &'static str;
}
