//! Membership queries against the remote catalog

use crate::catalog::RemoteCatalog;
use crate::error::Result;
use crate::model::Entry;
use crate::request::ApiRequest;
use crate::traits::ApiTransport;
use tracing::debug;

/// Answers "is this (domain, ip) pair currently on the remote service?"
///
/// Every call fetches a fresh catalog. Failures propagate unchanged and are
/// never read as "absent".
pub struct RemoteEntryQuery<'a> {
    transport: &'a dyn ApiTransport,
    auth: &'a str,
}

impl<'a> RemoteEntryQuery<'a> {
    /// Create a query bound to a transport and credential
    pub fn new(transport: &'a dyn ApiTransport, auth: &'a str) -> Self {
        Self { transport, auth }
    }

    /// Fetch and parse the full catalog
    pub async fn fetch_catalog(&self) -> Result<RemoteCatalog> {
        let body = self.transport.execute(&ApiRequest::list(self.auth)).await?;
        let catalog = RemoteCatalog::from_body(&body)?;

        debug!(
            "Fetched {} custom DNS entries via {}",
            catalog.len(),
            self.transport.transport_name()
        );

        Ok(catalog)
    }

    /// Whether `entry` is currently a member of the remote catalog
    pub async fn is_present(&self, entry: &Entry) -> Result<bool> {
        Ok(self.fetch_catalog().await?.contains(entry))
    }
}
