// # customdns-core
//
// Core library for converging Pi-hole custom DNS entries.
//
// ## Architecture Overview
//
// - **ApiTransport**: Trait for delivering one request to the custom DNS API
// - **ApiRequest**: Typed request descriptor with a single query-string encoder
// - **RemoteCatalog**: Parsed snapshot of the entries on the service
// - **RemoteEntryQuery**: Answers whether a (domain, ip) pair is present
// - **Reconciler**: Applies the idempotency rule and issues at most one mutation
//
// ## Design Principles
//
// 1. **Explicit inputs**: Connection and desired state are passed in, never global
// 2. **Fresh snapshots**: The catalog is fetched for every decision
// 3. **Single-shot**: One enumeration, at most one mutation, no retry
// 4. **Library-First**: The binary is a thin layer over this crate

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod reconciler;
pub mod request;
pub mod traits;

// Re-export core types for convenience
pub use catalog::RemoteCatalog;
pub use config::{ConnectionConfig, CustomDnsConfig, EntryConfig};
pub use error::{Error, Result};
pub use model::{Action, DesiredState, Entry, Presence};
pub use query::RemoteEntryQuery;
pub use reconciler::{Plan, ReconcileOutcome, Reconciler};
pub use request::{ApiRequest, build_query_string};
pub use traits::ApiTransport;
