//! Test doubles and common utilities for reconcile contract tests
//!
//! These doubles stand in for the remote service without any network.

#![allow(dead_code)]

use customdns_core::error::{Error, Result};
use customdns_core::{Action, ApiRequest, ApiTransport, Entry};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scripted reply for one kind of request
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with this body
    Body(String),
    /// Fail as if the service were unreachable
    TransportFailure(String),
    /// Fail as if the service answered with garbage
    ProtocolFailure(String),
}

impl Reply {
    fn produce(&self) -> Result<String> {
        match self {
            Reply::Body(body) => Ok(body.clone()),
            Reply::TransportFailure(msg) => Err(Error::transport(msg.clone())),
            Reply::ProtocolFailure(msg) => Err(Error::protocol(msg.clone())),
        }
    }
}

/// Build an enumeration body from entries
pub fn catalog_body(entries: &[Entry]) -> String {
    let data: Vec<serde_json::Value> = entries
        .iter()
        .map(|e| serde_json::json!([e.domain, e.ip]))
        .collect();
    serde_json::json!({ "data": data }).to_string()
}

/// A transport that replays scripted replies and records every request
pub struct MockTransport {
    list_reply: Reply,
    mutation_reply: Reply,
    list_call_count: Arc<AtomicUsize>,
    mutation_call_count: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    /// A service holding exactly `entries`; mutations succeed
    pub fn with_entries(entries: &[Entry]) -> Self {
        Self::scripted(
            Reply::Body(catalog_body(entries)),
            Reply::Body(r#"{"success":true,"message":""}"#.to_string()),
        )
    }

    /// A service with custom replies
    pub fn scripted(list_reply: Reply, mutation_reply: Reply) -> Self {
        Self {
            list_reply,
            mutation_reply,
            list_call_count: Arc::new(AtomicUsize::new(0)),
            mutation_call_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a new MockTransport that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            list_reply: other.list_reply.clone(),
            mutation_reply: other.mutation_reply.clone(),
            list_call_count: Arc::clone(&other.list_call_count),
            mutation_call_count: Arc::clone(&other.mutation_call_count),
            requests: Arc::clone(&other.requests),
        }
    }

    /// Number of enumeration requests received
    pub fn list_call_count(&self) -> usize {
        self.list_call_count.load(Ordering::SeqCst)
    }

    /// Number of mutating requests received
    pub fn mutation_call_count(&self) -> usize {
        self.mutation_call_count.load(Ordering::SeqCst)
    }

    /// Every request received, in order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The mutating requests received, in order
    pub fn mutations(&self) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(ApiRequest::is_mutation)
            .collect()
    }
}

#[async_trait::async_trait]
impl ApiTransport for MockTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());

        if request.action() == Action::Get {
            self.list_call_count.fetch_add(1, Ordering::SeqCst);
            self.list_reply.produce()
        } else {
            self.mutation_call_count.fetch_add(1, Ordering::SeqCst);
            self.mutation_reply.produce()
        }
    }

    fn transport_name(&self) -> &'static str {
        "mock"
    }
}

pub const TEST_AUTH: &str = "test-api-key";

/// The entry used by the scenario tests
pub fn scenario_entry() -> Entry {
    Entry::new("a.example.com", "10.0.0.1")
}
