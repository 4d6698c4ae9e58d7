// # API request descriptor
//
// Every call to the custom DNS API is a GET against one endpoint with the
// operation encoded in the query string:
//
// ```text
// ?auth=<key>&customdns&action=get
// ?auth=<key>&customdns&action=add&domain=<domain>&ip=<ip>&reload=True
// ```
//
// `ApiRequest` carries those fields typed; `build_query_string` is the one
// place the encoding rule lives.

use crate::model::{Action, Entry};
use std::fmt;

/// Parameter that selects the custom DNS endpoint; always sent bare
const CUSTOMDNS_FLAG: &str = "customdns";

/// Serialize ordered parameters into a query string
///
/// A `None` value emits the bare key, a `Some(value)` emits `key=value`.
/// Pairs are joined with `&` in the order given. Values are written as-is.
pub fn build_query_string(params: &[(&str, Option<&str>)]) -> String {
    params
        .iter()
        .map(|(key, value)| match value {
            Some(value) => format!("{}={}", key, value),
            None => (*key).to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Render a boolean the way the API has always received it
fn wire_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// A single request to the custom DNS API
#[derive(Clone, PartialEq, Eq)]
pub struct ApiRequest {
    auth: String,
    action: Action,
    entry: Option<Entry>,
    reload: Option<bool>,
}

impl ApiRequest {
    /// Enumerate all custom DNS entries
    pub fn list(auth: impl Into<String>) -> Self {
        Self {
            auth: auth.into(),
            action: Action::Get,
            entry: None,
            reload: None,
        }
    }

    /// Add or delete one entry, optionally reloading the resolver
    pub fn mutation(auth: impl Into<String>, action: Action, entry: Entry, reload: bool) -> Self {
        Self {
            auth: auth.into(),
            action,
            entry: Some(entry),
            reload: Some(reload),
        }
    }

    /// The action discriminator
    pub fn action(&self) -> Action {
        self.action
    }

    /// The entry a mutation targets
    pub fn entry(&self) -> Option<&Entry> {
        self.entry.as_ref()
    }

    /// The reload directive of a mutation
    pub fn reload(&self) -> Option<bool> {
        self.reload
    }

    /// Whether this request changes remote state
    pub fn is_mutation(&self) -> bool {
        self.action != Action::Get
    }

    /// Encode as a query string
    ///
    /// Order: `auth`, `customdns`, `action`, `domain`, `ip`, `reload`.
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<(&str, Option<&str>)> = vec![
            ("auth", Some(self.auth.as_str())),
            (CUSTOMDNS_FLAG, None),
            ("action", Some(self.action.as_str())),
        ];

        if let Some(entry) = &self.entry {
            params.push(("domain", Some(entry.domain.as_str())));
            params.push(("ip", Some(entry.ip.as_str())));
        }

        if let Some(reload) = self.reload {
            params.push(("reload", Some(wire_bool(reload))));
        }

        build_query_string(&params)
    }
}

// The auth key never shows up in debug output
impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("auth", &"<REDACTED>")
            .field("action", &self.action)
            .field("entry", &self.entry)
            .field("reload", &self.reload)
            .finish()
    }
}
