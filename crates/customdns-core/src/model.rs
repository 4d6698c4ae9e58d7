//! Value types shared by the query and reconcile paths

use serde::{Deserialize, Serialize};
use std::fmt;

/// One custom DNS mapping known to the remote service
///
/// Entries compare by the exact (domain, ip) pair. A domain may legitimately
/// map to several IPs, so two entries with the same domain are distinct
/// unless their IPs match too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    /// Domain name (e.g., "nas.home.lan")
    pub domain: String,
    /// IP the domain resolves to
    pub ip: String,
}

impl Entry {
    /// Create a new entry
    pub fn new(domain: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ip: ip.into(),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.domain, self.ip)
    }
}

/// Whether an entry should exist on the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// The entry must exist
    #[default]
    Present,
    /// The entry must not exist
    Absent,
}

impl Presence {
    /// The mutating action that moves the remote service towards this state
    pub fn action(self) -> Action {
        match self {
            Presence::Present => Action::Add,
            Presence::Absent => Action::Delete,
        }
    }
}

impl std::str::FromStr for Presence {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "present" => Ok(Presence::Present),
            "absent" => Ok(Presence::Absent),
            other => Err(crate::Error::invalid_input(format!(
                "state must be 'present' or 'absent', got '{}'",
                other
            ))),
        }
    }
}

/// Desired state for one entry, supplied once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredState {
    /// The entry being managed
    pub entry: Entry,
    /// Whether it should exist
    pub presence: Presence,
    /// Ask the service to reload its resolver along with the mutation
    pub reload: bool,
}

impl DesiredState {
    /// Desired state that the entry exists (reload on change)
    pub fn present(entry: Entry) -> Self {
        Self {
            entry,
            presence: Presence::Present,
            reload: true,
        }
    }

    /// Desired state that the entry does not exist (reload on change)
    pub fn absent(entry: Entry) -> Self {
        Self {
            entry,
            presence: Presence::Absent,
            reload: true,
        }
    }

    /// Set the reload directive
    pub fn with_reload(mut self, reload: bool) -> Self {
        self.reload = reload;
        self
    }

    /// Reject states the service cannot act on
    pub fn validate(&self) -> crate::Result<()> {
        if self.entry.domain.trim().is_empty() {
            return Err(crate::Error::invalid_input("domain cannot be empty"));
        }
        if self.entry.ip.trim().is_empty() {
            return Err(crate::Error::invalid_input("ip cannot be empty"));
        }
        Ok(())
    }
}

/// The `action` discriminator understood by the custom DNS API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Enumerate entries
    Get,
    /// Create an entry
    Add,
    /// Remove an entry
    Delete,
}

impl Action {
    /// Wire form of the action
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Get => "get",
            Action::Add => "add",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_compare_by_pair() {
        let a = Entry::new("a.example.com", "10.0.0.1");
        assert_eq!(a, Entry::new("a.example.com", "10.0.0.1"));
        assert_ne!(a, Entry::new("a.example.com", "10.0.0.2"));
        assert_ne!(a, Entry::new("b.example.com", "10.0.0.1"));
    }

    #[test]
    fn presence_maps_to_action() {
        assert_eq!(Presence::Present.action(), Action::Add);
        assert_eq!(Presence::Absent.action(), Action::Delete);
    }

    #[test]
    fn presence_parses_case_insensitively() {
        assert_eq!("present".parse::<Presence>().unwrap(), Presence::Present);
        assert_eq!("ABSENT".parse::<Presence>().unwrap(), Presence::Absent);
        assert!("gone".parse::<Presence>().is_err());
    }

    #[test]
    fn empty_domain_is_rejected() {
        let desired = DesiredState::present(Entry::new("  ", "10.0.0.1"));
        assert!(matches!(
            desired.validate(),
            Err(crate::Error::InvalidInput(_))
        ));
    }

    #[test]
    fn reload_defaults_to_true() {
        let desired = DesiredState::absent(Entry::new("a.example.com", "10.0.0.1"));
        assert!(desired.reload);
        assert!(!desired.with_reload(false).reload);
    }
}
