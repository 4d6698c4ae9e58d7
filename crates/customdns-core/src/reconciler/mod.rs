//! Reconcile one custom DNS entry
//!
//! The Reconciler is responsible for:
//! - Querying current membership via [`RemoteEntryQuery`]
//! - Deciding whether a mutation is needed
//! - Issuing at most one mutating request (unless in dry-run)
//!
//! ## Flow
//!
//! ```text
//!  Start ──► Queried ──┬──► NoOpComplete ───────────────────────┐
//!                      │                                        │
//!                      └──► MutationRequired ──┬──► DryRunReported ──► Done
//!                                              │                       ▲
//!                                              └──► MutationIssued ────┘
//! ```
//!
//! Nothing persists between invocations; each call starts at `Start`.

use crate::error::Result;
use crate::model::{Action, DesiredState, Presence};
use crate::query::RemoteEntryQuery;
use crate::request::ApiRequest;
use crate::traits::ApiTransport;
use tracing::{debug, info};

/// What the idempotency rule decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Remote state already matches
    NoOp,
    /// One request with this action converges remote state
    Mutate(Action),
}

/// Apply the idempotency rule
///
/// | member | desired | plan           |
/// |--------|---------|----------------|
/// | yes    | Present | NoOp           |
/// | no     | Absent  | NoOp           |
/// | no     | Present | Mutate(Add)    |
/// | yes    | Absent  | Mutate(Delete) |
pub fn plan(is_member: bool, desired: Presence) -> Plan {
    match (is_member, desired) {
        (true, Presence::Present) => Plan::NoOp,
        (false, Presence::Absent) => Plan::NoOp,
        (false, Presence::Present) => Plan::Mutate(Action::Add),
        (true, Presence::Absent) => Plan::Mutate(Action::Delete),
    }
}

/// Result of one reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Remote state already matched, nothing sent
    Unchanged,
    /// A mutation is required but dry-run suppressed it
    WouldChange {
        /// The action that would have been sent
        action: Action,
    },
    /// The mutating request completed
    Changed {
        /// The action that was sent
        action: Action,
    },
}

impl ReconcileOutcome {
    /// Whether remote state differs (or would differ) from before
    pub fn changed(&self) -> bool {
        !matches!(self, ReconcileOutcome::Unchanged)
    }

    /// The action sent or suppressed, if any
    pub fn action(&self) -> Option<Action> {
        match self {
            ReconcileOutcome::Unchanged => None,
            ReconcileOutcome::WouldChange { action } | ReconcileOutcome::Changed { action } => {
                Some(*action)
            }
        }
    }
}

/// Per-invocation phases, logged at debug level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePhase {
    Start,
    Queried { is_member: bool },
    NoOpComplete,
    MutationRequired { action: Action },
    DryRunReported { action: Action },
    MutationIssued { action: Action },
    Done,
}

/// Converges one remote entry to its desired state
///
/// The reconciler holds a transport and a credential; it keeps no state
/// between calls.
pub struct Reconciler {
    /// Transport to the custom DNS API
    transport: Box<dyn ApiTransport>,

    /// API key sent as the `auth` parameter
    auth: String,
}

impl Reconciler {
    /// Create a new reconciler
    pub fn new(transport: Box<dyn ApiTransport>, auth: impl Into<String>) -> Self {
        Self {
            transport,
            auth: auth.into(),
        }
    }

    /// Membership query bound to this reconciler's transport
    pub fn query(&self) -> RemoteEntryQuery<'_> {
        RemoteEntryQuery::new(self.transport.as_ref(), &self.auth)
    }

    /// Reconcile remote state with `desired`
    ///
    /// Issues the enumeration request, then at most one mutation. With
    /// `dry_run` set the mutation is never sent and the outcome is
    /// [`ReconcileOutcome::WouldChange`].
    ///
    /// # Errors
    ///
    /// Any transport or protocol error from either request is returned as-is.
    /// A failed mutation may or may not have been applied remotely.
    pub async fn reconcile(&self, desired: &DesiredState, dry_run: bool) -> Result<ReconcileOutcome> {
        desired.validate()?;
        self.enter(ReconcilePhase::Start);

        let is_member = self.query().is_present(&desired.entry).await?;
        self.enter(ReconcilePhase::Queried { is_member });

        let action = match plan(is_member, desired.presence) {
            Plan::NoOp => {
                self.enter(ReconcilePhase::NoOpComplete);
                info!(
                    "Custom DNS entry already {:?}: {}",
                    desired.presence, desired.entry
                );
                self.enter(ReconcilePhase::Done);
                return Ok(ReconcileOutcome::Unchanged);
            }
            Plan::Mutate(action) => action,
        };
        self.enter(ReconcilePhase::MutationRequired { action });

        if dry_run {
            self.enter(ReconcilePhase::DryRunReported { action });
            info!(
                "[DRY-RUN] Would {} custom DNS entry: {} (reload: {})",
                action, desired.entry, desired.reload
            );
            self.enter(ReconcilePhase::Done);
            return Ok(ReconcileOutcome::WouldChange { action });
        }

        let request = ApiRequest::mutation(
            self.auth.as_str(),
            action,
            desired.entry.clone(),
            desired.reload,
        );
        self.transport.execute(&request).await?;
        self.enter(ReconcilePhase::MutationIssued { action });

        info!(
            "Custom DNS entry {}: {} (reload: {})",
            match action {
                Action::Delete => "deleted",
                _ => "added",
            },
            desired.entry,
            desired.reload
        );
        self.enter(ReconcilePhase::Done);

        Ok(ReconcileOutcome::Changed { action })
    }

    fn enter(&self, phase: ReconcilePhase) {
        debug!(transport = self.transport.transport_name(), ?phase, "reconcile phase");
    }
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("transport", &self.transport.transport_name())
            .field("auth", &"<REDACTED>")
            .finish()
    }
}
