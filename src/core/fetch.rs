//! Fetch bookkeeping shared by both pages.
//!
//! A page never fetches by itself. Transitions hand out a [`Ticket`]
//! describing the request; whoever executes it brings back a
//! [`Response`] carrying the same id, and the page decides through its
//! [`StalePolicy`] whether the result still applies.

use serde::{Deserialize, Serialize};

/// Identifies one issued fetch. Ids grow monotonically per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fetch the page wants executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<R> {
    pub id: RequestId,
    pub request: R,
}

/// Outcome of executing a [`Ticket`]
#[derive(Debug)]
pub struct Response<T, E> {
    pub id: RequestId,
    pub result: Result<T, E>,
}

impl<T, E> Response<T, E> {
    pub fn new(id: RequestId, result: Result<T, E>) -> Self {
        Self { id, result }
    }
}

/// Page load state: `Idle → Loading → {Success | Failure}`.
///
/// `Failure` keeps whatever the page showed before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// What to do with a response that is not the latest one issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Drop superseded responses; only the latest request updates the page
    #[default]
    Discard,

    /// Apply every response in arrival order. A slow, superseded fetch
    /// can overwrite newer results.
    LastWriteWins,
}

impl std::fmt::Display for StalePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StalePolicy::Discard => write!(f, "discard"),
            StalePolicy::LastWriteWins => write!(f, "last_write_wins"),
        }
    }
}

/// How a page handled a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Result applied to the page
    Applied,

    /// Response was superseded and dropped
    Discarded,

    /// Fetch failed; the page keeps its previous data
    Failed,
}

/// Issues request ids and remembers the latest one
#[derive(Debug, Clone, Default)]
pub struct Generation {
    issued: u64,
    latest: Option<RequestId>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new id; it becomes the latest
    pub fn issue(&mut self) -> RequestId {
        self.issued += 1;
        let id = RequestId(self.issued);
        self.latest = Some(id);
        id
    }

    pub fn latest(&self) -> Option<RequestId> {
        self.latest
    }

    pub fn is_latest(&self, id: RequestId) -> bool {
        self.latest == Some(id)
    }

    /// Forget the latest id. Responses to ids issued so far stop being
    /// current; the next `issue` starts a fresh latest.
    pub fn invalidate(&mut self) {
        self.latest = None;
    }

    /// Whether a response should touch page state under `policy`
    pub fn accepts(&self, id: RequestId, policy: StalePolicy) -> bool {
        match policy {
            StalePolicy::Discard => self.is_latest(id),
            StalePolicy::LastWriteWins => true,
        }
    }
}
