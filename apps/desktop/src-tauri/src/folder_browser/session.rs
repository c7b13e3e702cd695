//! Navigation session for the folder picker.
//!
//! Owns the current path, the back/forward history, and the view mode.
//! The session itself never performs I/O: navigation methods return a
//! [`NavigationRequest`] ticket, the caller runs the listing against a
//! [`FolderSource`](super::FolderSource) without holding the session
//! lock, and feeds the outcome back through [`NavigationSession::apply`].
//!
//! Every ticket carries the epoch current at issue time and each new
//! navigation bumps the epoch, so when the user navigates away from a
//! folder whose listing is still in flight, the late result is recognized
//! as stale and dropped — the most recently issued navigation always
//! wins, regardless of the order responses arrive in.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{BrowseError, FolderItem, FolderListing};
use crate::path_index::parent_path;

/// How the folder list renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    List,
    #[default]
    Grid,
}

/// Lifecycle phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    /// Picker not shown; no state retained.
    Closed,
    /// A listing request is in flight.
    Loading,
    /// Last listing succeeded.
    Ready,
    /// Last listing failed; message in `error`.
    Error,
}

/// Ticket for one outbound listing request.
#[derive(Debug, Clone)]
pub struct NavigationRequest {
    pub epoch: u64,
    pub path: String,
    pub add_to_history: bool,
}

/// Read-only view of the session for the UI.
///
/// Back/forward availability is derived from the history cursor alone, so
/// the frontend can enable or disable its controls without waiting on a
/// pending listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub current_path: String,
    pub view_mode: ViewMode,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub can_go_up: bool,
    pub items: Vec<FolderItem>,
    pub error: Option<String>,
}

/// The folder picker's state machine.
pub struct NavigationSession {
    phase: SessionPhase,
    current_path: String,
    history: Vec<String>,
    /// `None` iff `history` is empty; otherwise a valid index into it.
    history_index: Option<usize>,
    view_mode: ViewMode,
    items: Vec<FolderItem>,
    error: Option<String>,
    /// Monotonic across the session's whole lifetime, including reopens.
    epoch: u64,
}

impl NavigationSession {
    pub fn new(view_mode: ViewMode) -> NavigationSession {
        NavigationSession {
            phase: SessionPhase::Closed,
            current_path: String::new(),
            history: Vec::new(),
            history_index: None,
            view_mode,
            items: Vec::new(),
            error: None,
            epoch: 0,
        }
    }

    /// Opens (or reopens) the picker: history cleared, path reset to the
    /// browse root. Returns the ticket for the initial root listing,
    /// which is untracked — history starts recording with the first
    /// user-driven navigation.
    pub fn open(&mut self) -> NavigationRequest {
        self.phase = SessionPhase::Loading;
        self.current_path = String::new();
        self.history.clear();
        self.history_index = None;
        self.items.clear();
        self.error = None;
        self.issue(String::new(), false)
    }

    /// Closes the picker and discards its state. In-flight listings are
    /// not cancelled; their results are dropped by [`Self::apply`].
    pub fn close(&mut self) {
        self.phase = SessionPhase::Closed;
        self.current_path = String::new();
        self.history.clear();
        self.history_index = None;
        self.items.clear();
        self.error = None;
    }

    /// Starts a history-tracked navigation to `path`. Legal in any open
    /// phase, including while another request is in flight — the newer
    /// request supersedes the older one.
    pub fn navigate(&mut self, path: &str) -> Option<NavigationRequest> {
        if self.phase == SessionPhase::Closed {
            return None;
        }
        Some(self.issue(path.to_string(), true))
    }

    /// Steps back in history. No-op at the oldest entry.
    pub fn back(&mut self) -> Option<NavigationRequest> {
        if self.phase == SessionPhase::Closed {
            return None;
        }
        let index = self.history_index?;
        if index == 0 {
            return None;
        }
        self.history_index = Some(index - 1);
        Some(self.issue(self.history[index - 1].clone(), false))
    }

    /// Steps forward in history. No-op at the newest entry.
    pub fn forward(&mut self) -> Option<NavigationRequest> {
        if self.phase == SessionPhase::Closed {
            return None;
        }
        let index = self.history_index?;
        if index + 1 >= self.history.len() {
            return None;
        }
        self.history_index = Some(index + 1);
        Some(self.issue(self.history[index + 1].clone(), false))
    }

    /// Navigates to the parent of the current path. "Up" is a forward
    /// move, not a history replay, so it is history-tracked. No-op at the
    /// browse root.
    pub fn up(&mut self) -> Option<NavigationRequest> {
        if self.phase == SessionPhase::Closed || self.current_path.is_empty() {
            return None;
        }
        let parent = parent_path(&self.current_path);
        Some(self.issue(parent, true))
    }

    /// Re-issues the listing for the current path, untracked.
    pub fn refresh(&mut self) -> Option<NavigationRequest> {
        if self.phase == SessionPhase::Closed {
            return None;
        }
        Some(self.issue(self.current_path.clone(), false))
    }

    /// Switches the view mode. When the picker is open this also re-issues
    /// the current listing — the frontend rebuilds the folder pane from a
    /// fresh listing on every mode switch, so the reload is part of the
    /// method's contract.
    pub fn switch_view_mode(&mut self, mode: ViewMode) -> Option<NavigationRequest> {
        self.view_mode = mode;
        self.refresh()
    }

    /// Feeds a listing outcome back into the session. Returns `false` if
    /// the result was discarded: the ticket is stale (a newer request was
    /// issued after it) or the session closed while the request was in
    /// flight. Stale results leave all state untouched.
    pub fn apply(
        &mut self,
        request: &NavigationRequest,
        result: Result<FolderListing, BrowseError>,
    ) -> bool {
        if request.epoch != self.epoch {
            debug!(
                "Discarding stale listing for {:?} (epoch {} < {})",
                request.path, request.epoch, self.epoch
            );
            return false;
        }
        if self.phase == SessionPhase::Closed {
            debug!("Discarding listing for {:?}: session closed", request.path);
            return false;
        }

        match result {
            Ok(listing) => {
                self.phase = SessionPhase::Ready;
                self.error = None;
                self.current_path = listing.current_path.clone();
                self.items = listing.items;
                if request.add_to_history {
                    self.push_history(listing.current_path);
                }
            }
            Err(err) => {
                // Path and history stay as they were; the user needs the
                // message to know why the folder didn't open.
                self.phase = SessionPhase::Error;
                self.error = Some(err.to_string());
            }
        }
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            current_path: self.current_path.clone(),
            view_mode: self.view_mode,
            can_go_back: self.history_index.is_some_and(|i| i > 0),
            can_go_forward: self
                .history_index
                .is_some_and(|i| i + 1 < self.history.len()),
            can_go_up: !self.current_path.is_empty(),
            items: self.items.clone(),
            error: self.error.clone(),
        }
    }

    fn issue(&mut self, path: String, add_to_history: bool) -> NavigationRequest {
        self.epoch += 1;
        self.phase = SessionPhase::Loading;
        NavigationRequest {
            epoch: self.epoch,
            path,
            add_to_history,
        }
    }

    /// Standard browser truncation rule: navigating from a point inside
    /// history discards the abandoned forward branch. Re-navigating to the
    /// entry under the cursor is not recorded twice.
    fn push_history(&mut self, path: String) {
        let insert_at = match self.history_index {
            Some(index) => {
                if self.history[index] == path {
                    return;
                }
                index + 1
            }
            None => 0,
        };
        self.history.truncate(insert_at);
        self.history.push(path);
        self.history_index = Some(self.history.len() - 1);
    }
}

// Direct state accessors, for assertions; production callers go through
// `snapshot`.
#[cfg(test)]
impl NavigationSession {
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_index(&self) -> Option<usize> {
        self.history_index
    }
}

impl Default for NavigationSession {
    fn default() -> Self {
        Self::new(ViewMode::default())
    }
}
