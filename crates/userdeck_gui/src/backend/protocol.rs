//! Protocol types for the backend worker.
//!
//! Every command carries a [`RequestId`] minted by the UI thread; the matching
//! event echoes it back so a result can be routed to whatever issued it, even
//! after the issuer has moved on.

use super::StoreError;
use std::fmt;
use userdeck_core::{User, UserDraft, UserPatch};

/// Correlates a command with the event that answers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Remote operation a command or failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update { id: u64 },
    Remove { id: u64 },
}

impl Operation {
    /// Verb used in user-facing failure messages.
    pub fn verb(self) -> &'static str {
        match self {
            Operation::List => "Load",
            Operation::Create => "Create",
            Operation::Update { .. } => "Update",
            Operation::Remove { .. } => "Delete",
        }
    }
}

/// Commands issued by the UI thread for the backend worker to execute.
#[derive(Debug)]
pub enum CoreCmd {
    /// Fetch the full user list.
    ListUsers { request: RequestId },
    /// Create a user from a validated draft.
    CreateUser { request: RequestId, draft: UserDraft },
    /// Send a partial update for an existing user.
    UpdateUser {
        request: RequestId,
        id: u64,
        patch: UserPatch,
    },
    /// Delete a user by id.
    RemoveUser { request: RequestId, id: u64 },
}

impl CoreCmd {
    pub fn request(&self) -> RequestId {
        match self {
            CoreCmd::ListUsers { request }
            | CoreCmd::CreateUser { request, .. }
            | CoreCmd::UpdateUser { request, .. }
            | CoreCmd::RemoveUser { request, .. } => *request,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            CoreCmd::ListUsers { .. } => Operation::List,
            CoreCmd::CreateUser { .. } => Operation::Create,
            CoreCmd::UpdateUser { id, .. } => Operation::Update { id: *id },
            CoreCmd::RemoveUser { id, .. } => Operation::Remove { id: *id },
        }
    }
}

/// Events produced by the backend worker and polled by the UI thread.
#[derive(Debug)]
pub enum CoreEvent {
    /// The remote returned its current user list.
    UsersLoaded { request: RequestId, users: Vec<User> },
    /// The remote confirmed a new user.
    UserCreated { request: RequestId, user: User },
    /// The remote confirmed an update; `changes` is whatever it echoed back.
    UserUpdated {
        request: RequestId,
        id: u64,
        changes: UserPatch,
    },
    /// The remote confirmed a deletion.
    UserRemoved { request: RequestId, id: u64 },
    /// The remote call failed; nothing was applied.
    Failed {
        request: RequestId,
        operation: Operation,
        error: StoreError,
    },
}

impl CoreEvent {
    pub fn request(&self) -> RequestId {
        match self {
            CoreEvent::UsersLoaded { request, .. }
            | CoreEvent::UserCreated { request, .. }
            | CoreEvent::UserUpdated { request, .. }
            | CoreEvent::UserRemoved { request, .. }
            | CoreEvent::Failed { request, .. } => *request,
        }
    }
}
