//! Owner of the authoritative user collection.
//!
//! Every mutation is a command to the backend worker; the collection changes
//! only when the matching event reports a confirmed result. Failed calls leave
//! the collection exactly as it was.
//!
//! Overlapping calls for the same id are not coordinated: events are applied
//! in arrival order, so the last response to arrive wins.

use crate::backend::{BackendHandle, CoreCmd, CoreEvent, Operation, RequestId, StoreError};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};
use userdeck_core::{User, UserDraft, UserPatch};

/// What applying one backend event did to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The collection was replaced by a fresh list.
    Loaded { request: RequestId, count: usize },
    /// A confirmed user was placed at the head.
    Created { request: RequestId, id: u64 },
    /// An update round trip finished; `applied` is false when the id was no
    /// longer present locally.
    Updated {
        request: RequestId,
        id: u64,
        applied: bool,
    },
    /// A confirmed deletion was applied.
    Removed { request: RequestId, id: u64 },
    /// The call failed; the collection is untouched.
    Failed {
        request: RequestId,
        operation: Operation,
        error: StoreError,
    },
}

pub(crate) struct CollectionController {
    backend: BackendHandle,
    users: Vec<User>,
    next_request: u64,
    in_flight: BTreeMap<RequestId, Operation>,
    load_error: Option<String>,
}

impl CollectionController {
    pub(crate) fn new(backend: BackendHandle) -> Self {
        Self {
            backend,
            users: Vec::new(),
            next_request: 0,
            in_flight: BTreeMap::new(),
            load_error: None,
        }
    }

    /// Current collection snapshot, most recently created first.
    pub(crate) fn users(&self) -> &[User] {
        &self.users
    }

    pub(crate) fn get(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.in_flight.values().any(|op| *op == Operation::List)
    }

    /// Message of the last failed load, cleared by the next successful one.
    pub(crate) fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub(crate) fn has_pending(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Next event from the worker, if one is ready.
    pub(crate) fn next_event(&self) -> Option<CoreEvent> {
        self.backend.evt_rx.try_recv().ok()
    }

    fn dispatch(
        &mut self,
        build: impl FnOnce(RequestId) -> CoreCmd,
    ) -> Result<RequestId, StoreError> {
        self.next_request += 1;
        let request = RequestId(self.next_request);
        let cmd = build(request);
        let operation = cmd.operation();
        if self.backend.cmd_tx.send(cmd).is_err() {
            warn!("backend unavailable; dropping {} {}", operation.verb(), request);
            return Err(StoreError::Network("backend unavailable".to_string()));
        }
        debug!("dispatched {} {}", operation.verb(), request);
        self.in_flight.insert(request, operation);
        Ok(request)
    }

    /// Fetch the remote list; on success it replaces the collection.
    pub(crate) fn load(&mut self) -> Result<RequestId, StoreError> {
        self.dispatch(|request| CoreCmd::ListUsers { request })
            .inspect_err(|err| self.load_error = Some(err.to_string()))
    }

    /// Ask the remote to create `draft`; the confirmed user is prepended.
    pub(crate) fn create_entity(&mut self, draft: UserDraft) -> Result<RequestId, StoreError> {
        self.dispatch(|request| CoreCmd::CreateUser { request, draft })
    }

    /// Ask the remote to update `id`; the response is merged in place.
    pub(crate) fn update_entity(
        &mut self,
        id: u64,
        patch: UserPatch,
    ) -> Result<RequestId, StoreError> {
        self.dispatch(|request| CoreCmd::UpdateUser { request, id, patch })
    }

    /// Ask the remote to delete `id`; the user is dropped once confirmed.
    pub(crate) fn remove_entity(&mut self, id: u64) -> Result<RequestId, StoreError> {
        self.dispatch(|request| CoreCmd::RemoveUser { request, id })
    }

    /// Apply one worker event to the collection.
    pub(crate) fn apply(&mut self, event: CoreEvent) -> Outcome {
        self.in_flight.remove(&event.request());
        match event {
            CoreEvent::UsersLoaded { request, users } => {
                self.users = unique_by_id(users);
                self.load_error = None;
                Outcome::Loaded {
                    request,
                    count: self.users.len(),
                }
            }
            CoreEvent::UserCreated { request, user } => {
                let id = user.id;
                if let Some(pos) = self.position(id) {
                    let replaced = self.users.remove(pos);
                    warn!(
                        "remote reused id {} on create; '{}' replaces '{}'",
                        id, user.name, replaced.name
                    );
                }
                self.users.insert(0, user);
                Outcome::Created { request, id }
            }
            CoreEvent::UserUpdated {
                request,
                id,
                changes,
            } => {
                let applied = match self.position(id) {
                    Some(pos) => {
                        self.users[pos] = self.users[pos].merged(&changes);
                        true
                    }
                    None => {
                        debug!("update for user {} arrived after it left the collection", id);
                        false
                    }
                };
                Outcome::Updated {
                    request,
                    id,
                    applied,
                }
            }
            CoreEvent::UserRemoved { request, id } => {
                self.users.retain(|user| user.id != id);
                Outcome::Removed { request, id }
            }
            CoreEvent::Failed {
                request,
                operation,
                error,
            } => {
                if operation == Operation::List {
                    self.load_error = Some(error.to_string());
                }
                Outcome::Failed {
                    request,
                    operation,
                    error,
                }
            }
        }
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.users.iter().position(|user| user.id == id)
    }
}

fn unique_by_id(users: Vec<User>) -> Vec<User> {
    let total = users.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<User> = users.into_iter().filter(|user| seen.insert(user.id)).collect();
    if unique.len() != total {
        warn!(
            "dropped {} duplicate user id(s) from list response",
            total - unique.len()
        );
    }
    unique
}
