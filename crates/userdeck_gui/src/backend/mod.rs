//! Backend worker wiring.
//!
//! This module exposes the command/event protocol, the remote store boundary,
//! and the worker spawn helper used by the UI thread.

mod protocol;
mod store;
mod worker;

pub use protocol::{CoreCmd, CoreEvent, Operation, RequestId};
pub use store::{HttpUserStore, RemoteUserStore, StoreError};
pub use worker::{spawn_backend, BackendHandle};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use userdeck_core::{User, UserDraft, UserPatch};

    #[derive(Default)]
    struct FakeState {
        users: Vec<User>,
        next_id: u64,
        offline: bool,
        calls: usize,
    }

    /// In-memory store; clones share state so tests can inspect it.
    #[derive(Clone, Default)]
    struct FakeStore {
        state: Arc<Mutex<FakeState>>,
    }

    impl FakeStore {
        fn seeded(names: &[&str]) -> Self {
            let store = Self::default();
            {
                let mut state = store.state.lock().expect("fake state");
                for name in names {
                    state.next_id += 1;
                    let id = state.next_id;
                    state.users.push(User::with_assigned_id(
                        id,
                        UserDraft {
                            name: name.to_string(),
                            email: format!("{}@example.com", name.to_lowercase()),
                            ..UserDraft::default()
                        },
                    ));
                }
            }
            store
        }

        fn go_offline(&self) {
            self.state.lock().expect("fake state").offline = true;
        }

        fn calls(&self) -> usize {
            self.state.lock().expect("fake state").calls
        }

        fn with_state<T>(
            &self,
            f: impl FnOnce(&mut FakeState) -> Result<T, StoreError>,
        ) -> Result<T, StoreError> {
            let mut state = self.state.lock().expect("fake state");
            state.calls += 1;
            if state.offline {
                return Err(StoreError::Network("offline".to_string()));
            }
            f(&mut state)
        }
    }

    impl RemoteUserStore for FakeStore {
        fn list(&self) -> Result<Vec<User>, StoreError> {
            self.with_state(|state| Ok(state.users.clone()))
        }

        fn create(&self, draft: &UserDraft) -> Result<User, StoreError> {
            self.with_state(|state| {
                state.next_id += 1;
                let user = User::with_assigned_id(state.next_id, draft.clone());
                state.users.push(user.clone());
                Ok(user)
            })
        }

        fn update(&self, id: u64, patch: &UserPatch) -> Result<UserPatch, StoreError> {
            self.with_state(|state| {
                let user = state
                    .users
                    .iter_mut()
                    .find(|user| user.id == id)
                    .ok_or(StoreError::NotFound { id })?;
                *user = user.merged(patch);
                Ok(UserPatch {
                    id: Some(id),
                    ..patch.clone()
                })
            })
        }

        fn remove(&self, id: u64) -> Result<(), StoreError> {
            self.with_state(|state| {
                let before = state.users.len();
                state.users.retain(|user| user.id != id);
                if state.users.len() == before {
                    return Err(StoreError::NotFound { id });
                }
                Ok(())
            })
        }
    }

    fn recv_event(rx: &crossbeam_channel::Receiver<CoreEvent>) -> CoreEvent {
        rx.recv_timeout(Duration::from_secs(2))
            .expect("expected backend event")
    }

    #[test]
    fn backend_lists_users() {
        let backend = spawn_backend(FakeStore::seeded(&["Ada", "Grace"])).expect("spawn");
        backend
            .cmd_tx
            .send(CoreCmd::ListUsers {
                request: RequestId(1),
            })
            .expect("send list");

        match recv_event(&backend.evt_rx) {
            CoreEvent::UsersLoaded { request, users } => {
                assert_eq!(request, RequestId(1));
                let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
                assert_eq!(names, vec!["Ada", "Grace"]);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn backend_creates_updates_and_removes_user() {
        let backend = spawn_backend(FakeStore::default()).expect("spawn");

        backend
            .cmd_tx
            .send(CoreCmd::CreateUser {
                request: RequestId(1),
                draft: UserDraft {
                    name: "Linus".to_string(),
                    email: "linus@example.com".to_string(),
                    ..UserDraft::default()
                },
            })
            .expect("send create");
        let created_id = match recv_event(&backend.evt_rx) {
            CoreEvent::UserCreated { user, .. } => {
                assert_eq!(user.name, "Linus");
                user.id
            }
            other => panic!("unexpected event: {:?}", other),
        };

        backend
            .cmd_tx
            .send(CoreCmd::UpdateUser {
                request: RequestId(2),
                id: created_id,
                patch: UserPatch {
                    name: Some("Linus T".to_string()),
                    ..UserPatch::default()
                },
            })
            .expect("send update");
        match recv_event(&backend.evt_rx) {
            CoreEvent::UserUpdated { request, id, changes } => {
                assert_eq!(request, RequestId(2));
                assert_eq!(id, created_id);
                assert_eq!(changes.name.as_deref(), Some("Linus T"));
            }
            other => panic!("unexpected event: {:?}", other),
        }

        backend
            .cmd_tx
            .send(CoreCmd::RemoveUser {
                request: RequestId(3),
                id: created_id,
            })
            .expect("send remove");
        match recv_event(&backend.evt_rx) {
            CoreEvent::UserRemoved { id, .. } => assert_eq!(id, created_id),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn backend_reports_failures_with_request_and_operation() {
        let store = FakeStore::seeded(&["Ada"]);
        let backend = spawn_backend(store.clone()).expect("spawn");

        backend
            .cmd_tx
            .send(CoreCmd::RemoveUser {
                request: RequestId(7),
                id: 42,
            })
            .expect("send remove");
        match recv_event(&backend.evt_rx) {
            CoreEvent::Failed {
                request,
                operation,
                error,
            } => {
                assert_eq!(request, RequestId(7));
                assert_eq!(operation, Operation::Remove { id: 42 });
                assert_eq!(error, StoreError::NotFound { id: 42 });
            }
            other => panic!("unexpected event: {:?}", other),
        }

        store.go_offline();
        backend
            .cmd_tx
            .send(CoreCmd::ListUsers {
                request: RequestId(8),
            })
            .expect("send list");
        match recv_event(&backend.evt_rx) {
            CoreEvent::Failed {
                operation, error, ..
            } => {
                assert_eq!(operation, Operation::List);
                assert!(matches!(error, StoreError::Network(_)));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn backend_attempts_each_call_once() {
        let store = FakeStore::default();
        store.go_offline();
        let backend = spawn_backend(store.clone()).expect("spawn");
        backend
            .cmd_tx
            .send(CoreCmd::ListUsers {
                request: RequestId(1),
            })
            .expect("send list");
        let _ = recv_event(&backend.evt_rx);
        assert_eq!(store.calls(), 1);
    }
}
