//! App-level tests that drive state through hand-fed backend events.

use super::session::SessionState;
use super::*;
use crate::backend::{CoreCmd, CoreEvent, Operation, StoreError};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use userdeck_core::{FieldErrors, FormField, MemoryPreferenceStore, UserDraft, UserPatch};

mod search_and_theme;
mod session_flow;

struct TestHarness {
    app: UserDeckApp,
    cmd_rx: Receiver<CoreCmd>,
    evt_tx: Sender<CoreEvent>,
    prefs: MemoryPreferenceStore,
}

impl TestHarness {
    /// Next command the app sent to the worker.
    ///
    /// # Panics
    /// Panics if no command is waiting.
    fn expect_cmd(&self) -> CoreCmd {
        self.cmd_rx.try_recv().expect("expected a backend command")
    }

    fn assert_no_cmd(&self) {
        assert!(matches!(self.cmd_rx.try_recv(), Err(TryRecvError::Empty)));
    }

    /// Answer the initial list request with `users`.
    fn load(&mut self, users: Vec<User>) {
        let request = match self.expect_cmd() {
            CoreCmd::ListUsers { request } => request,
            other => panic!("expected list command, got {:?}", other),
        };
        self.app
            .apply_event(CoreEvent::UsersLoaded { request, users });
    }

    fn visible_ids(&self) -> Vec<u64> {
        self.app.visible_users().iter().map(|user| user.id).collect()
    }

    fn collection_ids(&self) -> Vec<u64> {
        self.app.controller.users().iter().map(|user| user.id).collect()
    }

    fn fill_form(&mut self, name: &str, email: &str) {
        let form = self.app.session.form_mut();
        form.name = name.to_string();
        form.email = email.to_string();
    }
}

fn user(id: u64, name: &str, email: &str, username: Option<&str>) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        username: username.map(ToString::to_string),
        phone: None,
        website: None,
        company: None,
        address: None,
    }
}

fn seed_users() -> Vec<User> {
    vec![
        user(1, "John Doe", "john@a.com", Some("jdoe")),
        user(2, "Jane Roe", "jane@b.com", Some("jroe")),
    ]
}

fn test_config() -> Config {
    Config {
        api_url: "http://127.0.0.1:9".to_string(),
        ..Config::default()
    }
}

fn make_app_with_prefs(prefs: MemoryPreferenceStore) -> TestHarness {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();
    let app = UserDeckApp::from_parts(
        BackendHandle::from_test_channels(cmd_tx, evt_rx),
        Box::new(prefs.clone()),
        &test_config(),
    );
    TestHarness {
        app,
        cmd_rx,
        evt_tx,
        prefs,
    }
}

fn make_app() -> TestHarness {
    make_app_with_prefs(MemoryPreferenceStore::new())
}

/// App with the seed users already loaded.
fn loaded_app() -> TestHarness {
    let mut harness = make_app();
    harness.load(seed_users());
    harness
}

fn validation_error(field: FormField, message: &str) -> StoreError {
    StoreError::Validation {
        message: "Validation failed".to_string(),
        fields: FieldErrors::from([(field, message.to_string())]),
    }
}

fn expect_create(harness: &TestHarness) -> (RequestId, UserDraft) {
    match harness.expect_cmd() {
        CoreCmd::CreateUser { request, draft } => (request, draft),
        other => panic!("expected create command, got {:?}", other),
    }
}

fn expect_update(harness: &TestHarness) -> (RequestId, u64, UserPatch) {
    match harness.expect_cmd() {
        CoreCmd::UpdateUser { request, id, patch } => (request, id, patch),
        other => panic!("expected update command, got {:?}", other),
    }
}

fn expect_remove(harness: &TestHarness) -> (RequestId, u64) {
    match harness.expect_cmd() {
        CoreCmd::RemoveUser { request, id } => (request, id),
        other => panic!("expected remove command, got {:?}", other),
    }
}

#[test]
fn startup_requests_list_and_polls_events() {
    let mut harness = make_app();
    let request = match harness.expect_cmd() {
        CoreCmd::ListUsers { request } => request,
        other => panic!("expected list command, got {:?}", other),
    };
    assert!(harness.app.controller.is_loading());

    harness
        .evt_tx
        .send(CoreEvent::UsersLoaded {
            request,
            users: seed_users(),
        })
        .expect("send event");
    harness.app.poll_backend();

    assert!(!harness.app.controller.is_loading());
    assert_eq!(harness.visible_ids(), vec![1, 2]);
}
