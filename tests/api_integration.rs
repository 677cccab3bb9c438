//! End-to-end tests of the HTTP user store against the embedded users API.

#![cfg(feature = "gui")]

use std::time::Duration;
use userdeck::backend::{HttpUserStore, RemoteUserStore, StoreError};
use userdeck::{AppState, Config, EmbeddedServer, FormProfile, UserDraft, UserPatch};
use userdeck_core::FormField;

fn start(profile: FormProfile) -> (EmbeddedServer, HttpUserStore) {
    let config = Config {
        port: 0,
        form_profile: profile,
        ..Config::default()
    };
    let server = EmbeddedServer::start(AppState::with_sample_users(config), false)
        .expect("server");
    let store = HttpUserStore::new(&format!("{}/", server.base_url()), Duration::from_secs(5))
        .expect("store");
    (server, store)
}

#[test]
fn store_round_trips_every_operation() {
    let (_server, store) = start(FormProfile::Standard);

    let initial = store.list().expect("list");
    assert_eq!(initial.len(), 3);

    let created = store
        .create(&UserDraft {
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            website: Some("navy.example.mil".to_string()),
            ..UserDraft::default()
        })
        .expect("create");
    assert_eq!(created.id, 4);
    assert_eq!(created.website.as_deref(), Some("navy.example.mil"));

    let changes = store
        .update(
            created.id,
            &UserPatch {
                email: Some("hopper@example.com".to_string()),
                ..UserPatch::default()
            },
        )
        .expect("update");
    assert_eq!(changes.email.as_deref(), Some("hopper@example.com"));
    assert_eq!(changes.name.as_deref(), Some("Grace Hopper"));

    store.remove(created.id).expect("remove");
    let after = store.list().expect("list");
    assert_eq!(after, initial);
}

#[test]
fn store_maps_remote_failures() {
    let (_server, store) = start(FormProfile::Extended);

    match store.create(&UserDraft {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        ..UserDraft::default()
    }) {
        Err(StoreError::Validation { fields, .. }) => {
            assert_eq!(
                fields.get(&FormField::Username).map(String::as_str),
                Some("Username is required")
            );
        }
        other => panic!("expected validation failure, got {:?}", other),
    }

    assert_eq!(
        store.update(77, &UserPatch::default()),
        Err(StoreError::NotFound { id: 77 })
    );
    assert_eq!(store.remove(77), Err(StoreError::NotFound { id: 77 }));
}
