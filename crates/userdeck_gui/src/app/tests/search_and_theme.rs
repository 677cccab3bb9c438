//! Filtered view recomputation and theme persistence through the app.

use super::*;
use userdeck_core::constants::THEME_PREFERENCE_KEY;

#[test]
fn search_matches_case_insensitively() {
    let mut harness = loaded_app();
    harness.app.set_search_query("JOHN");
    assert_eq!(harness.visible_ids(), vec![1]);

    harness.app.set_search_query("@b.com");
    assert_eq!(harness.visible_ids(), vec![2]);
}

#[test]
fn blank_search_shows_full_collection_in_order() {
    let mut harness = loaded_app();
    harness.app.set_search_query("   ");
    assert_eq!(harness.visible_ids(), vec![1, 2]);
}

#[test]
fn filtered_view_follows_collection_changes() {
    let mut harness = loaded_app();
    harness.app.set_search_query("ada");
    assert!(harness.visible_ids().is_empty());

    let request = harness
        .app
        .controller
        .create_entity(UserDraft {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            ..UserDraft::default()
        })
        .expect("dispatch");
    let (_, draft) = expect_create(&harness);
    harness.app.apply_event(CoreEvent::UserCreated {
        request,
        user: User::with_assigned_id(7, draft),
    });

    assert_eq!(harness.visible_ids(), vec![7]);
}

#[test]
fn theme_toggle_persists_new_value() {
    let mut harness = make_app();
    assert!(!harness.app.theme.is_dark());

    harness.app.toggle_theme();
    assert!(harness.app.theme.is_dark());
    assert_eq!(
        harness.prefs.get(THEME_PREFERENCE_KEY).expect("read"),
        Some("dark".to_string())
    );

    harness.app.toggle_theme();
    assert_eq!(
        harness.prefs.get(THEME_PREFERENCE_KEY).expect("read"),
        Some("light".to_string())
    );
}

#[test]
fn persisted_dark_theme_is_restored() {
    let harness = make_app_with_prefs(MemoryPreferenceStore::with_value(
        THEME_PREFERENCE_KEY,
        "dark",
    ));
    assert!(harness.app.theme.is_dark());
}

#[test]
fn failed_theme_write_keeps_current_theme() {
    let mut harness = make_app_with_prefs(MemoryPreferenceStore::read_only());
    harness.app.toggle_theme();

    assert!(!harness.app.theme.is_dark());
    assert_eq!(
        harness.app.notices.back().map(|notice| notice.kind),
        Some(NoticeKind::Error)
    );
}
