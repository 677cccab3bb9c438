//! Overlay arbitration driven through app intents and backend results.

use super::*;

#[test]
fn only_one_overlay_is_open_at_a_time() {
    let mut harness = loaded_app();
    harness.app.open_add();
    harness.app.open_edit(1);
    assert_eq!(harness.app.session.state(), SessionState::Editing(1));

    harness.app.open_add();
    assert_eq!(harness.app.session.state(), SessionState::Adding);
    assert!(harness.app.session.form().name.is_empty());
}

#[test]
fn invalid_form_sends_no_command() {
    let mut harness = loaded_app();
    harness.app.open_add();
    harness.fill_form("", "not-an-email");
    harness.app.submit_session();

    harness.assert_no_cmd();
    let errors = harness.app.session.field_errors();
    assert_eq!(
        errors.get(&FormField::Name).map(String::as_str),
        Some("Name is required")
    );
    assert_eq!(
        errors.get(&FormField::Email).map(String::as_str),
        Some("Invalid email")
    );
}

#[test]
fn remote_validation_errors_stay_in_the_form() {
    let mut harness = loaded_app();
    harness.app.open_add();
    harness.fill_form("Ada", "ada@example.com");
    harness.app.submit_session();
    let (request, _) = expect_create(&harness);

    harness.app.apply_event(CoreEvent::Failed {
        request,
        operation: Operation::Create,
        error: validation_error(FormField::Email, "Email already taken"),
    });

    assert_eq!(harness.app.session.state(), SessionState::Adding);
    assert_eq!(
        harness
            .app
            .session
            .field_errors()
            .get(&FormField::Email)
            .map(String::as_str),
        Some("Email already taken")
    );
    assert!(harness.app.notices.is_empty());
}

#[test]
fn late_create_is_applied_after_cancel() {
    let mut harness = loaded_app();
    harness.app.open_add();
    harness.fill_form("Ada", "ada@example.com");
    harness.app.submit_session();
    let (request, draft) = expect_create(&harness);
    harness.app.cancel_session();

    harness.app.apply_event(CoreEvent::UserCreated {
        request,
        user: User::with_assigned_id(11, draft),
    });

    assert_eq!(harness.collection_ids(), vec![11, 1, 2]);
    assert_eq!(harness.app.session.state(), SessionState::Idle);
}

#[test]
fn stale_success_does_not_close_newer_overlay() {
    let mut harness = loaded_app();
    harness.app.open_add();
    harness.fill_form("Ada", "ada@example.com");
    harness.app.submit_session();
    let (request, draft) = expect_create(&harness);
    harness.app.open_edit(2);

    harness.app.apply_event(CoreEvent::UserCreated {
        request,
        user: User::with_assigned_id(11, draft),
    });

    assert_eq!(harness.app.session.state(), SessionState::Editing(2));
    assert_eq!(harness.collection_ids(), vec![11, 1, 2]);
}

#[test]
fn stale_validation_failure_becomes_a_notice() {
    let mut harness = loaded_app();
    harness.app.open_add();
    harness.fill_form("Ada", "ada@example.com");
    harness.app.submit_session();
    let (request, _) = expect_create(&harness);
    harness.app.cancel_session();

    harness.app.apply_event(CoreEvent::Failed {
        request,
        operation: Operation::Create,
        error: validation_error(FormField::Email, "Email already taken"),
    });

    assert_eq!(harness.app.session.state(), SessionState::Idle);
    assert_eq!(harness.app.notices.len(), 1);
}

#[test]
fn deleting_the_edit_target_closes_the_overlay() {
    let mut harness = loaded_app();
    harness.app.open_edit(1);
    harness.app.delete_user(1);
    let (request, id) = expect_remove(&harness);

    harness
        .app
        .apply_event(CoreEvent::UserRemoved { request, id });

    assert_eq!(harness.app.session.state(), SessionState::Idle);
    assert_eq!(harness.collection_ids(), vec![2]);
}

#[test]
fn deleting_another_user_keeps_the_overlay() {
    let mut harness = loaded_app();
    harness.app.open_edit(1);
    harness.app.delete_user(2);
    let (request, id) = expect_remove(&harness);

    harness
        .app
        .apply_event(CoreEvent::UserRemoved { request, id });

    assert_eq!(harness.app.session.state(), SessionState::Editing(1));
}

#[test]
fn submit_while_pending_is_ignored() {
    let mut harness = loaded_app();
    harness.app.open_add();
    harness.fill_form("Ada", "ada@example.com");
    harness.app.submit_session();
    harness.app.submit_session();

    let _ = expect_create(&harness);
    harness.assert_no_cmd();
}

#[test]
fn update_not_found_keeps_overlay_and_raises_notice() {
    let mut harness = loaded_app();
    harness.app.open_edit(1);
    harness.app.submit_session();
    let (request, id, _) = expect_update(&harness);

    harness.app.apply_event(CoreEvent::Failed {
        request,
        operation: Operation::Update { id },
        error: StoreError::NotFound { id },
    });

    assert_eq!(harness.app.session.state(), SessionState::Editing(1));
    assert_eq!(
        harness.app.session.submit_error(),
        Some("User 1 was not found")
    );
    assert_eq!(harness.app.notices.len(), 1);
    assert_eq!(harness.collection_ids(), vec![1, 2]);
}

#[test]
fn viewing_details_then_editing_clears_selection() {
    let mut harness = loaded_app();
    harness.app.select_user(2);
    assert_eq!(harness.app.selected_user().map(|user| user.id), Some(2));

    harness.app.open_edit(2);
    assert!(harness.app.selected_user().is_none());
}

#[test]
fn removing_selected_user_clears_details() {
    let mut harness = loaded_app();
    harness.app.select_user(1);
    harness.app.delete_user(1);
    let (request, id) = expect_remove(&harness);
    harness
        .app
        .apply_event(CoreEvent::UserRemoved { request, id });
    assert!(harness.app.selected_user().is_none());
}
