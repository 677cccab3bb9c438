//! User intents and the routing of backend results into app state.

use super::controller::Outcome;
use super::session::Submission;
use super::UserDeckApp;
use crate::backend::{CoreEvent, Operation, StoreError};
use tracing::{debug, info, warn};
use userdeck_core::{filter, User};

impl UserDeckApp {
    /// Drains every event the worker has produced so far.
    pub(super) fn poll_backend(&mut self) {
        while let Some(event) = self.controller.next_event() {
            self.apply_event(event);
        }
    }

    pub(super) fn apply_event(&mut self, event: CoreEvent) {
        match self.controller.apply(event) {
            Outcome::Loaded { count, .. } => {
                info!("loaded {} users", count);
                if self
                    .selected_id
                    .is_some_and(|id| self.controller.get(id).is_none())
                {
                    self.selected_id = None;
                }
            }
            Outcome::Created { request, id } => {
                if self.session.submit_succeeded(request) {
                    self.set_status(format!("Created user {}.", id));
                } else {
                    debug!("applied late create {} for user {}", request, id);
                }
            }
            Outcome::Updated {
                request,
                id,
                applied,
            } => {
                let closed = self.session.submit_succeeded(request);
                if !applied {
                    self.set_status(format!("User {} is no longer listed; update skipped.", id));
                } else if closed {
                    self.set_status(format!("Saved user {}.", id));
                }
            }
            Outcome::Removed { request, id } => {
                self.removals_in_flight.remove(&request);
                if self.session.target_removed(id) {
                    info!("closed editor for deleted user {}", id);
                }
                if self.selected_id == Some(id) {
                    self.selected_id = None;
                }
                self.set_status(format!("Deleted user {}.", id));
            }
            Outcome::Failed {
                request,
                operation,
                error,
            } => {
                self.removals_in_flight.remove(&request);
                let shown_in_form = self.session.submit_failed(request, &error);
                if !(shown_in_form && error.is_validation()) {
                    self.notify_error(failure_text(operation, &error));
                }
            }
        }
        self.recompute_visible();
    }

    /// Rebuilds the filtered view from the current collection.
    pub(super) fn recompute_visible(&mut self) {
        self.visible = filter(
            self.controller.users(),
            &self.search_query,
            &self.search_fields,
        );
    }

    pub(super) fn visible_users(&self) -> &[User] {
        &self.visible
    }

    pub(super) fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.recompute_visible();
    }

    /// Fetches the list again unless a load is already outstanding.
    pub(super) fn reload(&mut self) {
        if self.controller.is_loading() {
            return;
        }
        if let Err(err) = self.controller.load() {
            self.notify_error(failure_text(Operation::List, &err));
        }
    }

    pub(super) fn open_add(&mut self) {
        self.session.open_add();
    }

    pub(super) fn open_edit(&mut self, id: u64) {
        let Some(user) = self.controller.get(id).cloned() else {
            warn!("edit requested for unknown user {}", id);
            return;
        };
        self.session.open_edit(&user);
        self.selected_id = None;
    }

    pub(super) fn cancel_session(&mut self) {
        self.session.cancel();
    }

    /// Validates the open form and sends it; invalid forms never leave the UI.
    pub(super) fn submit_session(&mut self) {
        let Some(submission) = self.session.prepare_submit(self.form_profile) else {
            return;
        };
        let sent = match submission {
            Submission::Create(draft) => self.controller.create_entity(draft),
            Submission::Update { id, patch } => self.controller.update_entity(id, patch),
        };
        match sent {
            Ok(request) => self.session.mark_submitted(request),
            Err(err) => self.session.dispatch_failed(&err),
        }
    }

    /// Asks the remote to delete `id`; repeated clicks while pending are ignored.
    pub(super) fn delete_user(&mut self, id: u64) {
        if self.is_removing(id) {
            return;
        }
        match self.controller.remove_entity(id) {
            Ok(request) => {
                self.removals_in_flight.insert(request, id);
            }
            Err(err) => self.notify_error(failure_text(Operation::Remove { id }, &err)),
        }
    }

    pub(super) fn is_removing(&self, id: u64) -> bool {
        self.removals_in_flight.values().any(|pending| *pending == id)
    }

    pub(super) fn toggle_theme(&mut self) {
        match self.theme.toggle() {
            Ok(theme) => info!("theme switched to {}", theme),
            Err(err) => self.notify_error(format!("Could not save theme preference: {}", err)),
        }
    }

    pub(super) fn select_user(&mut self, id: u64) {
        if self.controller.get(id).is_some() {
            self.selected_id = Some(id);
        }
    }

    pub(super) fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    pub(super) fn selected_user(&self) -> Option<&User> {
        self.selected_id.and_then(|id| self.controller.get(id))
    }
}

fn failure_text(operation: Operation, error: &StoreError) -> String {
    match operation {
        Operation::List => format!("Load failed: {}", error),
        Operation::Create => format!("Create failed: {}", error),
        Operation::Update { id } => format!("Update of user {} failed: {}", id, error),
        Operation::Remove { id } => format!("Delete of user {} failed: {}", id, error),
    }
}
