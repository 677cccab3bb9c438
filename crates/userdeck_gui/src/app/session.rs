//! Add/edit overlay arbitration.
//!
//! ```text
//! Idle        --open_add-->              Adding
//! Idle        --open_edit(id)-->         Editing(id)
//! Adding      --cancel | submit ok-->    Idle
//! Editing(id) --cancel | submit ok-->    Idle
//! Editing(id) --target_removed(id)-->    Idle
//! any         --open_add / open_edit-->  replaces the current overlay
//! ```
//!
//! A failed submit keeps the overlay, its input, and the error. Only the
//! request issued by the current overlay can close it: results for an
//! abandoned overlay are ignored here (the controller still applies them).

use crate::backend::{RequestId, StoreError};
use userdeck_core::{FieldErrors, FormField, FormProfile, User, UserDraft, UserPatch};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum SessionState {
    #[default]
    Idle,
    Adding,
    Editing(u64),
}

/// Text inputs of the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct UserForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) username: String,
    pub(crate) phone: String,
    pub(crate) website: String,
}

impl UserForm {
    fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            username: user.username.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            website: user.website.clone().unwrap_or_default(),
        }
    }

    pub(crate) fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Username => &self.username,
            FormField::Phone => &self.phone,
            FormField::Website => &self.website,
        }
    }

    pub(crate) fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Username => &mut self.username,
            FormField::Phone => &mut self.phone,
            FormField::Website => &mut self.website,
        }
    }

    /// Trimmed value of `field` if the profile collects it and it is set.
    fn collected(&self, profile: FormProfile, field: FormField) -> Option<String> {
        if !profile.fields().any(|f| f == field) {
            return None;
        }
        let value = self.value(field).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn to_draft(&self, profile: FormProfile) -> UserDraft {
        UserDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            username: self.collected(profile, FormField::Username),
            phone: self.collected(profile, FormField::Phone),
            website: self.collected(profile, FormField::Website),
            company: None,
            address: None,
        }
    }

    fn to_patch(&self, profile: FormProfile) -> UserPatch {
        UserPatch {
            id: None,
            name: Some(self.name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            username: self.collected(profile, FormField::Username),
            phone: self.collected(profile, FormField::Phone),
            website: self.collected(profile, FormField::Website),
            company: None,
            address: None,
        }
    }
}

/// A validated form, ready to go to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Submission {
    Create(UserDraft),
    Update { id: u64, patch: UserPatch },
}

#[derive(Debug, Default)]
pub(crate) struct EditSessionManager {
    state: SessionState,
    form: UserForm,
    field_errors: FieldErrors,
    submit_error: Option<String>,
    pending: Option<RequestId>,
}

impl EditSessionManager {
    pub(crate) fn state(&self) -> SessionState {
        self.state
    }

    pub(crate) fn is_open(&self) -> bool {
        self.state != SessionState::Idle
    }

    pub(crate) fn form(&self) -> &UserForm {
        &self.form
    }

    pub(crate) fn form_mut(&mut self) -> &mut UserForm {
        &mut self.form
    }

    pub(crate) fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub(crate) fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Request id of the submit in flight, if any.
    pub(crate) fn pending(&self) -> Option<RequestId> {
        self.pending
    }

    fn enter(&mut self, state: SessionState, form: UserForm) {
        self.state = state;
        self.form = form;
        self.field_errors.clear();
        self.submit_error = None;
        self.pending = None;
    }

    /// Open an empty add form, closing whatever overlay was open.
    pub(crate) fn open_add(&mut self) {
        self.enter(SessionState::Adding, UserForm::default());
    }

    /// Open the edit form for `user`, closing whatever overlay was open.
    pub(crate) fn open_edit(&mut self, user: &User) {
        self.enter(SessionState::Editing(user.id), UserForm::from_user(user));
    }

    pub(crate) fn cancel(&mut self) {
        self.enter(SessionState::Idle, UserForm::default());
    }

    /// Validate the form and build the request to send.
    ///
    /// # Returns
    /// `None` when no overlay is open, a submit is already in flight, or local
    /// validation failed (the field errors are recorded).
    pub(crate) fn prepare_submit(&mut self, profile: FormProfile) -> Option<Submission> {
        if self.pending.is_some() {
            return None;
        }
        let draft = self.form.to_draft(profile);
        let submission = match self.state {
            SessionState::Idle => return None,
            SessionState::Adding => Submission::Create(draft.clone()),
            SessionState::Editing(id) => Submission::Update {
                id,
                patch: self.form.to_patch(profile),
            },
        };
        // Edits re-check the whole form, so a cleared required field is caught.
        self.field_errors = profile.validate_draft(&draft);
        if !self.field_errors.is_empty() {
            self.submit_error = None;
            return None;
        }
        Some(submission)
    }

    /// Record the request carrying this overlay's submit.
    pub(crate) fn mark_submitted(&mut self, request: RequestId) {
        if self.is_open() {
            self.submit_error = None;
            self.pending = Some(request);
        }
    }

    /// The submit could not even be dispatched; keep the input.
    pub(crate) fn dispatch_failed(&mut self, error: &StoreError) {
        self.record_failure(error);
    }

    /// Close the overlay if `request` is its submit.
    pub(crate) fn submit_succeeded(&mut self, request: RequestId) -> bool {
        if self.pending != Some(request) {
            return false;
        }
        self.cancel();
        true
    }

    /// Keep the overlay open with the error if `request` is its submit.
    pub(crate) fn submit_failed(&mut self, request: RequestId, error: &StoreError) -> bool {
        if self.pending != Some(request) {
            return false;
        }
        self.pending = None;
        self.record_failure(error);
        true
    }

    /// Forced close when the user being edited was deleted.
    pub(crate) fn target_removed(&mut self, id: u64) -> bool {
        if self.state != SessionState::Editing(id) {
            return false;
        }
        self.cancel();
        true
    }

    fn record_failure(&mut self, error: &StoreError) {
        match error {
            StoreError::Validation { message, fields } => {
                self.field_errors = fields.clone();
                self.submit_error = Some(message.clone());
            }
            other => self.submit_error = Some(other.to_string()),
        }
    }
}
