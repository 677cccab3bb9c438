//! In-memory user directory backing the reference service.

use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::debug;
use userdeck_core::{
    Address, Company, FieldErrors, FormField, FormProfile, Geo, User, UserDraft, UserPatch,
};

/// Failure of a directory operation.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("User {0} not found")]
    NotFound(u64),

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("user directory is unavailable")]
    Poisoned,
}

#[derive(Debug)]
struct DirectoryState {
    users: Vec<User>,
    next_id: u64,
}

/// Users held in memory, in insertion order.
///
/// Ids are assigned here, increasing and never reused while the process runs.
#[derive(Debug)]
pub struct UserDirectory {
    profile: FormProfile,
    state: Mutex<DirectoryState>,
}

impl UserDirectory {
    /// Directory holding `users`; new ids continue after the largest one.
    pub fn new(profile: FormProfile, users: Vec<User>) -> Self {
        let next_id = users.iter().map(|user| user.id).max().unwrap_or(0) + 1;
        Self {
            profile,
            state: Mutex::new(DirectoryState { users, next_id }),
        }
    }

    /// Directory seeded with a few sample users.
    pub fn with_sample_users(profile: FormProfile) -> Self {
        Self::new(profile, sample_users())
    }

    fn lock(&self) -> Result<MutexGuard<'_, DirectoryState>, DirectoryError> {
        self.state.lock().map_err(|_| DirectoryError::Poisoned)
    }

    pub fn list(&self) -> Result<Vec<User>, DirectoryError> {
        Ok(self.lock()?.users.clone())
    }

    /// Validate and store `draft` under a fresh id.
    ///
    /// # Errors
    /// [`DirectoryError::Validation`] when a field is missing, malformed, or the
    /// email is already in use.
    pub fn create(&self, draft: UserDraft) -> Result<User, DirectoryError> {
        let mut state = self.lock()?;
        let mut errors = self.profile.validate_draft(&draft);
        if email_taken(&state.users, &draft.email, None) {
            errors
                .entry(FormField::Email)
                .or_insert_with(|| "Email already taken".to_string());
        }
        if !errors.is_empty() {
            return Err(DirectoryError::Validation(errors));
        }
        let id = state.next_id;
        state.next_id += 1;
        let user = User::with_assigned_id(id, draft);
        state.users.push(user.clone());
        debug!(id, "user created");
        Ok(user)
    }

    /// Merge `patch` over user `id`.
    ///
    /// # Errors
    /// [`DirectoryError::NotFound`] for an unknown id,
    /// [`DirectoryError::Validation`] when a supplied field is invalid.
    pub fn update(&self, id: u64, patch: UserPatch) -> Result<User, DirectoryError> {
        let mut state = self.lock()?;
        let pos = state
            .users
            .iter()
            .position(|user| user.id == id)
            .ok_or(DirectoryError::NotFound(id))?;
        let mut errors = self.profile.validate_patch(&patch);
        if let Some(email) = &patch.email {
            if email_taken(&state.users, email, Some(id)) {
                errors
                    .entry(FormField::Email)
                    .or_insert_with(|| "Email already taken".to_string());
            }
        }
        if !errors.is_empty() {
            return Err(DirectoryError::Validation(errors));
        }
        let updated = state.users[pos].merged(&patch);
        state.users[pos] = updated.clone();
        debug!(id, "user updated");
        Ok(updated)
    }

    pub fn remove(&self, id: u64) -> Result<(), DirectoryError> {
        let mut state = self.lock()?;
        let before = state.users.len();
        state.users.retain(|user| user.id != id);
        if state.users.len() == before {
            return Err(DirectoryError::NotFound(id));
        }
        debug!(id, "user removed");
        Ok(())
    }
}

fn email_taken(users: &[User], email: &str, except: Option<u64>) -> bool {
    let email = email.trim();
    users
        .iter()
        .any(|user| Some(user.id) != except && user.email.eq_ignore_ascii_case(email))
}

fn sample_user(id: u64, name: &str, username: &str, email: &str, city: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        username: Some(username.to_string()),
        phone: Some(format!("555-010{}", id)),
        website: Some(format!("{}.example.org", username.to_lowercase())),
        company: Some(Company {
            name: format!("{} Group", name.split(' ').last().unwrap_or(name)),
            catch_phrase: None,
            bs: None,
        }),
        address: Some(Address {
            street: format!("{} Main Street", id * 100),
            suite: None,
            city: city.to_string(),
            zipcode: format!("9000{}", id),
            geo: Some(Geo {
                lat: "0.0".to_string(),
                lng: "0.0".to_string(),
            }),
        }),
    }
}

fn sample_users() -> Vec<User> {
    vec![
        sample_user(1, "Leanne Graham", "Bret", "sincere@april.biz", "Gwenborough"),
        sample_user(2, "Ervin Howell", "Antonette", "shanna@melissa.tv", "Wisokyburgh"),
        sample_user(3, "Clementine Bauch", "Samantha", "nathan@yesenia.net", "McKenziehaven"),
    ]
}
