//! User records as exposed by the remote resource.
//!
//! A [`User`] only ever exists with a server-assigned id. Before that, the
//! client holds a [`UserDraft`]; partial changes travel as a [`UserPatch`] in
//! both directions because the remote may echo only part of a record.

use serde::{Deserialize, Serialize};

/// A user record owned by the remote resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Employer details attached to some deployments' user records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(
        default,
        rename = "catchPhrase",
        skip_serializing_if = "Option::is_none"
    )]
    pub catch_phrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bs: Option<String>,
}

/// Postal address attached to some deployments' user records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

/// Coordinates as the remote encodes them (decimal strings).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

/// Client-supplied fields for a user that has no id yet.
///
/// `name` and `email` default to empty so a payload missing them reaches
/// validation instead of failing to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Partial user record: the body of an update and the (possibly partial)
/// record the remote answers with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

fn pick<T: Clone>(update: &Option<T>, current: &T) -> T {
    update.as_ref().unwrap_or(current).clone()
}

fn pick_optional<T: Clone>(update: &Option<T>, current: &Option<T>) -> Option<T> {
    update.as_ref().or(current.as_ref()).cloned()
}

impl User {
    /// Merge a patch over this record.
    ///
    /// Fields present in `changes` win; absent fields keep their current
    /// value. The id never changes, whatever the patch carries.
    pub fn merged(&self, changes: &UserPatch) -> Self {
        Self {
            id: self.id,
            name: pick(&changes.name, &self.name),
            email: pick(&changes.email, &self.email),
            username: pick_optional(&changes.username, &self.username),
            phone: pick_optional(&changes.phone, &self.phone),
            website: pick_optional(&changes.website, &self.website),
            company: pick_optional(&changes.company, &self.company),
            address: pick_optional(&changes.address, &self.address),
        }
    }

    /// Build the record confirmed by a create response.
    ///
    /// The response may echo only some of the submitted fields; whatever it
    /// omits is taken from the draft that was sent.
    ///
    /// # Returns
    /// `None` when the response carries no id.
    pub fn from_created(draft: &UserDraft, response: &UserPatch) -> Option<Self> {
        let id = response.id?;
        Some(Self {
            id,
            name: pick(&response.name, &draft.name),
            email: pick(&response.email, &draft.email),
            username: pick_optional(&response.username, &draft.username),
            phone: pick_optional(&response.phone, &draft.phone),
            website: pick_optional(&response.website, &draft.website),
            company: pick_optional(&response.company, &draft.company),
            address: pick_optional(&response.address, &draft.address),
        })
    }

    /// Build a record from a draft with an id assigned by the caller.
    ///
    /// Only the remote side assigns ids; clients never call this.
    pub fn with_assigned_id(id: u64, draft: UserDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            username: draft.username,
            phone: draft.phone,
            website: draft.website,
            company: draft.company,
            address: draft.address,
        }
    }
}

impl Address {
    /// Single-line form: street, optional suite, city, and zipcode.
    pub fn one_line(&self) -> String {
        let mut parts: Vec<&str> = vec![self.street.as_str()];
        if let Some(suite) = &self.suite {
            parts.push(suite);
        }
        parts.push(&self.city);
        parts.push(&self.zipcode);
        parts
            .into_iter()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl UserPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.username.is_none()
            && self.phone.is_none()
            && self.website.is_none()
            && self.company.is_none()
            && self.address.is_none()
    }
}
