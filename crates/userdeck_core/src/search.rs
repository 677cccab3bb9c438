//! Free-text filtering of the user collection.
//!
//! The filtered view is always recomputed from the full collection; nothing
//! here caches or patches a previous result.

use crate::models::user::User;

/// Fields a search query can match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Name,
    Email,
    Username,
    Phone,
    Website,
    Company,
}

/// Fields searched when none are configured.
pub const DEFAULT_SEARCH_FIELDS: [SearchField; 3] =
    [SearchField::Name, SearchField::Email, SearchField::Username];

impl SearchField {
    /// Parse a field name (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Some(SearchField::Name),
            "email" => Some(SearchField::Email),
            "username" => Some(SearchField::Username),
            "phone" => Some(SearchField::Phone),
            "website" => Some(SearchField::Website),
            "company" => Some(SearchField::Company),
            _ => None,
        }
    }

    /// The user's value for this field, if the record carries one.
    pub fn value_of(self, user: &User) -> Option<&str> {
        match self {
            SearchField::Name => Some(user.name.as_str()),
            SearchField::Email => Some(user.email.as_str()),
            SearchField::Username => user.username.as_deref(),
            SearchField::Phone => user.phone.as_deref(),
            SearchField::Website => user.website.as_deref(),
            SearchField::Company => user.company.as_ref().map(|company| company.name.as_str()),
        }
    }
}

/// Parse a comma-separated field list, skipping unknown names.
///
/// # Returns
/// The recognised fields in input order without duplicates, or the defaults
/// when nothing usable was given.
pub fn parse_search_fields(input: &str) -> Vec<SearchField> {
    let mut out: Vec<SearchField> = Vec::new();
    for field in input.split(',').filter_map(SearchField::parse) {
        if !out.contains(&field) {
            out.push(field);
        }
    }
    if out.is_empty() {
        return DEFAULT_SEARCH_FIELDS.to_vec();
    }
    out
}

/// Select the users whose configured fields contain `query`.
///
/// Matching is a case-insensitive substring test on the query as typed,
/// spaces included. An empty or whitespace-only query returns the collection
/// unchanged, in order.
pub fn filter(collection: &[User], query: &str, fields: &[SearchField]) -> Vec<User> {
    if query.trim().is_empty() {
        return collection.to_vec();
    }
    let needle = query.to_lowercase();
    collection
        .iter()
        .filter(|user| matches_any(user, &needle, fields))
        .cloned()
        .collect()
}

fn matches_any(user: &User, needle_lower: &str, fields: &[SearchField]) -> bool {
    fields.iter().any(|field| {
        field
            .value_of(user)
            .is_some_and(|value| value.to_lowercase().contains(needle_lower))
    })
}
