//! Constraint-table validation for user forms.
//!
//! Every profile is a static table of `(field, rule)` rows evaluated by one
//! routine. The result maps each failing field to the message of the first
//! rule it violated, in table order.

use crate::models::user::{UserDraft, UserPatch};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Editable fields of the add/edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Username,
    Phone,
    Website,
}

impl FormField {
    /// Every form field in display order.
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Username,
        FormField::Phone,
        FormField::Website,
    ];

    /// Wire name of the field, as used in remote error payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Username => "username",
            FormField::Phone => "phone",
            FormField::Website => "website",
        }
    }

    /// Human label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Username => "Username",
            FormField::Phone => "Phone",
            FormField::Website => "Website",
        }
    }

    /// Parse a wire name (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// Field name to the first violated rule's message.
pub type FieldErrors = BTreeMap<FormField, String>;

/// Format check attached to a field rule.
#[derive(Debug, Clone, Copy)]
pub struct Check {
    pub accepts: fn(&str) -> bool,
    pub message: &'static str,
}

/// Constraints for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub required: bool,
    pub check: Option<Check>,
}

const EMAIL_CHECK: Check = Check {
    accepts: is_valid_email,
    message: "Invalid email",
};

const MIN_NAME_CHARS: usize = 3;

const NAME_LENGTH_CHECK: Check = Check {
    accepts: |value| value.chars().count() >= MIN_NAME_CHARS,
    message: "At least 3 characters",
};

const REQUIRED_NAME: FieldRule = FieldRule {
    required: true,
    check: Some(NAME_LENGTH_CHECK),
};

const REQUIRED: FieldRule = FieldRule {
    required: true,
    check: None,
};

const REQUIRED_EMAIL: FieldRule = FieldRule {
    required: true,
    check: Some(EMAIL_CHECK),
};

const STANDARD_RULES: &[(FormField, FieldRule)] = &[
    (FormField::Name, REQUIRED_NAME),
    (FormField::Email, REQUIRED_EMAIL),
];

const EXTENDED_RULES: &[(FormField, FieldRule)] = &[
    (FormField::Name, REQUIRED_NAME),
    (FormField::Email, REQUIRED_EMAIL),
    (FormField::Username, REQUIRED),
    (FormField::Phone, REQUIRED),
    (FormField::Website, REQUIRED),
];

/// Which set of form fields a deployment collects and requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormProfile {
    /// Name and email only.
    #[default]
    Standard,
    /// Name, email, username, phone, and website, all required.
    Extended,
}

impl FormProfile {
    /// Parse a profile name (`standard` or `extended`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(FormProfile::Standard),
            "extended" => Some(FormProfile::Extended),
            _ => None,
        }
    }

    /// Constraint table for this profile.
    pub fn rules(self) -> &'static [(FormField, FieldRule)] {
        match self {
            FormProfile::Standard => STANDARD_RULES,
            FormProfile::Extended => EXTENDED_RULES,
        }
    }

    /// Fields the form presents, in display order.
    pub fn fields(self) -> impl Iterator<Item = FormField> {
        self.rules().iter().map(|(field, _)| *field)
    }

    /// Validate a full draft before it is sent.
    pub fn validate_draft(self, draft: &UserDraft) -> FieldErrors {
        self.validate_with(|field| Some(draft_value(draft, field)))
    }

    /// Validate only the fields a patch actually carries.
    pub fn validate_patch(self, patch: &UserPatch) -> FieldErrors {
        self.validate_with(|field| patch_value(patch, field))
    }

    /// Evaluate the table against `value_of`; `None` skips the field.
    pub fn validate_with<'a>(self, value_of: impl Fn(FormField) -> Option<&'a str>) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for (field, rule) in self.rules() {
            let Some(value) = value_of(*field) else {
                continue;
            };
            if let Some(message) = first_violation(*field, rule, value) {
                errors.insert(*field, message);
            }
        }
        errors
    }
}

fn first_violation(field: FormField, rule: &FieldRule, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return rule
            .required
            .then(|| format!("{} is required", field.label()));
    }
    match rule.check {
        Some(check) if !(check.accepts)(trimmed) => Some(check.message.to_string()),
        _ => None,
    }
}

fn draft_value(draft: &UserDraft, field: FormField) -> &str {
    match field {
        FormField::Name => draft.name.as_str(),
        FormField::Email => draft.email.as_str(),
        FormField::Username => draft.username.as_deref().unwrap_or(""),
        FormField::Phone => draft.phone.as_deref().unwrap_or(""),
        FormField::Website => draft.website.as_deref().unwrap_or(""),
    }
}

fn patch_value(patch: &UserPatch, field: FormField) -> Option<&str> {
    match field {
        FormField::Name => patch.name.as_deref(),
        FormField::Email => patch.email.as_deref(),
        FormField::Username => patch.username.as_deref(),
        FormField::Phone => patch.phone.as_deref(),
        FormField::Website => patch.website.as_deref(),
    }
}

/// Syntactic email check: `local@domain.tld`, no whitespace, one `@`.
pub fn is_valid_email(value: &str) -> bool {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let mut labels = domain.split('.');
    let first_ok = labels.next().is_some_and(|label| !label.is_empty());
    let mut rest = labels.peekable();
    first_ok && rest.peek().is_some() && rest.all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, email: &str) -> UserDraft {
        UserDraft {
            name: name.to_string(),
            email: email.to_string(),
            ..UserDraft::default()
        }
    }

    #[test]
    fn email_format_accepts_common_addresses() {
        for value in ["a@x.com", "Sincere@april.biz", "first.last+tag@mail.example.org"] {
            assert!(is_valid_email(value), "value: {}", value);
        }
    }

    #[test]
    fn email_format_rejects_malformed_addresses() {
        for value in ["", "plain", "@x.com", "a@", "a@x", "a@.com", "a@x.", "a b@x.com", "a@b@c.com"] {
            assert!(!is_valid_email(value), "value: {}", value);
        }
    }

    #[test]
    fn standard_profile_reports_first_violation_per_field() {
        let errors = FormProfile::Standard.validate_draft(&draft("  ", ""));
        assert_eq!(errors.get(&FormField::Name).map(String::as_str), Some("Name is required"));
        assert_eq!(errors.get(&FormField::Email).map(String::as_str), Some("Email is required"));

        let errors = FormProfile::Standard.validate_draft(&draft("Ann", "nope"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&FormField::Email).map(String::as_str), Some("Invalid email"));
    }

    #[test]
    fn short_names_are_rejected_in_every_profile() {
        for profile in [FormProfile::Standard, FormProfile::Extended] {
            let errors = profile.validate_draft(&draft("Al", "al@x.com"));
            assert_eq!(
                errors.get(&FormField::Name).map(String::as_str),
                Some("At least 3 characters"),
                "profile: {:?}",
                profile
            );
        }
        let errors = FormProfile::Standard.validate_draft(&draft(" Bo ", "bo@x.com"));
        assert!(errors.contains_key(&FormField::Name), "surrounding spaces do not count");
        assert!(FormProfile::Standard
            .validate_draft(&draft("Zoë", "zoe@x.com"))
            .is_empty());
    }

    #[test]
    fn standard_profile_ignores_optional_fields() {
        let errors = FormProfile::Standard.validate_draft(&draft("Ann", "ann@example.com"));
        assert!(errors.is_empty());
    }

    #[test]
    fn extended_profile_requires_contact_fields() {
        let errors = FormProfile::Extended.validate_draft(&draft("Ann", "ann@example.com"));
        let fields: Vec<FormField> = errors.keys().copied().collect();
        assert_eq!(
            fields,
            vec![FormField::Username, FormField::Phone, FormField::Website]
        );
        assert_eq!(
            errors.get(&FormField::Phone).map(String::as_str),
            Some("Phone is required")
        );
    }

    #[test]
    fn patch_validation_only_checks_present_fields() {
        let patch = UserPatch {
            email: Some("broken".to_string()),
            ..UserPatch::default()
        };
        let errors = FormProfile::Extended.validate_patch(&patch);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(&FormField::Email));

        assert!(FormProfile::Extended
            .validate_patch(&UserPatch::default())
            .is_empty());
    }

    #[test]
    fn profile_and_field_names_parse_case_insensitively() {
        assert_eq!(FormProfile::parse(" Extended "), Some(FormProfile::Extended));
        assert_eq!(FormProfile::parse("compact"), None);
        assert_eq!(FormField::parse("EMAIL"), Some(FormField::Email));
        assert_eq!(FormField::parse("company"), None);
    }

    #[test]
    fn field_errors_serialize_with_wire_names() {
        let errors = FormProfile::Standard.validate_draft(&draft("", "a@x.com"));
        let value = serde_json::to_value(&errors).expect("encode");
        assert_eq!(value, serde_json::json!({ "name": "Name is required" }));
    }
}
