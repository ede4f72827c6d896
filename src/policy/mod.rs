//! Who may change which fields of a user record.
//!
//! The update policy is an ordered list of rules. The first rule that
//! matches rejects the request; if none match the field set is approved and
//! may be handed to the partial-update builder.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::middleware::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("Forbidden: only that user or an admin may edit this record")]
    NotOwnerOrAdmin,

    #[error("Forbidden: standard user cannot change admin privilege")]
    AdminPrivilegeChange,

    #[error("Forbidden: password update not permitted through this path")]
    PasswordChange,

    // Usernames key the record; admins cannot rename either.
    #[error("Forbidden: username update not permitted")]
    UsernameChange,
}

/// One update attempt, as seen by the policy.
pub struct UpdateRequest<'a> {
    pub identity: &'a Identity,
    pub target: &'a str,
    pub fields: &'a Map<String, Value>,
}

impl UpdateRequest<'_> {
    fn is_self(&self) -> bool {
        self.identity.username == self.target
    }

    fn is_admin(&self) -> bool {
        self.identity.is_admin
    }

    fn touches(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }
}

type Rule = (fn(&UpdateRequest<'_>) -> bool, PolicyViolation);

fn neither_owner_nor_admin(req: &UpdateRequest<'_>) -> bool {
    !req.is_self() && !req.is_admin()
}

fn owner_changes_admin(req: &UpdateRequest<'_>) -> bool {
    req.is_self() && !req.is_admin() && req.touches("admin")
}

fn anyone_changes_password(req: &UpdateRequest<'_>) -> bool {
    req.touches("password")
}

fn owner_changes_username(req: &UpdateRequest<'_>) -> bool {
    req.is_self() && !req.is_admin() && req.touches("username")
}

fn admin_changes_username(req: &UpdateRequest<'_>) -> bool {
    req.is_admin() && req.touches("username")
}

const UPDATE_RULES: &[Rule] = &[
    (neither_owner_nor_admin, PolicyViolation::NotOwnerOrAdmin),
    (owner_changes_admin, PolicyViolation::AdminPrivilegeChange),
    (anyone_changes_password, PolicyViolation::PasswordChange),
    (owner_changes_username, PolicyViolation::UsernameChange),
    (admin_changes_username, PolicyViolation::UsernameChange),
];

/// Decide whether `identity` may apply `fields` to the record `target`.
pub fn authorize_update(
    identity: &Identity,
    target: &str,
    fields: &Map<String, Value>,
) -> Result<(), PolicyViolation> {
    let request = UpdateRequest { identity, target, fields };
    match UPDATE_RULES.iter().find(|(matches, _)| matches(&request)) {
        Some((_, violation)) => Err(*violation),
        None => Ok(()),
    }
}
