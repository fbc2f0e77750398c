//! Roles and route gating.
//!
//! The API encodes roles as small integers. [`ROLE_TABLE`] is the only
//! place that maps them to labels and dashboards.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A staff role in the lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Role {
    /// Full administrative access.
    SuperAdmin,
    /// Head of the chemical testing section.
    ChemicalSectionHead,
    /// Head of the mechanical testing section.
    MechanicalSectionHead,
    /// Registers clients and incoming samples.
    Receptionist,
    /// Performs tests and enters results.
    Tester,
}

/// One row of the role table.
#[derive(Debug, Clone, Copy)]
pub struct RoleInfo {
    /// Wire code used by the API.
    pub code: u8,
    /// The role.
    pub role: Role,
    /// Display label.
    pub label: &'static str,
    /// Landing dashboard path.
    pub dashboard: &'static str,
}

/// Every role with its code, label, and dashboard.
pub static ROLE_TABLE: [RoleInfo; 5] = [
    RoleInfo { code: 1, role: Role::SuperAdmin, label: "Super Admin", dashboard: "/superadmin" },
    RoleInfo {
        code: 2,
        role: Role::ChemicalSectionHead,
        label: "Section Head (Chemical)",
        dashboard: "/sectionhead",
    },
    RoleInfo {
        code: 3,
        role: Role::MechanicalSectionHead,
        label: "Section Head (Mechanical)",
        dashboard: "/sectionhead",
    },
    RoleInfo { code: 4, role: Role::Receptionist, label: "Receptionist", dashboard: "/receptionist" },
    RoleInfo { code: 5, role: Role::Tester, label: "Tester", dashboard: "/tester" },
];

/// Errors from role and session handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    /// The API sent a role code that is not in the table.
    #[error("unknown role code {0}")]
    UnknownRole(u8),
}

impl Role {
    /// Looks a role up by its wire code.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::UnknownRole`] for codes outside the table.
    pub fn from_code(code: u8) -> Result<Self, AccessError> {
        ROLE_TABLE
            .iter()
            .find(|info| info.code == code)
            .map(|info| info.role)
            .ok_or(AccessError::UnknownRole(code))
    }

    /// This role's row in [`ROLE_TABLE`].
    #[must_use]
    pub fn info(self) -> &'static RoleInfo {
        ROLE_TABLE
            .iter()
            .find(|info| info.role == self)
            .unwrap_or(&ROLE_TABLE[0])
    }

    /// Wire code.
    #[must_use]
    pub fn code(self) -> u8 {
        self.info().code
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        self.info().label
    }

    /// Landing dashboard path.
    #[must_use]
    pub fn dashboard(self) -> &'static str {
        self.info().dashboard
    }

    /// Whether this role heads a testing section.
    #[must_use]
    pub fn is_section_head(self) -> bool {
        matches!(self, Role::ChemicalSectionHead | Role::MechanicalSectionHead)
    }
}

impl TryFrom<u8> for Role {
    type Error = AccessError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Role::from_code(code)
    }
}

impl From<Role> for u8 {
    fn from(role: Role) -> Self {
        role.code()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A signed-in user as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Assigned role.
    pub role: Role,
}

/// Authentication state handed to anything that gates on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// The session check is still in flight.
    pub loading: bool,
    /// The signed-in user, if any.
    pub user: Option<User>,
}

impl AuthState {
    /// State while the session check runs.
    #[must_use]
    pub fn loading() -> Self {
        Self { loading: true, user: None }
    }

    /// State after a successful sign-in.
    #[must_use]
    pub fn signed_in(user: User) -> Self {
        Self { loading: false, user: Some(user) }
    }

    /// State with no user.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }
}

/// Outcome of gating a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Session check still running; render nothing yet.
    Pending,
    /// No user; send to the sign-in page.
    SignIn,
    /// Signed in, but the role is not allowed here.
    Forbidden(Role),
    /// Allowed.
    Granted(Role),
}

/// Decides whether `auth` may enter a route restricted to `allowed`.
///
/// An empty `allowed` list admits any signed-in user.
#[must_use]
pub fn guard(auth: &AuthState, allowed: &[Role]) -> Access {
    if auth.loading {
        return Access::Pending;
    }
    match &auth.user {
        None => Access::SignIn,
        Some(user) if allowed.is_empty() || allowed.contains(&user.role) => {
            Access::Granted(user.role)
        }
        Some(user) => Access::Forbidden(user.role),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User { id: "u-1".into(), name: "Asha".into(), role }
    }

    #[test]
    fn codes_round_trip_through_table() {
        for info in ROLE_TABLE {
            assert_eq!(Role::from_code(info.code).unwrap(), info.role);
            assert_eq!(info.role.code(), info.code);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(Role::from_code(0), Err(AccessError::UnknownRole(0)));
        assert_eq!(Role::from_code(9), Err(AccessError::UnknownRole(9)));
    }

    #[test]
    fn section_heads_share_a_dashboard() {
        assert_eq!(Role::ChemicalSectionHead.dashboard(), Role::MechanicalSectionHead.dashboard());
        assert!(Role::MechanicalSectionHead.is_section_head());
        assert!(!Role::Tester.is_section_head());
    }

    #[test]
    fn role_deserialises_from_integer() {
        let user: User =
            serde_json::from_str(r#"{"id":"7","name":"Ravi","role":4}"#).unwrap();
        assert_eq!(user.role, Role::Receptionist);
        assert!(serde_json::from_str::<User>(r#"{"id":"7","name":"Ravi","role":12}"#).is_err());
        assert_eq!(serde_json::to_string(&Role::Tester).unwrap(), "5");
    }

    #[test]
    fn guard_outcomes() {
        let testers = [Role::Tester];
        assert_eq!(guard(&AuthState::loading(), &testers), Access::Pending);
        assert_eq!(guard(&AuthState::signed_out(), &testers), Access::SignIn);
        assert_eq!(
            guard(&AuthState::signed_in(user(Role::Tester)), &testers),
            Access::Granted(Role::Tester)
        );
        assert_eq!(
            guard(&AuthState::signed_in(user(Role::Receptionist)), &testers),
            Access::Forbidden(Role::Receptionist)
        );
        assert_eq!(
            guard(&AuthState::signed_in(user(Role::Receptionist)), &[]),
            Access::Granted(Role::Receptionist)
        );
    }
}
