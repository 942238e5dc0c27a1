//! Role-gated access checks
//!
//! Every protected view and transition passes through [`authorize`] before
//! anything else happens. The check is re-evaluated on every navigation; the
//! session can change between calls, so the outcome is never cached.

use crate::error::Error;
use crate::session::{Role, Session};
use crate::Result;

/// Why access was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No session is established
    NotAuthenticated,
    /// The session role is not in the required set
    RoleNotPermitted { role: Role },
}

/// Outcome of an access check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny(DenyReason),
}

impl Access {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Convert a denial into the matching typed error
    pub fn require(self) -> Result<()> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(DenyReason::NotAuthenticated) => {
                Err(Error::Authentication("No active session".to_string()))
            }
            Self::Deny(DenyReason::RoleNotPermitted { role }) => Err(Error::Authorization(
                format!("Role {} is not permitted here", role),
            )),
        }
    }
}

/// Decide whether a view protected by `required` roles may proceed
pub fn authorize(required: &[Role], session: Option<&Session>) -> Access {
    let Some(session) = session else {
        return Access::Deny(DenyReason::NotAuthenticated);
    };
    if required.contains(&session.role) {
        Access::Allow
    } else {
        Access::Deny(DenyReason::RoleNotPermitted { role: session.role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            id: 1,
            username: "user".to_string(),
            name: None,
            email: None,
            role,
            token: "tok".to_string(),
        }
    }

    #[test]
    fn test_absent_session_is_denied() {
        let access = authorize(&[Role::Donor], None);
        assert_eq!(access, Access::Deny(DenyReason::NotAuthenticated));
        assert!(access.require().is_err());
    }

    #[test]
    fn test_wrong_role_is_denied() {
        let session = session(Role::Beneficiary);
        let access = authorize(&[Role::Donor], Some(&session));
        assert_eq!(
            access,
            Access::Deny(DenyReason::RoleNotPermitted {
                role: Role::Beneficiary
            })
        );
        assert!(matches!(
            access.require().unwrap_err(),
            Error::Authorization(_)
        ));
    }

    #[test]
    fn test_matching_role_is_allowed() {
        let session = session(Role::Donor);
        assert!(authorize(&[Role::Donor], Some(&session)).is_allowed());
        assert!(authorize(&[Role::Donor, Role::Beneficiary], Some(&session)).is_allowed());
    }

    #[test]
    fn test_mixed_case_wire_role_is_allowed_after_parsing() {
        let role: Role = "Beneficiary".parse().unwrap();
        let session = session(role);
        assert!(authorize(&[Role::Beneficiary], Some(&session)).is_allowed());
    }
}
