use tonic::{Request, Status};

use crate::error::{AppError, AppResult};
use crate::models::{OrgId, UserId};

use super::auth::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Support,
    Member,
}

impl Role {
    pub fn as_claim(&self) -> &'static str {
        match self {
            Role::Admin => "org:admin",
            Role::Support => "org:support",
            Role::Member => "org:member",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ManageShop,
    ManageInventory,
    ManageRequests,
    ManageTickets,
}

impl Permission {
    pub fn as_claim(&self) -> &'static str {
        match self {
            Permission::ManageShop => "org:shop:manage",
            Permission::ManageInventory => "org:inventory:manage",
            Permission::ManageRequests => "org:requests:manage",
            Permission::ManageTickets => "org:tickets:manage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Role(Role),
    Permission(Permission),
}

/// Who is calling and on behalf of which organization. Built once per
/// call from the middleware's [`Session`] and passed explicitly to
/// everything that needs it.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: UserId,
    pub org_id: OrgId,
    role: Option<String>,
    permissions: Vec<String>,
}

impl AuthContext {
    pub fn new(
        user_id: UserId,
        org_id: OrgId,
        role: Option<String>,
        permissions: Vec<String>,
    ) -> Self {
        Self {
            user_id,
            org_id,
            role,
            permissions,
        }
    }

    pub fn from_request<T>(request: &Request<T>) -> Result<Self, Status> {
        let session = request
            .extensions()
            .get::<Session>()
            .ok_or_else(|| Status::unauthenticated("Authentication required"))?;
        let org_id = session
            .org_id
            .clone()
            .ok_or_else(|| Status::unauthenticated("No active organization"))?;

        Ok(Self {
            user_id: session.user_id.clone(),
            org_id,
            role: session.role.clone(),
            permissions: session.permissions.clone(),
        })
    }

    /// Admins hold every permission implicitly.
    pub fn has(&self, check: Check) -> bool {
        match check {
            Check::Role(role) => self.role.as_deref() == Some(role.as_claim()),
            Check::Permission(permission) => {
                self.has(Check::Role(Role::Admin))
                    || self.permissions.iter().any(|p| p == permission.as_claim())
            }
        }
    }

    pub fn require(&self, check: Check) -> AppResult<()> {
        if self.has(check) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "user {} lacks {:?} in {}",
                self.user_id, check, self.org_id
            )))
        }
    }

    pub fn is_owner(&self, owner_id: &str) -> bool {
        self.user_id.as_str() == owner_id
    }

    /// Passes for the record's owner or anyone holding `check`.
    pub fn require_owner_or(&self, owner_id: &str, check: Check) -> AppResult<()> {
        if self.is_owner(owner_id) {
            Ok(())
        } else {
            self.require(check)
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub const ORG: &str = "org_2abcdefghijklmnopqrstuvwxyz";
    pub const OTHER_ORG: &str = "org_2zyxwvutsrqponmlkjihgfedcba";
    pub const USER: &str = "user_2abcdefghijklmnopqrstuvwxyz";
    pub const OTHER_USER: &str = "user_2zyxwvutsrqponmlkjihgfedcba";

    pub fn session(user: &str, role: Option<&str>, permissions: &[&str]) -> Session {
        Session {
            user_id: UserId::parse(user).unwrap(),
            org_id: Some(OrgId::parse(ORG).unwrap()),
            role: role.map(str::to_string),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// A request as the auth middleware would hand it to a service.
    pub fn request<T>(message: T, session: Session) -> Request<T> {
        let mut request = Request::new(message);
        request.extensions_mut().insert(session);
        request
    }

    pub fn member_request<T>(message: T) -> Request<T> {
        request(message, session(USER, Some("org:member"), &[]))
    }

    pub fn admin_request<T>(message: T) -> Request<T> {
        request(message, session(OTHER_USER, Some("org:admin"), &[]))
    }

    pub fn org() -> OrgId {
        OrgId::parse(ORG).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_missing_session_is_unauthenticated() {
        let status = AuthContext::from_request(&Request::new(())).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
    }

    #[test]
    fn test_missing_org_is_unauthenticated() {
        let mut s = session(USER, None, &[]);
        s.org_id = None;
        let status = AuthContext::from_request(&request((), s)).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
        assert_eq!(status.message(), "No active organization");
    }

    #[test]
    fn test_admin_has_every_permission() {
        let ctx = AuthContext::from_request(&admin_request(())).unwrap();
        assert!(ctx.has(Check::Permission(Permission::ManageShop)));
        assert!(ctx.has(Check::Permission(Permission::ManageTickets)));
        assert!(!ctx.has(Check::Role(Role::Support)));
    }

    #[test]
    fn test_explicit_permission() {
        let ctx = AuthContext::from_request(&request(
            (),
            session(USER, Some("org:support"), &["org:tickets:manage"]),
        ))
        .unwrap();
        assert!(ctx.has(Check::Role(Role::Support)));
        assert!(ctx.has(Check::Permission(Permission::ManageTickets)));
        assert!(!ctx.has(Check::Permission(Permission::ManageShop)));
        assert!(matches!(
            ctx.require(Check::Permission(Permission::ManageShop)),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_owner_passes_without_permission() {
        let ctx = AuthContext::from_request(&member_request(())).unwrap();
        assert!(ctx
            .require_owner_or(USER, Check::Permission(Permission::ManageTickets))
            .is_ok());
        assert!(ctx
            .require_owner_or(OTHER_USER, Check::Permission(Permission::ManageTickets))
            .is_err());
    }
}
