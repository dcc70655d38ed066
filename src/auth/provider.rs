//! Auth provider capability and the facts guards consume.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role carried by the API's user object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// The signed-in user as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub must_change_password: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Point-in-time authentication facts used by the guard pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuthSnapshot {
    pub is_authenticated: bool,
    pub is_admin: bool,
    pub must_change_password: bool,
}

impl AuthSnapshot {
    pub const fn guest() -> Self {
        Self {
            is_authenticated: false,
            is_admin: false,
            must_change_password: false,
        }
    }

    pub const fn member() -> Self {
        Self {
            is_authenticated: true,
            ..Self::guest()
        }
    }

    pub const fn admin() -> Self {
        Self {
            is_authenticated: true,
            is_admin: true,
            must_change_password: false,
        }
    }
}

/// Read-only view of the external auth collaborator.
pub trait AuthProvider: Send + Sync {
    fn is_authenticated(&self) -> bool;

    fn is_admin(&self) -> bool;

    fn user(&self) -> Option<User>;

    /// Collect the three guard inputs in one read.
    fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            is_authenticated: self.is_authenticated(),
            is_admin: self.is_admin(),
            must_change_password: self.user().is_some_and(|u| u.must_change_password),
        }
    }
}

/// A fixed snapshot is itself a provider. Handy for tools and tests.
impl AuthProvider for AuthSnapshot {
    fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    fn is_admin(&self) -> bool {
        self.is_admin
    }

    fn user(&self) -> Option<User> {
        None
    }

    fn snapshot(&self) -> AuthSnapshot {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_api_json() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "email": "ada@example.com",
            "role": "admin",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "is_active": true,
            "must_change_password": true
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.is_admin());
        assert!(user.must_change_password);
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_missing_flag_defaults_to_false() {
        let json = r#"{"id":"550e8400-e29b-41d4-a716-446655440000","email":"a@b.c","role":"user"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(!user.is_admin());
        assert!(!user.must_change_password);
    }

    #[test]
    fn test_snapshot_is_a_provider() {
        let snap = AuthSnapshot::admin();
        assert_eq!(AuthProvider::snapshot(&snap), snap);
        assert!(snap.user().is_none());
    }
}
