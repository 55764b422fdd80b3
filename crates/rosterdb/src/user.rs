//! User records, roles and field updates

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// User role
///
/// Roles compare exactly: `"admin"` and `"Admin"` are different roles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Administrator (`"admin"`)
    Admin,
    /// Regular, non-privileged user (`"user"`)
    #[default]
    User,
    /// Any other non-empty role name
    Custom(String),
}

impl Role {
    /// Role name as written in records
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Custom(name) => name,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Err(Error::InvalidInput("role name is empty".to_string())),
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Ok(Role::Custom(other.to_string())),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(D::Error::custom)
    }
}

/// User account record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier, assigned by the facade
    pub id: u64,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// User role
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Check if user is an administrator
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Apply a single field update in place
    pub fn apply(&mut self, update: &FieldUpdate) {
        match update {
            FieldUpdate::Name(name) => self.name.clone_from(name),
            FieldUpdate::Email(email) => self.email.clone_from(email),
            FieldUpdate::Role(role) => self.role.clone_from(role),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User({}, {})", self.name, self.email)
    }
}

/// Fields of a user that can be supplied before an id is assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// User role
    pub role: Role,
}

/// Updatable user fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    /// `name`
    Name,
    /// `email`
    Email,
    /// `role`
    Role,
}

impl FromStr for UserField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(UserField::Name),
            "email" => Ok(UserField::Email),
            "role" => Ok(UserField::Role),
            other => Err(Error::UnknownField(other.to_string())),
        }
    }
}

/// A single field assignment for `UserManager::update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Replace the display name
    Name(String),
    /// Replace the email (validated like on create)
    Email(String),
    /// Replace the role
    Role(Role),
}

impl FieldUpdate {
    /// Build an update from a field and its textual value
    pub fn new(field: UserField, value: &str) -> Result<Self> {
        Ok(match field {
            UserField::Name => FieldUpdate::Name(value.to_string()),
            UserField::Email => FieldUpdate::Email(value.to_string()),
            UserField::Role => FieldUpdate::Role(value.parse()?),
        })
    }

    /// Field this update targets
    pub fn field(&self) -> UserField {
        match self {
            FieldUpdate::Name(_) => UserField::Name,
            FieldUpdate::Email(_) => UserField::Email,
            FieldUpdate::Role(_) => UserField::Role,
        }
    }
}

/// Check that an email has an `@` and a `.` in the part after it
///
/// Only the component between the first and a possible second `@` counts
/// as the domain.
pub fn validate_email(email: &str) -> Result<()> {
    let has_domain = email
        .split('@')
        .nth(1)
        .is_some_and(|domain| domain.contains('.'));

    if has_domain {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!("invalid email address: {}", email)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!(
            "Admin".parse::<Role>().unwrap(),
            Role::Custom("Admin".to_string())
        );
        assert!(matches!("".parse::<Role>(), Err(Error::InvalidInput(_))));

        assert_eq!(Role::Custom("guest".to_string()).to_string(), "guest");
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_user_display_and_admin() {
        let user = alice();
        assert_eq!(user.to_string(), "User(Alice, alice@example.com)");
        assert!(user.is_admin());

        let bob = User {
            role: Role::User,
            ..alice()
        };
        assert!(!bob.is_admin());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a@b.c@d").is_ok());

        assert!(validate_email("alice.example.com").is_err());
        assert!(validate_email("alice@example").is_err());
        // Domain separator must follow the first '@'
        assert!(validate_email("al.ice@example").is_err());
        assert!(validate_email("a@b@c.d").is_err());
    }

    #[test]
    fn test_apply_changes_only_target_field() {
        let mut user = alice();
        user.apply(&FieldUpdate::Name("Alicia".to_string()));

        assert_eq!(user.name, "Alicia");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.id, 1);
    }

    #[test]
    fn test_field_update_new() {
        let update = FieldUpdate::new(UserField::Role, "auditor").unwrap();
        assert_eq!(update, FieldUpdate::Role(Role::Custom("auditor".to_string())));
        assert_eq!(update.field(), UserField::Role);

        assert!(matches!(
            "age".parse::<UserField>(),
            Err(Error::UnknownField(name)) if name == "age"
        ));
    }

    #[test]
    fn test_user_json() {
        let json = serde_json::to_string(&alice()).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"name":"Alice","email":"alice@example.com","role":"admin"}"#
        );

        let user: User =
            serde_json::from_str(r#"{"id":2,"name":"Bob","email":"bob@example.com"}"#).unwrap();
        assert_eq!(user.role, Role::User);
    }
}
