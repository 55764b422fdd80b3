//! Grouping users by role

use serde::{Serialize, Serializer};

use crate::user::{Role, User};

/// Names grouped by role
///
/// Roles keep the order in which they first appeared; names keep input
/// order within each role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleGroups {
    groups: Vec<(Role, Vec<String>)>,
}

impl RoleGroups {
    /// Names for a role, if any user had it
    pub fn get(&self, role: &Role) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(r, _)| r == role)
            .map(|(_, names)| names.as_slice())
    }

    /// Iterate over `(role, names)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&Role, &[String])> {
        self.groups
            .iter()
            .map(|(role, names)| (role, names.as_slice()))
    }

    /// Number of distinct roles
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no user was grouped
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn push(&mut self, role: &Role, name: &str) {
        match self.groups.iter_mut().find(|(r, _)| r == role) {
            Some((_, names)) => names.push(name.to_string()),
            None => self.groups.push((role.clone(), vec![name.to_string()])),
        }
    }
}

impl Serialize for RoleGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.groups.iter().map(|(role, names)| (role, names)))
    }
}

/// Group user names by role, optionally keeping only one role
pub fn group_by_role<'a, I>(users: I, filter_role: Option<&Role>) -> RoleGroups
where
    I: IntoIterator<Item = &'a User>,
{
    let mut groups = RoleGroups::default();

    for user in users {
        if filter_role.is_some_and(|role| *role != user.role) {
            continue;
        }
        groups.push(&user.role, &user.name);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, name: &str, role: Role) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role,
        }
    }

    fn sample() -> Vec<User> {
        vec![
            user(1, "Alice", Role::Admin),
            user(2, "Bob", Role::User),
            user(3, "Carol", Role::Admin),
            user(4, "Dave", Role::Custom("auditor".to_string())),
            user(5, "Erin", Role::User),
        ]
    }

    #[test]
    fn test_group_preserves_order() {
        let users = sample();
        let groups = group_by_role(&users, None);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups.get(&Role::Admin).unwrap(), ["Alice", "Carol"]);
        assert_eq!(groups.get(&Role::User).unwrap(), ["Bob", "Erin"]);

        let roles: Vec<&Role> = groups.iter().map(|(role, _)| role).collect();
        assert_eq!(
            roles,
            [&Role::Admin, &Role::User, &Role::Custom("auditor".to_string())]
        );
    }

    #[test]
    fn test_group_with_filter() {
        let users = sample();
        let groups = group_by_role(&users, Some(&Role::User));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups.get(&Role::User).unwrap(), ["Bob", "Erin"]);
        assert!(groups.get(&Role::Admin).is_none());
    }

    #[test]
    fn test_group_empty() {
        let groups = group_by_role(&Vec::<User>::new(), None);
        assert!(groups.is_empty());

        let users = sample();
        assert!(group_by_role(&users, Some(&Role::Custom("nobody".to_string()))).is_empty());
    }

    #[test]
    fn test_group_json() {
        let users = sample();
        let json = serde_json::to_string(&group_by_role(&users, None)).unwrap();
        assert_eq!(
            json,
            r#"{"admin":["Alice","Carol"],"user":["Bob","Erin"],"auditor":["Dave"]}"#
        );
    }
}
