use serde::{Deserialize, Serialize};

/// Permission tier for an account. Stored in the database as the
/// corresponding integer (0 = admin, 1 = moderator, 2 = user).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Moderator,
    User,
}

impl Role {
    pub fn as_i64(self) -> i64 {
        match self {
            Role::Admin => 0,
            Role::Moderator => 1,
            Role::User => 2,
        }
    }

    pub fn from_i64(value: i64) -> Option<Role> {
        match value {
            0 => Some(Role::Admin),
            1 => Some(Role::Moderator),
            2 => Some(Role::User),
            _ => None,
        }
    }
}

/// Allowed-role sets used by route declarations.
pub mod roles {
    use super::Role;

    pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
    pub const PRIVILEGED: &[Role] = &[Role::Admin, Role::Moderator];
    pub const EVERYONE: &[Role] = &[Role::Admin, Role::Moderator, Role::User];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_integer_mapping_round_trips() {
        for role in [Role::Admin, Role::Moderator, Role::User] {
            assert_eq!(Role::from_i64(role.as_i64()), Some(role));
        }
    }

    #[test]
    fn unknown_role_values_are_rejected() {
        assert_eq!(Role::from_i64(3), None);
        assert_eq!(Role::from_i64(-1), None);
    }
}
