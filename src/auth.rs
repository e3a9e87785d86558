use serde::{Deserialize, Serialize};

/// Staff roles, consumed by the authorization layer in front of the engine.
/// The engine itself is role-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    /// Only admins may create or delete tables.
    pub fn can_manage_tables(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Both roles may create and delete reservations.
    pub fn can_manage_reservations(self) -> bool {
        matches!(self, Role::Admin | Role::Employee)
    }
}
