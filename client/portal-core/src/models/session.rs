use serde::{Deserialize, Deserializer, Serialize};

/// Group names that grant the admin role.
pub const ADMIN_GROUPS: [&str; 2] = ["Admin", "Manager"];

/// Capability level derived from the session's group memberships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// The logged-in actor, as persisted in the "user" storage slot.
///
/// `role` is always recomputed from `groups` on deserialization; a stored
/// role value is never trusted. The default session is the empty
/// unauthorized identity the gate falls back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Session {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub groups: Vec<String>,
    pub role: Role,
}

impl Session {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>, groups: Vec<String>) -> Self {
        let role = derive_role(&groups);
        Self {
            full_name: full_name.into(),
            email: email.into(),
            groups,
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Admin iff the groups contain "Admin" or "Manager". Case-sensitive, matching
/// the group names the backend issues.
pub fn derive_role(groups: &[String]) -> Role {
    if groups.iter().any(|g| ADMIN_GROUPS.contains(&g.as_str())) {
        Role::Admin
    } else {
        Role::User
    }
}

impl<'de> Deserialize<'de> for Session {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(rename = "fullName", default)]
            full_name: String,
            #[serde(default)]
            email: String,
            #[serde(default)]
            groups: Vec<String>,
            // Accepted but ignored: role is recomputed from groups.
            #[serde(default, rename = "role")]
            _role: Option<Role>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Session::new(raw.full_name, raw.email, raw.groups))
    }
}
