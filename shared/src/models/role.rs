//! Role and Identity Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{RecordId, optional_id};

/// Account role
///
/// The backend stores the role as a lowercase string; anything else is
/// rejected at the boundary instead of falling through string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "superadmin")]
    SuperAdmin,
    #[serde(rename = "admin")]
    Admin,
    /// Employee self-service
    #[serde(rename = "pegawai")]
    Pegawai,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::SuperAdmin, Role::Admin, Role::Pegawai];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "superadmin",
            Role::Admin => "admin",
            Role::Pegawai => "pegawai",
        }
    }

    /// Superadmin or admin
    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Pegawai)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role string is not one of the known roles
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "superadmin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "pegawai" => Ok(Role::Pegawai),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Logged-in identity
///
/// Written once at login and read everywhere; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: RecordId,
    pub name: String,
    pub role: Role,
    /// Owning company (absent for superadmin)
    #[serde(default, deserialize_with = "optional_id")]
    pub company_id: Option<RecordId>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Identity {
    pub fn is_self(&self, id: &RecordId) -> bool {
        &self.id == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!(serde_json::from_str::<Role>("\"manager\"").is_err());
        assert_eq!(" Admin ".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(
            "hrd".parse::<Role>(),
            Err(UnknownRole("hrd".to_string()))
        );
    }

    #[test]
    fn test_identity_deserialize_mixed_ids() {
        let json = r#"{"id":"10","name":"Budi","role":"pegawai","company_id":1}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.id, RecordId::from(10));
        assert_eq!(identity.company_id, Some(RecordId::from("1")));
        assert_eq!(identity.role, Role::Pegawai);
        assert!(identity.is_self(&RecordId::from(10)));
    }

    #[test]
    fn test_superadmin_without_company() {
        let json = r#"{"id":1,"name":"Root","role":"superadmin","company_id":null}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert!(identity.company_id.is_none());
        assert!(identity.role.is_staff());
    }
}
