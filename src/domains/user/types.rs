use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Platform user role enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Donor,
    Association,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Donor => "donor",
            UserRole::Association => "association",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "donor" => Some(UserRole::Donor),
            "association" => Some(UserRole::Association),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    pub fn all_variants() -> Vec<&'static str> {
        vec!["donor", "association", "admin"]
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal user projection for reports (dropdowns, leaderboards, naming).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub display_name: String,
}
