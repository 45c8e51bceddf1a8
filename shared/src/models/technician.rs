//! Technician and originator references

use serde::{Deserialize, Serialize};

/// Reference to a technician (user registry is an external collaborator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianRef {
    /// Technician reference (String ID)
    pub id: String,
    /// Display name snapshot (used in queue views and text search)
    pub name: String,
}

impl TechnicianRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Who opened a ticket
///
/// Auto-generated tickets (e.g. recurring cleaning rounds) carry the
/// `System` sentinel instead of a user reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Originator {
    System,
    User { id: String },
}

impl Originator {
    /// Native originator field encoding: `None` means system-generated
    pub fn from_native_key(key: Option<&str>) -> Self {
        match key {
            Some(id) if !id.is_empty() => Self::User { id: id.to_string() },
            _ => Self::System,
        }
    }

    pub fn native_key(&self) -> Option<String> {
        match self {
            Self::System => None,
            Self::User { id } => Some(id.clone()),
        }
    }
}

impl Default for Originator {
    fn default() -> Self {
        Self::System
    }
}
