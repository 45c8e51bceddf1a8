//! Asset reference types
//!
//! The asset registry itself is an external collaborator; tickets only
//! carry a reference to it. The reference is deliberately tri-state so
//! display logic can tell "this ticket has no asset" apart from "the
//! asset exists but has not been resolved yet".

use serde::{Deserialize, Serialize};

/// Resolved asset data as provided by the external asset registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    /// Asset reference (String ID)
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Geocoordinates (lat, lng), resolved lazily by the registry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<(f64, f64)>,
}

/// Reference from a ticket to a physical asset
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetRef {
    /// The ticket has no associated asset
    #[default]
    Unknown,
    /// The ticket references an asset that has not been resolved yet
    Unresolved { asset_id: String },
    /// Fully resolved asset data
    Resolved(AssetSummary),
}

impl AssetRef {
    /// Build a reference from an optional native foreign key
    ///
    /// Absent keys map to the explicit [`AssetRef::Unknown`] sentinel,
    /// never to an empty record.
    pub fn from_native_key(key: Option<&str>) -> Self {
        match key {
            Some(id) if !id.is_empty() => Self::Unresolved {
                asset_id: id.to_string(),
            },
            _ => Self::Unknown,
        }
    }

    /// The native foreign key this reference round-trips to
    pub fn native_key(&self) -> Option<String> {
        match self {
            Self::Unknown => None,
            Self::Unresolved { asset_id } => Some(asset_id.clone()),
            Self::Resolved(summary) => Some(summary.id.clone()),
        }
    }

    /// Display name used in queue views and text search
    ///
    /// Unresolved references fall back to the raw id so search still
    /// works before the registry lookup completes.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Unknown => "",
            Self::Unresolved { asset_id } => asset_id,
            Self::Resolved(summary) => &summary.name,
        }
    }
}
