//! Canonical ticket model
//!
//! Category-agnostic representation of a work order. Every ticket,
//! regardless of which intake created it, is normalized into this shape
//! before it enters the shared lifecycle.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{AssetRef, Originator, TechnicianRef};

/// Ticket category
///
/// Immutable after creation. The declared order here is also the
/// category precedence used by merged queue views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketCategory {
    Cleaning,
    Maintenance,
    Accident,
}

impl TicketCategory {
    /// Declared category order for merged views
    pub const ALL: [TicketCategory; 3] = [
        TicketCategory::Cleaning,
        TicketCategory::Maintenance,
        TicketCategory::Accident,
    ];

    /// Rank within the declared order
    pub fn rank(&self) -> u8 {
        match self {
            Self::Cleaning => 0,
            Self::Maintenance => 1,
            Self::Accident => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cleaning => "cleaning",
            Self::Maintenance => "maintenance",
            Self::Accident => "accident",
        }
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for TicketCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cleaning" => Ok(Self::Cleaning),
            "maintenance" => Ok(Self::Maintenance),
            "accident" => Ok(Self::Accident),
            other => Err(format!("unknown ticket category: {}", other)),
        }
    }
}

/// Ticket lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Unclaimed, open to all technicians (initial state, re-entered on rejection)
    #[default]
    Open,
    /// Claimed by a technician, work in progress
    Claimed,
    /// Resolved by the technician, waiting for reviewer decision
    PendingApproval,
    /// Approved and finished (terminal)
    Closed,
}

/// Reviewer decision state, meaningful once a ticket has been resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalState {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Ticket priority, ordered Low < Medium < High
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Composite ticket identity
///
/// A ticket id is unique within its category, not globally; every
/// cross-category operation keys on (category, id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketKey {
    pub category: TicketCategory,
    pub id: String,
}

impl TicketKey {
    pub fn new(category: TicketCategory, id: impl Into<String>) -> Self {
        Self {
            category,
            id: id.into(),
        }
    }
}

impl fmt::Display for TicketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.id)
    }
}

/// A past rejection, kept for audit display after the ticket is re-resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectionRecord {
    pub note: String,
    /// Epoch millis
    pub rejected_at: i64,
    /// Technician whose work was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician: Option<TechnicianRef>,
}

/// Category-specific payload carried alongside the canonical fields
///
/// Domain payload only; the lifecycle machinery never inspects it beyond
/// round-tripping it through the category adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketExtras {
    Cleaning,
    Maintenance,
    Accident {
        /// Reported cost in currency unit (stored, not accounted)
        #[serde(skip_serializing_if = "Option::is_none")]
        reported_cost: Option<Decimal>,
        /// Free-form incident classifier
        #[serde(skip_serializing_if = "Option::is_none")]
        croca_type: Option<String>,
    },
}

impl TicketExtras {
    pub fn category(&self) -> TicketCategory {
        match self {
            Self::Cleaning => TicketCategory::Cleaning,
            Self::Maintenance => TicketCategory::Maintenance,
            Self::Accident { .. } => TicketCategory::Accident,
        }
    }
}

/// Canonical ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Id unique within the category
    pub id: String,
    pub category: TicketCategory,
    pub status: TicketStatus,
    pub priority: Priority,
    pub description: String,
    pub asset: AssetRef,
    /// Holder of the claim; absent means unassigned/open to all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<TechnicianRef>,
    pub opened_by: Originator,
    /// Epoch millis, immutable
    pub created_at: i64,
    pub approval: ApprovalState,
    /// Present if and only if `approval == Rejected`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_note: Option<String>,
    /// Prior rejections, kept for audit display
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejections: Vec<RejectionRecord>,
    /// Photo evidence (URI; storage is an external collaborator)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub extras: TicketExtras,
}

impl Ticket {
    /// Composite identity of this ticket
    pub fn key(&self) -> TicketKey {
        TicketKey::new(self.category, self.id.clone())
    }

    /// Open and not held by any technician
    pub fn is_claimable(&self) -> bool {
        self.status == TicketStatus::Open && self.assigned_to.is_none()
    }

    /// Assigned technician display name (empty when unassigned)
    pub fn technician_name(&self) -> &str {
        self.assigned_to.as_ref().map(|t| t.name.as_str()).unwrap_or("")
    }
}
