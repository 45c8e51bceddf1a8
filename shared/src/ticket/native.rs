//! Category-native record shapes
//!
//! Each intake produces its own record shape with its own foreign-key
//! and field names; the three shapes are structurally incompatible and
//! only meet in the canonical model after adaptation. These are the
//! wire shapes of the external persistence collaborator.

use serde::{Deserialize, Serialize};

use super::canonical::{ApprovalState, Priority, RejectionRecord, TicketCategory, TicketStatus};

/// Cleaning work order as stored by the cleaning intake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningRecord {
    pub id: String,
    /// Zone/asset reference (String ID, absent when no asset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_ref: Option<String>,
    pub task: String,
    pub urgency: Priority,
    /// Originator (absent = system-generated round)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaner_name: Option<String>,
    pub state: TicketStatus,
    pub review: ApprovalState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_note: Option<String>,
    /// Epoch millis
    pub opened_at: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejection_log: Vec<RejectionRecord>,
}

/// Maintenance work order as stored by the maintenance intake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: String,
    /// Equipment/asset reference (String ID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_ref: Option<String>,
    pub fault_description: String,
    pub severity: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician_name: Option<String>,
    pub status: TicketStatus,
    pub approval: ApprovalState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_note: Option<String>,
    /// Epoch millis
    pub logged_at: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejection_log: Vec<RejectionRecord>,
}

/// Accident report as stored by the accident intake
///
/// Carries incident-report metadata (cost, classifier, photo) that is
/// domain payload, not lifecycle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentRecord {
    pub id: String,
    /// Site/asset reference (String ID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_ref: Option<String>,
    pub summary: String,
    pub impact: Priority,
    /// Witness who filed the report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub witness_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler_name: Option<String>,
    pub phase: TicketStatus,
    pub verdict: ApprovalState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict_note: Option<String>,
    /// Epoch millis
    pub occurred_at: i64,
    /// Reported cost in currency unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_cost: Option<rust_decimal::Decimal>,
    /// Free-form incident classifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub croca_type: Option<String>,
    /// Photo evidence (URI)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejection_log: Vec<RejectionRecord>,
}

/// Tagged union over the three category-native shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NativeTicket {
    Cleaning(CleaningRecord),
    Maintenance(MaintenanceRecord),
    Accident(AccidentRecord),
}

impl NativeTicket {
    pub fn category(&self) -> TicketCategory {
        match self {
            Self::Cleaning(_) => TicketCategory::Cleaning,
            Self::Maintenance(_) => TicketCategory::Maintenance,
            Self::Accident(_) => TicketCategory::Accident,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Cleaning(r) => &r.id,
            Self::Maintenance(r) => &r.id,
            Self::Accident(r) => &r.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_ticket_dispatch() {
        let native = NativeTicket::Maintenance(MaintenanceRecord {
            id: "m-1".to_string(),
            equipment_ref: Some("hvac-2".to_string()),
            fault_description: "Compressor rattle".to_string(),
            severity: Priority::High,
            requested_by: Some("u-3".to_string()),
            technician_id: None,
            technician_name: None,
            status: TicketStatus::Open,
            approval: ApprovalState::Pending,
            approval_note: None,
            logged_at: 1_700_000_000_000,
            rejection_log: vec![],
        });
        assert_eq!(native.category(), TicketCategory::Maintenance);
        assert_eq!(native.id(), "m-1");
    }

    #[test]
    fn test_accident_record_serializes_tag() {
        let native = NativeTicket::Accident(AccidentRecord {
            id: "a-1".to_string(),
            site_ref: None,
            summary: "Forklift clipped shelving".to_string(),
            impact: Priority::High,
            witness_id: Some("u-9".to_string()),
            handler_id: None,
            handler_name: None,
            phase: TicketStatus::Open,
            verdict: ApprovalState::Pending,
            verdict_note: None,
            occurred_at: 1_700_000_000_000,
            reported_cost: None,
            croca_type: Some("structural".to_string()),
            photo: None,
            rejection_log: vec![],
        });
        let json = serde_json::to_string(&native).unwrap();
        assert!(json.contains("\"category\":\"ACCIDENT\""));
        assert!(json.contains("\"croca_type\":\"structural\""));
    }
}
