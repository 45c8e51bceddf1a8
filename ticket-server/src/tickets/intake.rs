//! Ticket intake
//!
//! Validated entry point for new work orders. Each category has its own
//! request shape mirroring its native record; intake validates the
//! request, stamps id and timestamp, builds the native record, and
//! admits it through the manager (which normalizes it into the pool and
//! broadcasts the opened event).

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, AppResult};
use shared::ticket::{
    AccidentRecord, ApprovalState, CleaningRecord, MaintenanceRecord, NativeTicket, Priority,
    Ticket, TicketStatus,
};
use std::sync::Arc;
use validator::Validate;

use super::manager::TicketManager;

/// New cleaning work order
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CleaningIntake {
    /// What needs cleaning
    #[validate(length(min = 1, message = "Task description is required"))]
    pub task: String,
    /// Zone identifier in the cleaning roster, if known
    pub zone_ref: Option<String>,
    pub urgency: Option<Priority>,
    /// Reporting user; absent means opened by the system
    pub reported_by: Option<String>,
}

/// New maintenance work order
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MaintenanceIntake {
    #[validate(length(min = 1, message = "Fault description is required"))]
    pub fault_description: String,
    /// Equipment identifier in the asset register, if known
    pub equipment_ref: Option<String>,
    pub severity: Option<Priority>,
    pub requested_by: Option<String>,
}

/// New accident report
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AccidentIntake {
    #[validate(length(min = 1, message = "Incident summary is required"))]
    pub summary: String,
    /// Site identifier where the incident happened, if known
    pub site_ref: Option<String>,
    pub impact: Option<Priority>,
    pub witness_id: Option<String>,
    /// Estimated damage cost reported at intake
    pub reported_cost: Option<Decimal>,
    /// Incident classifier from the reporting form
    pub croca_type: Option<String>,
    pub photo: Option<String>,
}

/// Intake service - builds native records and admits them into the pool
#[derive(Debug, Clone)]
pub struct IntakeService {
    manager: Arc<TicketManager>,
}

impl IntakeService {
    pub fn new(manager: Arc<TicketManager>) -> Self {
        Self { manager }
    }

    pub async fn open_cleaning(&self, input: CleaningIntake) -> AppResult<Ticket> {
        check(&input)?;
        let record = CleaningRecord {
            id: new_id(),
            zone_ref: input.zone_ref,
            task: input.task,
            urgency: input.urgency.unwrap_or_default(),
            reported_by: input.reported_by,
            cleaner_id: None,
            cleaner_name: None,
            state: TicketStatus::Open,
            review: ApprovalState::Pending,
            review_note: None,
            opened_at: now(),
            rejection_log: vec![],
        };
        Ok(self.manager.open(NativeTicket::Cleaning(record)).await?)
    }

    pub async fn open_maintenance(&self, input: MaintenanceIntake) -> AppResult<Ticket> {
        check(&input)?;
        let record = MaintenanceRecord {
            id: new_id(),
            equipment_ref: input.equipment_ref,
            fault_description: input.fault_description,
            severity: input.severity.unwrap_or_default(),
            requested_by: input.requested_by,
            technician_id: None,
            technician_name: None,
            status: TicketStatus::Open,
            approval: ApprovalState::Pending,
            approval_note: None,
            logged_at: now(),
            rejection_log: vec![],
        };
        Ok(self.manager.open(NativeTicket::Maintenance(record)).await?)
    }

    pub async fn open_accident(&self, input: AccidentIntake) -> AppResult<Ticket> {
        check(&input)?;
        let record = AccidentRecord {
            id: new_id(),
            site_ref: input.site_ref,
            summary: input.summary,
            impact: input.impact.unwrap_or_default(),
            witness_id: input.witness_id,
            handler_id: None,
            handler_name: None,
            phase: TicketStatus::Open,
            verdict: ApprovalState::Pending,
            verdict_note: None,
            occurred_at: now(),
            reported_cost: input.reported_cost,
            croca_type: input.croca_type,
            photo: input.photo,
            rejection_log: vec![],
        };
        Ok(self.manager.open(NativeTicket::Accident(record)).await?)
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Run derive-based validation and fold failures into one AppError
fn check(input: &impl Validate) -> AppResult<()> {
    input.validate().map_err(|errors| {
        let mut err = AppError::validation("Request validation failed");
        for (field, field_errors) in errors.field_errors() {
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                err = err.with_detail(field.to_string(), message);
            }
        }
        err
    })
}
