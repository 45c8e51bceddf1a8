//! Ticket API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::tickets::{
    AccidentIntake, CleaningIntake, MaintenanceIntake, MergedView, SourceFailure,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::TechnicianRef;
use shared::query::{ListQuery, PaginatedResponse};
use shared::ticket::{NativeTicket, Ticket, TicketCategory, TicketKey};

/// One page of a merged queue, with failed-source provenance
#[derive(Debug, Serialize)]
pub struct TicketPage {
    #[serde(flatten)]
    pub page: PaginatedResponse<Ticket>,
    /// Categories missing from this page because their source failed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unavailable: Vec<SourceFailure>,
}

/// Claim request body
#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub technician_id: String,
    /// Display name; falls back to the id when absent
    pub technician_name: Option<String>,
}

/// Resolve request body
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub technician_id: String,
}

/// Reject request body
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub note: String,
}

/// Query for the rejected-work queue
///
/// `ListQuery` fields are repeated here because the urlencoded format
/// cannot deserialize flattened non-string fields.
#[derive(Debug, Deserialize)]
pub struct RejectedQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
    pub q: Option<String>,
    /// Narrow to work rejected while this technician held the ticket
    pub technician_id: Option<String>,
}

impl RejectedQuery {
    fn list(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            limit: self.limit,
            sort: self.sort.clone(),
            q: self.q.clone(),
        }
    }
}

fn parse_key(category: &str, id: &str) -> AppResult<TicketKey> {
    let category: TicketCategory = category.parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::UnknownCategory,
            format!("Unknown ticket category: {}", category),
        )
        .with_detail("category", category)
    })?;
    Ok(TicketKey::new(category, id))
}

fn render_page(view: &MergedView, mut query: ListQuery, state: &ServerState) -> TicketPage {
    if query.limit.is_none() {
        query.limit = Some(state.config.default_page_limit);
    }
    let (page, unavailable) = view.apply(&query);
    TicketPage { page, unavailable }
}

// ==================== Queue views ====================

/// GET /api/tickets - merged queue over all categories
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<TicketPage>> {
    let view = state.manager.merged_view().await;
    Ok(Json(render_page(&view, query, &state)))
}

/// GET /api/tickets/unassigned - claimable tickets
pub async fn list_unassigned(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<TicketPage>> {
    let view = state.manager.merged_view().await.filter(Ticket::is_claimable);
    Ok(Json(render_page(&view, query, &state)))
}

/// GET /api/tickets/review/pending - tickets awaiting a review decision
pub async fn list_pending_review(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<TicketPage>> {
    let view = state.review.pending().await;
    Ok(Json(render_page(&view, query, &state)))
}

/// GET /api/tickets/review/rejected - returned work
pub async fn list_rejected(
    State(state): State<ServerState>,
    Query(query): Query<RejectedQuery>,
) -> AppResult<Json<TicketPage>> {
    let view = state.review.rejected(query.technician_id.as_deref()).await;
    Ok(Json(render_page(&view, query.list(), &state)))
}

// ==================== Intake ====================

/// POST /api/tickets/cleaning - open a cleaning ticket
pub async fn open_cleaning(
    State(state): State<ServerState>,
    Json(payload): Json<CleaningIntake>,
) -> AppResult<Json<Ticket>> {
    Ok(Json(state.intake.open_cleaning(payload).await?))
}

/// POST /api/tickets/maintenance - open a maintenance ticket
pub async fn open_maintenance(
    State(state): State<ServerState>,
    Json(payload): Json<MaintenanceIntake>,
) -> AppResult<Json<Ticket>> {
    Ok(Json(state.intake.open_maintenance(payload).await?))
}

/// POST /api/tickets/accident - open an accident report
pub async fn open_accident(
    State(state): State<ServerState>,
    Json(payload): Json<AccidentIntake>,
) -> AppResult<Json<Ticket>> {
    Ok(Json(state.intake.open_accident(payload).await?))
}

// ==================== Single ticket ====================

/// GET /api/tickets/:category/:id - one ticket snapshot
pub async fn get_by_key(
    State(state): State<ServerState>,
    Path((category, id)): Path<(String, String)>,
) -> AppResult<Json<Ticket>> {
    let key = parse_key(&category, &id)?;
    Ok(Json(state.manager.get(&key).await?))
}

/// GET /api/tickets/:category/:id/native - category-native snapshot
pub async fn get_native(
    State(state): State<ServerState>,
    Path((category, id)): Path<(String, String)>,
) -> AppResult<Json<NativeTicket>> {
    let key = parse_key(&category, &id)?;
    Ok(Json(state.manager.native_snapshot(&key).await?))
}

// ==================== Lifecycle events ====================

/// POST /api/tickets/:category/:id/claim
pub async fn claim(
    State(state): State<ServerState>,
    Path((category, id)): Path<(String, String)>,
    Json(payload): Json<ClaimRequest>,
) -> AppResult<Json<Ticket>> {
    let key = parse_key(&category, &id)?;
    let technician = TechnicianRef::new(
        payload.technician_id.clone(),
        payload
            .technician_name
            .unwrap_or_else(|| payload.technician_id.clone()),
    );
    Ok(Json(state.manager.claim(&key, technician).await?))
}

/// POST /api/tickets/:category/:id/resolve
pub async fn resolve(
    State(state): State<ServerState>,
    Path((category, id)): Path<(String, String)>,
    Json(payload): Json<ResolveRequest>,
) -> AppResult<Json<Ticket>> {
    let key = parse_key(&category, &id)?;
    Ok(Json(state.manager.resolve(&key, &payload.technician_id).await?))
}

/// POST /api/tickets/:category/:id/approve
pub async fn approve(
    State(state): State<ServerState>,
    Path((category, id)): Path<(String, String)>,
) -> AppResult<Json<Ticket>> {
    let key = parse_key(&category, &id)?;
    Ok(Json(state.review.approve(&key).await?))
}

/// POST /api/tickets/:category/:id/reject
pub async fn reject(
    State(state): State<ServerState>,
    Path((category, id)): Path<(String, String)>,
    Json(payload): Json<RejectRequest>,
) -> AppResult<Json<Ticket>> {
    let key = parse_key(&category, &id)?;
    Ok(Json(state.review.reject(&key, &payload.note).await?))
}
