//! Aggregation engine
//!
//! Merges per-category ticket sets into one logical collection and
//! exposes pure, composable filter/sort/paginate operations over it.
//! All operations work on snapshots; nothing here mutates a source
//! collection or takes a lock.
//!
//! Base ordering is deterministic under re-merge: declared category
//! order first, ties broken by creation timestamp (then id). All sorts
//! are stable, so equal keys keep their prior relative order.

use serde::Serialize;
use shared::query::{ListQuery, PaginatedResponse};
use shared::ticket::{Ticket, TicketCategory};
use std::cmp::Ordering;

use super::pool::{StoreError, StoreResult};

/// A category whose source failed to load during a merge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub category: TicketCategory,
    pub reason: String,
}

/// Sortable queue columns
///
/// Each key is a shared comparable projection; heterogeneous columns
/// (asset, technician) compare by their derived display value, never by
/// raw record identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Category,
    CreatedAt,
    Priority,
    Status,
    Asset,
    Technician,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortKey {
    /// Parse a sort expression like "priority" or "created_at_desc"
    pub fn parse(expr: &str) -> Option<(SortKey, SortDirection)> {
        let (column, direction) = match expr.strip_suffix("_desc") {
            Some(column) => (column, SortDirection::Descending),
            None => (expr, SortDirection::Ascending),
        };
        let key = match column {
            "category" => SortKey::Category,
            "created_at" => SortKey::CreatedAt,
            "priority" => SortKey::Priority,
            "status" => SortKey::Status,
            "asset" => SortKey::Asset,
            "technician" => SortKey::Technician,
            _ => return None,
        };
        Some((key, direction))
    }

    fn compare(&self, a: &Ticket, b: &Ticket) -> Ordering {
        match self {
            SortKey::Category => a.category.rank().cmp(&b.category.rank()),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Priority => a.priority.cmp(&b.priority),
            SortKey::Status => status_rank(a).cmp(&status_rank(b)),
            SortKey::Asset => a
                .asset
                .display_name()
                .to_lowercase()
                .cmp(&b.asset.display_name().to_lowercase()),
            SortKey::Technician => a
                .technician_name()
                .to_lowercase()
                .cmp(&b.technician_name().to_lowercase()),
        }
    }
}

fn status_rank(ticket: &Ticket) -> u8 {
    use shared::ticket::TicketStatus::*;
    match ticket.status {
        Open => 0,
        Claimed => 1,
        PendingApproval => 2,
        Closed => 3,
    }
}

/// Merged, provenance-tagged view over the category ticket sets
#[derive(Debug, Clone, Serialize)]
pub struct MergedView {
    pub rows: Vec<Ticket>,
    /// Categories whose source failed; a partial merge is flagged, never
    /// silently returned as a smaller complete one
    pub unavailable: Vec<SourceFailure>,
}

impl MergedView {
    /// Merge per-category results into one deterministic sequence
    ///
    /// A failed category degrades the merge to the remaining categories
    /// and is reported in `unavailable`.
    pub fn merge<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = (TicketCategory, StoreResult<Vec<Ticket>>)>,
    {
        let mut rows = Vec::new();
        let mut unavailable = Vec::new();

        for (category, result) in sources {
            match result {
                Ok(tickets) => rows.extend(tickets),
                Err(err) => {
                    tracing::warn!(
                        category = %category,
                        error = %err,
                        "Category source unavailable, degrading merge"
                    );
                    unavailable.push(SourceFailure {
                        category,
                        reason: source_reason(&err),
                    });
                }
            }
        }

        rows.sort_by(|a, b| {
            a.category
                .rank()
                .cmp(&b.category.rank())
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });

        Self { rows, unavailable }
    }

    /// Keep rows matching the predicate (pure; source failures carry over)
    pub fn filter(&self, predicate: impl Fn(&Ticket) -> bool) -> Self {
        Self {
            rows: self.rows.iter().filter(|t| predicate(t)).cloned().collect(),
            unavailable: self.unavailable.clone(),
        }
    }

    /// Stable sort by a queue column
    pub fn sort_by(&self, key: SortKey, direction: SortDirection) -> Self {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            let ordering = key.compare(a, b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        Self {
            rows,
            unavailable: self.unavailable.clone(),
        }
    }

    /// Case-insensitive substring match over the searchable projection:
    /// description, asset display name, technician name
    pub fn text_filter(&self, query: &str) -> Self {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return self.clone();
        }
        self.filter(|ticket| {
            ticket.description.to_lowercase().contains(&needle)
                || ticket.asset.display_name().to_lowercase().contains(&needle)
                || ticket.technician_name().to_lowercase().contains(&needle)
        })
    }

    /// Slice one page out of the current sequence (1-based page index)
    pub fn paginate(&self, page: u32, limit: u32) -> PaginatedResponse<Ticket> {
        let total = self.rows.len() as u64;
        if limit == 0 {
            return PaginatedResponse::new(Vec::new(), total, page.max(1), 0);
        }
        let page = page.max(1);
        let start = ((page - 1) as usize).saturating_mul(limit as usize);
        let data = self
            .rows
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();
        PaginatedResponse::new(data, total, page, limit)
    }

    /// Apply a caller query: text filter, then sort, then paginate
    ///
    /// The text filter matches the view's current state, so a caller that
    /// pre-filtered (e.g. unclaimed-only) searches within that subset.
    pub fn apply(&self, query: &ListQuery) -> (PaginatedResponse<Ticket>, Vec<SourceFailure>) {
        let mut view = match query.q.as_deref() {
            Some(q) => self.text_filter(q),
            None => self.clone(),
        };
        if let Some((key, direction)) = query.sort.as_deref().and_then(SortKey::parse) {
            view = view.sort_by(key, direction);
        }
        let page = query.page.unwrap_or(1);
        let response = match query.limit {
            Some(limit) => view.paginate(page, limit),
            None => PaginatedResponse::single_page(view.rows),
        };
        (response, self.unavailable.clone())
    }
}

fn source_reason(err: &StoreError) -> String {
    match err {
        StoreError::Unavailable { reason, .. } => reason.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{AssetRef, Originator, TechnicianRef};
    use shared::ticket::{ApprovalState, Priority, TicketExtras, TicketStatus};

    fn ticket(id: &str, category: TicketCategory, created_at: i64, description: &str) -> Ticket {
        Ticket {
            id: id.to_string(),
            category,
            status: TicketStatus::Open,
            priority: Priority::Medium,
            description: description.to_string(),
            asset: AssetRef::Unknown,
            assigned_to: None,
            opened_by: Originator::System,
            created_at,
            approval: ApprovalState::Pending,
            approval_note: None,
            rejections: vec![],
            photo: None,
            extras: match category {
                TicketCategory::Cleaning => TicketExtras::Cleaning,
                TicketCategory::Maintenance => TicketExtras::Maintenance,
                TicketCategory::Accident => TicketExtras::Accident {
                    reported_cost: None,
                    croca_type: None,
                },
            },
        }
    }

    fn three_sources() -> Vec<(TicketCategory, StoreResult<Vec<Ticket>>)> {
        vec![
            (
                TicketCategory::Cleaning,
                Ok(vec![
                    ticket("c-1", TicketCategory::Cleaning, 300, "Mop lobby"),
                    ticket("c-2", TicketCategory::Cleaning, 100, "Window grime"),
                ]),
            ),
            (
                TicketCategory::Maintenance,
                Ok(vec![ticket(
                    "m-1",
                    TicketCategory::Maintenance,
                    200,
                    "Radiator leak in corridor",
                )]),
            ),
            (
                TicketCategory::Accident,
                Ok(vec![ticket(
                    "a-1",
                    TicketCategory::Accident,
                    50,
                    "Coolant leak after impact",
                )]),
            ),
        ]
    }

    #[test]
    fn test_merge_orders_by_category_then_creation() {
        let view = MergedView::merge(three_sources());
        let ids: Vec<&str> = view.rows.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c-2", "c-1", "m-1", "a-1"]);
        assert!(view.unavailable.is_empty());
    }

    #[test]
    fn test_merge_is_deterministic_under_remerge() {
        let first = MergedView::merge(three_sources());
        let second = MergedView::merge(three_sources().into_iter().rev());
        assert_eq!(first.rows, second.rows);
    }

    #[test]
    fn test_failed_source_degrades_and_is_flagged() {
        let mut sources = three_sources();
        sources[1] = (
            TicketCategory::Maintenance,
            Err(StoreError::Unavailable {
                category: TicketCategory::Maintenance,
                reason: "connection refused".to_string(),
            }),
        );

        let view = MergedView::merge(sources);
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.unavailable.len(), 1);
        assert_eq!(view.unavailable[0].category, TicketCategory::Maintenance);
        assert_eq!(view.unavailable[0].reason, "connection refused");
    }

    #[test]
    fn test_text_filter_spans_categories_case_insensitive() {
        let view = MergedView::merge(three_sources());
        let leaks = view.text_filter("LEAK");
        let ids: Vec<&str> = leaks.rows.iter().map(|t| t.id.as_str()).collect();
        // Creation-time order within the merged base order
        assert_eq!(ids, vec!["m-1", "a-1"]);
    }

    #[test]
    fn test_text_filter_matches_asset_and_technician() {
        let mut assigned = ticket("m-2", TicketCategory::Maintenance, 400, "Fan belt");
        assigned.assigned_to = Some(TechnicianRef::new("t-1", "Leandro"));
        let mut with_asset = ticket("c-3", TicketCategory::Cleaning, 500, "Dust");
        with_asset.asset = AssetRef::Unresolved {
            asset_id: "boiler-room".to_string(),
        };

        let view = MergedView::merge(vec![
            (TicketCategory::Cleaning, Ok(vec![with_asset])),
            (TicketCategory::Maintenance, Ok(vec![assigned])),
        ]);

        assert_eq!(view.text_filter("leandro").rows.len(), 1);
        assert_eq!(view.text_filter("BOILER").rows.len(), 1);
        assert_eq!(view.text_filter("nothing").rows.len(), 0);
    }

    #[test]
    fn test_text_filter_applies_to_filtered_state() {
        let view = MergedView::merge(three_sources());
        let cleaning_only = view.filter(|t| t.category == TicketCategory::Cleaning);
        // "leak" tickets exist, but not within the filtered subset
        assert_eq!(cleaning_only.text_filter("leak").rows.len(), 0);
    }

    #[test]
    fn test_sort_is_stable_on_equal_keys() {
        let mut a = ticket("c-1", TicketCategory::Cleaning, 100, "a");
        let mut b = ticket("m-1", TicketCategory::Maintenance, 200, "b");
        let mut c = ticket("a-1", TicketCategory::Accident, 300, "c");
        a.priority = Priority::Medium;
        b.priority = Priority::Medium;
        c.priority = Priority::Medium;

        let view = MergedView::merge(vec![
            (TicketCategory::Cleaning, Ok(vec![a])),
            (TicketCategory::Maintenance, Ok(vec![b])),
            (TicketCategory::Accident, Ok(vec![c])),
        ]);

        // All priorities equal: the merged base order must be preserved
        let sorted = view.sort_by(SortKey::Priority, SortDirection::Ascending);
        let ids: Vec<&str> = sorted.rows.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c-1", "m-1", "a-1"]);
    }

    #[test]
    fn test_sort_by_priority_descending() {
        let mut low = ticket("c-1", TicketCategory::Cleaning, 100, "a");
        low.priority = Priority::Low;
        let mut high = ticket("c-2", TicketCategory::Cleaning, 200, "b");
        high.priority = Priority::High;

        let view = MergedView::merge(vec![(TicketCategory::Cleaning, Ok(vec![low, high]))]);
        let sorted = view.sort_by(SortKey::Priority, SortDirection::Descending);
        assert_eq!(sorted.rows[0].id, "c-2");
    }

    #[test]
    fn test_paginate() {
        let view = MergedView::merge(three_sources());
        let page = view.paginate(1, 3);
        assert_eq!(page.data.len(), 3);
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages, 2);

        let page2 = view.paginate(2, 3);
        assert_eq!(page2.data.len(), 1);
        assert_eq!(page2.data[0].id, "a-1");
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(
            SortKey::parse("created_at_desc"),
            Some((SortKey::CreatedAt, SortDirection::Descending))
        );
        assert_eq!(
            SortKey::parse("priority"),
            Some((SortKey::Priority, SortDirection::Ascending))
        );
        assert_eq!(SortKey::parse("bogus"), None);
    }

    #[test]
    fn test_apply_combines_filter_sort_paginate() {
        let view = MergedView::merge(three_sources());
        let query = ListQuery::all()
            .search("leak")
            .order_by("created_at_desc")
            .paginate(1, 10);
        let (page, unavailable) = view.apply(&query);
        assert!(unavailable.is_empty());
        let ids: Vec<&str> = page.data.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["m-1", "a-1"]);
    }
}
