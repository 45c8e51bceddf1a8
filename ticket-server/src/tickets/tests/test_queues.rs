//! Merged views and queue membership after transitions

use super::*;
use crate::tickets::aggregate::MergedView;
use shared::query::ListQuery;

#[tokio::test]
async fn test_unassigned_queue_tracks_transitions() {
    let manager = create_test_manager();
    let c1 = manager
        .open(cleaning_record("c-1", "Mop lobby", 100))
        .await
        .unwrap()
        .key();
    manager
        .open(maintenance_record("m-1", "Radiator leak", 200))
        .await
        .unwrap();

    let unassigned = manager.merged_view().await.filter(Ticket::is_claimable);
    assert_eq!(unassigned.rows.len(), 2);

    manager.claim(&c1, tech("t-1")).await.unwrap();
    let unassigned = manager.merged_view().await.filter(Ticket::is_claimable);
    let ids: Vec<&str> = unassigned.rows.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["m-1"]);
}

#[tokio::test]
async fn test_text_filter_finds_tickets_across_categories() {
    let manager = create_test_manager();
    manager
        .open(cleaning_record("c-1", "Mop lobby", 100))
        .await
        .unwrap();
    manager
        .open(maintenance_record("m-1", "Coolant leak under press", 200))
        .await
        .unwrap();
    manager
        .open(accident_record("a-1", "Oil leak after collision", 300))
        .await
        .unwrap();

    let view = manager.merged_view().await;
    let leaks = view.text_filter("Leak");
    let ids: Vec<&str> = leaks.rows.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["m-1", "a-1"]);
}

#[tokio::test]
async fn test_merged_view_degrades_on_failed_source() {
    let store = Arc::new(FlakyStore {
        inner: MemoryPool::new(),
        failing: TicketCategory::Maintenance,
    });
    let manager = Arc::new(TicketManager::new(store));
    manager
        .open(cleaning_record("c-1", "Mop lobby", 100))
        .await
        .unwrap();
    manager
        .open(accident_record("a-1", "Spill", 200))
        .await
        .unwrap();

    let view = manager.merged_view().await;
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.unavailable.len(), 1);
    assert_eq!(view.unavailable[0].category, TicketCategory::Maintenance);
    assert_eq!(view.unavailable[0].reason, "source offline");
}

#[tokio::test]
async fn test_query_pipeline_over_live_pool() {
    let manager = create_test_manager();
    for i in 0..5 {
        manager
            .open(cleaning_record(
                &format!("c-{}", i),
                &format!("Window {}", i),
                100 + i,
            ))
            .await
            .unwrap();
    }

    let view = manager.merged_view().await;
    let query = ListQuery::all().order_by("created_at_desc").paginate(2, 2);
    let (page, unavailable) = view.apply(&query);

    assert!(unavailable.is_empty());
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
    let ids: Vec<&str> = page.data.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["c-2", "c-1"]);
}

#[tokio::test]
async fn test_queue_membership_is_exclusive_per_status() {
    let manager = create_test_manager();
    let key = manager
        .open(cleaning_record("c-1", "Mop lobby", 100))
        .await
        .unwrap()
        .key();
    manager.claim(&key, tech("t-1")).await.unwrap();
    manager.resolve(&key, "t-1").await.unwrap();

    let view = manager.merged_view().await;
    let unassigned = view.filter(Ticket::is_claimable);
    let pending = view.filter(|t| t.status == TicketStatus::PendingApproval);
    assert!(unassigned.rows.is_empty());
    assert_eq!(pending.rows.len(), 1);
}

#[test]
fn test_merge_of_empty_sources_is_empty() {
    let view = MergedView::merge(Vec::new());
    assert!(view.rows.is_empty());
    assert!(view.unavailable.is_empty());
}
