/// Statistics over a populated store
mod utils;

use culturastock_lib::modules::loans::LoanStatus;
use culturastock_lib::modules::statistics::ItemSortKey;
use utils::factories::{damage_request, LoanRequestFactory};
use utils::helpers::{add_item, build_test_app};

#[tokio::test]
async fn totals_match_loan_records() {
    let app = build_test_app();
    let state = &app.state;

    let guitar = add_item(state, "Guitarra", "GTA-001").await;
    let drum = add_item(state, "Tambor", "TMB-001").await;
    let flute = add_item(state, "Flauta", "FLT-001").await;

    let first = state
        .loan_service
        .create_loan(LoanRequestFactory::new(guitar).group("Tuna").on(2024, 1, 10).build())
        .await
        .unwrap();
    state.loan_service.return_loan(&first).await.unwrap();
    state
        .loan_service
        .create_loan(LoanRequestFactory::new(guitar).group("Tuna").on(2024, 2, 1).build())
        .await
        .unwrap();
    state
        .loan_service
        .create_loan(LoanRequestFactory::new(drum).group("Danzas").on(2024, 1, 20).build())
        .await
        .unwrap();
    state
        .damage_service
        .create_report(damage_request(flute, "low"))
        .await
        .unwrap();

    let stats = state.statistics_service.compute_detailed_stats().await.unwrap();
    let loans = state.loan_service.list_loans().await.unwrap();

    assert_eq!(stats.total_items, 3);
    assert_eq!(stats.total_loans, loans.len());
    let active = loans.iter().filter(|l| l.status == LoanStatus::Active).count();
    assert_eq!(stats.active_loans, active);
    let per_item_active: usize = stats.item_stats.iter().map(|s| s.active_loans).sum();
    assert_eq!(per_item_active, stats.active_loans);
    assert_eq!(stats.total_damage_reports, 1);

    let top = &stats.item_stats[0];
    assert_eq!(top.id, guitar);
    assert_eq!(top.total_loans, 2);
    assert_eq!(top.returned_loans, 1);
    // First loan recorded for the item, not the latest by date
    assert_eq!(top.last_loan_date, Some(loans[2].loan_date));

    assert_eq!(stats.group_stats["Tuna"].total_loans, 2);
    assert_eq!(stats.group_stats["Danzas"].active_loans, 1);
    assert_eq!(stats.top_groups(10)[0].0, "Tuna");

    assert_eq!(stats.sorted_items(ItemSortKey::DamageReports)[0].id, flute);
    assert_eq!(stats.items_with_damage().len(), 1);
    assert_eq!(stats.most_used_items(10).len(), 2);
}

#[tokio::test]
async fn inventory_summary_reflects_current_state() {
    let app = build_test_app();
    let state = &app.state;

    let guitar = add_item(state, "Guitarra", "GTA-001").await;
    add_item(state, "Tambor", "TMB-001").await;
    let flute = add_item(state, "Flauta", "FLT-001").await;
    state.inventory_service.remove_item(&flute).await.unwrap();

    state
        .loan_service
        .create_loan(LoanRequestFactory::new(guitar).group("Teatro").build())
        .await
        .unwrap();

    let summary = state.statistics_service.inventory_summary().await.unwrap();
    assert_eq!(summary.total_items, 3);
    assert_eq!(summary.available_items, 1);
    assert_eq!(summary.loaned_items, 1);
    assert_eq!(summary.active_loans, 1);
    assert_eq!(summary.returned_loans, 0);
    assert_eq!(summary.active_loans_by_group["Teatro"], 1);
    assert_eq!(summary.recent_active_loans[0].item.item_id, guitar);
}
