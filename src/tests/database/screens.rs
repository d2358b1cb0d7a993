//! List-Screen Controller Tests
//!
//! Drives `ListScreen` headlessly against a real database through the
//! dataset source, checking the query/reset/page-click/page-size event
//! flow end to end.

use crate::database::datasets::{DatasetFilter, DatasetList};
use crate::database::DatasetOps;
use crate::pagination::PageButton;
use crate::screens::ListScreen;
use crate::tests::common::{create_test_db, seed_dataset, stamp};

#[tokio::test]
async fn test_refresh_returns_rows_and_buttons() {
    let (db, _temp) = create_test_db().await;

    for i in 1..=25u32 {
        seed_dataset(&db, &format!("ds-{i:02}"), &stamp(i, 10)).await;
    }

    let mut screen = ListScreen::new(DatasetList(&db));
    let update = screen.refresh().await;

    assert_eq!(update.result.rows.len(), 10);
    assert_eq!(update.result.total_pages, 3);
    assert_eq!(screen.current_page(), 1);
    assert_eq!(
        update.buttons,
        vec![
            PageButton::Page(1),
            PageButton::Page(2),
            PageButton::Page(3),
        ]
    );
}

#[tokio::test]
async fn test_page_click_and_jump_markers() {
    let (db, _temp) = create_test_db().await;

    for i in 1..=25u32 {
        seed_dataset(&db, &format!("ds-{i:02}"), &stamp(i, 10)).await;
    }

    let mut screen = ListScreen::new(DatasetList(&db));
    screen.refresh().await;

    let update = screen.page_clicked(PageButton::Page(3)).await;
    assert_eq!(screen.current_page(), 3);
    assert_eq!(update.result.rows.len(), 5);
    assert_eq!(update.result.rows[4].name, "ds-01");

    // JumpBack from page 3 lands on page 1 (stride clamps at the start).
    let update = screen.page_clicked(PageButton::JumpBack).await;
    assert_eq!(screen.current_page(), 1);
    assert_eq!(update.result.page, 1);

    // JumpForward clamps at the last page.
    let update = screen.page_clicked(PageButton::JumpForward).await;
    assert_eq!(screen.current_page(), 3);
    assert_eq!(update.result.page, 3);
}

#[tokio::test]
async fn test_apply_filter_resets_to_first_page() {
    let (db, _temp) = create_test_db().await;

    for i in 1..=25u32 {
        seed_dataset(&db, &format!("ds-{i:02}"), &stamp(i, 10)).await;
    }

    let mut screen = ListScreen::new(DatasetList(&db));
    screen.refresh().await;
    screen.page_clicked(PageButton::Page(3)).await;

    let update = screen
        .apply_filter(DatasetFilter {
            name: Some("ds-2".to_string()),
            ..Default::default()
        })
        .await;

    assert_eq!(screen.current_page(), 1);
    // ds-20 through ds-25.
    assert_eq!(update.result.total_items, 6);
    assert_eq!(update.result.total_pages, 1);
}

#[tokio::test]
async fn test_reset_clears_filter() {
    let (db, _temp) = create_test_db().await;

    for i in 1..=5u32 {
        seed_dataset(&db, &format!("ds-{i:02}"), &stamp(i, 10)).await;
    }

    let mut screen = ListScreen::new(DatasetList(&db));
    screen
        .apply_filter(DatasetFilter {
            name: Some("ds-03".to_string()),
            ..Default::default()
        })
        .await;

    let update = screen.reset().await;
    assert_eq!(update.result.total_items, 5);
    assert!(screen.filter().name.is_none());
}

#[tokio::test]
async fn test_set_per_page_reslices_from_first_page() {
    let (db, _temp) = create_test_db().await;

    for i in 1..=25u32 {
        seed_dataset(&db, &format!("ds-{i:02}"), &stamp(i, 10)).await;
    }

    let mut screen = ListScreen::new(DatasetList(&db));
    screen.refresh().await;
    screen.page_clicked(PageButton::Page(2)).await;

    let update = screen.set_per_page(20).await;
    assert_eq!(screen.current_page(), 1);
    assert_eq!(screen.per_page(), 20);
    assert_eq!(update.result.rows.len(), 20);
    assert_eq!(update.result.total_pages, 2);

    // A zero page size is coerced to 1 instead of dividing by zero.
    let update = screen.set_per_page(0).await;
    assert_eq!(screen.per_page(), 1);
    assert_eq!(update.result.rows.len(), 1);
    assert_eq!(update.result.total_pages, 25);
}

#[tokio::test]
async fn test_stale_page_self_corrects_after_deletions() {
    let (db, _temp) = create_test_db().await;

    let mut ids = Vec::new();
    for i in 1..=25u32 {
        ids.push(seed_dataset(&db, &format!("ds-{i:02}"), &stamp(i, 10)).await.id);
    }

    let mut screen = ListScreen::new(DatasetList(&db));
    screen.refresh().await;
    screen.page_clicked(PageButton::Page(3)).await;
    assert_eq!(screen.current_page(), 3);

    // Shrink the listing to a single page behind the screen's back.
    for id in &ids[..20] {
        db.delete_dataset(id).await.expect("Failed to delete dataset");
    }

    let update = screen.refresh().await;
    assert_eq!(update.result.total_pages, 1);
    assert_eq!(update.result.page, 1);
    assert_eq!(screen.current_page(), 1);
    assert_eq!(update.result.rows.len(), 5);
}
