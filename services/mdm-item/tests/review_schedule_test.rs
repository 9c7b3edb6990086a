//! 供应商与供应商-物料复审排期测试

use chrono::NaiveDate;
use cuba_config::InventoryConfig;
use mdm_item::application::{
    CreateItemCommand, CreateSupplierCommand, CreateSupplierProductCommand, RecordReviewCommand,
    ReviewDueQuery, ServiceHandler, UpdateSupplierCommand,
};
use mdm_item::domain::enums::ReviewFrequency;
use mdm_item::domain::services::{ReviewStatus, compute_next_review_due};
use mdm_item::infrastructure::persistence::in_memory_repositories;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn handler(review_warning_days: u32) -> ServiceHandler {
    ServiceHandler::new(
        in_memory_repositories(),
        InventoryConfig {
            review_warning_days,
            ..Default::default()
        },
    )
}

async fn seed(handler: &ServiceHandler) {
    handler
        .create_item(CreateItemCommand {
            item_code: "CHE-BUF-0001".to_string(),
            item_name: "PBS buffer".to_string(),
            unit_of_measure: "L".to_string(),
            category: "Chemical".to_string(),
            subtype: "Buffer".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    handler
        .create_supplier(CreateSupplierCommand {
            supplier_id: "SUP-001".to_string(),
            supplier_name: "Acme Chemicals".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
}

#[test]
fn test_scheduler_dates() {
    let reviewed = Some(date(2024, 1, 15));
    assert_eq!(
        compute_next_review_due(reviewed, Some(ReviewFrequency::SixMonths)),
        Some(date(2024, 7, 13))
    );
    assert_eq!(
        compute_next_review_due(reviewed, Some(ReviewFrequency::OneYear)),
        Some(date(2025, 1, 14))
    );
    assert_eq!(compute_next_review_due(None, Some(ReviewFrequency::OneYear)), None);
    assert_eq!(compute_next_review_due(reviewed, Some(ReviewFrequency::OnChange)), None);
}

#[tokio::test]
async fn test_supplier_never_reviewed_has_no_due_date() {
    let handler = handler(30);
    seed(&handler).await;

    let supplier = handler.get_supplier("SUP-001").await.unwrap();
    assert_eq!(supplier.review_frequency(), Some(ReviewFrequency::OneYear));
    assert_eq!(supplier.next_review_due(), None);
    assert_eq!(supplier.review_status(date(2024, 1, 1), 30), ReviewStatus::Unscheduled);
}

#[tokio::test]
async fn test_clearing_frequency_unschedules_supplier() {
    let handler = handler(30);
    seed(&handler).await;
    handler
        .record_supplier_review(
            "SUP-001",
            RecordReviewCommand {
                reviewed_on: date(2024, 1, 15),
                review_frequency: None,
                user_id: None,
            },
        )
        .await
        .unwrap();

    let updated = handler
        .update_supplier(UpdateSupplierCommand {
            supplier_id: "SUP-001".to_string(),
            review_frequency: Some(String::new()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.review_frequency(), None);
    assert_eq!(updated.next_review_due(), None);
}

#[tokio::test]
async fn test_supplier_product_review_cycle() {
    let handler = handler(30);
    seed(&handler).await;

    let product = handler
        .create_supplier_product(CreateSupplierProductCommand {
            item_code: "CHE-BUF-0001".to_string(),
            supplier_id: "SUP-001".to_string(),
            last_reviewed_on: Some(date(2024, 1, 15)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(product.review_frequency(), Some(ReviewFrequency::SixMonths));
    assert_eq!(product.next_review_due(), Some(date(2024, 7, 13)));

    let overdue = handler
        .supplier_products_due_for_review(ReviewDueQuery { as_of: date(2024, 8, 1) })
        .await
        .unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].1, ReviewStatus::Overdue);

    let reviewed = handler
        .record_supplier_product_review(
            "CHE-BUF-0001",
            "SUP-001",
            RecordReviewCommand {
                reviewed_on: date(2024, 8, 1),
                review_frequency: Some("1 year".to_string()),
                user_id: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(reviewed.next_review_due(), Some(date(2025, 8, 1)));

    let due = handler
        .supplier_products_due_for_review(ReviewDueQuery { as_of: date(2024, 8, 1) })
        .await
        .unwrap();
    assert!(due.is_empty());
}

#[tokio::test]
async fn test_listing_by_item() {
    let handler = handler(30);
    seed(&handler).await;
    handler
        .create_supplier_product(CreateSupplierProductCommand {
            item_code: "CHE-BUF-0001".to_string(),
            supplier_id: "SUP-001".to_string(),
            review_frequency: Some("On change".to_string()),
            last_reviewed_on: Some(date(2024, 1, 15)),
            ..Default::default()
        })
        .await
        .unwrap();

    let products = handler.list_supplier_products("CHE-BUF-0001").await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].next_review_due(), None);
}
