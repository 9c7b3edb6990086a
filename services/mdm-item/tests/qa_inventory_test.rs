//! 批次收货、库位、QA 审核与库存流水场景测试

use cuba_config::InventoryConfig;
use cuba_errors::AppError;
use mdm_item::application::{
    CreateItemCommand, CreateStorageLocationCommand, CreateStorageZoneCommand,
    RecordQaReviewCommand, RecordTransactionCommand, RegisterBatchCommand, ServiceHandler,
};
use mdm_item::domain::enums::QaStatus;
use mdm_item::domain::services::DocumentKind;
use mdm_item::infrastructure::persistence::in_memory_repositories;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

fn handler() -> ServiceHandler {
    ServiceHandler::new(in_memory_repositories(), InventoryConfig::default())
}

fn json<T: DeserializeOwned>(raw: &str) -> T {
    serde_json::from_str(raw).unwrap()
}

async fn seed(handler: &ServiceHandler) {
    handler
        .create_item(json::<CreateItemCommand>(
            r#"{
                "item_code": "CHE-ACD-0001",
                "item_name": "Hydrochloric acid 37%",
                "unit_of_measure": "L",
                "category": "Chemical",
                "subtype": "Corrosive Acid",
                "grade": "USP",
                "contamination_risk": "High",
                "hazard_class": "Corrosive"
            }"#,
        ))
        .await
        .unwrap();
    handler
        .create_item(json::<CreateItemCommand>(
            r#"{
                "item_code": "STA-NTB-0001",
                "item_name": "Lab notebook A4",
                "unit_of_measure": "pcs",
                "category": "Stationery",
                "subtype": "Notebook",
                "hazard_class": "None"
            }"#,
        ))
        .await
        .unwrap();

    handler
        .create_storage_zone(json::<CreateStorageZoneCommand>(
            r#"{
                "zone_id": "ACID",
                "zone_name": "Acid cabinet",
                "temperature_range": "15-25°C",
                "hazard_compatibility": ["Corrosive"],
                "default_for_category": "Chemical"
            }"#,
        ))
        .await
        .unwrap();
    handler
        .create_storage_location(json::<CreateStorageLocationCommand>(
            r#"{"location_id": "ACID-01", "zone_id": "ACID", "rack_shelf": "R1/S1", "max_capacity": "200"}"#,
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_receipt_review_and_issue() {
    let handler = handler();
    seed(&handler).await;

    let batch = handler
        .register_batch(json::<RegisterBatchCommand>(
            r#"{
                "batch_id": "HCL-2405-01",
                "item_code": "CHE-ACD-0001",
                "quantity": "50",
                "received_on": "2024-05-01",
                "storage_location": "ACID-01"
            }"#,
        ))
        .await
        .unwrap();
    assert_eq!(batch.qa_status(), QaStatus::Pending);

    // 缺 COA 的收货仍可登记
    let receipt = handler
        .record_transaction(json::<RecordTransactionCommand>(
            r#"{
                "transaction_id": "TX-0001",
                "occurred_at": "2024-05-01T09:00:00Z",
                "user": "receiver",
                "transaction_type": "RCV-PUR",
                "item_code": "CHE-ACD-0001",
                "batch_id": "HCL-2405-01",
                "quantity": "50",
                "sds_provided": true,
                "storage_location": "ACID-01"
            }"#,
        ))
        .await
        .unwrap();
    let documents = handler.get_item("CHE-ACD-0001").await.unwrap().derived().documents();
    assert_eq!(receipt.missing_documents(&documents), vec![DocumentKind::Coa]);

    let conditional: RecordQaReviewCommand = json(
        r#"{
            "qa_review_id": "QA-0001",
            "batch_id": "HCL-2405-01",
            "sds_attached": true, "sds_match": true,
            "spec_attached": true, "spec_match": true,
            "document_match": "Partial",
            "outcome": "Conditional",
            "reviewer": "QA Lead",
            "review_date": "2024-05-02"
        }"#,
    );
    let review = handler.record_qa_review(conditional).await.unwrap();
    assert_eq!(review.document_gaps(), &[DocumentKind::Coa]);

    let approved: RecordQaReviewCommand = json(
        r#"{
            "qa_review_id": "QA-0002",
            "batch_id": "HCL-2405-01",
            "coa_attached": true, "coa_match": true,
            "sds_attached": true, "sds_match": true,
            "spec_attached": true, "spec_match": true,
            "label_attached": true,
            "document_match": "Yes",
            "outcome": "Approved",
            "reviewer": "QA Lead",
            "review_date": "2024-05-06"
        }"#,
    );
    handler.record_qa_review(approved).await.unwrap();

    let reviews = handler.list_qa_reviews("HCL-2405-01").await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[1].qa_review_id().as_str(), "QA-0002");

    let batches = handler.list_batches("CHE-ACD-0001").await.unwrap();
    assert!(batches[0].qa_status().is_released());

    let issue = handler
        .record_transaction(json::<RecordTransactionCommand>(
            r#"{
                "transaction_id": "TX-0002",
                "occurred_at": "2024-05-07T10:00:00Z",
                "user": "operator",
                "transaction_type": "ISS-MFG",
                "item_code": "CHE-ACD-0001",
                "batch_id": "HCL-2405-01",
                "quantity": "12.5",
                "qa_review_id": "QA-0002"
            }"#,
        ))
        .await
        .unwrap();
    assert_eq!(issue.qa_status(), Some(QaStatus::Approved));
    assert_eq!(
        handler.stock_on_hand("CHE-ACD-0001").await.unwrap(),
        Decimal::new(375, 1)
    );
}

#[tokio::test]
async fn test_zone_compatibility_by_hazard() {
    let handler = handler();
    seed(&handler).await;

    // 无危险物料可放入危险品库区
    handler
        .register_batch(json::<RegisterBatchCommand>(
            r#"{"batch_id": "NTB-1", "item_code": "STA-NTB-0001", "quantity": "10",
                "storage_location": "ACID-01"}"#,
        ))
        .await
        .unwrap();

    handler
        .create_storage_zone(json::<CreateStorageZoneCommand>(
            r#"{"zone_id": "GEN", "zone_name": "General store"}"#,
        ))
        .await
        .unwrap();
    handler
        .create_storage_location(json::<CreateStorageLocationCommand>(
            r#"{"location_id": "GEN-01", "zone_id": "GEN"}"#,
        ))
        .await
        .unwrap();

    let err = handler
        .register_batch(json::<RegisterBatchCommand>(
            r#"{"batch_id": "HCL-1", "item_code": "CHE-ACD-0001", "quantity": "5",
                "storage_location": "GEN-01"}"#,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::FailedPrecondition(_)));
    assert!(handler.list_batches("CHE-ACD-0001").await.unwrap().is_empty());
}
