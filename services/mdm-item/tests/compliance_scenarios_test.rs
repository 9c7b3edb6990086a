//! 物料合规派生场景测试

use cuba_config::InventoryConfig;
use mdm_item::application::{CreateItemCommand, ServiceHandler, UpdateItemCommand};
use mdm_item::domain::enums::{ContaminationRisk, Grade, HazardClass, TraceabilityLevel};
use mdm_item::domain::services::{
    ItemAttributes, compute_derived_item_fields, compute_document_requirements,
    compute_segregation_required,
};
use mdm_item::infrastructure::persistence::in_memory_repositories;

fn handler() -> ServiceHandler {
    ServiceHandler::new(in_memory_repositories(), InventoryConfig::default())
}

fn item_json(json: &str) -> CreateItemCommand {
    serde_json::from_str(json).unwrap()
}

#[tokio::test]
async fn test_high_risk_corrosive_usp_item() {
    let handler = handler();
    let item = handler
        .create_item(item_json(
            r#"{
                "item_code": "CHE-ACD-0001",
                "item_name": "Hydrochloric acid 37%",
                "unit_of_measure": "L",
                "category": "Chemical",
                "subtype": "Corrosive Acid",
                "grade": "USP",
                "critical_to_product": true,
                "contamination_risk": "High",
                "hazard_class": "Corrosive"
            }"#,
        ))
        .await
        .unwrap();

    assert!(item.qa_required());
    assert_eq!(item.traceability_level(), TraceabilityLevel::Full);
    assert!(item.coa_mandatory());
    assert!(item.sds_mandatory());
    assert!(item.spec_required());
    assert!(item.segregation_rule_required());
}

#[tokio::test]
async fn test_plain_item_derives_nothing() {
    let handler = handler();
    let item = handler
        .create_item(item_json(
            r#"{
                "item_code": "STA-NTB-0001",
                "item_name": "Lab notebook A4",
                "unit_of_measure": "pcs",
                "category": "Stationery",
                "subtype": "Notebook",
                "contamination_risk": "Low",
                "hazard_class": "None"
            }"#,
        ))
        .await
        .unwrap();

    assert!(!item.qa_required());
    assert_eq!(item.traceability_level(), TraceabilityLevel::None);
    assert!(!item.coa_mandatory());
    assert!(!item.sds_mandatory());
    assert!(!item.spec_required());
    assert!(!item.segregation_rule_required());
}

#[tokio::test]
async fn test_stored_record_matches_pure_derivation() {
    let handler = handler();
    handler
        .create_item(item_json(
            r#"{
                "item_code": "BIO-ADD-0001",
                "item_name": "Carrier blend",
                "unit_of_measure": "kg",
                "category": "Biological",
                "subtype": "Additive",
                "grade": "Food",
                "hazard_class": "Oxidizer"
            }"#,
        ))
        .await
        .unwrap();
    let stored = handler
        .update_item(UpdateItemCommand {
            item_code: "BIO-ADD-0001".to_string(),
            item_name: Some("Carrier blend v2".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let expected = compute_derived_item_fields(&ItemAttributes {
        grade: Grade::Food,
        critical_to_product: false,
        contamination_risk: ContaminationRisk::Low,
        hazard_class: HazardClass::Oxidizer,
        traceability_level: TraceabilityLevel::BatchLevel,
    });
    assert_eq!(stored.derived(), &expected);
    assert_eq!(stored.item_name(), "Carrier blend v2");
}

#[tokio::test]
async fn test_invalid_subtype_rejected() {
    let handler = handler();
    let err = handler
        .create_item(item_json(
            r#"{
                "item_code": "PKG-BOT-0001",
                "item_name": "Amber bottle",
                "unit_of_measure": "pcs",
                "category": "Packaging",
                "subtype": "Solvent"
            }"#,
        ))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_document_vectors() {
    let none = compute_document_requirements(false, HazardClass::None, TraceabilityLevel::None);
    assert_eq!(
        (none.coa_mandatory, none.sds_mandatory, none.spec_required),
        (false, false, false)
    );

    let corrosive =
        compute_document_requirements(false, HazardClass::Corrosive, TraceabilityLevel::None);
    assert_eq!(
        (corrosive.coa_mandatory, corrosive.sds_mandatory, corrosive.spec_required),
        (false, true, false)
    );
}

#[test]
fn test_segregation_examples() {
    assert!(compute_segregation_required(HazardClass::Flammable));
    assert!(!compute_segregation_required(HazardClass::None));
}
