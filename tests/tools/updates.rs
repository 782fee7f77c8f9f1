use serde_json::json;
use zava_claims_mcp::entity::{ClaimRecord, InspectionRecord, PurchaseOrderRecord};

use crate::support::{call, seeded_service};

#[tokio::test]
async fn claim_status_update_appends_note() {
    let (service, store) = seeded_service().await;

    let output = call(
        &service,
        "update-claim-status",
        json!({ "claimId": "1", "status": "Approved", "note": "Adjuster sign-off" }),
    )
    .await;
    assert_eq!(
        output.text_content(),
        "✅ Claim CN202504990 status updated to \"Approved\"."
    );

    let claim = store.get_by_key::<ClaimRecord>("1").await.unwrap().unwrap();
    assert_eq!(claim.status, "Approved");
    assert_eq!(claim.notes, r#"["Initial report filed","Adjuster sign-off"]"#);
    assert_ne!(claim.updated_at, "2025-03-16T09:00:00.000Z");
    // Untouched fields survive the full-record write.
    assert_eq!(claim.policy_holder_name, "Kimberly King");
    assert_eq!(claim.damage_types, r#"["Roof","Water"]"#);
    assert_eq!(claim.estimated_loss, 18250.0);
}

#[tokio::test]
async fn note_on_free_text_notes_starts_a_new_list() {
    let (service, store) = seeded_service().await;

    call(
        &service,
        "update-claim-status",
        json!({ "claimId": "3", "status": "Reopened", "note": "Customer called" }),
    )
    .await;

    let claim = store.get_by_key::<ClaimRecord>("3").await.unwrap().unwrap();
    assert_eq!(claim.notes, r#"["Customer called"]"#);
}

#[tokio::test]
async fn empty_note_leaves_notes_alone() {
    let (service, store) = seeded_service().await;

    call(
        &service,
        "update-claim-status",
        json!({ "claimId": "2", "status": "Denied", "note": "" }),
    )
    .await;

    let claim = store.get_by_key::<ClaimRecord>("2").await.unwrap().unwrap();
    assert_eq!(claim.status, "Denied");
    assert_eq!(claim.notes, "[]");
}

#[tokio::test]
async fn claim_status_update_needs_the_key() {
    let (service, store) = seeded_service().await;

    let output = call(
        &service,
        "update-claim-status",
        json!({ "claimId": "CN202504990", "status": "Approved" }),
    )
    .await;
    assert_eq!(output.text_content(), "Claim \"CN202504990\" not found.");
    assert!(store
        .get_by_key::<ClaimRecord>("CN202504990")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn purchase_order_update() {
    let (service, store) = seeded_service().await;

    let output = call(
        &service,
        "update-purchase-order",
        json!({ "purchaseOrderId": "po-002", "status": "completed", "note": "Work done" }),
    )
    .await;
    assert_eq!(
        output.text_content(),
        "✅ Purchase order PO-2025-002 status updated to \"completed\"."
    );

    let order = store
        .get_by_key::<PurchaseOrderRecord>("po-002")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, "completed");
    assert_eq!(order.notes, r#"["Approved by adjuster","Work done"]"#);
    assert_eq!(order.total, 432.0);

    let output = call(
        &service,
        "update-purchase-order",
        json!({ "purchaseOrderId": "po-404", "status": "approved" }),
    )
    .await;
    assert_eq!(output.text_content(), "Purchase order \"po-404\" not found.");
}

#[tokio::test]
async fn inspection_update_applies_given_fields() {
    let (service, store) = seeded_service().await;

    let output = call(
        &service,
        "update-inspection",
        json!({
            "inspectionId": "insp-002",
            "status": "completed",
            "findings": "Attic dry",
            "recommendedActions": ["Monitor for mold"],
            "property": "",
            "inspectorId": "inspector-001"
        }),
    )
    .await;
    assert_eq!(output.text_content(), "✅ Inspection insp-002 updated.");

    let inspection = store
        .get_by_key::<InspectionRecord>("insp-002")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(inspection.status, "completed");
    assert!(!inspection.completed_date.is_empty());
    assert_eq!(inspection.completed_date, inspection.updated_at);
    assert_eq!(inspection.findings, "Attic dry");
    assert_eq!(inspection.recommended_actions, r#"["Monitor for mold"]"#);
    assert_eq!(inspection.inspector_id, "inspector-001");
    assert_eq!(inspection.property, "123 Maple Ave, Springfield, IL");
    assert_eq!(inspection.task_type, "re-inspection");
}

#[tokio::test]
async fn inspection_update_of_missing_record_writes_nothing() {
    let (service, store) = seeded_service().await;

    let output = call(
        &service,
        "update-inspection",
        json!({ "inspectionId": "insp-404", "status": "completed" }),
    )
    .await;
    assert_eq!(output.text_content(), "Inspection \"insp-404\" not found.");
    assert!(store
        .get_by_key::<InspectionRecord>("insp-404")
        .await
        .unwrap()
        .is_none());
}
