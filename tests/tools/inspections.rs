use serde_json::json;
use zava_claims_mcp::entity::InspectionRecord;

use crate::support::{call, seeded_service};

#[tokio::test]
async fn create_fills_claim_from_its_number() {
    let (service, store) = seeded_service().await;

    let output = call(
        &service,
        "create-inspection",
        json!({ "claimNumber": "CN202504991" }),
    )
    .await;
    assert_eq!(
        output.text_content(),
        "✅ Inspection insp-004 created for claim CN202504991. Status: open"
    );

    let created = store
        .get_by_key::<InspectionRecord>("insp-004")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.claim_id, "2");
    assert_eq!(created.claim_number, "CN202504991");
    assert_eq!(created.property, "9 Birch Ct, Madison, WI");
    assert_eq!(created.status, "open");
    assert_eq!(created.task_type, "initial");
    assert_eq!(created.priority, "medium");
    assert_eq!(created.photos, "[]");
    assert_eq!(created.recommended_actions, "[]");
    assert_eq!(created.completed_date, "");
    assert_eq!(created.created_at, created.updated_at);
}

#[tokio::test]
async fn explicit_fields_win_over_claim_lookup() {
    let (service, store) = seeded_service().await;

    call(
        &service,
        "create-inspection",
        json!({
            "claimNumber": "CN202504990",
            "claimId": "custom",
            "property": "Back shed",
            "priority": "high",
            "status": "scheduled",
            "inspectorId": "inspector-002"
        }),
    )
    .await;

    let created = store
        .get_by_key::<InspectionRecord>("insp-004")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.claim_id, "custom");
    assert_eq!(created.property, "Back shed");
    assert_eq!(created.priority, "high");
    assert_eq!(created.status, "scheduled");
    assert_eq!(created.inspector_id, "inspector-002");
}

#[tokio::test]
async fn sequential_creates_get_increasing_keys() {
    let (service, store) = seeded_service().await;

    for expected in ["insp-004", "insp-005", "insp-006"] {
        let output = call(
            &service,
            "create-inspection",
            json!({ "claimNumber": "CN202504990" }),
        )
        .await;
        assert!(output.text_content().contains(expected));
    }

    let keys: Vec<String> = store
        .list_all::<InspectionRecord>()
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.key)
        .collect();
    assert_eq!(
        keys,
        vec!["insp-001", "insp-002", "insp-003", "insp-004", "insp-005", "insp-006"]
    );
}

#[tokio::test]
async fn unknown_claim_number_still_creates() {
    let (service, store) = seeded_service().await;

    call(
        &service,
        "create-inspection",
        json!({ "claimNumber": "CN000" }),
    )
    .await;

    let created = store
        .get_by_key::<InspectionRecord>("insp-004")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.claim_number, "CN000");
    assert_eq!(created.claim_id, "");
    assert_eq!(created.property, "");
}

#[tokio::test]
async fn created_inspection_shows_up_on_the_claim() {
    let (service, _) = seeded_service().await;

    call(
        &service,
        "create-inspection",
        json!({ "claimNumber": "CN202504990" }),
    )
    .await;

    let output = call(&service, "get-claim-summary", json!({ "claimId": "1" })).await;
    assert!(output.text_content().contains("🔍 Inspections: 3"));
}

#[tokio::test]
async fn inspector_roster() {
    let (service, _) = seeded_service().await;

    let output = call(&service, "list-inspectors", json!({})).await;
    let text = output.text_content();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "👷 2 Inspectors:");
    assert_eq!(
        lines[1],
        "• Dana Cruz (inspector-001) — Roof, Hail — dana.cruz@zava.example"
    );
    assert_eq!(
        lines[2],
        "• Lee Park (inspector-002) — Water, Mold — lee.park@zava.example"
    );
    assert!(output.structured_content.is_none());
}
