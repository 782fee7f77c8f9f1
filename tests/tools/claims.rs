use serde_json::{json, Map, Value};
use zava_claims_mcp::Collection;

use crate::support::{call, seeded_service, structured};

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

#[tokio::test]
async fn detail_by_key_and_by_claim_number_match() {
    let (service, _) = seeded_service().await;

    let by_key = call(&service, "show-claim-detail", json!({ "claimId": "1" })).await;
    let by_number = call(&service, "show-claim-detail", json!({ "claimId": "CN202504990" })).await;

    assert_eq!(by_key.text_content(), "Claim CN202504990 - Kimberly King");
    assert_eq!(by_key, by_number);
}

#[tokio::test]
async fn detail_scopes_related_records_to_the_claim() {
    let (service, _) = seeded_service().await;

    let output = call(&service, "show-claim-detail", json!({ "claimId": "1" })).await;
    let detail = structured(&output);

    assert_eq!(detail["claim"]["id"], "1");
    assert_eq!(detail["claim"]["damageTypes"], json!(["Roof", "Water"]));
    assert_eq!(detail["inspections"].as_array().unwrap().len(), 2);
    assert_eq!(detail["purchaseOrders"].as_array().unwrap().len(), 2);
    assert_eq!(detail["purchaseOrders"][0]["lineItems"][0]["unitPrice"], json!(45.0));

    let contractors = detail["contractors"].as_object().unwrap();
    assert_eq!(contractors.len(), 1);
    assert!(contractors.contains_key("contractor-001"));

    let inspectors = detail["inspectors"].as_object().unwrap();
    assert_eq!(inspectors.len(), 2);
    assert_eq!(
        output.meta.as_ref().unwrap()["openai/outputTemplate"],
        "ui://widget/claim-detail.html"
    );
}

#[tokio::test]
async fn unknown_claim_is_a_text_answer() {
    let (service, _) = seeded_service().await;

    let output = call(&service, "show-claim-detail", json!({ "claimId": "CN000" })).await;
    assert_eq!(output.text_content(), "Claim \"CN000\" not found.");
    assert!(output.structured_content.is_none());
    assert!(output.meta.is_none());

    let output = call(&service, "get-claim-summary", json!({ "claimId": "42" })).await;
    assert_eq!(output.text_content(), "Claim \"42\" not found.");
}

#[tokio::test]
async fn summary() {
    let (service, _) = seeded_service().await;

    let by_key = call(&service, "get-claim-summary", json!({ "claimId": "1" })).await;
    let by_number = call(&service, "get-claim-summary", json!({ "claimId": "CN202504990" })).await;
    assert_eq!(by_key, by_number);

    let text = by_key.text_content();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "📋 Claim: CN202504990",
            "👤 Policy Holder: Kimberly King (kimberly.king@example.com)",
            "📍 Property: 123 Maple Ave, Springfield, IL",
            "📅 Date of Loss: 3/15/2025",
            "💰 Estimated Loss: $18,250",
            "📊 Status: Open - Under Investigation",
            "🔧 Damage Types: Roof, Water",
            "🔍 Inspections: 2",
            "📦 Purchase Orders: 2",
            "📝 Description: Hail storm tore shingles; water entered the attic.",
        ]
    );
}

#[tokio::test]
async fn summary_amount_keeps_fraction() {
    let (service, _) = seeded_service().await;

    let output = call(&service, "get-claim-summary", json!({ "claimId": "2" })).await;
    assert!(output.text_content().contains("💰 Estimated Loss: $42,000.5"));
}

#[tokio::test]
async fn loosely_typed_claims_still_load() {
    let (service, store) = seeded_service().await;
    store
        .upsert_fields(
            Collection::Claims,
            "4",
            fields(json!({
                "claimNumber": "CN202504993",
                "policyHolderName": "Ada Brooks",
                "status": "Open",
                "estimatedLoss": "2500",
                "damageTypes": ["Hail", { "severity": "minor" }]
            })),
        )
        .await
        .unwrap();

    let output = call(&service, "show-claims-dashboard", json!({})).await;
    assert_eq!(output.text_content(), "Loaded 4 claims.");

    let output = call(&service, "show-claim-detail", json!({ "claimId": "CN202504993" })).await;
    let claim = &structured(&output)["claim"];
    assert_eq!(claim["estimatedLoss"], json!(2500.0));
    assert_eq!(claim["notes"], json!([]));
    assert_eq!(claim["damageTypes"], json!(["Hail", { "severity": "minor" }]));

    let output = call(&service, "get-claim-summary", json!({ "claimId": "4" })).await;
    let text = output.text_content();
    assert!(text.contains("💰 Estimated Loss: $2,500"));
    assert!(text.contains(r#"🔧 Damage Types: Hail, {"severity":"minor"}"#));
}
