use serde_json::{json, Value};
use zava_claims_mcp::mcp::codes;
use zava_claims_mcp::ToolError;

use crate::support::seeded_service;

#[tokio::test]
async fn missing_required_arguments_are_rejected_before_the_handler() {
    let (service, _) = seeded_service().await;

    for (tool, args) in [
        ("update-claim-status", json!({ "claimId": "1" })),
        ("update-claim-status", json!({ "claimId": "1", "status": null })),
        ("show-claim-detail", json!({})),
        ("create-inspection", Value::Null),
        ("update-inspection", json!({ "status": "completed" })),
    ] {
        let err = service.dispatch(tool, args).await.unwrap_err();
        assert!(matches!(err, ToolError::GuardRejected(ref name) if name == tool), "{tool}: {err}");
        assert_eq!(err.rpc_code(), codes::INVALID_PARAMS);
    }
}

#[tokio::test]
async fn unknown_tool() {
    let (service, _) = seeded_service().await;

    let err = service.dispatch("delete-claim", json!({})).await.unwrap_err();
    assert!(matches!(err, ToolError::UnknownTool(ref name) if name == "delete-claim"));
    assert_eq!(err.to_string(), "unknown tool: delete-claim");
}

#[tokio::test]
async fn wrongly_typed_arguments_fail_to_decode() {
    let (service, _) = seeded_service().await;

    let err = service
        .dispatch("update-claim-status", json!({ "claimId": 1, "status": "Approved" }))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::DecodeFailed(_)));
    assert_eq!(err.rpc_code(), codes::INVALID_PARAMS);

    let err = service
        .dispatch("show-contractors", json!({ "preferredOnly": "yes" }))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::DecodeFailed(_)));
}

#[tokio::test]
async fn no_arguments_is_an_empty_object() {
    let (service, _) = seeded_service().await;

    let output = service.dispatch("show-contractors", Value::Null).await.unwrap();
    assert_eq!(output.text_content(), "Loaded 3 contractors.");
}

#[tokio::test]
async fn catalog_advertises_widgets_and_read_only_tools() {
    let (service, _) = seeded_service().await;
    let definitions: Vec<Value> = service
        .definitions()
        .into_iter()
        .map(|d| serde_json::to_value(d).unwrap())
        .collect();
    assert_eq!(definitions.len(), 9);

    let find = |name: &str| {
        definitions
            .iter()
            .find(|d| d["name"] == name)
            .unwrap_or_else(|| panic!("{name} not advertised"))
            .clone()
    };

    let dashboard = find("show-claims-dashboard");
    assert_eq!(dashboard["annotations"]["readOnlyHint"], true);
    assert_eq!(
        dashboard["_meta"]["openai/outputTemplate"],
        "ui://widget/claims-dashboard.html"
    );
    assert_eq!(dashboard["inputSchema"]["type"], "object");

    let summary = find("get-claim-summary");
    assert_eq!(summary["annotations"]["readOnlyHint"], true);
    assert!(summary.get("_meta").is_none());

    let update = find("update-claim-status");
    assert!(update.get("annotations").is_none());
    assert_eq!(update["inputSchema"]["required"], json!(["claimId", "status"]));

    let create = find("create-inspection");
    assert_eq!(create["inputSchema"]["required"], json!(["claimNumber"]));
}
