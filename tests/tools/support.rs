//! Test data: a small claims book seeded into the in-memory backend.

use serde_json::{json, Value};
use zava_claims_mcp::mcp::{ToolOutput, ToolService};
use zava_claims_mcp::{tools, Collection, EntityStore, InMemoryTableStore, Seeder};

pub type Store = EntityStore<InMemoryTableStore>;

pub fn claims() -> Vec<Value> {
    vec![
        json!({
            "id": "1",
            "claimNumber": "CN202504990",
            "policyNumber": "POL-1001",
            "policyHolderName": "Kimberly King",
            "policyHolderEmail": "kimberly.king@example.com",
            "property": "123 Maple Ave, Springfield, IL",
            "dateOfLoss": "2025-03-15",
            "dateReported": "2025-03-16",
            "status": "Open - Under Investigation",
            "damageTypes": ["Roof", "Water"],
            "description": "Hail storm tore shingles; water entered the attic.",
            "estimatedLoss": 18250,
            "adjusterAssigned": "Morgan Lee",
            "notes": ["Initial report filed"],
            "createdAt": "2025-03-16T09:00:00.000Z",
            "updatedAt": "2025-03-16T09:00:00.000Z"
        }),
        json!({
            "id": "2",
            "claimNumber": "CN202504991",
            "policyNumber": "POL-1002",
            "policyHolderName": "Kimberly Williams",
            "policyHolderEmail": "kwilliams@example.com",
            "property": "9 Birch Ct, Madison, WI",
            "dateOfLoss": "2025-04-02",
            "dateReported": "2025-04-02",
            "status": "Open - Pending Inspection",
            "damageTypes": ["Fire"],
            "description": "Kitchen fire.",
            "estimatedLoss": 42000.5,
            "adjusterAssigned": "Morgan Lee",
            "notes": [],
            "createdAt": "2025-04-02T12:00:00.000Z",
            "updatedAt": "2025-04-02T12:00:00.000Z"
        }),
        json!({
            "id": "3",
            "claimNumber": "CN202504992",
            "policyNumber": "POL-1003",
            "policyHolderName": "John Smith",
            "policyHolderEmail": "john.smith@example.com",
            "property": "77 Cedar Rd, Austin, TX",
            "dateOfLoss": "2025-01-20",
            "dateReported": "2025-01-21",
            "status": "Closed - Resolved",
            "damageTypes": ["Wind"],
            "description": "Fence blown down.",
            "estimatedLoss": 3100,
            "adjusterAssigned": "Sam Ortiz",
            "notes": "legacy free-text note",
            "createdAt": "2025-01-21T08:00:00.000Z",
            "updatedAt": "2025-02-01T08:00:00.000Z"
        }),
    ]
}

pub fn inspections() -> Vec<Value> {
    vec![
        json!({
            "id": "insp-001",
            "claimId": "1",
            "claimNumber": "CN202504990",
            "taskType": "initial",
            "priority": "high",
            "status": "completed",
            "scheduledDate": "2025-03-18",
            "inspectorId": "inspector-001",
            "property": "123 Maple Ave, Springfield, IL",
            "instructions": "Check attic for water ingress.",
            "photos": ["roof-1.jpg"],
            "findings": "Missing shingles on north face.",
            "recommendedActions": ["Replace shingles"],
            "flaggedIssues": [],
            "createdAt": "2025-03-16T10:00:00.000Z",
            "updatedAt": "2025-03-18T15:00:00.000Z",
            "completedDate": "2025-03-18T15:00:00.000Z"
        }),
        json!({
            "id": "insp-002",
            "claimId": "1",
            "claimNumber": "CN202504990",
            "taskType": "re-inspection",
            "priority": "medium",
            "status": "scheduled",
            "inspectorId": "inspector-002",
            "property": "123 Maple Ave, Springfield, IL",
            "photos": [],
            "recommendedActions": [],
            "flaggedIssues": []
        }),
        json!({
            "id": "insp-003",
            "claimId": "2",
            "claimNumber": "CN202504991",
            "taskType": "initial",
            "priority": "high",
            "status": "open",
            "inspectorId": "inspector-001",
            "property": "9 Birch Ct, Madison, WI",
            "photos": [],
            "recommendedActions": [],
            "flaggedIssues": []
        }),
    ]
}

pub fn purchase_orders() -> Vec<Value> {
    vec![
        json!({
            "id": "po-001",
            "poNumber": "PO-2025-001",
            "claimId": "1",
            "claimNumber": "CN202504990",
            "contractorId": "contractor-001",
            "workDescription": "Roof repair",
            "lineItems": [{
                "id": "li-1",
                "description": "Shingles",
                "quantity": 20,
                "unitPrice": 45,
                "totalPrice": 900,
                "category": "materials"
            }],
            "subtotal": 900,
            "tax": 72,
            "total": 972,
            "status": "pending",
            "createdDate": "2025-03-19",
            "notes": []
        }),
        json!({
            "id": "po-002",
            "poNumber": "PO-2025-002",
            "claimId": "1",
            "claimNumber": "CN202504990",
            "contractorId": "contractor-001",
            "workDescription": "Attic drying",
            "lineItems": [],
            "subtotal": 400,
            "tax": 32,
            "total": 432,
            "status": "approved",
            "createdDate": "2025-03-20",
            "notes": ["Approved by adjuster"]
        }),
        json!({
            "id": "po-003",
            "poNumber": "PO-2025-003",
            "claimId": "2",
            "claimNumber": "CN202504991",
            "contractorId": "contractor-002",
            "workDescription": "Smoke cleanup",
            "lineItems": [],
            "subtotal": 1500,
            "tax": 120,
            "total": 1620,
            "status": "pending",
            "createdDate": "2025-04-05",
            "notes": []
        }),
        json!({
            "id": "po-004",
            "poNumber": "PO-2025-004",
            "claimId": "3",
            "claimNumber": "CN202504992",
            "contractorId": "contractor-999",
            "workDescription": "Fence replacement",
            "lineItems": [],
            "subtotal": 2800,
            "tax": 224,
            "total": 3024,
            "status": "completed",
            "createdDate": "2025-01-25",
            "notes": []
        }),
    ]
}

pub fn contractors() -> Vec<Value> {
    vec![
        json!({
            "id": "contractor-001",
            "name": "Ana Ruiz",
            "businessName": "Ruiz Roofing",
            "email": "ana@ruizroofing.example",
            "phone": "555-0101",
            "address": { "street": "1 Main St", "city": "Springfield", "state": "IL", "zipCode": "62701", "country": "USA" },
            "licenseNumber": "IL-RF-1",
            "insuranceCertificate": "CERT-1",
            "specialties": ["Roofing", "Siding"],
            "rating": 4.8,
            "isPreferred": true,
            "isActive": true
        }),
        json!({
            "id": "contractor-002",
            "name": "Ben Okafor",
            "businessName": "DryRight Restoration",
            "email": "ben@dryright.example",
            "phone": "555-0102",
            "address": { "street": "5 Lake Dr", "city": "Madison", "state": "WI", "zipCode": "53703", "country": "USA" },
            "licenseNumber": "WI-WD-2",
            "insuranceCertificate": "CERT-2",
            "specialties": ["Water Damage", "Mold Remediation"],
            "rating": "4.1",
            "isPreferred": false,
            "isActive": true
        }),
        json!({
            "id": "contractor-003",
            "name": "Cara Diaz",
            "businessName": "Phoenix Fire Restoration",
            "email": "cara@phoenix.example",
            "phone": "555-0103",
            "address": { "street": "8 Elm St", "city": "Austin", "state": "TX", "zipCode": "73301", "country": "USA" },
            "licenseNumber": "TX-FR-3",
            "insuranceCertificate": "CERT-3",
            "specialties": ["Fire Restoration", "Smoke Damage"],
            "rating": 4.5,
            "isPreferred": true,
            "isActive": true
        }),
    ]
}

pub fn inspectors() -> Vec<Value> {
    vec![
        json!({
            "id": "inspector-001",
            "name": "Dana Cruz",
            "email": "dana.cruz@zava.example",
            "phone": "555-0201",
            "licenseNumber": "INS-1",
            "specializations": ["Roof", "Hail"]
        }),
        json!({
            "id": "inspector-002",
            "name": "Lee Park",
            "email": "lee.park@zava.example",
            "phone": "555-0202",
            "licenseNumber": "INS-2",
            "specializations": ["Water", "Mold"]
        }),
    ]
}

/// A store holding the full claims book.
pub async fn seeded_store() -> Store {
    let store = EntityStore::new(InMemoryTableStore::new());
    store.ensure_collections().await.unwrap();

    let seeder = Seeder::new(store.clone(), "unused");
    for (collection, rows) in [
        (Collection::Claims, claims()),
        (Collection::Contractors, contractors()),
        (Collection::Inspections, inspections()),
        (Collection::Inspectors, inspectors()),
        (Collection::PurchaseOrders, purchase_orders()),
    ] {
        seeder.seed_rows(collection, rows).await.unwrap();
    }
    store
}

pub async fn seeded_service() -> (ToolService<InMemoryTableStore>, Store) {
    let store = seeded_store().await;
    (tools::service(store.clone()), store)
}

/// Call a tool that is expected to succeed.
pub async fn call(service: &ToolService<InMemoryTableStore>, tool: &str, args: Value) -> ToolOutput {
    service
        .dispatch(tool, args)
        .await
        .unwrap_or_else(|e| panic!("{tool} failed: {e}"))
}

pub fn structured(output: &ToolOutput) -> &Value {
    output
        .structured_content
        .as_ref()
        .expect("tool returned no structured content")
}
