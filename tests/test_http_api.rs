//! HTTP surface test: serves the router on an ephemeral port and drives it with reqwest.
//! Covers role gating, the mint -> move -> verify flow and the error status mapping.

use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use truechain_ledger::transport;
use truechain_ledger::transport::http::types::ApiResponse;
use truechain_ledger::transport::http::ROLE_HEADER;
use truechain_ledger::{LedgerConfig, LedgerService, OfflineSummarizer};

async fn spawn_server() -> Result<String, Box<dyn std::error::Error>> {
    let ledger = LedgerService::new(LedgerConfig::default(), Arc::new(OfflineSummarizer))?;
    let app_state = transport::http::AppState {
        ledger: Arc::new(ledger),
    };
    let router = transport::http::create_router(app_state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://{}", addr))
}

async fn parse(resp: reqwest::Response) -> Result<(StatusCode, ApiResponse), Box<dyn std::error::Error>> {
    let status = resp.status();
    let body: ApiResponse = resp.json().await?;
    Ok((status, body))
}

fn data(body: &ApiResponse) -> &Value {
    body.data.as_ref().expect("response carries data")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_mint_move_verify_flow() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    // Health reflects the seeded demo catalogue.
    let (status, body) = parse(client.get(format!("{}/health", base_url)).send().await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["products"], 3);
    assert_eq!(data(&body)["transactions"], 3);

    // Mint.
    let (status, body) = parse(
        client
            .post(format!("{}/api/products/mint", base_url))
            .header(ROLE_HEADER, "Manufacturer")
            .json(&json!({
                "name": "Test Drug",
                "category": "Pharmaceuticals",
                "batchNumber": "B-1"
            }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "mint failed: {:?}", body.error);
    let product_id = data(&body)["product"]["id"].as_str().unwrap().to_string();
    let genesis_hash = data(&body)["genesis"]["hash"].as_str().unwrap().to_string();
    assert!(product_id.starts_with("TC-IN-"));
    assert_eq!(data(&body)["product"]["status"], "Manufactured");
    assert_eq!(data(&body)["genesis"]["action"], "MANUFACTURED");

    // Move.
    let (status, body) = parse(
        client
            .post(format!("{}/api/ledger/transactions", base_url))
            .header(ROLE_HEADER, "Distributor")
            .json(&json!({
                "productId": product_id,
                "action": "SHIPPED",
                "location": "Delhi"
            }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "record failed: {:?}", body.error);
    assert_eq!(data(&body)["previousHash"], genesis_hash.as_str());

    // Verify.
    let (status, body) = parse(
        client
            .get(format!("{}/api/verify/{}", base_url, product_id))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let report = data(&body);
    assert_eq!(report["found"], true);
    assert_eq!(report["verified"], true);
    assert_eq!(report["chainIntact"], true);
    assert_eq!(report["outcome"], "authentic");
    assert_eq!(report["history"].as_array().unwrap().len(), 2);
    assert_eq!(report["history"][0]["action"], "SHIPPED");
    assert_eq!(report["product"]["currentLocation"], "Delhi");
    assert_eq!(report["product"]["status"], "In Transit");

    // Product lookup and ledger listing see the new blocks.
    let (status, body) = parse(
        client
            .get(format!("{}/api/products/{}", base_url, product_id))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["batchNumber"], "B-1");

    let (_, body) = parse(client.get(format!("{}/api/ledger", base_url)).send().await?).await?;
    assert_eq!(data(&body)["totalBlocks"], 5);
    assert_eq!(data(&body)["transactions"][0]["location"], "Delhi");

    let (_, body) = parse(client.get(format!("{}/api/products", base_url)).send().await?).await?;
    assert_eq!(data(&body).as_array().unwrap().len(), 4);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_consumers_cannot_write() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let mint = json!({ "name": "Saree", "category": "Luxury", "batchNumber": "S-1" });

    let (status, body) = parse(
        client
            .post(format!("{}/api/products/mint", base_url))
            .json(&mint)
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(!body.success);

    let (status, _) = parse(
        client
            .post(format!("{}/api/ledger/transactions", base_url))
            .header(ROLE_HEADER, "Consumer")
            .json(&json!({ "productId": "TC-IN-7829", "action": "SOLD", "location": "Home" }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = parse(
        client
            .post(format!("{}/api/products/mint", base_url))
            .header(ROLE_HEADER, "Pirate")
            .json(&mint)
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_error_statuses() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();
    let record = |body: Value| {
        client
            .post(format!("{}/api/ledger/transactions", base_url))
            .header(ROLE_HEADER, "Retailer")
            .json(&body)
            .send()
    };

    // Unknown product.
    let (status, _) = parse(
        record(json!({ "productId": "TC-IN-NOPE", "action": "SHIPPED", "location": "Delhi" })).await?,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Flagged product is frozen.
    let (status, _) = parse(
        record(json!({ "productId": "TC-IN-FAKE", "action": "RETAIL_STOCK", "location": "Mall" })).await?,
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    // Unknown action and blank location.
    let (status, body) = parse(
        record(json!({ "productId": "TC-IN-7829", "action": "TELEPORTED", "location": "Mars" })).await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.error.unwrap().contains("TELEPORTED"));

    let (status, _) = parse(
        record(json!({ "productId": "TC-IN-7829", "action": "SOLD", "location": "  " })).await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Malformed body.
    let (status, _) = parse(record(json!({ "productId": "TC-IN-7829" })).await?).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Request bodies are camelCase like every response record.
    let (status, body) = parse(
        record(json!({ "product_id": "TC-IN-7829", "action": "SOLD", "location": "Home" })).await?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.error.unwrap().contains("productId"));

    // Padded ids are not trimmed into a match.
    let (status, _) = parse(
        record(json!({ "productId": " TC-IN-7829 ", "action": "SOLD", "location": "Home" })).await?,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Unknown category on mint.
    let (status, _) = parse(
        client
            .post(format!("{}/api/products/mint", base_url))
            .header(ROLE_HEADER, "Manufacturer")
            .json(&json!({ "name": "Gizmo", "category": "Toys", "batchNumber": "T-1" }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Missing product lookup.
    let (status, _) = parse(
        client
            .get(format!("{}/api/products/TC-IN-NOPE", base_url))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_verification_verdicts_and_fallbacks() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let (status, body) = parse(
        client
            .get(format!("{}/api/verify/does-not-exist", base_url))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["found"], false);
    assert_eq!(data(&body)["verified"], false);
    assert_eq!(data(&body)["outcome"], "not_found");
    assert!(data(&body)["history"].as_array().unwrap().is_empty());
    assert!(data(&body).get("product").map_or(true, Value::is_null));

    let (_, body) = parse(
        client
            .get(format!("{}/api/verify/TC-IN-FAKE", base_url))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(data(&body)["found"], true);
    assert_eq!(data(&body)["verified"], false);
    assert_eq!(data(&body)["outcome"], "flagged");

    // No AI backend: analysis and insight fall back to fixed text.
    let (_, body) = parse(
        client
            .get(format!("{}/api/verify/TC-IN-7829", base_url))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(
        data(&body)["analysis"],
        truechain_ledger::domain::summary::ANALYSIS_UNAVAILABLE
    );

    let (_, body) = parse(
        client
            .get(format!("{}/api/insights/market", base_url))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(
        data(&body)["insight"],
        truechain_ledger::domain::summary::INSIGHT_FALLBACK
    );

    // Capture picks one of the demo codes.
    let (status, body) = parse(
        client
            .post(format!("{}/api/scan/capture", base_url))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let scanned = data(&body)["scannedId"].as_str().unwrap();
    assert!(truechain_ledger::domain::model::DEMO_SCAN_IDS.contains(&scanned));
    assert_eq!(data(&body)["found"], true);

    Ok(())
}
