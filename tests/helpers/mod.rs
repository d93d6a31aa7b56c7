//! Test helper utilities for E2E testing

use serde_json::{json, Value};

/// Get base URL from env or default to localhost
pub fn base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A complete, valid claim body. `order_number` should be unique per test
/// run so lookups don't collide with leftover rows.
pub fn claim_body(order_number: &str, email: &str) -> Value {
    json!({
        "orderNumber": order_number,
        "email": email,
        "name": "Jane Doe",
        "street": "Main St 1",
        "postalCode": "12345",
        "city": "Springfield",
        "phoneNumber": "+4912345",
        "brand": "Nordlicht",
        "problemDescription": "Does not power on",
        "notificationAcknowledged": true
    })
}

/// A complete, valid return body for the same pair.
pub fn return_body(order_number: &str, email: &str) -> Value {
    json!({
        "orderNumber": order_number,
        "email": email,
        "name": "Jane Doe",
        "street": "Main St 1",
        "postalCode": "12345",
        "city": "Springfield",
        "phoneNumber": "+4912345",
        "returnDetails": { "reason": "wrong size" }
    })
}

/// POST a JSON body and return (status, parsed body).
pub async fn post_json(
    client: &reqwest::Client,
    url: &str,
    body: &Value,
) -> Result<(u16, Value), Box<dyn std::error::Error>> {
    let response = client.post(url).json(body).send().await?;
    let status = response.status().as_u16();
    let body = response.json::<Value>().await?;
    Ok((status, body))
}

/// GET and return (status, parsed body).
pub async fn get_json(
    client: &reqwest::Client,
    url: &str,
) -> Result<(u16, Value), Box<dyn std::error::Error>> {
    let response = client.get(url).send().await?;
    let status = response.status().as_u16();
    let body = response.json::<Value>().await?;
    Ok((status, body))
}

/// PATCH a JSON body and return (status, parsed body).
pub async fn patch_json(
    client: &reqwest::Client,
    url: &str,
    body: &Value,
) -> Result<(u16, Value), Box<dyn std::error::Error>> {
    let response = client.patch(url).json(body).send().await?;
    let status = response.status().as_u16();
    let body = response.json::<Value>().await?;
    Ok((status, body))
}
