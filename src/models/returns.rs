use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::case::CaseStatus;

/// A product-return case tied to an order and customer.
///
/// `return_details` is the return-specific payload; it is opaque to this
/// layer and passed through exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Return {
    pub id: Uuid,
    pub order_number: String,
    pub email: String,
    pub name: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub phone_number: String,
    pub return_details: Option<serde_json::Value>,
    pub status: CaseStatus,
    pub submission_date: DateTime<Utc>,
}

/// Intake payload for a new return. Status is server-assigned, same as claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewReturn {
    #[garde(length(min = 1, max = 64))]
    pub order_number: String,

    #[garde(email)]
    pub email: String,

    #[garde(length(min = 1, max = 200))]
    pub name: String,

    #[garde(length(min = 1, max = 200))]
    pub street: String,

    #[garde(length(min = 1, max = 20))]
    pub postal_code: String,

    #[garde(length(min = 1, max = 100))]
    pub city: String,

    #[garde(length(min = 1, max = 40))]
    pub phone_number: String,

    #[garde(skip)]
    #[serde(default)]
    pub return_details: Option<serde_json::Value>,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnPatch {
    pub order_number: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub phone_number: Option<String>,
    pub return_details: Option<serde_json::Value>,
    pub status: Option<CaseStatus>,
}
