use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::case::CaseStatus;

/// A warranty-defect case tied to an order and customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: Uuid,
    pub order_number: String,
    pub email: String,
    pub name: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub phone_number: String,
    pub brand: String,
    pub problem_description: String,
    pub notification_acknowledged: bool,
    pub status: CaseStatus,
    pub submission_date: DateTime<Utc>,
}

/// Intake payload for a new claim.
///
/// Carries no status field; any `status` in the request body is dropped and
/// the server creates the record as `Pending`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewClaim {
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

    #[garde(length(min = 1, max = 100))]
    pub brand: String,

    #[garde(length(min = 1, max = 4000))]
    pub problem_description: String,

    #[garde(skip)]
    #[serde(default)]
    pub notification_acknowledged: bool,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimPatch {
    pub order_number: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub phone_number: Option<String>,
    pub brand: Option<String>,
    pub problem_description: Option<String>,
    pub notification_acknowledged: Option<bool>,
    pub status: Option<CaseStatus>,
}
