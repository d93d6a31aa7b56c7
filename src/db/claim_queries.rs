use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::case::CaseStatus;
use crate::models::claim::{Claim, ClaimPatch, NewClaim};

const CLAIM_COLUMNS: &str = "id, order_number, email, name, street, postal_code, city, \
                             phone_number, brand, problem_description, \
                             notification_acknowledged, status, submission_date";

fn claim_from_row(row: &PgRow) -> Result<Claim, sqlx::Error> {
    let status: String = row.try_get("status")?;
    Ok(Claim {
        id: row.try_get("id")?,
        order_number: row.try_get("order_number")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        street: row.try_get("street")?,
        postal_code: row.try_get("postal_code")?,
        city: row.try_get("city")?,
        phone_number: row.try_get("phone_number")?,
        brand: row.try_get("brand")?,
        problem_description: row.try_get("problem_description")?,
        notification_acknowledged: row.try_get("notification_acknowledged")?,
        status: status.parse().unwrap_or(CaseStatus::Pending),
        submission_date: row.try_get("submission_date")?,
    })
}

/// Insert a new claim. Status is always 'Pending' at creation.
pub async fn create_claim(pool: &PgPool, new_claim: &NewClaim) -> Result<Claim, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        INSERT INTO claims (order_number, email, name, street, postal_code, city,
                            phone_number, brand, problem_description, notification_acknowledged,
                            status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'Pending')
        RETURNING {CLAIM_COLUMNS}
        "#
    ))
    .bind(&new_claim.order_number)
    .bind(&new_claim.email)
    .bind(&new_claim.name)
    .bind(&new_claim.street)
    .bind(&new_claim.postal_code)
    .bind(&new_claim.city)
    .bind(&new_claim.phone_number)
    .bind(&new_claim.brand)
    .bind(&new_claim.problem_description)
    .bind(new_claim.notification_acknowledged)
    .fetch_one(pool)
    .await?;

    claim_from_row(&row)
}

/// All claims, unfiltered. The full-table scan is the documented contract.
pub async fn list_claims(pool: &PgPool) -> Result<Vec<Claim>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT {CLAIM_COLUMNS} FROM claims ORDER BY submission_date ASC"
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(claim_from_row).collect()
}

/// Claims matching the (order number, email) pair.
pub async fn list_claims_for_order(
    pool: &PgPool,
    order_number: &str,
    email: &str,
) -> Result<Vec<Claim>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {CLAIM_COLUMNS}
        FROM claims
        WHERE order_number = $1 AND email = $2
        ORDER BY submission_date ASC
        "#
    ))
    .bind(order_number)
    .bind(email)
    .fetch_all(pool)
    .await?;

    rows.iter().map(claim_from_row).collect()
}

/// Get a claim by id
pub async fn get_claim(pool: &PgPool, id: Uuid) -> Result<Option<Claim>, sqlx::Error> {
    let row = sqlx::query(&format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(claim_from_row).transpose()
}

/// First claim matching the (order number, email) pair, oldest wins.
pub async fn find_by_order_and_email(
    pool: &PgPool,
    order_number: &str,
    email: &str,
) -> Result<Option<Claim>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        SELECT {CLAIM_COLUMNS}
        FROM claims
        WHERE order_number = $1 AND email = $2
        ORDER BY submission_date ASC
        LIMIT 1
        "#
    ))
    .bind(order_number)
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(claim_from_row).transpose()
}

/// Merge the supplied fields into an existing claim. Fields absent from the
/// patch keep their stored values. Returns None when the id does not exist.
pub async fn update_claim(
    pool: &PgPool,
    id: Uuid,
    patch: &ClaimPatch,
) -> Result<Option<Claim>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE claims
        SET order_number = COALESCE($2, order_number),
            email = COALESCE($3, email),
            name = COALESCE($4, name),
            street = COALESCE($5, street),
            postal_code = COALESCE($6, postal_code),
            city = COALESCE($7, city),
            phone_number = COALESCE($8, phone_number),
            brand = COALESCE($9, brand),
            problem_description = COALESCE($10, problem_description),
            notification_acknowledged = COALESCE($11, notification_acknowledged),
            status = COALESCE($12, status)
        WHERE id = $1
        RETURNING {CLAIM_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&patch.order_number)
    .bind(&patch.email)
    .bind(&patch.name)
    .bind(&patch.street)
    .bind(&patch.postal_code)
    .bind(&patch.city)
    .bind(&patch.phone_number)
    .bind(&patch.brand)
    .bind(&patch.problem_description)
    .bind(patch.notification_acknowledged)
    .bind(patch.status.map(|s| s.to_string()))
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(claim_from_row).transpose()
}
