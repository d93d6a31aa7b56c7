use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::case::CaseStatus;
use crate::models::returns::{NewReturn, Return, ReturnPatch};

const RETURN_COLUMNS: &str = "id, order_number, email, name, street, postal_code, city, \
                              phone_number, return_details, status, submission_date";

fn return_from_row(row: &PgRow) -> Result<Return, sqlx::Error> {
    let status: String = row.try_get("status")?;
    Ok(Return {
        id: row.try_get("id")?,
        order_number: row.try_get("order_number")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        street: row.try_get("street")?,
        postal_code: row.try_get("postal_code")?,
        city: row.try_get("city")?,
        phone_number: row.try_get("phone_number")?,
        return_details: row.try_get("return_details")?,
        status: status.parse().unwrap_or(CaseStatus::Pending),
        submission_date: row.try_get("submission_date")?,
    })
}

/// Insert a new return. Status is always 'Pending' at creation.
pub async fn create_return(pool: &PgPool, new_return: &NewReturn) -> Result<Return, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        INSERT INTO returns (order_number, email, name, street, postal_code, city,
                             phone_number, return_details, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'Pending')
        RETURNING {RETURN_COLUMNS}
        "#
    ))
    .bind(&new_return.order_number)
    .bind(&new_return.email)
    .bind(&new_return.name)
    .bind(&new_return.street)
    .bind(&new_return.postal_code)
    .bind(&new_return.city)
    .bind(&new_return.phone_number)
    .bind(&new_return.return_details)
    .fetch_one(pool)
    .await?;

    return_from_row(&row)
}

/// All returns, unfiltered.
pub async fn list_returns(pool: &PgPool) -> Result<Vec<Return>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT {RETURN_COLUMNS} FROM returns ORDER BY submission_date ASC"
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(return_from_row).collect()
}

/// Returns matching the (order number, email) pair.
pub async fn list_returns_for_order(
    pool: &PgPool,
    order_number: &str,
    email: &str,
) -> Result<Vec<Return>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {RETURN_COLUMNS}
        FROM returns
        WHERE order_number = $1 AND email = $2
        ORDER BY submission_date ASC
        "#
    ))
    .bind(order_number)
    .bind(email)
    .fetch_all(pool)
    .await?;

    rows.iter().map(return_from_row).collect()
}

/// Get a return by id
pub async fn get_return(pool: &PgPool, id: Uuid) -> Result<Option<Return>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {RETURN_COLUMNS} FROM returns WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(return_from_row).transpose()
}

/// First return matching the (order number, email) pair, oldest wins.
pub async fn find_by_order_and_email(
    pool: &PgPool,
    order_number: &str,
    email: &str,
) -> Result<Option<Return>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        SELECT {RETURN_COLUMNS}
        FROM returns
        WHERE order_number = $1 AND email = $2
        ORDER BY submission_date ASC
        LIMIT 1
        "#
    ))
    .bind(order_number)
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(return_from_row).transpose()
}

/// Merge the supplied fields into an existing return. Returns None when the
/// id does not exist.
pub async fn update_return(
    pool: &PgPool,
    id: Uuid,
    patch: &ReturnPatch,
) -> Result<Option<Return>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE returns
        SET order_number = COALESCE($2, order_number),
            email = COALESCE($3, email),
            name = COALESCE($4, name),
            street = COALESCE($5, street),
            postal_code = COALESCE($6, postal_code),
            city = COALESCE($7, city),
            phone_number = COALESCE($8, phone_number),
            return_details = COALESCE($9, return_details),
            status = COALESCE($10, status)
        WHERE id = $1
        RETURNING {RETURN_COLUMNS}
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
    .bind(&patch.return_details)
    .bind(patch.status.map(|s| s.to_string()))
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(return_from_row).transpose()
}
