use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{claim_queries, return_queries};
use crate::models::case::Case;
use crate::models::claim::Claim;
use crate::models::returns::Return;

/// Precedence rule for the unified lookup: a claim always shadows a return.
///
/// A real-world order number can coincidentally satisfy both collections;
/// the tie-break lives here and nowhere else.
pub fn prefer_claim(claim: Option<Claim>, ret: Option<Return>) -> Option<Case> {
    claim.map(Case::Claim).or_else(|| ret.map(Case::Return))
}

/// Find a case by the (order number, email) pair.
///
/// The return probe only runs when no claim matches.
pub async fn find_by_order_and_email(
    pool: &PgPool,
    order_number: &str,
    email: &str,
) -> Result<Option<Case>, sqlx::Error> {
    let claim = claim_queries::find_by_order_and_email(pool, order_number, email).await?;
    let ret = if claim.is_some() {
        None
    } else {
        return_queries::find_by_order_and_email(pool, order_number, email).await?
    };
    Ok(prefer_claim(claim, ret))
}

/// Find a case by id, claims first.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Case>, sqlx::Error> {
    let claim = claim_queries::get_claim(pool, id).await?;
    let ret = if claim.is_some() {
        None
    } else {
        return_queries::get_return(pool, id).await?
    };
    Ok(prefer_claim(claim, ret))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::case::CaseStatus;
    use chrono::Utc;

    fn claim(order_number: &str) -> Claim {
        Claim {
            id: Uuid::new_v4(),
            order_number: order_number.to_string(),
            email: "x@y.com".to_string(),
            name: "Jane Doe".to_string(),
            street: "Main St 1".to_string(),
            postal_code: "12345".to_string(),
            city: "Springfield".to_string(),
            phone_number: "+4912345".to_string(),
            brand: "Acme".to_string(),
            problem_description: "Does not power on".to_string(),
            notification_acknowledged: true,
            status: CaseStatus::Pending,
            submission_date: Utc::now(),
        }
    }

    fn ret(order_number: &str) -> Return {
        Return {
            id: Uuid::new_v4(),
            order_number: order_number.to_string(),
            email: "x@y.com".to_string(),
            name: "Jane Doe".to_string(),
            street: "Main St 1".to_string(),
            postal_code: "12345".to_string(),
            city: "Springfield".to_string(),
            phone_number: "+4912345".to_string(),
            return_details: None,
            status: CaseStatus::Pending,
            submission_date: Utc::now(),
        }
    }

    #[test]
    fn claim_wins_when_both_match() {
        let case = prefer_claim(Some(claim("A1")), Some(ret("A1"))).unwrap();
        assert!(matches!(case, Case::Claim(_)));
    }

    #[test]
    fn return_used_when_no_claim_matches() {
        let case = prefer_claim(None, Some(ret("A1"))).unwrap();
        assert!(matches!(case, Case::Return(_)));
    }

    #[test]
    fn no_match_yields_none() {
        assert_eq!(prefer_claim(None, None), None);
    }
}
