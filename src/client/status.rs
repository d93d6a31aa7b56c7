use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::client::api::{CaseApiClient, ClientError};
use crate::models::case::{Case, CaseStatus};
use crate::models::claim::Claim;

const GENERIC_LOOKUP_ERROR: &str =
    "Something went wrong while fetching your case. Please try again.";

/// What the status screen renders for a located case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseSummary {
    pub order_number: String,
    pub name: String,
    pub status: CaseStatus,
    pub submitted: DateTime<Utc>,
}

impl CaseSummary {
    pub fn from_case(case: &Case) -> Self {
        match case {
            Case::Claim(claim) => Self::from_claim(claim),
            Case::Return(ret) => Self {
                order_number: ret.order_number.clone(),
                name: ret.name.clone(),
                status: ret.status,
                submitted: ret.submission_date,
            },
        }
    }

    pub fn from_claim(claim: &Claim) -> Self {
        Self {
            order_number: claim.order_number.clone(),
            name: claim.name.clone(),
            status: claim.status,
            submitted: claim.submission_date,
        }
    }

    /// Human-readable label for the raw status value.
    pub fn status_label(&self) -> &'static str {
        match self.status {
            CaseStatus::Pending => "Pending review",
            CaseStatus::InReview => "In review",
            CaseStatus::Resolved => "Resolved",
            CaseStatus::Rejected => "Rejected",
        }
    }

    /// Submission timestamp formatted for display.
    pub fn submitted_label(&self) -> String {
        self.submitted.format("%d %b %Y, %H:%M UTC").to_string()
    }
}

/// Outcome of a status lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusView {
    Found(CaseSummary),
    NotFound,
    Failed(String),
}

/// The status screen's two entry paths: arrival with a known id (straight
/// from the intake flow), or a manual (order number, email) lookup.
pub struct StatusViewer {
    api: CaseApiClient,
}

impl StatusViewer {
    pub fn new(api: CaseApiClient) -> Self {
        Self { api }
    }

    /// Entry path (a): fetch by the identifier handed over by the intake flow.
    pub async fn lookup_by_id(&self, id: Uuid) -> StatusView {
        match self.api.fetch_case(id).await {
            Ok(case) => StatusView::Found(CaseSummary::from_case(&case)),
            Err(err) if err.is_not_found() => StatusView::NotFound,
            Err(err) => failed(err),
        }
    }

    /// Entry path (b): manual lookup; the first match of the filtered list
    /// wins, none means "no case found".
    pub async fn lookup_by_order(&self, order_number: &str, email: &str) -> StatusView {
        match self.api.find_claims(order_number, email).await {
            Ok(claims) => match claims.first() {
                Some(claim) => StatusView::Found(CaseSummary::from_claim(claim)),
                None => StatusView::NotFound,
            },
            Err(err) => failed(err),
        }
    }
}

fn failed(err: ClientError) -> StatusView {
    tracing::warn!(error = %err, "case lookup failed");
    match err {
        ClientError::Api { message, .. } => StatusView::Failed(message),
        ClientError::Transport(_) => StatusView::Failed(GENERIC_LOOKUP_ERROR.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::returns::Return;
    use chrono::TimeZone;

    fn sample_claim(status: CaseStatus) -> Claim {
        Claim {
            id: Uuid::new_v4(),
            order_number: "A1".to_string(),
            email: "x@y.com".to_string(),
            name: "Jane Doe".to_string(),
            street: "Main St 1".to_string(),
            postal_code: "12345".to_string(),
            city: "Springfield".to_string(),
            phone_number: "+4912345".to_string(),
            brand: "Acme".to_string(),
            problem_description: "Does not power on".to_string(),
            notification_acknowledged: true,
            status,
            submission_date: Utc.with_ymd_and_hms(2024, 3, 7, 14, 30, 0).unwrap(),
        }
    }

    #[test]
    fn summary_maps_status_to_display_label() {
        let summary = CaseSummary::from_claim(&sample_claim(CaseStatus::InReview));
        assert_eq!(summary.status_label(), "In review");
    }

    #[test]
    fn summary_formats_the_submission_timestamp() {
        let summary = CaseSummary::from_claim(&sample_claim(CaseStatus::Pending));
        assert_eq!(summary.submitted_label(), "07 Mar 2024, 14:30 UTC");
    }

    #[test]
    fn summary_covers_returns_too() {
        let ret = Return {
            id: Uuid::new_v4(),
            order_number: "B2".to_string(),
            email: "x@y.com".to_string(),
            name: "Jane Doe".to_string(),
            street: "Main St 1".to_string(),
            postal_code: "12345".to_string(),
            city: "Springfield".to_string(),
            phone_number: "+4912345".to_string(),
            return_details: None,
            status: CaseStatus::Resolved,
            submission_date: Utc::now(),
        };
        let summary = CaseSummary::from_case(&Case::Return(ret));
        assert_eq!(summary.order_number, "B2");
        assert_eq!(summary.status_label(), "Resolved");
    }
}
