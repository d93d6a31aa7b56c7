use reqwest::Client;
use serde::Serialize;

use crate::models::claim::Claim;

/// Client for the transactional mail HTTP API.
pub struct Mailer {
    http: Client,
    api_url: String,
    api_token: String,
    sender: String,
}

#[derive(Debug, Serialize)]
struct OutboundMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: String,
    text: String,
}

impl Mailer {
    pub fn new(api_url: &str, api_token: &str, sender: &str) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.to_string(),
            api_token: api_token.to_string(),
            sender: sender.to_string(),
        }
    }

    /// Confirmation sent after a claim has been accepted.
    pub async fn send_submission_notice(
        &self,
        recipient: &str,
        claim: &Claim,
    ) -> Result<(), MailerError> {
        let (subject, text) = submission_template(claim);
        self.deliver(recipient, subject, text).await
    }

    /// Update sent after a claim has been modified.
    pub async fn send_status_change_notice(
        &self,
        recipient: &str,
        claim: &Claim,
    ) -> Result<(), MailerError> {
        let (subject, text) = status_change_template(claim);
        self.deliver(recipient, subject, text).await
    }

    async fn deliver(
        &self,
        recipient: &str,
        subject: String,
        text: String,
    ) -> Result<(), MailerError> {
        let message = OutboundMessage {
            from: &self.sender,
            to: recipient,
            subject,
            text,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .json(&message)
            .send()
            .await
            .map_err(MailerError::Http)?;

        if !response.status().is_success() {
            return Err(MailerError::Rejected(response.status().as_u16()));
        }
        Ok(())
    }
}

fn submission_template(claim: &Claim) -> (String, String) {
    let subject = format!(
        "We received your warranty claim for order {}",
        claim.order_number
    );
    let text = format!(
        "Hello {},\n\n\
         Your warranty claim for order {} ({}) has been received and is now {}.\n\
         We will notify you as soon as its status changes.\n\n\
         Your claim reference: {}\n",
        claim.name, claim.order_number, claim.brand, claim.status, claim.id
    );
    (subject, text)
}

fn status_change_template(claim: &Claim) -> (String, String) {
    let subject = format!(
        "Update on your warranty claim for order {}",
        claim.order_number
    );
    let text = format!(
        "Hello {},\n\n\
         The status of your warranty claim for order {} ({}) is now: {}.\n\n\
         Your claim reference: {}\n",
        claim.name, claim.order_number, claim.brand, claim.status, claim.id
    );
    (subject, text)
}

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail API rejected the message with status {0}")]
    Rejected(u16),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::case::CaseStatus;
    use chrono::Utc;
    use uuid::Uuid;

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
            submission_date: Utc::now(),
        }
    }

    #[test]
    fn submission_template_names_the_order() {
        let claim = sample_claim(CaseStatus::Pending);
        let (subject, text) = submission_template(&claim);
        assert!(subject.contains("A1"));
        assert!(text.contains("Pending"));
        assert!(text.contains(&claim.id.to_string()));
    }

    #[test]
    fn status_change_template_reflects_current_status() {
        let claim = sample_claim(CaseStatus::Resolved);
        let (_, text) = status_change_template(&claim);
        assert!(text.contains("Resolved"));
    }
}
