use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::case::Case;
use crate::models::claim::{Claim, NewClaim};

/// Error body the API returns for non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with an error payload; `message` is what the
    /// server said and is safe to show to the user.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// Typed client for the intake API.
pub struct CaseApiClient {
    http: Client,
    base_url: String,
}

impl CaseApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// POST /api/claims
    pub async fn create_claim(&self, claim: &NewClaim) -> Result<Claim, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/claims", self.base_url))
            .json(claim)
            .send()
            .await?;
        read_json(response).await
    }

    /// GET /api/claims/{id}
    pub async fn fetch_claim(&self, id: Uuid) -> Result<Claim, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/claims/{}", self.base_url, id))
            .send()
            .await?;
        read_json(response).await
    }

    /// GET /api/claims?orderNumber=&email=
    pub async fn find_claims(
        &self,
        order_number: &str,
        email: &str,
    ) -> Result<Vec<Claim>, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/claims", self.base_url))
            .query(&[("orderNumber", order_number), ("email", email)])
            .send()
            .await?;
        read_json(response).await
    }

    /// GET /api/cases/{id}
    pub async fn fetch_case(&self, id: Uuid) -> Result<Case, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/cases/{}", self.base_url, id))
            .send()
            .await?;
        read_json(response).await
    }

    /// GET /api/cases?orderNumber=&email=
    pub async fn find_case(&self, order_number: &str, email: &str) -> Result<Case, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/cases", self.base_url))
            .query(&[("orderNumber", order_number), ("email", email)])
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("request failed with status {status}"),
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
