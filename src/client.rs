//! Submission client: creates the profile and requests the itinerary.
//!
//! The two backend calls always run in order: itinerary generation needs
//! the user id returned by profile creation.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::SubmissionError;
use crate::itinerary::{ItineraryResult, Scalar};
use crate::wizard::model::Profile;

pub const CREATE_PROFILE_PATH: &str = "/api/user/create";
pub const GENERATE_ITINERARY_PATH: &str = "/api/itinerary/generate";

/// Backend the wizard submits to.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Store the profile and return the backend's user id.
    async fn create_profile(&self, profile: &Profile) -> Result<String, SubmissionError>;

    /// Generate the itinerary for a previously created profile.
    async fn generate_itinerary(&self, user_id: &str) -> Result<ItineraryResult, SubmissionError>;
}

/// Outcome of a full submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Success(ItineraryResult),
    Failure(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Run both calls. The itinerary call is never issued when profile
/// creation fails.
pub async fn submit(client: &dyn SubmissionClient, profile: &Profile) -> SubmissionOutcome {
    let user_id = match client.create_profile(profile).await {
        Ok(id) => id,
        Err(e) => {
            warn!(error = %e, "Profile creation failed");
            return SubmissionOutcome::Failure(e.to_string());
        }
    };
    info!(user_id = %user_id, destination = %profile.destination, "Profile created");

    match client.generate_itinerary(&user_id).await {
        Ok(result) => {
            info!(user_id = %user_id, hotels = result.hotels.len(), "Itinerary generated");
            SubmissionOutcome::Success(result)
        }
        Err(e) => {
            warn!(user_id = %user_id, error = %e, "Itinerary generation failed");
            SubmissionOutcome::Failure(e.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateProfileResponse {
    #[serde(default)]
    user_id: Option<Scalar>,
}

/// `SubmissionClient` speaking JSON over HTTP.
pub struct HttpSubmissionClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSubmissionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, SubmissionError> {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| SubmissionError::Request {
                endpoint: path.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SubmissionError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn create_profile(&self, profile: &Profile) -> Result<String, SubmissionError> {
        let resp = self.post_json(CREATE_PROFILE_PATH, profile).await?;
        let body: CreateProfileResponse =
            resp.json().await.map_err(|e| SubmissionError::Decode {
                endpoint: CREATE_PROFILE_PATH.to_string(),
                reason: e.to_string(),
            })?;
        match body.user_id {
            Some(Scalar::Text(id)) if !id.is_empty() => Ok(id),
            Some(Scalar::Number(n)) => Ok(Scalar::Number(n).to_string()),
            _ => Err(SubmissionError::MissingUserId),
        }
    }

    async fn generate_itinerary(&self, user_id: &str) -> Result<ItineraryResult, SubmissionError> {
        let body = serde_json::json!({ "user_id": user_id });
        let resp = self.post_json(GENERATE_ITINERARY_PATH, &body).await?;
        resp.json().await.map_err(|e| SubmissionError::Decode {
            endpoint: GENERATE_ITINERARY_PATH.to_string(),
            reason: e.to_string(),
        })
    }
}
