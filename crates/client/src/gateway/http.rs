//! HTTP implementation of the backend gateway
//!
//! REST with bearer-token authentication. Status mapping: 401 →
//! authentication, 403 → authorization, 409 → transition conflict, any other
//! non-2xx → server error with the body's `message` when present.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use rehome_core::device::{Device, NewDevice};
use rehome_core::profile::{Beneficiary, BeneficiaryProfileUpdate, Donor, DonorProfileUpdate};
use rehome_core::request::DonationRequest;
use rehome_core::{Error, Result};

use super::wire::{Credentials, LoginReply, Signup};
use super::Gateway;

/// Gateway backed by the platform's REST API
#[derive(Clone)]
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

/// Error body shape the backend uses for non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorReply {
    #[serde(default)]
    message: Option<String>,
}

impl HttpGateway {
    /// Create a gateway for the backend at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| Error::Network(format!("No response from backend: {}", e)))?;
    check_status(response).await
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorReply>().await {
        Ok(reply) => reply.message.unwrap_or_else(|| status.to_string()),
        Err(_) => status.to_string(),
    };

    Err(match status {
        StatusCode::UNAUTHORIZED => Error::Authentication(message),
        StatusCode::FORBIDDEN => Error::Authorization(message),
        StatusCode::CONFLICT => Error::TransitionConflict(message),
        _ => Error::Server {
            status: status.as_u16(),
            message,
        },
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| Error::Network(format!("Failed to parse backend response: {}", e)))
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> Result<LoginReply> {
        debug!(user = %credentials.username, "POST /api/auth/login");
        let response = send(
            self.client
                .post(self.url("/api/auth/login"))
                .json(credentials),
        )
        .await?;
        read_json(response).await
    }

    async fn signup(&self, signup: &Signup) -> Result<()> {
        debug!(user = %signup.username, "POST /api/auth/signup");
        send(self.client.post(self.url("/api/auth/signup")).json(signup)).await?;
        Ok(())
    }

    async fn donor(&self, token: &str, donor_id: i64) -> Result<Donor> {
        let response = send(
            self.client
                .get(self.url(&format!("/api/donors/{}", donor_id)))
                .bearer_auth(token),
        )
        .await?;
        read_json(response).await
    }

    async fn update_donor_profile(
        &self,
        token: &str,
        donor_id: i64,
        update: &DonorProfileUpdate,
    ) -> Result<Donor> {
        let response = send(
            self.client
                .put(self.url(&format!("/api/donors/{}/profile", donor_id)))
                .bearer_auth(token)
                .json(update),
        )
        .await?;
        read_json(response).await
    }

    async fn update_donor_image(
        &self,
        token: &str,
        donor_id: i64,
        profile_image_url: &str,
    ) -> Result<()> {
        send(
            self.client
                .put(self.url(&format!("/api/donors/{}/updateImage", donor_id)))
                .bearer_auth(token)
                .json(&serde_json::json!({ "profileImageUrl": profile_image_url })),
        )
        .await?;
        Ok(())
    }

    async fn beneficiary(&self, token: &str, beneficiary_id: i64) -> Result<Beneficiary> {
        let response = send(
            self.client
                .get(self.url(&format!("/api/beneficiary/{}", beneficiary_id)))
                .bearer_auth(token),
        )
        .await?;
        read_json(response).await
    }

    async fn update_beneficiary_profile(
        &self,
        token: &str,
        beneficiary_id: i64,
        update: &BeneficiaryProfileUpdate,
    ) -> Result<Beneficiary> {
        let response = send(
            self.client
                .put(self.url(&format!("/api/beneficiary/{}/profile", beneficiary_id)))
                .bearer_auth(token)
                .json(update),
        )
        .await?;
        read_json(response).await
    }

    async fn update_beneficiary_image(
        &self,
        token: &str,
        beneficiary_id: i64,
        profile_image_url: &str,
    ) -> Result<()> {
        send(
            self.client
                .put(self.url(&format!("/api/beneficiary/{}/updateImage", beneficiary_id)))
                .bearer_auth(token)
                .json(&serde_json::json!({ "profileImageUrl": profile_image_url })),
        )
        .await?;
        Ok(())
    }

    async fn donate_device(
        &self,
        token: &str,
        donor_id: i64,
        device: &NewDevice,
    ) -> Result<Device> {
        debug!(donor = donor_id, "POST /api/devices/donors/{{donorId}}");
        let response = send(
            self.client
                .post(self.url(&format!("/api/devices/donors/{}", donor_id)))
                .bearer_auth(token)
                .json(device),
        )
        .await?;
        read_json(response).await
    }

    async fn donor_devices(&self, token: &str, donor_id: i64) -> Result<Vec<Device>> {
        let response = send(
            self.client
                .get(self.url(&format!("/api/devices/donors/{}", donor_id)))
                .bearer_auth(token),
        )
        .await?;
        read_json(response).await
    }

    async fn available_devices(&self, token: &str) -> Result<Vec<Device>> {
        let response = send(
            self.client
                .get(self.url("/api/devices/available"))
                .bearer_auth(token),
        )
        .await?;
        read_json(response).await
    }

    async fn accept_device(
        &self,
        token: &str,
        device_id: i64,
        beneficiary_id: i64,
    ) -> Result<Device> {
        debug!(
            device = device_id,
            beneficiary = beneficiary_id,
            "PUT /api/devices/{{deviceId}}/beneficiaries/{{beneficiaryId}}"
        );
        let response = send(
            self.client
                .put(self.url(&format!(
                    "/api/devices/{}/beneficiaries/{}",
                    device_id, beneficiary_id
                )))
                .bearer_auth(token),
        )
        .await?;
        read_json(response).await
    }

    async fn beneficiary_history(&self, token: &str, beneficiary_id: i64) -> Result<Vec<Device>> {
        let response = send(
            self.client
                .get(self.url(&format!("/api/beneficiary/{}/history", beneficiary_id)))
                .bearer_auth(token),
        )
        .await?;
        read_json(response).await
    }

    async fn create_request(
        &self,
        token: &str,
        beneficiary_id: i64,
        description: &str,
    ) -> Result<DonationRequest> {
        let response = send(
            self.client
                .post(self.url(&format!("/api/request/beneficiary/{}", beneficiary_id)))
                .bearer_auth(token)
                .json(&serde_json::json!({ "description": description })),
        )
        .await?;
        read_json(response).await
    }

    async fn beneficiary_requests(
        &self,
        token: &str,
        beneficiary_id: i64,
    ) -> Result<Vec<DonationRequest>> {
        let response = send(
            self.client
                .get(self.url(&format!("/api/request/beneficiary/{}", beneficiary_id)))
                .bearer_auth(token),
        )
        .await?;
        read_json(response).await
    }

    async fn pending_requests(&self, token: &str) -> Result<Vec<DonationRequest>> {
        let response = send(
            self.client
                .get(self.url("/api/request/pending"))
                .bearer_auth(token),
        )
        .await?;
        read_json(response).await
    }

    async fn match_request(
        &self,
        token: &str,
        request_id: i64,
        donor_id: i64,
    ) -> Result<DonationRequest> {
        debug!(
            request = request_id,
            donor = donor_id,
            "POST /api/request/{{requestId}}/donor/{{donorId}}"
        );
        let response = send(
            self.client
                .post(self.url(&format!("/api/request/{}/donor/{}", request_id, donor_id)))
                .bearer_auth(token),
        )
        .await?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let gateway = HttpGateway::new("http://localhost:8080/");
        assert_eq!(
            gateway.url("/api/devices/available"),
            "http://localhost:8080/api/devices/available"
        );
    }
}
