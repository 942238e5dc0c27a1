//! Workflow engine
//!
//! Gates every operation on the current session, validates local
//! preconditions before any network call, then issues a single atomic round
//! trip and returns the backend's echo. Transition results are never
//! computed client-side.

use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use rehome_core::access;
use rehome_core::device::{Device, NewDevice};
use rehome_core::profile::{Beneficiary, BeneficiaryProfileUpdate, Donor, DonorProfileUpdate};
use rehome_core::request::DonationRequest;
use rehome_core::session::{Role, Session, SessionStore};
use rehome_core::{Error, Result};

use crate::gateway::wire::{Credentials, Signup};
use crate::gateway::Gateway;

/// Drives the device/request lifecycle against the backend gateway.
///
/// Both collaborators are injected explicitly; there is no ambient session
/// state anywhere in the crate.
#[derive(Clone)]
pub struct WorkflowEngine {
    gateway: Arc<dyn Gateway>,
    sessions: SessionStore,
}

impl WorkflowEngine {
    pub fn new(gateway: Arc<dyn Gateway>, sessions: SessionStore) -> Self {
        Self { gateway, sessions }
    }

    /// The session store backing this engine
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    // Authentication

    /// Authenticate and establish the session
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let username = required(username, "username")?;
        let password = required(password, "password")?;

        let reply = self
            .gateway
            .login(&Credentials {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await?;

        if reply.token.trim().is_empty() {
            return Err(Error::Authentication(
                "Login reply carried no token".to_string(),
            ));
        }

        let session = Session {
            id: reply.id,
            username: reply.username,
            name: reply.name,
            email: reply.email,
            role: Role::from_str(&reply.role)?,
            token: reply.token,
        };
        self.sessions.login(session.clone()).await?;
        Ok(session)
    }

    /// Register a new account; the caller logs in afterwards
    pub async fn signup(&self, signup: Signup) -> Result<()> {
        required(&signup.name, "name")?;
        required(&signup.email, "email")?;
        required(&signup.username, "username")?;
        required(&signup.password, "password")?;
        self.gateway.signup(&signup).await
    }

    /// Clear the session in memory and on disk
    pub async fn logout(&self) -> Result<()> {
        self.sessions.logout().await
    }

    // Donor operations

    pub async fn donor_profile(&self) -> Result<Donor> {
        let session = self.require_role(&[Role::Donor]).await?;
        self.gateway.donor(&session.token, session.id).await
    }

    pub async fn update_donor_profile(&self, update: &DonorProfileUpdate) -> Result<Donor> {
        let session = self.require_role(&[Role::Donor]).await?;
        self.gateway
            .update_donor_profile(&session.token, session.id, update)
            .await
    }

    /// Record a new profile image URL, already uploaded to the asset host
    pub async fn update_donor_image(&self, profile_image_url: &str) -> Result<()> {
        let session = self.require_role(&[Role::Donor]).await?;
        let url = required(profile_image_url, "profileImageUrl")?;
        self.gateway
            .update_donor_image(&session.token, session.id, url)
            .await
    }

    /// Donate a device. The backend creates it `Available` with the session
    /// donor bound as immutable owner.
    pub async fn donate_device(&self, device: &NewDevice) -> Result<Device> {
        let session = self.require_role(&[Role::Donor]).await?;
        required(&device.name, "name")?;
        let created = self
            .gateway
            .donate_device(&session.token, session.id, device)
            .await?;
        info!(device = created.id, donor = session.id, "Device donated");
        Ok(created)
    }

    pub async fn donor_devices(&self) -> Result<Vec<Device>> {
        let session = self.require_role(&[Role::Donor]).await?;
        self.gateway.donor_devices(&session.token, session.id).await
    }

    /// All pending requests platform-wide; any donor may match any of them
    pub async fn pending_requests(&self) -> Result<Vec<DonationRequest>> {
        let session = self.require_role(&[Role::Donor]).await?;
        self.gateway.pending_requests(&session.token).await
    }

    /// Match a pending request to the session donor. Terminal: a request
    /// that is already accepted is rejected with a conflict, locally when
    /// the cached copy shows it and by the backend when the cache is stale.
    pub async fn match_request(&self, request: &DonationRequest) -> Result<DonationRequest> {
        let session = self.require_role(&[Role::Donor]).await?;
        request.ensure_matchable()?;
        let matched = self
            .gateway
            .match_request(&session.token, request.id, session.id)
            .await?;
        info!(request = matched.id, donor = session.id, "Request matched");
        Ok(matched)
    }

    // Beneficiary operations

    pub async fn beneficiary_profile(&self) -> Result<Beneficiary> {
        let session = self.require_role(&[Role::Beneficiary]).await?;
        self.gateway.beneficiary(&session.token, session.id).await
    }

    pub async fn update_beneficiary_profile(
        &self,
        update: &BeneficiaryProfileUpdate,
    ) -> Result<Beneficiary> {
        let session = self.require_role(&[Role::Beneficiary]).await?;
        self.gateway
            .update_beneficiary_profile(&session.token, session.id, update)
            .await
    }

    pub async fn update_beneficiary_image(&self, profile_image_url: &str) -> Result<()> {
        let session = self.require_role(&[Role::Beneficiary]).await?;
        let url = required(profile_image_url, "profileImageUrl")?;
        self.gateway
            .update_beneficiary_image(&session.token, session.id, url)
            .await
    }

    /// Devices currently in the available pool
    pub async fn available_devices(&self) -> Result<Vec<Device>> {
        let session = self
            .require_role(&[Role::Donor, Role::Beneficiary])
            .await?;
        self.gateway.available_devices(&session.token).await
    }

    /// Accept a device for the session beneficiary.
    ///
    /// The cached copy is pre-checked so an already-accepted device fails
    /// fast; the backend stays authoritative for the stale-cache case. The
    /// beneficiary id always comes from the session, so accepting on behalf
    /// of another account is unrepresentable. This call is the single point
    /// where the received-donations counter moves, and it is not idempotent.
    pub async fn accept_device(&self, device: &Device) -> Result<Device> {
        let session = self.require_role(&[Role::Beneficiary]).await?;
        device.ensure_acceptable()?;
        let accepted = self
            .gateway
            .accept_device(&session.token, device.id, session.id)
            .await?;
        info!(
            device = accepted.id,
            beneficiary = session.id,
            "Device accepted"
        );
        Ok(accepted)
    }

    /// Accepted devices for the session beneficiary.
    ///
    /// Callers that depend on a just-issued mutation must await it before
    /// calling this; there is no ordering guarantee between independent
    /// in-flight calls.
    pub async fn beneficiary_history(&self) -> Result<Vec<Device>> {
        let session = self.require_role(&[Role::Beneficiary]).await?;
        self.gateway
            .beneficiary_history(&session.token, session.id)
            .await
    }

    /// File a new donation request; created `Pending`, no device bound yet
    pub async fn create_request(&self, description: &str) -> Result<DonationRequest> {
        let session = self.require_role(&[Role::Beneficiary]).await?;
        let description = required(description, "description")?;
        let created = self
            .gateway
            .create_request(&session.token, session.id, description)
            .await?;
        info!(
            request = created.id,
            beneficiary = session.id,
            "Request created"
        );
        Ok(created)
    }

    pub async fn beneficiary_requests(&self) -> Result<Vec<DonationRequest>> {
        let session = self.require_role(&[Role::Beneficiary]).await?;
        self.gateway
            .beneficiary_requests(&session.token, session.id)
            .await
    }

    /// Re-evaluated before every protected operation; never cached
    async fn require_role(&self, required_roles: &[Role]) -> Result<Session> {
        let session = self.sessions.current().await;
        access::authorize(required_roles, session.as_ref()).require()?;
        let session = session
            .ok_or_else(|| Error::Authentication("No active session".to_string()))?;
        if session.token.trim().is_empty() {
            return Err(Error::Validation(
                "Session is missing its bearer token".to_string(),
            ));
        }
        Ok(session)
    }
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(format!(
            "Missing required field '{}'",
            field
        )));
    }
    Ok(trimmed)
}
