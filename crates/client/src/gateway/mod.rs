//! Backend gateway contract
//!
//! The backend is an external REST collaborator; this trait is the complete
//! set of remote operations the workflow engine may invoke. Mutating
//! transitions return the server's authoritative echo of the entity.

mod http;
pub mod wire;

pub use http::HttpGateway;

use async_trait::async_trait;

use rehome_core::device::{Device, NewDevice};
use rehome_core::profile::{Beneficiary, BeneficiaryProfileUpdate, Donor, DonorProfileUpdate};
use rehome_core::request::DonationRequest;
use rehome_core::Result;

use wire::{Credentials, LoginReply, Signup};

/// Remote operations exposed by the backend of record
#[async_trait]
pub trait Gateway: Send + Sync {
    // Authentication (no bearer token)

    async fn login(&self, credentials: &Credentials) -> Result<LoginReply>;

    async fn signup(&self, signup: &Signup) -> Result<()>;

    // Profiles

    async fn donor(&self, token: &str, donor_id: i64) -> Result<Donor>;

    async fn update_donor_profile(
        &self,
        token: &str,
        donor_id: i64,
        update: &DonorProfileUpdate,
    ) -> Result<Donor>;

    /// Record a new profile image URL; the binary went to the asset host
    async fn update_donor_image(
        &self,
        token: &str,
        donor_id: i64,
        profile_image_url: &str,
    ) -> Result<()>;

    async fn beneficiary(&self, token: &str, beneficiary_id: i64) -> Result<Beneficiary>;

    async fn update_beneficiary_profile(
        &self,
        token: &str,
        beneficiary_id: i64,
        update: &BeneficiaryProfileUpdate,
    ) -> Result<Beneficiary>;

    async fn update_beneficiary_image(
        &self,
        token: &str,
        beneficiary_id: i64,
        profile_image_url: &str,
    ) -> Result<()>;

    // Devices

    async fn donate_device(&self, token: &str, donor_id: i64, device: &NewDevice)
        -> Result<Device>;

    async fn donor_devices(&self, token: &str, donor_id: i64) -> Result<Vec<Device>>;

    async fn available_devices(&self, token: &str) -> Result<Vec<Device>>;

    /// The acceptance transition; the backend increments the received
    /// counter as its side effect, never the client
    async fn accept_device(&self, token: &str, device_id: i64, beneficiary_id: i64)
        -> Result<Device>;

    async fn beneficiary_history(&self, token: &str, beneficiary_id: i64) -> Result<Vec<Device>>;

    // Donation requests

    async fn create_request(
        &self,
        token: &str,
        beneficiary_id: i64,
        description: &str,
    ) -> Result<DonationRequest>;

    async fn beneficiary_requests(
        &self,
        token: &str,
        beneficiary_id: i64,
    ) -> Result<Vec<DonationRequest>>;

    async fn pending_requests(&self, token: &str) -> Result<Vec<DonationRequest>>;

    /// The match transition; terminal on success
    async fn match_request(
        &self,
        token: &str,
        request_id: i64,
        donor_id: i64,
    ) -> Result<DonationRequest>;
}
