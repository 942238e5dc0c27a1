//! Device model definitions

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::Result;

/// Availability status of a donated device.
///
/// `Pending` is a legacy alias some flows use for a device that has a request
/// against it; it is still pre-acceptance and acceptable exactly like
/// `Available`. `Accepted` is terminal: no transition returns a device to the
/// available pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    Available,
    Pending,
    Accepted,
}

impl Default for DeviceStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl DeviceStatus {
    /// Whether a device in this status can still be accepted
    pub fn is_acceptable(self) -> bool {
        matches!(self, Self::Available | Self::Pending)
    }
}

/// Kind of device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceType {
    Laptop,
    Tablet,
    Smartphone,
    Desktop,
}

/// Physical condition reported by the donor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceCondition {
    New,
    Good,
    Fair,
    #[serde(rename = "Needs Repair")]
    NeedsRepair,
}

/// A donated device, owned by exactly one donor for its lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub condition: DeviceCondition,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub donation_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: DeviceStatus,
    pub owner_donor_id: i64,
    #[serde(default)]
    pub accepted_by_beneficiary_id: Option<i64>,
    #[serde(default)]
    pub accepted_date: Option<DateTime<Utc>>,
}

impl Device {
    /// Check that the acceptance transition is legal from the current status.
    ///
    /// Acceptance is not idempotent: an already-accepted device is rejected so
    /// the received-donations counter can never be incremented twice.
    pub fn ensure_acceptable(&self) -> Result<()> {
        if self.status.is_acceptable() {
            Ok(())
        } else {
            Err(Error::TransitionConflict(format!(
                "Device {} is already accepted",
                self.id
            )))
        }
    }
}

/// Payload for donating a new device. Id, status and owner are assigned by
/// the backend at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub condition: DeviceCondition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub donation_date: NaiveDate,
}

impl NewDevice {
    /// Create a donation payload dated today
    pub fn new(
        name: impl Into<String>,
        device_type: DeviceType,
        condition: DeviceCondition,
    ) -> Self {
        Self {
            name: name.into(),
            device_type,
            condition,
            description: None,
            image_url: None,
            donation_date: Utc::now().date_naive(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the image URL (already uploaded to the asset host)
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Set the donation date
    pub fn with_donation_date(mut self, donation_date: NaiveDate) -> Self {
        self.donation_date = donation_date;
        self
    }
}
