//! Profile model definitions
//!
//! The donation counters (`donation_count`, `donations_received`) are
//! server-derived and read-only here: the update payload types simply do not
//! carry them, so no client path can write one.

use serde::{Deserialize, Serialize};

/// Whether an account represents a person or an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyType {
    Individual,
    Organization,
}

/// Platform standing of a beneficiary account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeneficiaryStatus {
    Active,
    Inactive,
    Suspended,
}

impl Default for BeneficiaryStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Account fields the backend nests inside profile responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Donor profile, owned 1:1 by a DONOR account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub id: i64,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// Server-derived, monotonically non-decreasing
    #[serde(default)]
    pub donation_count: u32,
    #[serde(default)]
    pub donor_type: Option<PartyType>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub user: Option<AccountSummary>,
}

/// Beneficiary profile, owned 1:1 by a BENEFICIARY account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    pub id: i64,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// Server-derived, incremented only by the acceptance transition
    #[serde(default)]
    pub donations_received: u32,
    #[serde(default)]
    pub beneficiary_type: Option<PartyType>,
    #[serde(default)]
    pub status: BeneficiaryStatus,
    #[serde(default)]
    pub need_description: Option<String>,
    #[serde(default)]
    pub user: Option<AccountSummary>,
}

/// Mutable donor profile fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor_type: Option<PartyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Mutable beneficiary profile fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiary_type: Option<PartyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub need_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_payload_cannot_carry_counters() {
        let update = DonorProfileUpdate {
            city: Some("Pune".to_string()),
            donor_type: Some(PartyType::Individual),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["city"], "Pune");
        assert_eq!(json["donorType"], "INDIVIDUAL");
        assert!(json.get("donationCount").is_none());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_donor_deserializes_with_nested_account() {
        let donor: Donor = serde_json::from_str(
            r#"{"id":1,"donationCount":4,"user":{"username":"alice","email":"a@example.com"}}"#,
        )
        .unwrap();
        assert_eq!(donor.donation_count, 4);
        let user = donor.user.unwrap();
        assert_eq!(user.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_beneficiary_defaults_to_active() {
        let beneficiary: Beneficiary = serde_json::from_str(r#"{"id":7}"#).unwrap();
        assert_eq!(beneficiary.status, BeneficiaryStatus::Active);
        assert_eq!(beneficiary.donations_received, 0);
    }
}
