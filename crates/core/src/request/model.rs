//! Donation request model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::Result;

/// Status of a donation request. Forward-only: `Pending` → `Accepted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Accepted,
}

impl Default for RequestStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// A beneficiary-initiated need record, resolved by a donor match.
///
/// Deliberately uncoupled from the device lifecycle: a request is not needed
/// to obtain a device, and a device can be accepted without one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    pub id: i64,
    pub beneficiary_id: i64,
    pub description: String,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub matched_device_id: Option<i64>,
    #[serde(default)]
    pub matched_donor_id: Option<i64>,
    #[serde(default)]
    pub matched_date: Option<DateTime<Utc>>,
}

impl DonationRequest {
    /// Check that the match transition is legal from the current status.
    /// Matching is terminal; there is no reversal.
    pub fn ensure_matchable(&self) -> Result<()> {
        match self.status {
            RequestStatus::Pending => Ok(()),
            RequestStatus::Accepted => Err(Error::TransitionConflict(format!(
                "Request {} is already accepted",
                self.id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(status: RequestStatus) -> DonationRequest {
        DonationRequest {
            id: 9,
            beneficiary_id: 7,
            description: "Need a laptop for school".to_string(),
            status,
            created_at: None,
            matched_device_id: None,
            matched_donor_id: None,
            matched_date: None,
        }
    }

    #[test]
    fn test_pending_is_matchable() {
        assert!(request(RequestStatus::Pending).ensure_matchable().is_ok());
    }

    #[test]
    fn test_accepted_is_terminal() {
        let err = request(RequestStatus::Accepted).ensure_matchable().unwrap_err();
        assert!(matches!(err, Error::TransitionConflict(_)));
    }

    #[test]
    fn test_request_deserializes_without_match_fields() {
        let request: DonationRequest = serde_json::from_str(
            r#"{"id":9,"beneficiaryId":7,"description":"Need a laptop"}"#,
        )
        .unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
        assert!(request.matched_donor_id.is_none());
    }
}
