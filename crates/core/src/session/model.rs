//! Session model definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Account role on the platform. Closed set: the backend only ever issues
/// these two, and every protected view is gated on one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Donor,
    Beneficiary,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Donor => "DONOR",
            Self::Beneficiary => "BENEFICIARY",
        }
    }
}

impl FromStr for Role {
    type Err = Error;

    /// Case-normalized: the backend has been observed sending both "DONOR"
    /// and "Donor" across API revisions.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "DONOR" => Ok(Self::Donor),
            "BENEFICIARY" => Ok(Self::Beneficiary),
            _ => Err(Error::Authentication(format!(
                "Unsupported role '{}'",
                value
            ))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated identity held for the lifetime of a client process
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    pub token: String,
}
