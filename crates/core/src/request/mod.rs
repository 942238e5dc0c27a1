//! Beneficiary donation requests and their matching lifecycle

mod model;

pub use model::{DonationRequest, RequestStatus};
