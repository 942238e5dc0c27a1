//! Donor and beneficiary profile records

mod model;

pub use model::{
    AccountSummary, Beneficiary, BeneficiaryProfileUpdate, BeneficiaryStatus, Donor,
    DonorProfileUpdate, PartyType,
};
