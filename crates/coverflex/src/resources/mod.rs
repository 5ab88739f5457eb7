//! Employee resources.
//!
//! Every fetch is a one-line projection: build the endpoint URL, hand it to
//! the [`AuthenticatedRequester`], and unwrap the envelope of the decoded
//! document. Token handling lives entirely in the requester.

mod benefits;
mod cards;
mod company;
mod compensation;
mod family;
mod operations;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::Result;
use crate::requester::AuthenticatedRequester;
use crate::types::ApiUrl;

pub use benefits::{Benefit, BenefitLimit, BenefitLimits, Product};
pub use cards::Card;
pub use company::{
    Address, Company, CompanyResponse, CompanySettings, CompensationConfig, Market, TaxId,
};
pub use compensation::{Attribution, Balance, CompensationBenefit, CompensationSummary};
pub use family::FamilyMember;
pub use operations::{Amount, Operation, OperationsPage, OperationsQuery};

/// Typed reads of the employee resources.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    base_url: ApiUrl,
    requester: Arc<AuthenticatedRequester>,
}

impl ResourceClient {
    pub(crate) fn new(base_url: ApiUrl, requester: Arc<AuthenticatedRequester>) -> Self {
        Self {
            base_url,
            requester,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.requester.get(&self.base_url.endpoint(path)).await
    }
}
