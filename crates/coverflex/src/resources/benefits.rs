//! Benefits the employee is enrolled in.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::Result;
use crate::http::BENEFITS;

use super::ResourceClient;

/// A monetary cap in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitLimit {
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitLimits {
    #[serde(default)]
    pub monthly: Option<BenefitLimit>,
    #[serde(default)]
    pub yearly: Option<BenefitLimit>,
}

/// A product offered within a benefit category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub limits: BenefitLimits,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Deserialize)]
struct BenefitsEnvelope {
    benefits: Vec<Benefit>,
}

impl ResourceClient {
    /// Fetch the employee's benefits.
    #[instrument(skip(self))]
    pub async fn benefits(&self) -> Result<Vec<Benefit>> {
        info!("Fetching employee benefits");
        let envelope: BenefitsEnvelope = self.fetch(BENEFITS).await?;
        Ok(envelope.benefits)
    }
}
