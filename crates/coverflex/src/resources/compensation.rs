//! Compensation balances.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::Result;
use crate::http::COMPENSATION;

use super::ResourceClient;

/// An amount in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    #[serde(default)]
    pub id: Option<String>,
    pub slug: String,
    pub balance: Balance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationBenefit {
    pub slug: String,
    pub balance: Balance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationSummary {
    #[serde(default)]
    pub attributions: Vec<Attribution>,
    #[serde(default)]
    pub benefits: Vec<CompensationBenefit>,
    #[serde(default)]
    pub renewal_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Deserialize)]
struct CompensationEnvelope {
    summary: CompensationSummary,
}

impl ResourceClient {
    /// Fetch the employee's compensation summary.
    #[instrument(skip(self))]
    pub async fn compensation(&self) -> Result<CompensationSummary> {
        info!("Fetching employee compensation");
        let envelope: CompensationEnvelope = self.fetch(COMPENSATION).await?;
        Ok(envelope.summary)
    }
}
