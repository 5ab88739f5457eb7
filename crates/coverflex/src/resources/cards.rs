//! Payment cards issued to the employee.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::Result;
use crate::http::CARDS;

use super::ResourceClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub activated_at: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub holder_company_name: Option<String>,
    #[serde(default)]
    pub holder_name: Option<String>,
    #[serde(default)]
    pub is_expiring: bool,
    #[serde(default)]
    pub is_plastic_requested: bool,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub pan_last_digits: Option<String>,
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Deserialize)]
struct CardsEnvelope {
    cards: Vec<Card>,
}

impl ResourceClient {
    /// Fetch the employee's cards.
    #[instrument(skip(self))]
    pub async fn cards(&self) -> Result<Vec<Card>> {
        info!("Fetching employee cards");
        let envelope: CardsEnvelope = self.fetch(CARDS).await?;
        Ok(envelope.cards)
    }
}
