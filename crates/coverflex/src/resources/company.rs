//! The employer's company profile.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::Result;
use crate::http::COMPANY;

use super::ResourceClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub address_line_1: Option<String>,
    #[serde(default)]
    pub address_line_2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySettings {
    #[serde(default)]
    pub card_request_employee_permission: Option<String>,
    #[serde(default)]
    pub card_request_format: Option<String>,
    #[serde(default)]
    pub card_request_strategy: Option<String>,
    #[serde(default)]
    pub card_shipping_strategy: Option<String>,
    #[serde(default)]
    pub include_employee_number_in_reports: bool,
    #[serde(default)]
    pub kinship_degree_proof_required: bool,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub savings_employee_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxId {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub card_display_name: Option<String>,
    #[serde(default)]
    pub legal_name: Option<String>,
    #[serde(default)]
    pub logo_uri: Option<String>,
    #[serde(default)]
    pub market: Market,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub settings: CompanySettings,
    #[serde(default)]
    pub tax_id: TaxId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationConfig {
    #[serde(default)]
    pub has_social_benefits: bool,
}

/// The company document together with its compensation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub company: Company,
    #[serde(default)]
    pub compensation_config: CompensationConfig,
}

impl ResourceClient {
    /// Fetch the employer's company profile.
    #[instrument(skip(self))]
    pub async fn company(&self) -> Result<CompanyResponse> {
        info!("Fetching employee company information");
        self.fetch(COMPANY).await
    }
}
