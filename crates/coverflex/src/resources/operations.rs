//! Account operations (card payments, top-ups, transfers).

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use url::Url;

use crate::Result;
use crate::error::InvalidInputError;
use crate::http::OPERATIONS;

use super::ResourceClient;

/// Pagination and filtering for [`ResourceClient::operations`].
///
/// Unset fields are left out of the query string, letting the server apply
/// its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Operation type, sent as `filters[type]`.
    pub filter_type: Option<String>,
}

impl OperationsQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn filter_type(mut self, kind: impl Into<String>) -> Self {
        self.filter_type = Some(kind.into());
        self
    }

    fn apply(&self, url: &mut Url) {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        if let Some(kind) = self.filter_type.as_deref().filter(|k| !k.is_empty()) {
            pairs.push(("filters[type]", kind.to_string()));
        }

        // query_pairs_mut() would leave a bare '?' behind on an empty query.
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
    }
}

/// An amount in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub category_slug: Option<String>,
    #[serde(default)]
    pub executed_at: Option<String>,
}

/// One page of operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationsPage {
    #[serde(default)]
    pub list: Vec<Operation>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_items: Option<u64>,
}

#[derive(Deserialize)]
struct OperationsEnvelope {
    operations: OperationsPage,
}

impl ResourceClient {
    /// Fetch one page of the employee's operations.
    #[instrument(skip(self))]
    pub async fn operations(&self, query: &OperationsQuery) -> Result<OperationsPage> {
        info!("Fetching employee operations");

        let endpoint = self.base_url.endpoint(OPERATIONS);
        let mut url = Url::parse(&endpoint).map_err(|e| InvalidInputError::ApiUrl {
            value: endpoint.clone(),
            reason: e.to_string(),
        })?;
        query.apply(&mut url);

        let envelope: OperationsEnvelope = self.requester.get(url.as_str()).await?;
        Ok(envelope.operations)
    }
}
