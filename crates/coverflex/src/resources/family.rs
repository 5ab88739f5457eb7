//! Family members registered by the employee.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::Result;
use crate::http::FAMILY;

use super::ResourceClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub relation_type: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

#[derive(Deserialize)]
struct FamilyEnvelope {
    members: Vec<FamilyMember>,
}

impl ResourceClient {
    /// Fetch the employee's family members.
    #[instrument(skip(self))]
    pub async fn family(&self) -> Result<Vec<FamilyMember>> {
        info!("Fetching employee family information");
        let envelope: FamilyEnvelope = self.fetch(FAMILY).await?;
        Ok(envelope.members)
    }
}
