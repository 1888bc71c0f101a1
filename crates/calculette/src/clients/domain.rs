use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::margin::{ClientCommercialConfig, CommercialField};

/// Identifier wrapper for clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub String);

/// Stored client with its commercial policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: ClientId,
    pub name: String,
    pub commercial: ClientCommercialConfig,
    pub updated_at: DateTime<Utc>,
}

impl ClientRecord {
    pub fn lookup(&self) -> CommercialConfigLookup {
        let missing = self.commercial.missing_fields();
        if missing.is_empty() {
            CommercialConfigLookup::Complete(self.commercial.clone())
        } else {
            CommercialConfigLookup::Incomplete {
                missing_fields: missing,
            }
        }
    }
}

/// Outcome of fetching a client's configuration for simulation. An incomplete
/// configuration is a distinct answer, never a defaulted one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommercialConfigLookup {
    Complete(ClientCommercialConfig),
    Incomplete {
        #[serde(rename = "missingFields")]
        missing_fields: Vec<CommercialField>,
    },
}

/// Payload replacing a client's commercial configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCommercialUpdate {
    #[serde(default)]
    pub name: Option<String>,
    pub commercial: ClientCommercialConfig,
}
