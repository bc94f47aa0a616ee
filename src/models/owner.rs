use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::errors::ApiError;

/// Identity key of an owner: exact match on all three fields.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct OwnerIdentity {
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    #[serde(rename = "bloco")]
    pub block: String,
    #[serde(rename = "apartamento")]
    pub apartment: String,
}

/// Owner fields as they may arrive in a request body, nested under
/// `dono` or flattened alongside the dog fields. All optional; validation
/// decides what is required.
#[derive(Deserialize, Default, Debug, Clone)]
pub struct OwnerFields {
    #[serde(rename = "nome_completo")]
    pub full_name: Option<String>,
    #[serde(rename = "bloco")]
    pub block: Option<String>,
    #[serde(rename = "apartamento")]
    pub apartment: Option<String>,
}

impl OwnerFields {
    /// Merges nested owner fields with flattened ones, nested taking
    /// precedence, trimming every value. Empty strings count as absent.
    pub fn merge(nested: Option<OwnerFields>, flat: OwnerFields) -> OwnerFields {
        let nested = nested.unwrap_or_default();
        OwnerFields {
            full_name: pick(nested.full_name, flat.full_name),
            block: pick(nested.block, flat.block),
            apartment: pick(nested.apartment, flat.apartment),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.block.is_none() && self.apartment.is_none()
    }

    /// Some(identity) when all three fields are present, None when none
    /// are. Supplying only part of the identity is a validation error.
    pub fn into_identity(self) -> Result<Option<OwnerIdentity>, ApiError> {
        match (self.full_name, self.block, self.apartment) {
            (Some(full_name), Some(block), Some(apartment)) => Ok(Some(OwnerIdentity {
                full_name,
                block,
                apartment,
            })),
            (None, None, None) => Ok(None),
            _ => Err(ApiError::BadRequest(
                "dono requer nome_completo, bloco e apartamento juntos".to_string(),
            )),
        }
    }
}

fn pick(nested: Option<String>, flat: Option<String>) -> Option<String> {
    nested
        .or(flat)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Row of `GET /donos`: an owner with the number of dogs registered.
#[derive(Serialize, Debug, Clone)]
pub struct OwnerWithCount {
    pub id: i64,
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    #[serde(rename = "bloco")]
    pub block: String,
    #[serde(rename = "apartamento")]
    pub apartment: String,
    #[serde(rename = "quantidade_cachorros")]
    pub dog_count: i64,
}

/// Owner as read from the store, with creation timestamp.
#[derive(Debug, Clone)]
pub struct OwnerRecord {
    pub id: i64,
    pub full_name: String,
    pub block: String,
    pub apartment: String,
    pub created_at: DateTime<Utc>,
    pub dog_count: i64,
}

/// Body of `GET /donos/{id}`.
#[derive(Serialize, Debug, Clone)]
pub struct OwnerDetail {
    pub id: i64,
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    #[serde(rename = "bloco")]
    pub block: String,
    #[serde(rename = "apartamento")]
    pub apartment: String,
    #[serde(rename = "quantidade_cachorros")]
    pub dog_count: i64,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "cadastrado_ha")]
    pub registered_ago: String,
}
