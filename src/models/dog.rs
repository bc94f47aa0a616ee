use serde::{Deserialize, Serialize};

use crate::models::owner::{OwnerFields, OwnerIdentity};
use crate::utils::errors::ApiError;

const MISSING_FIELDS: &str =
    "Campos obrigatórios: dono(nome_completo, bloco, apartamento) e cachorro(nome_cachorro, raca, idade)";

/// Age as it may arrive on the wire: a JSON integer or a numeric string.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum AgeField {
    Number(i64),
    Text(String),
}

impl AgeField {
    /// Parses and validates the age: integer, non-negative.
    pub fn validate(&self) -> Result<i64, ApiError> {
        let age = match self {
            AgeField::Number(value) => *value,
            AgeField::Text(value) => value
                .trim()
                .parse::<i64>()
                .map_err(|_| ApiError::BadRequest("idade deve ser um número inteiro".to_string()))?,
        };
        if age < 0 {
            return Err(ApiError::BadRequest("idade deve ser >= 0".to_string()));
        }
        Ok(age)
    }
}

/// Registration payload. Owner data may come nested under `dono` or
/// flattened alongside the dog fields.
#[derive(Deserialize, Debug)]
pub struct DogReceive {
    #[serde(rename = "nome_cachorro")]
    pub name: Option<String>,
    #[serde(rename = "raca")]
    pub breed: Option<String>,
    #[serde(rename = "idade")]
    pub age: Option<AgeField>,
    #[serde(rename = "dono")]
    pub owner: Option<OwnerFields>,
    #[serde(flatten)]
    pub owner_flat: OwnerFields,
}

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct NewDog {
    pub name: String,
    pub breed: String,
    pub age: i64,
    pub owner: OwnerIdentity,
}

impl DogReceive {
    pub fn validate(self) -> Result<NewDog, ApiError> {
        let name = required_trimmed(self.name);
        let breed = required_trimmed(self.breed);
        let owner = OwnerFields::merge(self.owner, self.owner_flat);

        let (name, breed) = match (name, breed) {
            (Some(name), Some(breed)) => (name, breed),
            _ => return Err(ApiError::BadRequest(MISSING_FIELDS.to_string())),
        };
        let owner = match owner.into_identity() {
            Ok(Some(identity)) => identity,
            _ => return Err(ApiError::BadRequest(MISSING_FIELDS.to_string())),
        };
        let age = self
            .age
            .ok_or_else(|| ApiError::BadRequest(MISSING_FIELDS.to_string()))?
            .validate()?;

        Ok(NewDog {
            name,
            breed,
            age,
            owner,
        })
    }
}

/// Partial update payload for `PUT /cachorros/{id}`.
#[derive(Deserialize, Debug)]
pub struct DogUpdate {
    #[serde(rename = "nome_cachorro")]
    pub name: Option<String>,
    #[serde(rename = "raca")]
    pub breed: Option<String>,
    #[serde(rename = "idade")]
    pub age: Option<AgeField>,
    #[serde(rename = "dono")]
    pub owner: Option<OwnerFields>,
    #[serde(flatten)]
    pub owner_flat: OwnerFields,
}

/// Validated update input. `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct DogChanges {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i64>,
    pub owner: Option<OwnerIdentity>,
}

impl DogUpdate {
    pub fn validate(self) -> Result<DogChanges, ApiError> {
        let name = match self.name {
            Some(value) => Some(required_trimmed(Some(value)).ok_or_else(|| {
                ApiError::BadRequest("nome_cachorro não pode ser vazio".to_string())
            })?),
            None => None,
        };
        let breed = match self.breed {
            Some(value) => Some(required_trimmed(Some(value)).ok_or_else(|| {
                ApiError::BadRequest("raca não pode ser vazia".to_string())
            })?),
            None => None,
        };
        let age = match self.age {
            Some(field) => Some(field.validate()?),
            None => None,
        };
        let owner = OwnerFields::merge(self.owner, self.owner_flat).into_identity()?;

        Ok(DogChanges {
            name,
            breed,
            age,
            owner,
        })
    }
}

fn required_trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// A dog joined with its owner, as returned by every dog endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DogRecord {
    pub id: i64,
    #[serde(rename = "nome_cachorro")]
    pub name: String,
    #[serde(rename = "raca")]
    pub breed: String,
    #[serde(rename = "idade")]
    pub age: i64,
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    #[serde(rename = "bloco")]
    pub block: String,
    #[serde(rename = "apartamento")]
    pub apartment: String,
    #[serde(rename = "foto_url")]
    pub photo_url: Option<String>,
}
