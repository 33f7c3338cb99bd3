// Wire types for the shelter API.
//
// Field names follow the server's JSON exactly (camelCase, `photoURL`).
// Unknown `shelterType` values are rejected here, at deserialization,
// so nothing downstream ever sees an unrecognized category.

use serde::{Deserialize, Serialize};

/// Shelter category as encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShelterTypeDto {
    Particular,
    LocalGovernment,
    Veterinary,
    ShelterPoint,
    KiwokoStore,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AddressDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// A shelter record as returned by `GET shelters` / `GET shelters/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelterDto {
    pub id: String,
    pub name: String,
    pub password: String,
    pub phone_number: String,
    pub address: AddressDto,
    pub shelter_type: ShelterTypeDto,
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
}

/// Sign-up payload: a shelter record without a server-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShelterDto {
    pub name: String,
    pub password: String,
    pub phone_number: String,
    pub address: AddressDto,
    pub shelter_type: ShelterTypeDto,
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
}

/// Sign-in request body.
#[derive(Debug, Serialize)]
pub(crate) struct SignInRequest<'a> {
    pub user: &'a str,
    pub password: &'a str,
}

/// Sign-in response: the server answers with a bare `[token, shelterId]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInResponse(pub String, pub String);

impl SignInResponse {
    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn shelter_id(&self) -> &str {
        &self.1
    }
}
