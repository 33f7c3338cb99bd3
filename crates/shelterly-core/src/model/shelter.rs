// ── Shelter domain types ──

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Geographic position of a shelter. Latitude and longitude always travel together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Address {
    pub latitude: f64,
    pub longitude: f64,
}

impl Address {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Kind of organisation running a shelter.
///
/// `Display`/`FromStr` use the wire encoding (`particular`, `kiwokoStore`, …);
/// parsing also accepts the domain names, case-insensitively.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum ShelterCategory {
    #[strum(to_string = "particular", serialize = "individual")]
    Individual,
    #[strum(to_string = "localGovernment", serialize = "local-government")]
    LocalGovernment,
    #[strum(to_string = "veterinary")]
    Veterinary,
    #[strum(to_string = "shelterPoint", serialize = "shelter-point")]
    ShelterPoint,
    #[strum(to_string = "kiwokoStore", serialize = "retail-partner")]
    RetailPartner,
}

impl ShelterCategory {
    /// Human-readable label for tables and prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::LocalGovernment => "Local government",
            Self::Veterinary => "Veterinary",
            Self::ShelterPoint => "Shelter point",
            Self::RetailPartner => "Retail partner",
        }
    }

    /// The wire encoding (same text as `Display`).
    pub fn wire_name(self) -> &'static str {
        self.into()
    }
}

/// A shelter as the rest of the app sees it.
///
/// `id` is assigned by the server and never edited locally; every other
/// field may change through the detail screen's field edits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shelter {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub phone_number: String,
    pub address: Address,
    pub category: ShelterCategory,
    /// Photo URL or file reference; empty when the shelter has no photo.
    pub photo_url: String,
}

impl Shelter {
    pub fn has_photo(&self) -> bool {
        !self.photo_url.is_empty()
    }
}

/// Registration request: a shelter before the server assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShelter {
    pub name: String,
    pub password: String,
    pub phone_number: String,
    pub address: Address,
    pub category: ShelterCategory,
    pub photo_url: Option<String>,
}

/// Flat row shape used by the local shelter cache.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct ShelterRow {
    pub id: String,
    pub name: String,
    pub password: String,
    pub phone_number: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Category in its wire encoding.
    pub category: String,
    pub photo_url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn category_display_is_wire_name() {
        assert_eq!(ShelterCategory::Individual.to_string(), "particular");
        assert_eq!(ShelterCategory::RetailPartner.to_string(), "kiwokoStore");
        assert_eq!(ShelterCategory::ShelterPoint.wire_name(), "shelterPoint");
    }

    #[test]
    fn category_parses_wire_and_domain_names() {
        assert_eq!(
            ShelterCategory::from_str("kiwokoStore").unwrap(),
            ShelterCategory::RetailPartner
        );
        assert_eq!(
            ShelterCategory::from_str("retail-partner").unwrap(),
            ShelterCategory::RetailPartner
        );
        assert_eq!(
            ShelterCategory::from_str("LOCALGOVERNMENT").unwrap(),
            ShelterCategory::LocalGovernment
        );
        assert!(ShelterCategory::from_str("zoo").is_err());
    }

    #[test]
    fn every_category_round_trips_through_its_wire_name() {
        for category in ShelterCategory::iter() {
            assert_eq!(
                ShelterCategory::from_str(category.wire_name()).unwrap(),
                category
            );
        }
    }

    #[test]
    fn password_is_not_serialized() {
        let shelter = Shelter {
            id: "1".into(),
            name: "Fran".into(),
            password: "hunter2".into(),
            phone_number: "600".into(),
            address: Address::new(1.0, 2.0),
            category: ShelterCategory::Veterinary,
            photo_url: String::new(),
        };
        let json = serde_json::to_string(&shelter).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("\"category\":\"veterinary\""));
    }
}
