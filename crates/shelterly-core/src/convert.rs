// ── API-to-domain type conversions ──
//
// Bridges raw `shelterly_api` wire types and local cache rows into the
// canonical `crate::model` types and back. Field-for-field; the only
// translation is the category encoding and `photoURL: null` ↔ empty string.
//
// The domain has one "no photo" value, so a wire `photoURL: ""` comes back
// out as `null`. Every other record survives DTO → domain → DTO unchanged.

use std::str::FromStr;

use shelterly_api::types::{AddressDto, NewShelterDto, ShelterDto, ShelterTypeDto};

use crate::error::CoreError;
use crate::model::{Address, NewShelter, Shelter, ShelterCategory, ShelterRow};

// ── Category ───────────────────────────────────────────────────────

impl From<ShelterTypeDto> for ShelterCategory {
    fn from(t: ShelterTypeDto) -> Self {
        match t {
            ShelterTypeDto::Particular => Self::Individual,
            ShelterTypeDto::LocalGovernment => Self::LocalGovernment,
            ShelterTypeDto::Veterinary => Self::Veterinary,
            ShelterTypeDto::ShelterPoint => Self::ShelterPoint,
            ShelterTypeDto::KiwokoStore => Self::RetailPartner,
        }
    }
}

impl From<ShelterCategory> for ShelterTypeDto {
    fn from(c: ShelterCategory) -> Self {
        match c {
            ShelterCategory::Individual => Self::Particular,
            ShelterCategory::LocalGovernment => Self::LocalGovernment,
            ShelterCategory::Veterinary => Self::Veterinary,
            ShelterCategory::ShelterPoint => Self::ShelterPoint,
            ShelterCategory::RetailPartner => Self::KiwokoStore,
        }
    }
}

// ── Address ────────────────────────────────────────────────────────

impl From<AddressDto> for Address {
    fn from(a: AddressDto) -> Self {
        Self {
            latitude: a.latitude,
            longitude: a.longitude,
        }
    }
}

impl From<Address> for AddressDto {
    fn from(a: Address) -> Self {
        Self {
            latitude: a.latitude,
            longitude: a.longitude,
        }
    }
}

// ── Shelter ────────────────────────────────────────────────────────

impl From<ShelterDto> for Shelter {
    fn from(dto: ShelterDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            password: dto.password,
            phone_number: dto.phone_number,
            address: dto.address.into(),
            category: dto.shelter_type.into(),
            photo_url: dto.photo_url.unwrap_or_default(),
        }
    }
}

impl From<Shelter> for ShelterDto {
    fn from(s: Shelter) -> Self {
        Self {
            id: s.id,
            name: s.name,
            password: s.password,
            phone_number: s.phone_number,
            address: s.address.into(),
            shelter_type: s.category.into(),
            photo_url: (!s.photo_url.is_empty()).then_some(s.photo_url),
        }
    }
}

impl From<NewShelter> for NewShelterDto {
    fn from(s: NewShelter) -> Self {
        Self {
            name: s.name,
            password: s.password,
            phone_number: s.phone_number,
            address: s.address.into(),
            shelter_type: s.category.into(),
            photo_url: s.photo_url.filter(|url| !url.is_empty()),
        }
    }
}

// ── Cache rows ─────────────────────────────────────────────────────

impl From<&Shelter> for ShelterRow {
    fn from(s: &Shelter) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            password: s.password.clone(),
            phone_number: s.phone_number.clone(),
            latitude: s.address.latitude,
            longitude: s.address.longitude,
            category: s.category.wire_name().to_owned(),
            photo_url: s.photo_url.clone(),
        }
    }
}

impl TryFrom<ShelterRow> for Shelter {
    type Error = CoreError;

    fn try_from(row: ShelterRow) -> Result<Self, Self::Error> {
        let category =
            ShelterCategory::from_str(&row.category).map_err(|_| CoreError::Storage {
                message: format!(
                    "cached shelter {} has unknown category '{}'",
                    row.id, row.category
                ),
            })?;
        Ok(Self {
            id: row.id,
            name: row.name,
            password: row.password,
            phone_number: row.phone_number,
            address: Address::new(row.latitude, row.longitude),
            category,
            photo_url: row.photo_url,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    fn dto(shelter_type: ShelterTypeDto, photo_url: Option<&str>) -> ShelterDto {
        ShelterDto {
            id: "id-1".into(),
            name: "Fran".into(),
            password: "pw".into(),
            phone_number: "630838080".into(),
            address: AddressDto {
                latitude: 40.4168,
                longitude: -3.7038,
            },
            shelter_type,
            photo_url: photo_url.map(String::from),
        }
    }

    #[test]
    fn dto_domain_dto_preserves_every_field() {
        let types = [
            ShelterTypeDto::Particular,
            ShelterTypeDto::LocalGovernment,
            ShelterTypeDto::Veterinary,
            ShelterTypeDto::ShelterPoint,
            ShelterTypeDto::KiwokoStore,
        ];
        for shelter_type in types {
            for photo in [None, Some("https://cdn.example.org/a.jpg")] {
                let wire = dto(shelter_type, photo);
                let back = ShelterDto::from(Shelter::from(wire.clone()));
                assert_eq!(back, wire);
            }
        }
    }

    #[test]
    fn category_encoding_is_bijective() {
        for category in ShelterCategory::iter() {
            let wire = ShelterTypeDto::from(category);
            assert_eq!(ShelterCategory::from(wire), category);
            // The serde wire name and the domain wire name agree.
            let encoded = serde_json::to_value(wire).unwrap();
            assert_eq!(encoded.as_str().unwrap(), category.wire_name());
        }
    }

    #[test]
    fn blank_photo_is_sent_back_as_null() {
        let wire = dto(ShelterTypeDto::ShelterPoint, Some(""));
        let back = ShelterDto::from(Shelter::from(wire.clone()));
        assert_eq!(back.photo_url, None);
        assert_eq!(ShelterDto { photo_url: Some(String::new()), ..back }, wire);
    }

    #[test]
    fn null_photo_becomes_empty_reference() {
        let shelter = Shelter::from(dto(ShelterTypeDto::Veterinary, None));
        assert!(shelter.photo_url.is_empty());
        assert!(!shelter.has_photo());
    }

    #[test]
    fn cache_row_round_trip() {
        let shelter = Shelter::from(dto(ShelterTypeDto::KiwokoStore, Some("a.jpg")));
        let row = ShelterRow::from(&shelter);
        assert_eq!(row.category, "kiwokoStore");
        assert_eq!(Shelter::try_from(row).unwrap(), shelter);
    }

    #[test]
    fn cache_row_with_unknown_category_fails() {
        let mut row = ShelterRow::from(&Shelter::from(dto(ShelterTypeDto::Veterinary, None)));
        row.category = "zoo".into();
        assert!(matches!(
            Shelter::try_from(row),
            Err(CoreError::Storage { .. })
        ));
    }

    #[test]
    fn new_shelter_drops_empty_photo() {
        let new = NewShelter {
            name: "Lola".into(),
            password: "pw".into(),
            phone_number: "600".into(),
            address: Address::new(1.0, 2.0),
            category: ShelterCategory::Individual,
            photo_url: Some(String::new()),
        };
        let dto = NewShelterDto::from(new);
        assert!(dto.photo_url.is_none());
        assert_eq!(dto.shelter_type, ShelterTypeDto::Particular);
    }
}
