//! Derived display fields composed from the extracted record.

use serde::{Deserialize, Serialize};

use crate::models::InvoiceRecord;

/// Composite location strings built by joining extracted parts with `" - "`.
/// Missing parts are simply omitted; when every part is missing the composite
/// is an empty string, never a sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeFields {
    pub neighborhood_city: String,
    pub city_state: String,
    pub street_neighborhood: String,
}

/// Build the composite display fields from a record (after any manual
/// corrections have been merged in).
pub fn compose(record: &InvoiceRecord) -> CompositeFields {
    CompositeFields {
        neighborhood_city: join_parts(&[
            record.neighborhood.value(),
            record.city.value(),
        ]),
        city_state: join_parts(&[record.city.value(), record.state.value()]),
        street_neighborhood: join_parts(&[
            record.address_street_number.value(),
            record.neighborhood.value(),
        ]),
    }
}

fn join_parts(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Geographic axis, deciding the hemisphere letters of a DMS rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn hemisphere(self, negative: bool) -> char {
        match (self, negative) {
            (Axis::Latitude, false) => 'N',
            (Axis::Latitude, true) => 'S',
            (Axis::Longitude, false) => 'E',
            (Axis::Longitude, true) => 'W',
        }
    }
}

/// Convert a decimal coordinate to a degrees/minutes/seconds string, e.g.
/// `29° 30' 0.00" S`. Accepts a comma decimal separator; zero counts as the
/// positive hemisphere; non-numeric input renders as `"N/A"`.
pub fn decimal_to_dms(raw: &str, axis: Axis) -> String {
    let Ok(decimal) = raw.trim().replace(',', ".").parse::<f64>() else {
        return "N/A".to_string();
    };

    let hemisphere = axis.hemisphere(decimal < 0.0);
    let magnitude = decimal.abs();

    let degrees = magnitude.trunc() as u32;
    let minutes_full = (magnitude - degrees as f64) * 60.0;
    let minutes = minutes_full.trunc() as u32;
    let seconds = (minutes_full - minutes as f64) * 60.0;

    format!("{}° {}' {:.2}\" {}", degrees, minutes, seconds, hemisphere)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;
    use pretty_assertions::assert_eq;

    fn record_with_location() -> InvoiceRecord {
        InvoiceRecord {
            address_street_number: Field::Value("R BENTO GONCALVES 1234".into()),
            neighborhood: Field::Value("CENTRO".into()),
            city: Field::Value("IJUI".into()),
            state: Field::Value("RS".into()),
            ..InvoiceRecord::new()
        }
    }

    #[test]
    fn test_composites_join_with_dash() {
        let composites = compose(&record_with_location());
        assert_eq!(composites.neighborhood_city, "CENTRO - IJUI");
        assert_eq!(composites.city_state, "IJUI - RS");
        assert_eq!(
            composites.street_neighborhood,
            "R BENTO GONCALVES 1234 - CENTRO"
        );
    }

    #[test]
    fn test_missing_part_is_omitted() {
        let mut record = record_with_location();
        record.city = Field::NotFound;

        let composites = compose(&record);
        assert_eq!(composites.neighborhood_city, "CENTRO");
        assert_eq!(composites.city_state, "RS");
    }

    #[test]
    fn test_parts_are_trimmed_and_blank_parts_omitted() {
        let mut record = record_with_location();
        record.neighborhood = Field::Value("  CENTRO  ".into());
        record.city = Field::Value("   ".into());

        let composites = compose(&record);
        assert_eq!(composites.neighborhood_city, "CENTRO");
        assert_eq!(composites.city_state, "RS");
    }

    #[test]
    fn test_all_missing_yields_empty_string() {
        let composites = compose(&InvoiceRecord::new());
        assert_eq!(composites.neighborhood_city, "");
        assert_eq!(composites.city_state, "");
        assert_eq!(composites.street_neighborhood, "");
    }

    #[test]
    fn test_dms_southern_latitude() {
        assert_eq!(decimal_to_dms("-29.5", Axis::Latitude), "29° 30' 0.00\" S");
        assert_eq!(decimal_to_dms("-29,5", Axis::Latitude), "29° 30' 0.00\" S");
    }

    #[test]
    fn test_dms_zero_is_positive_hemisphere() {
        assert_eq!(decimal_to_dms("0.0", Axis::Longitude), "0° 0' 0.00\" E");
        assert_eq!(decimal_to_dms("0.0", Axis::Latitude), "0° 0' 0.00\" N");
    }

    #[test]
    fn test_dms_non_numeric_is_na() {
        assert_eq!(decimal_to_dms("perto da sede", Axis::Longitude), "N/A");
        assert_eq!(decimal_to_dms("", Axis::Latitude), "N/A");
    }
}
