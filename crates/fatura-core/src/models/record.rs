//! Canonical invoice record produced by every layout matcher.

use serde::{Deserialize, Serialize};

/// A single extracted field: either a concrete value or one of two sentinels.
///
/// `NotFound` means extraction could not locate the field in the document;
/// `NotCalculated` means a downstream calculation did not produce it. Keeping
/// the sentinels out of band avoids collisions with real string data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Field {
    Value(String),
    #[default]
    NotFound,
    NotCalculated,
}

impl Field {
    /// Build a field from an optional regex capture, trimming whitespace.
    pub fn from_match(value: Option<&str>) -> Self {
        match value {
            Some(s) if !s.trim().is_empty() => Field::Value(s.trim().to_string()),
            _ => Field::NotFound,
        }
    }

    /// True when the field holds real data.
    pub fn is_value(&self) -> bool {
        matches!(self, Field::Value(_))
    }

    /// The contained value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Field::Value(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The contained value or an empty string (used when composing display
    /// fields, where sentinels count as "nothing to show").
    pub fn value_or_empty(&self) -> &str {
        self.value().unwrap_or("")
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        if s.trim().is_empty() {
            Field::NotFound
        } else {
            Field::Value(s)
        }
    }
}

/// The canonical record of customer and connection attributes.
///
/// Every matcher returns all fields; callers never branch on key presence,
/// only on whether a value is a sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Customer name or company name (Nome/Razão Social).
    pub customer_name: Field,
    /// Street and number as printed on the invoice.
    pub address_street_number: Field,
    /// Neighborhood (Bairro).
    pub neighborhood: Field,
    /// CPF or CNPJ, possibly masked.
    pub tax_id: Field,
    /// City (Cidade).
    pub city: Field,
    /// Two-letter state code (Estado).
    pub state: Field,
    /// Postal code (CEP).
    pub postal_code: Field,
    /// Consumer unit identifier (UC).
    pub consumer_unit_id: Field,
    /// Tariff group (B1-B4 or A).
    pub tariff_group: Field,
    /// Tariff class (Residencial, Comercial, ...).
    pub tariff_class: Field,
    /// Nominal supply voltage in volts.
    pub nominal_voltage_v: Field,
}

impl InvoiceRecord {
    /// Create a record with every field at its `NotFound` sentinel.
    pub fn new() -> Self {
        Self::default()
    }

    /// All canon fields with their names, in a fixed order.
    pub fn fields(&self) -> [(&'static str, &Field); 11] {
        [
            ("customer_name", &self.customer_name),
            ("address_street_number", &self.address_street_number),
            ("neighborhood", &self.neighborhood),
            ("tax_id", &self.tax_id),
            ("city", &self.city),
            ("state", &self.state),
            ("postal_code", &self.postal_code),
            ("consumer_unit_id", &self.consumer_unit_id),
            ("tariff_group", &self.tariff_group),
            ("tariff_class", &self.tariff_class),
            ("nominal_voltage_v", &self.nominal_voltage_v),
        ]
    }

    /// Number of fields holding real data. Used by the fallback selector to
    /// score competing matcher outputs.
    pub fn found_field_count(&self) -> usize {
        self.fields().iter().filter(|(_, f)| f.is_value()).count()
    }

    /// Overlay manual corrections onto this record. A correction field that
    /// holds a value replaces the extracted one; sentinel corrections leave
    /// the extracted value untouched.
    pub fn merged_with(&self, corrections: &InvoiceRecord) -> InvoiceRecord {
        fn pick(extracted: &Field, corrected: &Field) -> Field {
            if corrected.is_value() {
                corrected.clone()
            } else {
                extracted.clone()
            }
        }

        InvoiceRecord {
            customer_name: pick(&self.customer_name, &corrections.customer_name),
            address_street_number: pick(
                &self.address_street_number,
                &corrections.address_street_number,
            ),
            neighborhood: pick(&self.neighborhood, &corrections.neighborhood),
            tax_id: pick(&self.tax_id, &corrections.tax_id),
            city: pick(&self.city, &corrections.city),
            state: pick(&self.state, &corrections.state),
            postal_code: pick(&self.postal_code, &corrections.postal_code),
            consumer_unit_id: pick(&self.consumer_unit_id, &corrections.consumer_unit_id),
            tariff_group: pick(&self.tariff_group, &corrections.tariff_group),
            tariff_class: pick(&self.tariff_class, &corrections.tariff_class),
            nominal_voltage_v: pick(&self.nominal_voltage_v, &corrections.nominal_voltage_v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_from_match() {
        assert_eq!(
            Field::from_match(Some("  JOAO DA SILVA ")),
            Field::Value("JOAO DA SILVA".to_string())
        );
        assert_eq!(Field::from_match(Some("   ")), Field::NotFound);
        assert_eq!(Field::from_match(None), Field::NotFound);
    }

    #[test]
    fn test_empty_record_has_all_fields() {
        let record = InvoiceRecord::new();
        assert_eq!(record.fields().len(), 11);
        assert_eq!(record.found_field_count(), 0);
    }

    #[test]
    fn test_found_field_count() {
        let mut record = InvoiceRecord::new();
        record.customer_name = Field::Value("MARIA".to_string());
        record.city = Field::Value("GIRUA".to_string());
        record.nominal_voltage_v = Field::NotCalculated;
        assert_eq!(record.found_field_count(), 2);
    }

    #[test]
    fn test_merge_prefers_corrections() {
        let mut extracted = InvoiceRecord::new();
        extracted.customer_name = Field::Value("JOAO".to_string());
        extracted.city = Field::Value("IJUI".to_string());

        let mut corrections = InvoiceRecord::new();
        corrections.customer_name = Field::Value("JOAO DA SILVA".to_string());

        let merged = extracted.merged_with(&corrections);
        assert_eq!(merged.customer_name, Field::Value("JOAO DA SILVA".to_string()));
        assert_eq!(merged.city, Field::Value("IJUI".to_string()));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut record = InvoiceRecord::new();
        record.customer_name = Field::Value("JOAO".to_string());
        record.nominal_voltage_v = Field::NotCalculated;

        let json = serde_json::to_string(&record).unwrap();
        let back: InvoiceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
