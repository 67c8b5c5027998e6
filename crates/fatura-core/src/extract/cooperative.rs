//! Layout matchers for the cooperative invoice families.
//!
//! Cooperluz invoices come in two sub-layouts, told apart by the presence of
//! an internal routing code (`COD UA <n>`). Certhil and Cermissões reuse the
//! same skeleton but accept `RURAL` as well as `INTERIOR` as the
//! neighborhood marker and fall back through three patterns for the consumer
//! unit identifier.
//!
//! Nominal voltage is never printed on these invoices; it is inferred from
//! the supply phase type (single/two-phase service is 220V, three-phase is
//! 380V).

use tracing::debug;

use crate::models::{Field, InvoiceRecord};

use super::patterns::*;
use super::primary::extract_classification;

/// Cooperluz invoice; resolves its own sub-variant from the routing marker.
pub fn match_cooperluz(text: &str) -> InvoiceRecord {
    if ROUTE_CODE_MARKER.is_match(text) {
        debug!("routing code marker present, using COD UA sub-layout");
        match_cooperluz_with_route_code(text)
    } else {
        debug!("no routing code marker, using plain sub-layout");
        match_cooperluz_without_route_code(text)
    }
}

fn match_cooperluz_with_route_code(text: &str) -> InvoiceRecord {
    let mut record = InvoiceRecord::new();

    extract_supply_voltage(text, &mut record);
    extract_classification(text, &mut record);
    extract_name(text, &COOP_NAME_WITH_ROUTE, &mut record);
    extract_street(text, &mut record);
    extract_tax_id(text, &mut record);
    extract_cep(text, &mut record);

    if let Some(caps) = COOP_LOCALITY_WITH_ROUTE.captures(text) {
        record.neighborhood = Field::Value("INTERIOR".to_string());
        record.city = Field::from_match(caps.get(1).map(|m| m.as_str()));
        record.state = Field::from_match(caps.get(2).map(|m| m.as_str()));
    }

    // UC follows the CEP on this sub-layout.
    if let Some(caps) = COOP_UC_AFTER_CEP.captures(text) {
        record.consumer_unit_id = Field::from_match(caps.get(1).map(|m| m.as_str()));
    }

    record
}

fn match_cooperluz_without_route_code(text: &str) -> InvoiceRecord {
    let mut record = InvoiceRecord::new();

    extract_supply_voltage(text, &mut record);
    extract_classification(text, &mut record);
    extract_name(text, &COOP_NAME_WITHOUT_ROUTE, &mut record);
    extract_street(text, &mut record);
    extract_tax_id(text, &mut record);
    extract_cep(text, &mut record);

    if let Some(caps) = COOP_LOCALITY_WITHOUT_ROUTE.captures(text) {
        record.neighborhood = Field::Value("INTERIOR".to_string());
        record.city = Field::from_match(caps.get(1).map(|m| m.as_str()));
        record.state = Field::from_match(caps.get(2).map(|m| m.as_str()));
    }

    // UC sits on the route/sequence line of the consumer-unit box.
    if let Some(caps) = COOP_UC_ROUTE_SEQUENCE.captures(text) {
        record.consumer_unit_id = Field::from_match(caps.get(1).map(|m| m.as_str()));
    }

    record
}

/// Certhil/Cermissões invoice (Cooperluz skeleton, looser markers).
pub fn match_cooperative_variant(text: &str) -> InvoiceRecord {
    let mut record = InvoiceRecord::new();

    extract_supply_voltage(text, &mut record);
    extract_classification(text, &mut record);
    extract_name(text, &COOP_NAME_VARIANT, &mut record);
    extract_street(text, &mut record);
    extract_tax_id(text, &mut record);
    extract_cep(text, &mut record);

    if let Some(caps) = COOP_LOCALITY_VARIANT.captures(text) {
        record.neighborhood = Field::from_match(caps.get(1).map(|m| m.as_str()));
        record.city = Field::from_match(caps.get(2).map(|m| m.as_str()));
        record.state = Field::from_match(caps.get(3).map(|m| m.as_str()));
    }

    // UC: explicit label, then the route/sequence line, then the client
    // code; first match wins.
    record.consumer_unit_id = COOP_UC_LABELED
        .captures(text)
        .or_else(|| COOP_UC_ROUTE_SEQUENCE_DIGITS.captures(text))
        .or_else(|| COOP_UC_CLIENT_CODE.captures(text))
        .map(|c| Field::from_match(c.get(1).map(|m| m.as_str())))
        .unwrap_or(Field::NotFound);

    record
}

fn extract_supply_voltage(text: &str, record: &mut InvoiceRecord) {
    let Some(caps) = SUPPLY_PHASE.captures(text) else {
        return;
    };

    let phase = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    // Unicode case folding: the pattern is (?i), so the token may arrive as
    // e.g. TRIFÁSICO and ASCII-only comparison would miss the accent.
    record.nominal_voltage_v = match phase.to_lowercase().as_str() {
        "trifásico" => Field::Value("380".to_string()),
        "monofásico" | "bifásico" => Field::Value("220".to_string()),
        _ => Field::NotFound,
    };
}

fn extract_name(text: &str, pattern: &regex::Regex, record: &mut InvoiceRecord) {
    if let Some(caps) = pattern.captures(text) {
        record.customer_name = Field::from_match(caps.get(1).map(|m| m.as_str()));
    }
}

fn extract_street(text: &str, record: &mut InvoiceRecord) {
    if let Some(caps) = COOP_STREET.captures(text) {
        record.address_street_number = Field::from_match(caps.get(1).map(|m| m.as_str()));
    }
}

fn extract_tax_id(text: &str, record: &mut InvoiceRecord) {
    if let Some(caps) = COOP_TAX_ID.captures(text) {
        record.tax_id = Field::from_match(caps.get(1).map(|m| m.as_str()));
    }
}

fn extract_cep(text: &str, record: &mut InvoiceRecord) {
    if let Some(caps) = COOP_CEP.captures(text) {
        record.postal_code = Field::from_match(caps.get(1).map(|m| m.as_str()));
    }
}
