//! Layout matchers for the RGE invoice styles.
//!
//! Three visually distinct templates share most extraction steps: the two
//! DANF3E styles differ only in how the customer's CPF is printed (full vs
//! masked), while the DANFE style anchors the customer block on the
//! consumer-unit code label and prints a dash before the state code.
//!
//! Every step is independent: a pattern that fails to match leaves its field
//! at the `NotFound` sentinel and extraction continues.

use tracing::debug;

use crate::models::{Field, InvoiceRecord};

use super::patterns::*;

/// DANF3E invoice with a fully printed individual CPF.
pub fn match_danf3e_full_cpf(text: &str) -> InvoiceRecord {
    let mut record = InvoiceRecord::new();

    extract_voltage(text, &mut record);
    extract_name_after_cnpj(text, &mut record);
    extract_address_block(text, false, &mut record);
    extract_tax_id(text, CpfStyle::Full, &mut record);
    extract_classification(text, &mut record);

    // UC: explicit label first, demand-limit line as fallback.
    record.consumer_unit_id = UC_LABELED
        .captures(text)
        .or_else(|| UC_AFTER_DEMAND_LIMIT.captures(text))
        .map(|c| Field::from_match(c.get(1).map(|m| m.as_str())))
        .unwrap_or(Field::NotFound);

    record
}

/// DANF3E invoice with a masked CPF (`***.###.###-**`).
pub fn match_danf3e_masked_cpf(text: &str) -> InvoiceRecord {
    let mut record = InvoiceRecord::new();

    extract_voltage(text, &mut record);
    extract_name_after_cnpj(text, &mut record);
    extract_address_block(text, false, &mut record);
    extract_tax_id(text, CpfStyle::Masked, &mut record);
    extract_classification(text, &mut record);

    // This style prints the UC only on the demand-limit line.
    record.consumer_unit_id = UC_AFTER_DEMAND_LIMIT
        .captures(text)
        .map(|c| Field::from_match(c.get(1).map(|m| m.as_str())))
        .unwrap_or(Field::NotFound);

    record
}

/// DANFE invoice keyed on the consumer-unit code label.
pub fn match_danfe_uc_code(text: &str) -> InvoiceRecord {
    let mut record = InvoiceRecord::new();

    extract_voltage(text, &mut record);

    record.customer_name = DANFE_NAME_AFTER_UC_CODE
        .captures(text)
        .map(|c| Field::from_match(c.get(1).map(|m| m.as_str())))
        .unwrap_or(Field::NotFound);

    extract_address_block(text, true, &mut record);
    extract_tax_id(text, CpfStyle::Masked, &mut record);
    extract_classification(text, &mut record);

    // UC: code label first, then the ten digits right before the "1/2"
    // page mark.
    record.consumer_unit_id = UC_CODE_VALUE
        .captures(text)
        .or_else(|| UC_BEFORE_PAGE_MARK.captures(text))
        .map(|c| Field::from_match(c.get(1).map(|m| m.as_str())))
        .unwrap_or(Field::NotFound);

    record
}

/// Which CPF printing the layout uses.
#[derive(Clone, Copy)]
enum CpfStyle {
    Full,
    Masked,
}

fn extract_voltage(text: &str, record: &mut InvoiceRecord) {
    if let Some(caps) = VOLTAGE_DISP.captures(text) {
        record.nominal_voltage_v = Field::from_match(caps.get(1).map(|m| m.as_str()));
    }
}

fn extract_name_after_cnpj(text: &str, record: &mut InvoiceRecord) {
    if let Some(caps) = RGE_NAME_AFTER_CNPJ.captures(text) {
        record.customer_name = Field::from_match(caps.get(1).map(|m| m.as_str()));
    }
}

/// Street/neighborhood/CEP/city/state block, anchored on the extracted name.
/// Skipped entirely when the name itself was not found.
fn extract_address_block(text: &str, dash_before_state: bool, record: &mut InvoiceRecord) {
    let Some(name) = record.customer_name.value() else {
        debug!("customer name missing, skipping address block");
        return;
    };

    let Some(re) = address_block_regex(name, dash_before_state) else {
        return;
    };

    if let Some(caps) = re.captures(text) {
        record.address_street_number = Field::from_match(caps.get(1).map(|m| m.as_str()));
        record.neighborhood = Field::from_match(caps.get(2).map(|m| m.as_str()));
        record.postal_code = Field::from_match(caps.get(3).map(|m| m.as_str()));
        record.city = Field::from_match(caps.get(4).map(|m| m.as_str()));
        record.state = Field::from_match(caps.get(5).map(|m| m.as_str()));
    }
}

/// Individual CPF (full or masked per style) preferred over corporate CNPJ.
fn extract_tax_id(text: &str, style: CpfStyle, record: &mut InvoiceRecord) {
    let cpf = match style {
        CpfStyle::Full => CPF_FULL.captures(text),
        CpfStyle::Masked => CPF_MASKED.captures(text),
    };

    record.tax_id = cpf
        .or_else(|| CNPJ.captures(text))
        .map(|c| Field::from_match(c.get(1).map(|m| m.as_str())))
        .unwrap_or(Field::NotFound);
}

/// Tariff group and class from the "Classificação:" line. The two
/// sub-patterns are independent; either, both, or neither may match.
pub(super) fn extract_classification(text: &str, record: &mut InvoiceRecord) {
    let Some(caps) = CLASSIFICATION_LINE.captures(text) else {
        return;
    };

    let line = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    let line = TRAILING_SUPPLY_LABEL.replace(line, "");
    let line = line.trim();

    if let Some(group) = TARIFF_GROUP.captures(line) {
        record.tariff_group = Field::from_match(group.get(1).map(|m| m.as_str()));
    }
    if let Some(class) = TARIFF_CLASS.captures(line) {
        record.tariff_class = Field::from_match(class.get(1).map(|m| m.as_str()));
    }
}
