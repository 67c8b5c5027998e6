//! Layout classification and field extraction.
//!
//! The caller declares which distributor issued the invoice; this module
//! decides which layout matcher(s) to run. RGE templates are visually
//! similar variations of a common base and are disambiguated by structural
//! signatures (with a best-effort scoring fallback); cooperative layouts are
//! selected by an explicit routing-code marker and dispatch directly.

pub mod cooperative;
pub mod patterns;
pub mod primary;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::InvoiceRecord;

/// The utility or cooperative that issued the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distributor {
    /// RGE (primary utility, several sub-layouts).
    Rge,
    /// Cooperluz (two sub-layouts keyed on the routing-code marker).
    Cooperluz,
    /// Certhil (Cooperluz-like skeleton).
    Certhil,
    /// Cermissões (same matcher as Certhil, named for error messages).
    Cermissoes,
}

impl fmt::Display for Distributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Distributor::Rge => "RGE",
            Distributor::Cooperluz => "Cooperluz",
            Distributor::Certhil => "Certhil",
            Distributor::Cermissoes => "Cermissões",
        };
        f.write_str(name)
    }
}

impl FromStr for Distributor {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rge" => Ok(Distributor::Rge),
            "cooperluz" => Ok(Distributor::Cooperluz),
            "certhil" => Ok(Distributor::Certhil),
            "cermissoes" | "cermissões" => Ok(Distributor::Cermissoes),
            other => Err(ExtractionError::UnknownDistributor(other.to_string())),
        }
    }
}

/// The known RGE invoice layouts, in classifier priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RgeLayout {
    /// DANF3E with a fully printed CPF.
    Danf3eFullCpf,
    /// DANF3E with a masked CPF.
    Danf3eMaskedCpf,
    /// DANFE keyed on the consumer-unit code label.
    DanfeUcCode,
}

impl RgeLayout {
    /// All layouts in the fixed priority order used for signature testing
    /// and fallback scoring.
    pub const ALL: [RgeLayout; 3] = [
        RgeLayout::Danf3eFullCpf,
        RgeLayout::Danf3eMaskedCpf,
        RgeLayout::DanfeUcCode,
    ];

    /// Run this layout's matcher.
    pub fn run(self, text: &str) -> InvoiceRecord {
        match self {
            RgeLayout::Danf3eFullCpf => primary::match_danf3e_full_cpf(text),
            RgeLayout::Danf3eMaskedCpf => primary::match_danf3e_masked_cpf(text),
            RgeLayout::DanfeUcCode => primary::match_danfe_uc_code(text),
        }
    }
}

/// Test the RGE layout signatures in fixed order.
pub fn classify_rge(text: &str) -> Option<RgeLayout> {
    if patterns::SIG_DANF3E_FULL_CPF.is_match(text) {
        Some(RgeLayout::Danf3eFullCpf)
    } else if patterns::SIG_DANF3E_MASKED_CPF.is_match(text) {
        Some(RgeLayout::Danf3eMaskedCpf)
    } else if patterns::DANFE_HEADER.is_match(text) && patterns::UC_CODE_LABEL.is_match(text) {
        Some(RgeLayout::DanfeUcCode)
    } else {
        None
    }
}

/// Extract a canonical record from raw first-page text.
///
/// `source` identifies the document (file name) in error messages. Returns a
/// record with every canon field populated (value or sentinel), or a typed
/// error when no usable record could be produced at all.
pub fn extract(
    text: &str,
    distributor: Distributor,
    source: &str,
) -> Result<InvoiceRecord, ExtractionError> {
    info!("extracting {} invoice from '{}'", distributor, source);

    match distributor {
        Distributor::Rge => extract_rge(text, source),
        Distributor::Cooperluz => {
            gate_on_name(cooperative::match_cooperluz(text), distributor, source)
        }
        Distributor::Certhil | Distributor::Cermissoes => gate_on_name(
            cooperative::match_cooperative_variant(text),
            distributor,
            source,
        ),
    }
}

/// Parse the operator-declared distributor string, then extract.
pub fn extract_declared(
    text: &str,
    declared: &str,
    source: &str,
) -> Result<InvoiceRecord, ExtractionError> {
    let distributor = Distributor::from_str(declared)?;
    extract(text, distributor, source)
}

fn extract_rge(text: &str, source: &str) -> Result<InvoiceRecord, ExtractionError> {
    if let Some(layout) = classify_rge(text) {
        debug!("signature matched RGE layout {:?}", layout);
        return Ok(layout.run(text));
    }

    warn!(
        "no RGE layout signature matched for '{}', scoring all matchers",
        source
    );

    // Fallback: run every matcher and keep the output with the strictly
    // highest count of non-sentinel fields. Ties keep the first-seen result
    // in fixed layout order.
    let mut best: Option<(RgeLayout, InvoiceRecord, usize)> = None;
    for layout in RgeLayout::ALL {
        let record = layout.run(text);
        let found = record.found_field_count();
        debug!("fallback {:?} produced {} fields", layout, found);

        let better = match &best {
            Some((_, _, best_found)) => found > *best_found,
            None => true,
        };
        if better {
            best = Some((layout, record, found));
        }
    }

    match best {
        Some((layout, record, found)) if found > 0 => {
            info!(
                "fallback selected {:?} with {} fields for '{}'",
                layout, found, source
            );
            Ok(record)
        }
        _ => Err(ExtractionError::UnrecognizedLayout {
            distributor: Distributor::Rge,
            source_id: source.to_string(),
        }),
    }
}

/// Cooperative families accept a record only when the customer name was
/// extracted; everything else may remain unresolved.
fn gate_on_name(
    record: InvoiceRecord,
    distributor: Distributor,
    source: &str,
) -> Result<InvoiceRecord, ExtractionError> {
    if record.customer_name.is_value() {
        Ok(record)
    } else {
        Err(ExtractionError::NameNotFound {
            distributor,
            source_id: source.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_distributor_from_str() {
        assert_eq!("RGE".parse::<Distributor>().unwrap(), Distributor::Rge);
        assert_eq!(
            "cermissões".parse::<Distributor>().unwrap(),
            Distributor::Cermissoes
        );
        assert!(matches!(
            "ENEL".parse::<Distributor>(),
            Err(ExtractionError::UnknownDistributor(_))
        ));
    }

    #[test]
    fn test_unknown_distributor_via_declared_input() {
        let err = extract_declared("any text", "copel", "fatura.pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::UnknownDistributor(v) if v == "copel"));
    }

    #[test]
    fn test_signature_order_prefers_full_cpf_style() {
        let text = [
            "Inscrição no CNPJ: 02.016.440/0001-62",
            "ADRIANO DA SILVA",
            "linha",
            "Pelo CPF: 123.456.789-01",
            "CPF: 123.456.789-01",
            "",
        ]
        .join("\n");
        assert_eq!(classify_rge(&text), Some(RgeLayout::Danf3eFullCpf));
    }

    #[test]
    fn test_signature_masked_cpf_style() {
        let text = [
            "Inscrição no CNPJ: 02.016.440/0001-62",
            "AIRE PEREIRA",
            "linha",
            "CPF: ***.456.789-**",
            "",
        ]
        .join("\n");
        assert_eq!(classify_rge(&text), Some(RgeLayout::Danf3eMaskedCpf));
    }

    #[test]
    fn test_signature_danfe_requires_both_landmarks() {
        let header_only = "DANFE - DOCUMENTO AUXILIAR DA NOTA FISCAL ELETRÔNICA\n";
        assert_eq!(classify_rge(header_only), None);

        let both = "DANFE - DOCUMENTO AUXILIAR DA NOTA FISCAL ELETRÔNICA\n\
                    CÓDIGO DA UNIDADE CONSUMIDORA: 1122334455\n";
        assert_eq!(classify_rge(both), Some(RgeLayout::DanfeUcCode));
    }

    #[test]
    fn test_fallback_scoring_picks_best_partial_match() {
        // No signature matches (no "Pelo CPF", no masked CPF after a name
        // block, no DANFE header), but the masked-CPF matcher extracts more
        // fields than the others thanks to the demand-limit UC line.
        let text = [
            "TENSÃO NOMINAL EM VOLTS Disp.: 220",
            "CPF: ***.456.789-**",
            "Lim. máx.: 100 0098765432",
            "",
        ]
        .join("\n");
        assert_eq!(classify_rge(&text), None);

        let record = extract(&text, Distributor::Rge, "fatura.pdf").unwrap();
        assert_eq!(record.tax_id, Field::Value("***.456.789-**".into()));
        assert_eq!(record.consumer_unit_id, Field::Value("0098765432".into()));
        assert_eq!(record.nominal_voltage_v, Field::Value("220".into()));
    }

    #[test]
    fn test_fallback_with_zero_fields_is_unrecognized_layout() {
        let err = extract("nothing here", Distributor::Rge, "fatura.pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::UnrecognizedLayout { .. }));
    }

    #[test]
    fn test_errors_render_with_source_identifier() {
        let err = extract("nothing here", Distributor::Rge, "conta_03.pdf").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unrecognized RGE invoice layout in 'conta_03.pdf'"
        );
    }

    #[test]
    fn test_cooperative_name_gate() {
        // Everything but the name extracts; the gate must still reject.
        let text = [
            "Classificação: B2 Rural",
            "Tipo de Fornecimento: Trifásico",
            "CPF/CNPJ: ***.111.222-33",
            "CEP: 98 640-000 123456-7",
            "",
        ]
        .join("\n");

        let err = extract(&text, Distributor::Cooperluz, "fatura.pdf").unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::NameNotFound {
                distributor: Distributor::Cooperluz,
                ..
            }
        ));
    }

    #[test]
    fn test_cooperative_dispatch_success() {
        let text = [
            "Tipo de Fornecimento: Bifásico",
            "OLMIRO BOHN",
            "DATAS DE",
            "",
        ]
        .join("\n");

        let record = extract(&text, Distributor::Certhil, "fatura.pdf").unwrap();
        assert_eq!(record.customer_name, Field::Value("OLMIRO BOHN".into()));
    }

    #[test]
    fn test_extraction_is_total_over_arbitrary_text() {
        // Garbage input either yields a full-shaped record or a typed error,
        // never a panic.
        let garbage = "\u{0}\u{1}\n\n\n///***---999";
        for distributor in [
            Distributor::Rge,
            Distributor::Cooperluz,
            Distributor::Certhil,
            Distributor::Cermissoes,
        ] {
            match extract(garbage, distributor, "x") {
                Ok(record) => assert_eq!(record.fields().len(), 11),
                Err(e) => {
                    assert!(matches!(
                        e,
                        ExtractionError::UnrecognizedLayout { .. }
                            | ExtractionError::NameNotFound { .. }
                    ));
                }
            }
        }
    }
}
