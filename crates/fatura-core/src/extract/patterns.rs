//! Regex patterns anchored on the textual landmarks of each invoice layout.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Nominal voltage, shared by every RGE style.
    pub static ref VOLTAGE_DISP: Regex = Regex::new(
        r"TENSÃO NOMINAL EM VOLTS\s*Disp\.:\s*(\d+)"
    ).unwrap();

    // Customer name printed below the distributor's CNPJ registration line
    // (DANF3E styles).
    pub static ref RGE_NAME_AFTER_CNPJ: Regex = Regex::new(
        r"Inscrição no CNPJ: \d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}\n+([A-Z\s,.]+)\n"
    ).unwrap();

    // Layout signatures, tested in fixed order by the classifier.
    pub static ref SIG_DANF3E_FULL_CPF: Regex = Regex::new(
        r"(?s)Inscrição no CNPJ: \d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}\n+[A-Z\s,.]+\n.*?Pelo CPF:\s*\d{3}\.\d{3}\.\d{3}-\d{2}"
    ).unwrap();

    pub static ref SIG_DANF3E_MASKED_CPF: Regex = Regex::new(
        r"(?s)Inscrição no CNPJ: \d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}\n+[A-Z\s,.]+\n.*?CPF:\s*\*{3}\.[\d*]{3}\.[\d*]{3}-\*{2}"
    ).unwrap();

    pub static ref DANFE_HEADER: Regex = Regex::new(
        r"DANFE - DOCUMENTO AUXILIAR DA NOTA FISCAL ELETRÔNICA"
    ).unwrap();

    pub static ref UC_CODE_LABEL: Regex = Regex::new(
        r"CÓDIGO DA UNIDADE CONSUMIDORA:"
    ).unwrap();

    // Customer name below the consumer-unit code label (DANFE style).
    pub static ref DANFE_NAME_AFTER_UC_CODE: Regex = Regex::new(
        r"CÓDIGO DA UNIDADE CONSUMIDORA:\s*\d+\n([A-Z\s]+)\n"
    ).unwrap();

    // Tax identifiers. An individual CPF (full or masked) is preferred over
    // the corporate CNPJ.
    pub static ref CPF_FULL: Regex = Regex::new(
        r"CPF:\s*(\d{3}\.\d{3}\.\d{3}-\d{2})"
    ).unwrap();

    pub static ref CPF_MASKED: Regex = Regex::new(
        r"CPF:\s*(\*{3}\.[\d*]{3}\.[\d*]{3}-\*{2})"
    ).unwrap();

    pub static ref CNPJ: Regex = Regex::new(
        r"CNPJ:\s*(\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2})"
    ).unwrap();

    // Consumer unit identifier, RGE variants.
    pub static ref UC_LABELED: Regex = Regex::new(
        r"UC:\s*(\d{10})"
    ).unwrap();

    pub static ref UC_AFTER_DEMAND_LIMIT: Regex = Regex::new(
        r"Lim\.\s*máx\.:\s*\d+\s*(\d{10})"
    ).unwrap();

    pub static ref UC_CODE_VALUE: Regex = Regex::new(
        r"CÓDIGO DA UNIDADE CONSUMIDORA:\s*(\d{10})"
    ).unwrap();

    pub static ref UC_BEFORE_PAGE_MARK: Regex = Regex::new(
        r"(\d{10})\n1/2"
    ).unwrap();

    // Tariff classification line, shared by every layout family.
    pub static ref CLASSIFICATION_LINE: Regex = Regex::new(
        r"(?i)Classifica[çc](?:ão|ao):\s*([^\n]+)"
    ).unwrap();

    pub static ref TRAILING_SUPPLY_LABEL: Regex = Regex::new(
        r"\s*Tipo de Fornecimento:.*$"
    ).unwrap();

    pub static ref TARIFF_GROUP: Regex = Regex::new(
        r"(B[1-4]|A)"
    ).unwrap();

    pub static ref TARIFF_CLASS: Regex = Regex::new(
        r"(?i)(Residencial|Comercial|Industrial|Rural|Poder Público|Iluminação Pública)"
    ).unwrap();

    // Cooperative layouts.
    pub static ref SUPPLY_PHASE: Regex = Regex::new(
        r"(?is)Tipo de Fornecimento:\s*[\s\S]*?(Monofásico|Bifásico|Trifásico)"
    ).unwrap();

    pub static ref ROUTE_CODE_MARKER: Regex = Regex::new(
        r"COD UA \d+"
    ).unwrap();

    // Customer name follows the supply-phase token; the terminator differs
    // per sub-layout.
    pub static ref COOP_NAME_WITH_ROUTE: Regex = Regex::new(
        r"(?is)(?:Monofásico|Bifásico|Trifásico)\s*\n+([A-Z\s,.-]+?)\s*\n+(?:Leitura anterior|DATAS DE|COD UA)"
    ).unwrap();

    pub static ref COOP_NAME_WITHOUT_ROUTE: Regex = Regex::new(
        r"(?is)(?:Monofásico|Bifásico|Trifásico)\s*\n+([A-Z\s,.-]+?)\s*\n+Leitura anterior"
    ).unwrap();

    pub static ref COOP_NAME_VARIANT: Regex = Regex::new(
        r"(?is)(?:Monofásico|Bifásico|Trifásico)\s*\n+([A-Z\s,.-]+?)\s*\n+(?:Leitura anterior|DATAS DE)"
    ).unwrap();

    pub static ref COOP_STREET: Regex = Regex::new(
        r"(?s)Proxima Leitura\s*\n+([^\n]+) DATAS DE"
    ).unwrap();

    // Neighborhood/city/state: "INTERIOR / Giruá-RS" under the readings
    // header. The variant form also accepts RURAL and a second anchor.
    pub static ref COOP_LOCALITY_WITH_ROUTE: Regex = Regex::new(
        r"(?s)COD UA \d+ LEITURAS.*?\n\s*INTERIOR / ([A-Za-zÀ-ÖØ-öø-ÿ ,.-]+)-([A-Z]{2})"
    ).unwrap();

    pub static ref COOP_LOCALITY_WITHOUT_ROUTE: Regex = Regex::new(
        r"(?s)LEITURAS.*?\n\s*INTERIOR / ([A-Za-zÀ-ÖØ-öø-ÿ ,.-]+)-([A-Z]{2})"
    ).unwrap();

    pub static ref COOP_LOCALITY_VARIANT: Regex = Regex::new(
        r"(?s)(?:LEITURAS|UNIDADE CONSUMIDORA).*?\n\s*(RURAL|INTERIOR)\s*/\s*([A-Za-zÀ-ÖØ-öø-ÿ ,.-]+)-([A-Z]{2})"
    ).unwrap();

    pub static ref COOP_TAX_ID: Regex = Regex::new(
        r"CPF/CNPJ:\s*([\d*]{3}\.[\d*]{3}\.[\d*]{3}-\d{2}|\d{2}\.[\d*]{3}\.[\d*]{3}/\d{4}-\d{2})"
    ).unwrap();

    pub static ref COOP_CEP: Regex = Regex::new(
        r"CEP:\s*(\d{2}\s*\d{3}-\d{3})"
    ).unwrap();

    pub static ref COOP_UC_AFTER_CEP: Regex = Regex::new(
        r"CEP:\s*\d{2}\s*\d{3}-\d{3}\s*([\d-]+)"
    ).unwrap();

    pub static ref COOP_UC_ROUTE_SEQUENCE: Regex = Regex::new(
        r"(?s)UNIDADE CONSUMIDORA\s*\n+Rota:\s*\d+,\s*Sequência:\s*\d+\s*([\d-]+)"
    ).unwrap();

    // Certhil/Cermissões print the UC on the same line but without the
    // check-digit dash; the fallback takes the digit run only.
    pub static ref COOP_UC_ROUTE_SEQUENCE_DIGITS: Regex = Regex::new(
        r"(?s)UNIDADE CONSUMIDORA\s*\n+Rota:\s*\d+,\s*Sequência:\s*\d+\s*(\d+)"
    ).unwrap();

    pub static ref COOP_UC_LABELED: Regex = Regex::new(
        r"UC:\s*(\d+)[- ]"
    ).unwrap();

    pub static ref COOP_UC_CLIENT_CODE: Regex = Regex::new(
        r"CÓDIGO DO CLIENTE\s*\n*(\d+)"
    ).unwrap();
}

/// Street-and-number pattern used inside the dynamically-built address block
/// regex: a street-type abbreviation, the street name, and a house number.
pub const STREET_AND_NUMBER: &str =
    r"((?:R|AV|EST|ROD|AL|TV|PR|TR|VD|RUA|VL|PRC|PCA)\s+[A-Z ,.-]+?\s*\d+\s*(?:[A-Z0-9 ,.-]+)?)";

/// Build the address-block regex for the RGE layouts. The block is anchored
/// on the already-extracted customer name; DANFE invoices print a dash
/// between city and state, DANF3E ones do not.
pub fn address_block_regex(customer_name: &str, dash_before_state: bool) -> Option<Regex> {
    let tail = if dash_before_state {
        r"(\d{5}-\d{3})\s+([A-Z ,.-]+?)\s*-\s*([A-Z]{2})"
    } else {
        r"(\d{5}-\d{3})\s+([A-Z ,.-]+?)\s+([A-Z]{2})\b"
    };

    let pattern = format!(
        "(?s){}.*?{}\n([A-Z ,.-]+)\n{}",
        regex::escape(customer_name),
        STREET_AND_NUMBER,
        tail
    );

    Regex::new(&pattern).ok()
}
