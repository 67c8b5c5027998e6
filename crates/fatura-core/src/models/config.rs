//! Configuration for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the fatura pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaturaConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Display/formatting configuration.
    pub display: DisplayConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Read only the first page (invoices carry all relevant data there).
    pub first_page_only: bool,

    /// Minimum text length to consider the PDF as text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            first_page_only: true,
            min_text_length: 50,
        }
    }
}

/// Display/formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Placeholder rendered for sentinel or empty values.
    pub not_informed: String,

    /// Placeholder rendered for out-of-range calculation results.
    pub out_of_range: String,

    /// Separator for rendered dates (DD/MM/YYYY by default).
    pub date_separator: char,

    /// Decimal separator for rendered numbers.
    pub decimal_separator: char,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            not_informed: "Não informado".to_string(),
            out_of_range: "Fora de faixa".to_string(),
            date_separator: '/',
            decimal_separator: ',',
        }
    }
}

impl FaturaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| crate::FaturaError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| crate::FaturaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_display_config() {
        let config = FaturaConfig::default();
        assert_eq!(config.display.not_informed, "Não informado");
        assert_eq!(config.display.decimal_separator, ',');
        assert!(config.pdf.first_page_only);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = FaturaConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: FaturaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.display.out_of_range, config.display.out_of_range);
    }
}
