//! Locale-aware display formatting for extracted and calculated values.
//!
//! Raw values stay untouched in the record; this layer only shapes them for
//! operator display. Anything that cannot be interpreted passes through
//! verbatim rather than erroring.

use chrono::NaiveDate;

use crate::calc::Calc;
use crate::models::config::DisplayConfig;
use crate::models::Field;

/// How a raw value should be interpreted for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Pass through as-is (names, codes, addresses).
    Plain,
    /// Decimal number, rendered with the configured separator.
    Numeric,
    /// Calendar date, rendered day-first with the configured separator.
    Date,
}

/// Value formatter configured with the display locale.
#[derive(Debug, Clone)]
pub struct ValueFormatter {
    date_separator: char,
    decimal_separator: char,
    placeholder: String,
    out_of_range: String,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        ValueFormatter::from_config(&DisplayConfig::default())
    }
}

impl ValueFormatter {
    pub fn from_config(config: &DisplayConfig) -> Self {
        ValueFormatter {
            date_separator: config.date_separator,
            decimal_separator: config.decimal_separator,
            placeholder: config.not_informed.clone(),
            out_of_range: config.out_of_range.clone(),
        }
    }

    /// Format a raw string for display. Empty input becomes the "not
    /// informed" placeholder; unparseable dates and numbers pass through.
    pub fn format_value(&self, raw: &str, kind: ValueKind) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return self.placeholder.clone();
        }

        match kind {
            ValueKind::Plain => raw.to_string(),
            ValueKind::Date => self.format_date(raw),
            ValueKind::Numeric => self.format_numeric(raw),
        }
    }

    /// Format an extraction field; sentinels render as the placeholder.
    pub fn format_field(&self, field: &Field, kind: ValueKind) -> String {
        match field {
            Field::Value(v) => self.format_value(v, kind),
            Field::NotFound | Field::NotCalculated => self.placeholder.clone(),
        }
    }

    /// Format a calculated parameter via its display rendering.
    pub fn format_calc<T: ToString>(&self, calc: &Calc<T>, kind: ValueKind) -> String {
        match calc {
            Calc::Value(v) => self.format_value(&v.to_string(), kind),
            Calc::NotCalculated => self.placeholder.clone(),
            Calc::OutOfRange => self.out_of_range.clone(),
        }
    }

    fn format_date(&self, raw: &str) -> String {
        const INPUT_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

        for fmt in INPUT_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
                let sep = self.date_separator;
                return date
                    .format(&format!("%d{sep}%m{sep}%Y"))
                    .to_string();
            }
        }
        raw.to_string()
    }

    fn format_numeric(&self, raw: &str) -> String {
        let normalized = raw.replace(',', ".");
        let Ok(number) = normalized.parse::<f64>() else {
            return raw.to_string();
        };

        if number.fract() == 0.0 {
            return format!("{}", number as i64);
        }

        // At most three fractional digits, trailing zeros dropped.
        let mut rendered = format!("{number:.3}");
        while rendered.ends_with('0') {
            rendered.pop();
        }
        if rendered.ends_with('.') {
            rendered.pop();
        }
        rendered.replace('.', &self.decimal_separator.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_and_sentinels_become_placeholder() {
        let f = ValueFormatter::default();
        assert_eq!(f.format_value("", ValueKind::Plain), "Não informado");
        assert_eq!(f.format_value("   ", ValueKind::Numeric), "Não informado");
        assert_eq!(
            f.format_field(&Field::NotFound, ValueKind::Plain),
            "Não informado"
        );
        assert_eq!(
            f.format_field(&Field::NotCalculated, ValueKind::Date),
            "Não informado"
        );
    }

    #[test]
    fn test_placeholder_is_idempotent() {
        let f = ValueFormatter::default();
        let once = f.format_field(&Field::NotFound, ValueKind::Plain);
        assert_eq!(f.format_value(&once, ValueKind::Plain), once);
    }

    #[test]
    fn test_date_formats_in_order() {
        let f = ValueFormatter::default();
        assert_eq!(f.format_value("2024-03-05", ValueKind::Date), "05/03/2024");
        assert_eq!(f.format_value("05/03/2024", ValueKind::Date), "05/03/2024");
        assert_eq!(f.format_value("05-03-2024", ValueKind::Date), "05/03/2024");
        // Not a date in any accepted shape: passthrough.
        assert_eq!(f.format_value("março de 2024", ValueKind::Date), "março de 2024");
    }

    #[test]
    fn test_numeric_integer_drops_fraction() {
        let f = ValueFormatter::default();
        assert_eq!(f.format_value("220", ValueKind::Numeric), "220");
        assert_eq!(f.format_value("220.000", ValueKind::Numeric), "220");
    }

    #[test]
    fn test_numeric_trims_and_localizes() {
        let f = ValueFormatter::default();
        assert_eq!(f.format_value("12.500", ValueKind::Numeric), "12,5");
        assert_eq!(f.format_value("5,5", ValueKind::Numeric), "5,5");
        assert_eq!(f.format_value("0.125", ValueKind::Numeric), "0,125");
        // Fourth decimal place rounds away.
        assert_eq!(f.format_value("1.2345", ValueKind::Numeric), "1,234");
    }

    #[test]
    fn test_numeric_passthrough_on_garbage() {
        let f = ValueFormatter::default();
        assert_eq!(f.format_value("SN", ValueKind::Numeric), "SN");
    }

    #[test]
    fn test_calc_rendering() {
        let f = ValueFormatter::default();
        assert_eq!(f.format_calc(&Calc::Value(5.5), ValueKind::Numeric), "5,5");
        assert_eq!(
            f.format_calc(&Calc::<u32>::NotCalculated, ValueKind::Numeric),
            "Não informado"
        );
        assert_eq!(
            f.format_calc(&Calc::<u32>::OutOfRange, ValueKind::Numeric),
            "Fora de faixa"
        );
    }
}
