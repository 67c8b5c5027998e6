//! Engineering parameter calculator.
//!
//! Takes the operator-entered system sizing form (entrance category, panel
//! and inverter counts and powers) and derives the electrical parameters of
//! the installation from the static lookup tables. The calculator is total:
//! every outcome is expressed in the returned struct, nothing errors.

pub mod tables;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use tables::{ac_band, entrance_category, AcParameterBand, EntranceCategory};

/// Outcome of one derived parameter.
///
/// `NotCalculated` means an input needed for this parameter was missing or
/// unparseable; `OutOfRange` means the inputs were valid but fall outside
/// the sizing tables (the 10.9-12.0 kW hole or beyond the last band).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Calc<T> {
    Value(T),
    #[default]
    NotCalculated,
    OutOfRange,
}

impl<T> Calc<T> {
    pub fn is_value(&self) -> bool {
        matches!(self, Calc::Value(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Calc::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Calc<U> {
        match self {
            Calc::Value(v) => Calc::Value(f(v)),
            Calc::NotCalculated => Calc::NotCalculated,
            Calc::OutOfRange => Calc::OutOfRange,
        }
    }
}

impl<T> From<Option<T>> for Calc<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Calc::Value(v),
            None => Calc::NotCalculated,
        }
    }
}

/// The sizing form as the operator submits it: free text, comma or dot
/// decimals, a stray `Wp` unit suffix tolerated on the panel power.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemInputs {
    pub category_code: String,
    pub panel_count: String,
    pub panel_power_wp: String,
    pub inverter_count: String,
    pub inverter_power_kw: String,
}

/// Derived electrical parameters of the installation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineeringParams {
    pub phases: Calc<u8>,
    pub feeder_gauge_mm2: Calc<String>,
    pub entrance_breaker_a: Calc<u32>,
    pub module_power_kw: Calc<f64>,
    pub peak_module_kwp: Calc<f64>,
    pub total_system_kwp: Calc<f64>,
    pub ac_breaker_a: Calc<u32>,
    pub ac_cable_gauge_mm2: Calc<String>,
    pub ac_rupture_range: Calc<String>,
    pub ac_interruption_ka: Calc<u32>,
    pub ac_rated_voltage_v: Calc<u32>,
}

/// Derive every engineering parameter from the sizing form.
pub fn calculate(inputs: &SystemInputs) -> EngineeringParams {
    let mut params = EngineeringParams::default();

    if let Some(category) = entrance_category(&inputs.category_code) {
        params.phases = Calc::Value(category.phases);
        params.feeder_gauge_mm2 = Calc::Value(category.feeder_gauge_mm2.to_string());
        params.entrance_breaker_a = Calc::Value(category.breaker_a);
    } else {
        debug!("unknown entrance category '{}'", inputs.category_code);
    }

    let panel_wp = parse_decimal(&inputs.panel_power_wp);
    let panels = parse_decimal(&inputs.panel_count);

    params.module_power_kw = panel_wp.map(|wp| wp / 1000.0).into();
    params.peak_module_kwp = match (panels, panel_wp) {
        (Some(n), Some(wp)) => Calc::Value(n * wp / 1000.0),
        _ => Calc::NotCalculated,
    };

    // The AC side keys off the inverter power. An unparseable power skips
    // the band lookup entirely; a parseable one that lands in no band marks
    // every AC field out of range.
    let inverter_kw = parse_decimal(&inputs.inverter_power_kw);
    let inverters = parse_decimal(&inputs.inverter_count);

    params.total_system_kwp = match (inverters, inverter_kw) {
        (Some(n), Some(kw)) => Calc::Value(n * kw),
        _ => Calc::NotCalculated,
    };

    if let Some(kw) = inverter_kw {
        match ac_band(kw) {
            Some(band) => {
                params.ac_breaker_a = Calc::Value(band.breaker_a);
                params.ac_cable_gauge_mm2 = Calc::Value(band.cable_gauge_mm2.to_string());
                params.ac_rupture_range = Calc::Value(band.rupture_range.to_string());
                params.ac_interruption_ka = Calc::Value(band.interruption_ka);
                params.ac_rated_voltage_v = Calc::Value(band.rated_voltage_v);
            }
            None => {
                debug!("inverter power {} kW falls outside the sizing bands", kw);
                params.ac_breaker_a = Calc::OutOfRange;
                params.ac_cable_gauge_mm2 = Calc::OutOfRange;
                params.ac_rupture_range = Calc::OutOfRange;
                params.ac_interruption_ka = Calc::OutOfRange;
                params.ac_rated_voltage_v = Calc::OutOfRange;
            }
        }
    }

    params
}

/// Parse an operator-entered decimal: trims, drops a trailing `Wp` unit,
/// accepts a comma decimal separator.
fn parse_decimal(raw: &str) -> Option<f64> {
    let cleaned = raw.trim();
    let cleaned = cleaned
        .strip_suffix("Wp")
        .or_else(|| cleaned.strip_suffix("wp"))
        .or_else(|| cleaned.strip_suffix("WP"))
        .unwrap_or(cleaned)
        .trim();

    if cleaned.is_empty() {
        return None;
    }
    cleaned.replace(',', ".").parse::<f64>().ok()
}
