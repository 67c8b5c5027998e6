//! Static lookup tables for the entrance and AC-side sizing parameters.

/// Entrance category row: service phases, feeder cable gauge and entrance
/// breaker rating for one standardized connection category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntranceCategory {
    pub code: &'static str,
    pub phases: u8,
    pub feeder_gauge_mm2: &'static str,
    pub breaker_a: u32,
}

/// The standardized entrance categories: M = single-phase, B = two-phase,
/// T = three-phase.
pub const ENTRANCE_CATEGORIES: [EntranceCategory; 18] = [
    EntranceCategory { code: "M1", phases: 1, feeder_gauge_mm2: "10", breaker_a: 32 },
    EntranceCategory { code: "M2", phases: 1, feeder_gauge_mm2: "10", breaker_a: 40 },
    EntranceCategory { code: "M3", phases: 1, feeder_gauge_mm2: "16", breaker_a: 50 },
    EntranceCategory { code: "M4", phases: 1, feeder_gauge_mm2: "16", breaker_a: 63 },
    EntranceCategory { code: "B1", phases: 2, feeder_gauge_mm2: "10", breaker_a: 32 },
    EntranceCategory { code: "B2", phases: 2, feeder_gauge_mm2: "10", breaker_a: 40 },
    EntranceCategory { code: "B3", phases: 2, feeder_gauge_mm2: "16", breaker_a: 50 },
    EntranceCategory { code: "B4", phases: 2, feeder_gauge_mm2: "16", breaker_a: 63 },
    EntranceCategory { code: "B5", phases: 2, feeder_gauge_mm2: "25", breaker_a: 70 },
    EntranceCategory { code: "T1", phases: 3, feeder_gauge_mm2: "10", breaker_a: 32 },
    EntranceCategory { code: "T2", phases: 3, feeder_gauge_mm2: "10", breaker_a: 40 },
    EntranceCategory { code: "T3", phases: 3, feeder_gauge_mm2: "16", breaker_a: 50 },
    EntranceCategory { code: "T4", phases: 3, feeder_gauge_mm2: "16", breaker_a: 63 },
    EntranceCategory { code: "T5", phases: 3, feeder_gauge_mm2: "25", breaker_a: 70 },
    EntranceCategory { code: "T6", phases: 3, feeder_gauge_mm2: "35", breaker_a: 100 },
    EntranceCategory { code: "T7", phases: 3, feeder_gauge_mm2: "50", breaker_a: 125 },
    EntranceCategory { code: "T8", phases: 3, feeder_gauge_mm2: "70", breaker_a: 150 },
    EntranceCategory { code: "T9", phases: 3, feeder_gauge_mm2: "95", breaker_a: 200 },
];

/// Look up an entrance category by its code, case-insensitively.
pub fn entrance_category(code: &str) -> Option<&'static EntranceCategory> {
    let code = code.trim();
    ENTRANCE_CATEGORIES
        .iter()
        .find(|row| row.code.eq_ignore_ascii_case(code))
}

/// AC-side parameter band keyed on the inverter power. Band edges are
/// inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcParameterBand {
    pub min_kw: f64,
    pub max_kw: f64,
    pub breaker_a: u32,
    pub cable_gauge_mm2: &'static str,
    pub rupture_range: &'static str,
    pub interruption_ka: u32,
    pub rated_voltage_v: u32,
}

impl AcParameterBand {
    pub fn contains(&self, kw: f64) -> bool {
        kw >= self.min_kw && kw <= self.max_kw
    }
}

/// Ordered AC sizing bands. There is no band between 10.9 and 12.0 kW:
/// systems in that range step up to a connection class this table does not
/// cover, and the lookup reports them as out of range rather than guessing.
pub const AC_BANDS: [AcParameterBand; 7] = [
    AcParameterBand { min_kw: 0.0, max_kw: 3.9, breaker_a: 16, cable_gauge_mm2: "4", rupture_range: "3-4.5 kA", interruption_ka: 3, rated_voltage_v: 220 },
    AcParameterBand { min_kw: 4.0, max_kw: 6.0, breaker_a: 25, cable_gauge_mm2: "4", rupture_range: "3-4.5 kA", interruption_ka: 3, rated_voltage_v: 220 },
    AcParameterBand { min_kw: 6.1, max_kw: 7.9, breaker_a: 32, cable_gauge_mm2: "6", rupture_range: "4.5-6 kA", interruption_ka: 5, rated_voltage_v: 220 },
    AcParameterBand { min_kw: 8.0, max_kw: 10.9, breaker_a: 40, cable_gauge_mm2: "10", rupture_range: "6-10 kA", interruption_ka: 6, rated_voltage_v: 380 },
    AcParameterBand { min_kw: 12.0, max_kw: 15.0, breaker_a: 63, cable_gauge_mm2: "16", rupture_range: "6-10 kA", interruption_ka: 6, rated_voltage_v: 380 },
    AcParameterBand { min_kw: 15.1, max_kw: 20.0, breaker_a: 80, cable_gauge_mm2: "25", rupture_range: "10-15 kA", interruption_ka: 10, rated_voltage_v: 380 },
    AcParameterBand { min_kw: 20.1, max_kw: 30.0, breaker_a: 100, cable_gauge_mm2: "35", rupture_range: "10-15 kA", interruption_ka: 10, rated_voltage_v: 380 },
];

/// First band whose inclusive range contains the given power, if any.
pub fn ac_band(kw: f64) -> Option<&'static AcParameterBand> {
    AC_BANDS.iter().find(|band| band.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entrance_category_lookup() {
        let t5 = entrance_category("T5").unwrap();
        assert_eq!(t5.phases, 3);
        assert_eq!(t5.feeder_gauge_mm2, "25");
        assert_eq!(t5.breaker_a, 70);

        // Case and whitespace tolerant.
        assert_eq!(entrance_category(" m1 ").unwrap().code, "M1");
        assert!(entrance_category("X9").is_none());
    }

    #[test]
    fn test_band_boundaries_are_inclusive() {
        assert_eq!(ac_band(3.9).unwrap().breaker_a, 16);
        assert_eq!(ac_band(4.0).unwrap().breaker_a, 25);
        assert_eq!(ac_band(10.9).unwrap().breaker_a, 40);
        assert_eq!(ac_band(12.0).unwrap().breaker_a, 63);
        assert_eq!(ac_band(30.0).unwrap().breaker_a, 100);
    }

    #[test]
    fn test_gap_and_overflow_have_no_band() {
        assert!(ac_band(11.5).is_none());
        assert!(ac_band(30.1).is_none());
        assert!(ac_band(-1.0).is_none());
    }
}
