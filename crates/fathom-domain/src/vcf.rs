//! Volume correction math for tank gauge readings
//!
//! Derives standard-condition quantities from API gravity and observed
//! temperature: specific gravity, density at 60 °F, the thermal expansion
//! coefficient, and the ASTM D1250 volume correction factor (generalized
//! fuel oils coefficient set).

use crate::tank::{TankReading, TankReport};

/// Reference temperature for standard volumes, °F.
pub const BASE_TEMPERATURE_F: f64 = 60.0;

/// Density of water at 60 °F, kg/m³.
pub const WATER_DENSITY_60F_KGM3: f64 = 999.016;

// ASTM D1250 generalized fuel oils coefficients.
const EXPANSION_K0: f64 = 103.8720;
const EXPANSION_K1: f64 = 0.2701;

/// Specific gravity at 60 °F from API gravity.
pub fn specific_gravity(api: f64) -> f64 {
    141.5 / (131.5 + api)
}

/// Density at 60 °F in kg/m³ from API gravity.
pub fn density_at_60f(api: f64) -> f64 {
    WATER_DENSITY_60F_KGM3 * specific_gravity(api)
}

/// Thermal expansion coefficient for a density at 60 °F.
pub fn thermal_expansion(density_kgm3: f64) -> f64 {
    (EXPANSION_K0 + EXPANSION_K1 * density_kgm3) / (density_kgm3 * density_kgm3)
}

/// Volume correction factor to 60 °F for a product of the given API gravity
/// observed at `temp_f`.
pub fn volume_correction_factor(api: f64, temp_f: f64) -> f64 {
    let alpha = thermal_expansion(density_at_60f(api));
    let delta_t = temp_f - BASE_TEMPERATURE_F;
    (-alpha * delta_t * (1.0 + 0.8 * alpha * delta_t)).exp()
}

impl TankReading {
    /// Fill in the derived correction fields.
    ///
    /// A reading missing either API gravity or temperature is left untouched.
    pub fn apply_volume_correction(&mut self) {
        let (Some(api), Some(temp_f)) = (self.api, self.temp_f) else {
            return;
        };

        let specific_g = specific_gravity(api);
        let density = WATER_DENSITY_60F_KGM3 * specific_g;

        self.change_temp = Some(temp_f - BASE_TEMPERATURE_F);
        self.specific_g = Some(specific_g);
        self.density_kgm3 = Some(density);
        self.alpha = Some(thermal_expansion(density));
        self.exp = Some(std::f64::consts::E);
        self.vcf = Some(volume_correction_factor(api, temp_f));
    }
}

impl TankReport {
    /// Fill in derived correction fields on every arrival and departure
    /// reading that carries both API gravity and temperature.
    pub fn apply_volume_corrections(&mut self) {
        for reading in self
            .tank_conditions
            .arrival
            .iter_mut()
            .chain(self.tank_conditions.departure.iter_mut())
        {
            reading.apply_volume_correction();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {} within {} of {}",
            actual,
            tolerance,
            expected
        );
    }

    #[test]
    fn test_specific_gravity_of_ten_api_is_unity() {
        assert_close(specific_gravity(10.0), 1.0, 1e-12);
    }

    #[test]
    fn test_density_of_ten_api_is_water_density() {
        assert_close(density_at_60f(10.0), 999.016, 1e-9);
    }

    #[test]
    fn test_thermal_expansion_reference_value() {
        assert_close(thermal_expansion(999.016), 0.0003744427624, 1e-12);
    }

    #[test]
    fn test_vcf_reference_value() {
        assert_close(volume_correction_factor(10.0, 70.0), 0.99625139939, 1e-9);
    }

    #[test]
    fn test_vcf_is_unity_at_base_temperature() {
        assert_close(volume_correction_factor(30.0, BASE_TEMPERATURE_F), 1.0, 1e-12);
    }

    #[test]
    fn test_vcf_exceeds_unity_below_base_temperature() {
        assert!(volume_correction_factor(30.0, 40.0) > 1.0);
    }

    #[test]
    fn test_apply_volume_correction_fills_derived_fields() {
        let mut reading = TankReading {
            tank: "1".to_string(),
            api: Some(10.0),
            temp_f: Some(70.0),
            ..Default::default()
        };
        reading.apply_volume_correction();

        assert_eq!(reading.change_temp, Some(10.0));
        assert_close(reading.specific_g.unwrap(), 1.0, 1e-12);
        assert_close(reading.density_kgm3.unwrap(), 999.016, 1e-9);
        assert_close(reading.alpha.unwrap(), 0.0003744427624, 1e-12);
        assert_close(reading.exp.unwrap(), std::f64::consts::E, 1e-12);
        assert_close(reading.vcf.unwrap(), 0.99625139939, 1e-9);
    }

    #[test]
    fn test_apply_volume_correction_skips_incomplete_readings() {
        let mut reading = TankReading {
            api: Some(10.0),
            ..Default::default()
        };
        reading.apply_volume_correction();
        assert_eq!(reading.vcf, None);
        assert_eq!(reading.change_temp, None);
    }

    #[test]
    fn test_report_corrections_cover_both_legs() {
        let reading = TankReading {
            api: Some(29.8),
            temp_f: Some(72.0),
            ..Default::default()
        };
        let mut report = TankReport::default();
        report.tank_conditions.arrival.push(reading.clone());
        report.tank_conditions.departure.push(reading);

        report.apply_volume_corrections();
        assert!(report.tank_conditions.arrival[0].vcf.is_some());
        assert!(report.tank_conditions.departure[0].vcf.is_some());
    }
}
