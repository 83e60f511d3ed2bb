//! Tank gauge report records
//!
//! The serialized key set is camelCase to match the job JSON the surrounding
//! service stores and renders; the derived fields added by
//! [`crate::vcf`] only appear once they have been computed.

use serde::{Deserialize, Serialize};

/// A structured tank gauge report: arrival and departure tank conditions,
/// discharged product totals, the event timeline, and draft readings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TankReport {
    /// Per-tank readings at arrival and departure
    pub tank_conditions: TankConditions,

    /// Per-product discharged totals
    pub products_discharged: Vec<DischargedProduct>,

    /// Dated events from the document's time log
    pub event_timeline: Vec<TimelineEvent>,

    /// Arrival and departure drafts in decimal feet
    pub draft_readings: Vec<DraftReading>,
}

/// Tank readings grouped by voyage leg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TankConditions {
    /// Readings taken on arrival
    pub arrival: Vec<TankReading>,

    /// Readings taken on departure
    pub departure: Vec<TankReading>,
}

/// One gauged tank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TankReading {
    /// Tank designation, e.g. "1P"
    pub tank: String,

    /// Product in the tank
    pub product_name: String,

    /// API gravity
    pub api: Option<f64>,

    /// Ullage, whole feet
    pub ullage_ft: Option<f64>,

    /// Ullage, inches
    pub ullage_in: Option<f64>,

    /// Observed temperature in °F
    pub temp_f: Option<f64>,

    /// Free water in barrels
    pub water_bbls: Option<f64>,

    /// Gross observed volume in barrels
    pub gross_bbls: Option<f64>,

    /// Net standard volume in barrels
    pub net_bbls: Option<f64>,

    /// Mass in metric tons
    pub metric_tons: Option<f64>,

    /// Temperature delta from the 60 °F reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_temp: Option<f64>,

    /// Specific gravity at 60 °F
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_g: Option<f64>,

    /// Density at 60 °F in kg/m³
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_kgm3: Option<f64>,

    /// Thermal expansion coefficient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,

    /// Exponent base shown alongside the correction in the rendered report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<f64>,

    /// Volume correction factor to 60 °F
    #[serde(rename = "VCF", skip_serializing_if = "Option::is_none")]
    pub vcf: Option<f64>,
}

/// One discharged-product total line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DischargedProduct {
    /// Product description
    pub product_discharged: String,

    /// API gravity
    pub api: Option<f64>,

    /// Gross volume in barrels
    pub gross_bbls: Option<f64>,

    /// Net volume in barrels
    pub net_bbls: Option<f64>,

    /// Mass in metric tons
    pub metric_tons: Option<f64>,
}

/// One entry from the date/time log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineEvent {
    /// Event description, e.g. "Commenced discharge"
    pub event: String,

    /// Date as written
    pub date: String,

    /// Time as written
    pub time: String,
}

/// One draft reading in decimal feet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftReading {
    /// Voyage leg, "Arrival" or "Departure"
    pub stage: String,

    /// Hull position, "Fwd" or "Aft"
    pub position: String,

    /// Port-side draft
    pub port: Option<f64>,

    /// Starboard-side draft
    pub stbd: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_key_set() {
        let reading = TankReading {
            tank: "1".to_string(),
            product_name: "ANS CRUDE".to_string(),
            api: Some(29.8),
            temp_f: Some(70.0),
            ..Default::default()
        };
        let text = serde_json::to_string(&reading).unwrap();
        assert!(text.contains("\"productName\""));
        assert!(text.contains("\"tempF\""));
        assert!(text.contains("\"ullageFt\""));
    }

    #[test]
    fn test_derived_fields_hidden_until_computed() {
        let text = serde_json::to_string(&TankReading::default()).unwrap();
        assert!(!text.contains("VCF"));
        assert!(!text.contains("specificG"));
        // Raw gauge fields stay visible as null
        assert!(text.contains("\"api\":null"));
    }

    #[test]
    fn test_deserializes_stored_job_json() {
        let text = r#"{
            "tankConditions": {
                "arrival": [{"tank": "1", "productName": "Prod", "api": 10.0,
                             "ullageFt": 0, "ullageIn": 0, "tempF": 70.0,
                             "waterBbls": 0, "grossBbls": 0, "netBbls": 0,
                             "metricTons": 0}],
                "departure": []
            },
            "productsDischarged": [],
            "eventTimeline": [],
            "draftReadings": []
        }"#;
        let report: TankReport = serde_json::from_str(text).unwrap();
        assert_eq!(report.tank_conditions.arrival.len(), 1);
        assert_eq!(report.tank_conditions.arrival[0].api, Some(10.0));
        assert_eq!(report.tank_conditions.arrival[0].temp_f, Some(70.0));
        assert_eq!(report.tank_conditions.arrival[0].vcf, None);
    }

    #[test]
    fn test_partial_report_deserializes_with_defaults() {
        let report: TankReport = serde_json::from_str(r#"{"eventTimeline": []}"#).unwrap();
        assert_eq!(report, TankReport::default());
    }
}
