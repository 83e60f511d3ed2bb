//! Bunker delivery receipt records

use crate::merge::DocumentRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A structured bunker delivery receipt.
///
/// Every scalar field defaults to the empty string when the source document
/// never mentions it — downstream serialization never has to deal with
/// missing keys. Instances are value objects: equality is structural and the
/// only sanctioned way to combine two receipts is [`crate::merge_documents`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BunkerReceipt {
    /// Name of the vessel receiving bunkers
    pub vessel_name: String,

    /// Delivering barge or delivery company
    pub barge_name: String,

    /// Flag state of the receiving vessel
    pub vessel_flag: String,

    /// Port or terminal where delivery took place
    pub port_delivery_location: String,

    /// Delivery date as written on the document
    pub date: String,

    /// One entry per delivered product
    pub products: Vec<ProductRecord>,

    /// Retained-sample seal numbers, one entry per (product, sample type)
    pub sample_seal_numbers: Vec<SealRecord>,
}

impl BunkerReceipt {
    /// Build a typed receipt from a generic extracted document.
    ///
    /// Tolerant by design: a document whose shape does not line up with the
    /// receipt schema (for example an arbitrary JSON object recovered from a
    /// model response) yields the all-empty default rather than an error.
    pub fn from_document(document: DocumentRecord) -> Self {
        serde_json::from_value(Value::Object(document)).unwrap_or_default()
    }
}

/// One delivered or measured product line.
///
/// Numeric fields are `None` whenever the source cell was absent or
/// unparsable; extraction never fails on a bad token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRecord {
    /// Product name or fuel grade description
    pub product_name: String,

    /// Delivered mass in metric tons
    pub weight_mt: Option<f64>,

    /// Gross volume in barrels
    pub gross_barrels: Option<f64>,

    /// Net volume in barrels
    pub net_barrels: Option<f64>,

    /// API gravity
    pub api_gravity: Option<f64>,

    /// Density in kg/m³
    pub density_kgm3: Option<f64>,

    /// Kinematic viscosity reading
    pub viscosity: Viscosity,

    /// Temperature at delivery, normalized to °F
    pub delivery_temperature_f: Option<f64>,

    /// Flash point, normalized to °F
    pub flash_point_f: Option<f64>,

    /// Pour point, normalized to °F
    pub pour_point_f: Option<f64>,

    /// Sulfur content, % by weight
    pub sulfur_content_percent: Option<f64>,
}

/// A compound viscosity reading: numeric value, unit, and the temperature at
/// which it was measured. The measured-at condition stays free text ("50C")
/// rather than a parsed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viscosity {
    /// Numeric viscosity value
    pub value: Option<f64>,

    /// Unit string as written, e.g. "cSt"
    pub unit: String,

    /// Measurement condition as written, e.g. "50C"
    pub measured_at: String,
}

/// A retained-sample seal entry.
///
/// The same seal number may legitimately recur across sample types; only the
/// (product, sample type) pair is unique within a receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SealRecord {
    /// Product the sample was drawn from
    pub product: String,

    /// Sample type label, e.g. "Marpol" or "Barge"
    pub sample_type: String,

    /// Seal number as written on the document
    pub seal_number: String,
}
