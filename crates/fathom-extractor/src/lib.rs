//! Fathom Extractor
//!
//! Turns raw tanker-document transcriptions into structured records. The
//! input is whatever the upstream vision model produced for a photographed
//! bunker delivery receipt or tank gauge report: markdown pipe tables,
//! whitespace-aligned tables, loose `Label: value` lines, or — when the
//! model was asked for JSON and complied — an already-structured document.
//!
//! # Architecture
//!
//! ```text
//! Text → JSON recovery ─┬─ hit  → DocumentRecord
//!                       └─ miss → field locator + table scanners
//!                                   → value parsers → DocumentRecord
//! ```
//!
//! Extraction is total by design: a field that never matches becomes an
//! empty string, an unparsable number becomes `null`, an absent table
//! becomes an empty list. The worst possible input produces an empty
//! document, never an error. Only schema configuration can fail.
//!
//! # Example
//!
//! ```
//! use fathom_extractor::Extractor;
//!
//! let text = "Vessel Name: MATSON ANCHORAGE\n\
//!             Flag: U.S.\n\n\
//!             Product Description | Weight (MT) | Gross Bbls | Flash °C\n\
//!             IFO 380 | 903.81 | 5888.17 | 82\n";
//!
//! let extractor = Extractor::bunker_receipt();
//! let receipt = extractor.extract_receipt(text);
//!
//! assert_eq!(receipt.vessel_name, "MATSON ANCHORAGE");
//! assert_eq!(receipt.products.len(), 1);
//! assert_eq!(receipt.products[0].product_name, "IFO 380");
//! ```

#![warn(missing_docs)]

mod config;
mod crosstab;
mod error;
mod extractor;
mod fields;
mod normalize;
mod parser;
mod table;
mod tank;
mod value;

#[cfg(test)]
mod tests;

pub use config::{
    ColumnKind, ColumnSpec, CrosstabSpec, DocumentSchema, FieldSpec, TableSpec,
    MIN_HEADER_MATCHES,
};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::{looks_like_json, recover_document};
pub use tank::extract_tank_report;
pub use value::{parse_float_loose, parse_temperature_f, parse_viscosity};
