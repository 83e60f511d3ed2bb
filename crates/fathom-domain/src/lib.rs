//! Fathom Domain Layer
//!
//! This crate contains the value objects and pure computation shared by the
//! Fathom extraction service. Everything here is synchronous, allocation-only
//! logic: typed records for the two tanker document variants, the volume
//! correction math applied to tank gauge readings, and the recursive document
//! merge used when a re-scan of the same job arrives.
//!
//! ## Key Concepts
//!
//! - **Bunker delivery receipt**: scalar header fields plus product and
//!   seal-number line items. Scalars default to empty strings, numerics to
//!   `None` — a partial document is always representable.
//! - **Tank gauge report**: arrival/departure tank readings, discharged
//!   product totals, an event timeline, and draft readings. Serialized with
//!   the camelCase key set the surrounding service stores per job.
//! - **Volume correction**: API gravity and observed temperature derive
//!   specific gravity, density, thermal expansion, and the ASTM D1250 VCF.
//! - **Document merge**: a deep merge over JSON values that never clobbers
//!   populated fields and unions line-item lists without duplicates.
//!
//! Records are plain value objects with structural equality; there is no
//! identity, no shared state, and no I/O in this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod merge;
pub mod receipt;
pub mod tank;
pub mod vcf;

// Re-exports for convenience
pub use merge::{merge_documents, DocumentRecord};
pub use receipt::{BunkerReceipt, ProductRecord, SealRecord, Viscosity};
pub use tank::{
    DischargedProduct, DraftReading, TankConditions, TankReading, TankReport, TimelineEvent,
};
