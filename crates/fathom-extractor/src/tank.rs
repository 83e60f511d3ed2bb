//! Tank gauge report extraction
//!
//! The upstream model is asked to answer with JSON for gauge reports, so
//! recovery of an embedded JSON document is the main path. When the model
//! answers with markdown tables instead, the table machinery takes over
//! with the five table shapes a gauge report carries: arrival and departure
//! tank conditions (same header shape, assigned by reading order),
//! discharged product totals, the time log, and draft readings.

use crate::config::{ColumnKind, ColumnSpec, TableSpec};
use crate::normalize::typed_rows;
use crate::parser::recover_document;
use crate::table::TableScanner;
use fathom_domain::{DischargedProduct, DraftReading, TankReading, TankReport, TimelineEvent};
use serde_json::Value;
use tracing::warn;

/// Extract a tank gauge report from raw text.
///
/// Like all extraction this is total: unrecognizable input yields an empty
/// report. Volume-correction fields are not computed here — apply
/// [`TankReport::apply_volume_corrections`] as an explicit second step.
pub fn extract_tank_report(text: &str) -> TankReport {
    if let Some(document) = recover_document(text) {
        match serde_json::from_value(Value::Object(document)) {
            Ok(report) => return report,
            Err(e) => {
                warn!("Recovered JSON does not fit a tank report, falling back to tables: {}", e);
            }
        }
    }

    let mut report = TankReport::default();

    let conditions = TableScanner::compile(&tank_conditions_spec()).scan_all(text);
    if let Some(table) = conditions.first() {
        report.tank_conditions.arrival = typed_rows::<TankReading>(table);
    }
    if let Some(table) = conditions.get(1) {
        report.tank_conditions.departure = typed_rows::<TankReading>(table);
    }

    if let Some(table) = TableScanner::compile(&discharged_spec()).scan(text) {
        report.products_discharged = typed_rows::<DischargedProduct>(&table);
    }
    if let Some(table) = TableScanner::compile(&timeline_spec()).scan(text) {
        report.event_timeline = typed_rows::<TimelineEvent>(&table);
    }
    if let Some(table) = TableScanner::compile(&draft_spec()).scan(text) {
        report.draft_readings = typed_rows::<DraftReading>(&table);
    }

    report
}

fn tank_conditions_spec() -> TableSpec {
    TableSpec {
        name: "tankConditions".to_string(),
        anchor: "tank".to_string(),
        min_matched_columns: 3,
        columns: vec![
            column("tank", &["tank"], ColumnKind::Text),
            column("productName", &["product name", "product"], ColumnKind::Text),
            column("api", &["api"], ColumnKind::Number),
            column("ullageFt", &[r"ullage \(ft\)", "ullage ft"], ColumnKind::Number),
            column("ullageIn", &[r"ullage \(in\)", "ullage in"], ColumnKind::Number),
            column("tempF", &["temp"], ColumnKind::Temperature),
            column("waterBbls", &["water"], ColumnKind::Number),
            column("grossBbls", &["gross bbls"], ColumnKind::Number),
            column("netBbls", &["net bbls"], ColumnKind::Number),
            column("metricTons", &["metric tons"], ColumnKind::Number),
        ],
    }
}

fn discharged_spec() -> TableSpec {
    TableSpec {
        name: "productsDischarged".to_string(),
        anchor: "productDischarged".to_string(),
        min_matched_columns: 3,
        columns: vec![
            column("productDischarged", &["product discharged"], ColumnKind::Text),
            column("api", &["api"], ColumnKind::Number),
            column("grossBbls", &["gross bbls"], ColumnKind::Number),
            column("netBbls", &["net bbls"], ColumnKind::Number),
            column("metricTons", &["metric tons"], ColumnKind::Number),
        ],
    }
}

fn timeline_spec() -> TableSpec {
    TableSpec {
        name: "eventTimeline".to_string(),
        anchor: "event".to_string(),
        min_matched_columns: 3,
        columns: vec![
            column("event", &["event"], ColumnKind::Text),
            column("date", &["date"], ColumnKind::Text),
            column("time", &["time"], ColumnKind::Text),
        ],
    }
}

fn draft_spec() -> TableSpec {
    TableSpec {
        name: "draftReadings".to_string(),
        anchor: "stage".to_string(),
        min_matched_columns: 3,
        columns: vec![
            column("stage", &["arrival/departure"], ColumnKind::Text),
            column("position", &["fwd/aft"], ColumnKind::Text),
            column("port", &["port"], ColumnKind::Number),
            column("stbd", &["stbd"], ColumnKind::Number),
        ],
    }
}

fn column(name: &str, synonyms: &[&str], kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        name: name.to_string(),
        synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        kind,
    }
}
