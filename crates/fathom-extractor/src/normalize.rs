//! Turn mapped rows into typed records
//!
//! The output key set is fixed by the column map, not by what the source
//! document happened to contain: unmapped columns and missing cells get the
//! declared kind's empty value.

use crate::config::ColumnKind;
use crate::table::{ColumnBinding, LocatedTable};
use crate::value::{parse_float_loose, parse_temperature_f, parse_viscosity};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use tracing::warn;

/// Normalize one row of cells against the column map.
pub(crate) fn normalize_row(bindings: &[ColumnBinding], cells: &[String]) -> Map<String, Value> {
    let mut record = Map::new();
    for binding in bindings {
        let raw = binding
            .index
            .and_then(|idx| cells.get(idx))
            .map(String::as_str)
            .unwrap_or("");

        let value = match binding.kind {
            ColumnKind::Text => Value::String(raw.to_string()),
            ColumnKind::Number => float_value(parse_float_loose(raw)),
            ColumnKind::Temperature => float_value(parse_temperature_f(raw, &binding.hint)),
            ColumnKind::Viscosity => {
                serde_json::to_value(parse_viscosity(raw)).unwrap_or(Value::Null)
            }
        };
        record.insert(binding.name.clone(), value);
    }
    record
}

/// Normalize every row of a located table.
pub(crate) fn normalize_table(table: &LocatedTable) -> Vec<Map<String, Value>> {
    table
        .rows
        .iter()
        .map(|cells| normalize_row(&table.bindings, cells))
        .collect()
}

/// Normalize a located table straight into typed records, dropping rows the
/// target type cannot represent.
pub(crate) fn typed_rows<T: DeserializeOwned>(table: &LocatedTable) -> Vec<T> {
    table
        .rows
        .iter()
        .filter_map(|cells| {
            let record = normalize_row(&table.bindings, cells);
            match serde_json::from_value(Value::Object(record)) {
                Ok(typed) => Some(typed),
                Err(e) => {
                    warn!("Dropping row that does not fit the record type: {}", e);
                    None
                }
            }
        })
        .collect()
}

fn float_value(value: Option<f64>) -> Value {
    value
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
