//! Locate crosstab tables and fan their cells out to records
//!
//! Seal-number tables put the product in the first column and one sample
//! type per remaining header cell; each populated cell becomes its own
//! (product, sample type, seal number) record.

use crate::config::CrosstabSpec;
use crate::table::{is_alignment_row, split_cells, Delimiter};
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Scans text for one configured crosstab shape.
pub(crate) struct CrosstabScanner {
    name: String,
    key_field: String,
    type_field: String,
    value_field: String,
    key_synonyms: Vec<Regex>,
    type_keywords: Vec<Regex>,
}

impl CrosstabScanner {
    pub(crate) fn compile(spec: &CrosstabSpec) -> Self {
        Self {
            name: spec.name.clone(),
            key_field: spec.key_field.clone(),
            type_field: spec.type_field.clone(),
            value_field: spec.value_field.clone(),
            key_synonyms: compile_fragments(&spec.key_synonyms, &spec.name),
            type_keywords: compile_fragments(&spec.type_keywords, &spec.name),
        }
    }

    /// Output key for this crosstab's record list.
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Find the first matching crosstab and fan out its cells. Absent table
    /// means an empty list, not an error.
    pub(crate) fn scan(&self, text: &str) -> Vec<Map<String, Value>> {
        let lines: Vec<&str> = text.lines().collect();

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i].trim();
            if line.is_empty() {
                i += 1;
                continue;
            }

            let delimiter = Delimiter::detect(line);
            let header_cells: Vec<String> = split_cells(line, delimiter)
                .into_iter()
                .map(|cell| cell.to_lowercase())
                .collect();

            if self.qualifies(&header_cells) {
                debug!("Accepted '{}' crosstab header at line {}", self.name, i);
                let sample_types: Vec<String> = header_cells
                    .iter()
                    .skip(1)
                    .filter(|cell| !cell.is_empty())
                    .map(|cell| title_case(cell))
                    .collect();
                return self.collect_rows(&lines, i + 1, delimiter, &sample_types);
            }

            i += 1;
        }

        Vec::new()
    }

    /// A header row needs the key column plus at least one category keyword.
    fn qualifies(&self, cells: &[String]) -> bool {
        let has_key = cells
            .iter()
            .any(|cell| self.key_synonyms.iter().any(|re| re.is_match(cell)));
        let has_type = cells
            .iter()
            .any(|cell| self.type_keywords.iter().any(|re| re.is_match(cell)));
        has_key && has_type
    }

    fn collect_rows(
        &self,
        lines: &[&str],
        start: usize,
        delimiter: Delimiter,
        sample_types: &[String],
    ) -> Vec<Map<String, Value>> {
        let mut records = Vec::new();
        for line in &lines[start..] {
            let row_line = line.trim();
            if row_line.is_empty() {
                break;
            }
            let cells = split_cells(row_line, delimiter);
            if is_alignment_row(&cells) {
                continue;
            }
            let Some(key) = cells.first() else {
                warn!("Dropping empty row under '{}' crosstab header", self.name);
                continue;
            };
            for (offset, sample_type) in sample_types.iter().enumerate() {
                let idx = offset + 1;
                match cells.get(idx) {
                    Some(value) if !value.is_empty() => {
                        let mut record = Map::new();
                        record.insert(self.key_field.clone(), Value::String(key.clone()));
                        record.insert(self.type_field.clone(), Value::String(sample_type.clone()));
                        record.insert(self.value_field.clone(), Value::String(value.clone()));
                        records.push(record);
                    }
                    _ => {}
                }
            }
        }
        records
    }
}

fn compile_fragments(fragments: &[String], owner: &str) -> Vec<Regex> {
    fragments
        .iter()
        .filter_map(|fragment| match Regex::new(&format!("(?i){}", fragment)) {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!("Skipping unusable pattern '{}' for crosstab '{}': {}", fragment, owner, e);
                None
            }
        })
        .collect()
}

/// Uppercase the first letter of every word, lowercasing the rest, the way
/// sample-type labels are displayed.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_boundary = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_boundary {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_boundary = false;
        } else {
            out.push(ch);
            at_boundary = true;
        }
    }
    out
}
