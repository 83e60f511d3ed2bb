//! Locate record tables and map their columns
//!
//! A table is found by scanning lines for a header row: cells are matched
//! against each canonical column's synonym phrases, and the line qualifies
//! only when the anchor column is present and enough columns matched in
//! total. Data rows follow the header until the first blank line, split with
//! whatever delimiter style the header used.

use crate::config::{ColumnKind, TableSpec};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace-run pattern"));

/// Cell delimiter style, decided per header line and reused for its rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
    /// Markdown-style pipes
    Pipe,
    /// Runs of two or more whitespace characters
    Whitespace,
}

impl Delimiter {
    pub(crate) fn detect(line: &str) -> Self {
        if line.contains('|') {
            Delimiter::Pipe
        } else {
            Delimiter::Whitespace
        }
    }
}

/// Split a line into trimmed cells with the given delimiter style.
pub(crate) fn split_cells(line: &str, delimiter: Delimiter) -> Vec<String> {
    match delimiter {
        Delimiter::Pipe => line
            .trim()
            .trim_matches('|')
            .split('|')
            .map(|cell| cell.trim().to_string())
            .collect(),
        Delimiter::Whitespace => WHITESPACE_RUN_RE
            .split(line.trim())
            .map(|cell| cell.to_string())
            .collect(),
    }
}

/// A markdown alignment row (`| ---- | :---: |`) separates a header from its
/// data and must not be read as a record.
pub(crate) fn is_alignment_row(cells: &[String]) -> bool {
    !cells.is_empty()
        && cells
            .iter()
            .all(|cell| !cell.is_empty() && cell.chars().all(|c| c == '-' || c == ':'))
}

/// One canonical column's position within a located table.
///
/// Unmatched columns keep `index: None` so the normalizer can still emit the
/// full canonical key set.
#[derive(Debug, Clone)]
pub(crate) struct ColumnBinding {
    pub name: String,
    pub kind: ColumnKind,
    pub index: Option<usize>,
    /// Lowercased text of the matched header cell, used as a unit hint
    pub hint: String,
}

/// A located table: the column map plus its raw data rows.
#[derive(Debug, Clone)]
pub(crate) struct LocatedTable {
    pub bindings: Vec<ColumnBinding>,
    pub rows: Vec<Vec<String>>,
}

struct CompiledColumn {
    name: String,
    kind: ColumnKind,
    synonyms: Vec<Regex>,
}

/// Scans text for tables of one configured shape.
pub(crate) struct TableScanner {
    name: String,
    anchor: String,
    min_matched: usize,
    columns: Vec<CompiledColumn>,
}

impl TableScanner {
    pub(crate) fn compile(spec: &TableSpec) -> Self {
        let columns = spec
            .columns
            .iter()
            .map(|col| CompiledColumn {
                name: col.name.clone(),
                kind: col.kind,
                synonyms: col
                    .synonyms
                    .iter()
                    .filter_map(|synonym| match Regex::new(&format!("(?i){}", synonym)) {
                        Ok(regex) => Some(regex),
                        Err(e) => {
                            warn!("Skipping unusable synonym '{}' for column '{}': {}", synonym, col.name, e);
                            None
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            name: spec.name.clone(),
            anchor: spec.anchor.clone(),
            min_matched: spec.min_matched_columns,
            columns,
        }
    }

    /// Output key for this table's record list.
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Find the first table of this shape.
    pub(crate) fn scan(&self, text: &str) -> Option<LocatedTable> {
        let lines: Vec<&str> = text.lines().collect();
        self.scan_from(&lines, 0).map(|(table, _)| table)
    }

    /// Find every table of this shape, in reading order. Scanning resumes
    /// after each located table's terminating blank line.
    pub(crate) fn scan_all(&self, text: &str) -> Vec<LocatedTable> {
        let lines: Vec<&str> = text.lines().collect();
        let mut tables = Vec::new();
        let mut position = 0;
        while let Some((table, next)) = self.scan_from(&lines, position) {
            tables.push(table);
            position = next;
        }
        tables
    }

    fn scan_from(&self, lines: &[&str], start: usize) -> Option<(LocatedTable, usize)> {
        let mut i = start;
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

            if let Some(bindings) = self.match_header(&header_cells) {
                debug!("Accepted '{}' header at line {}", self.name, i);
                let mapped = bindings.iter().filter(|b| b.index.is_some()).count();
                let mut rows = Vec::new();
                let mut j = i + 1;
                while j < lines.len() {
                    let row_line = lines[j].trim();
                    if row_line.is_empty() {
                        break;
                    }
                    let cells = split_cells(row_line, delimiter);
                    if is_alignment_row(&cells) {
                        j += 1;
                        continue;
                    }
                    if cells.len() < mapped {
                        warn!("Dropping short row under '{}' header: {} cells, {} mapped columns", self.name, cells.len(), mapped);
                        j += 1;
                        continue;
                    }
                    rows.push(cells);
                    j += 1;
                }
                return Some((LocatedTable { bindings, rows }, j));
            }

            i += 1;
        }
        None
    }

    /// Map header cells to canonical columns. For each column the synonym
    /// list is the outer loop and cell order the inner one: an earlier
    /// synonym wins even when a later synonym would match an earlier cell.
    fn match_header(&self, cells: &[String]) -> Option<Vec<ColumnBinding>> {
        let mut bindings = Vec::with_capacity(self.columns.len());
        for col in &self.columns {
            let mut binding = ColumnBinding {
                name: col.name.clone(),
                kind: col.kind,
                index: None,
                hint: String::new(),
            };
            'synonyms: for synonym in &col.synonyms {
                for (idx, cell) in cells.iter().enumerate() {
                    if synonym.is_match(cell) {
                        binding.index = Some(idx);
                        binding.hint = cell.clone();
                        break 'synonyms;
                    }
                }
            }
            bindings.push(binding);
        }

        if self.qualifies(&bindings) {
            Some(bindings)
        } else {
            None
        }
    }

    /// Header qualification score: the anchor column must be mapped and the
    /// total mapped count must reach the configured threshold.
    fn qualifies(&self, bindings: &[ColumnBinding]) -> bool {
        let matched = bindings.iter().filter(|b| b.index.is_some()).count();
        let anchored = bindings
            .iter()
            .any(|b| b.index.is_some() && b.name == self.anchor);
        anchored && matched >= self.min_matched
    }
}
