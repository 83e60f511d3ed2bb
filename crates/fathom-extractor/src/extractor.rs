//! Core extraction orchestrator

use crate::config::DocumentSchema;
use crate::crosstab::CrosstabScanner;
use crate::fields::FieldMatcher;
use crate::normalize::normalize_table;
use crate::parser::recover_document;
use crate::table::TableScanner;
use fathom_domain::{BunkerReceipt, DocumentRecord};
use serde_json::Value;
use tracing::{debug, info};

/// The Extractor turns a raw document transcription into a structured
/// document record.
///
/// Extraction never fails: a document where nothing is recognizable yields
/// a record with every scalar empty and every list empty. If the input is
/// already JSON (the upstream model was asked for JSON and complied), that
/// document is returned as-is and the text heuristics never run.
pub struct Extractor {
    fields: Vec<FieldMatcher>,
    tables: Vec<TableScanner>,
    crosstabs: Vec<CrosstabScanner>,
}

impl Extractor {
    /// Compile a schema into an extractor.
    pub fn new(schema: &DocumentSchema) -> Self {
        Self {
            fields: schema.fields.iter().map(FieldMatcher::compile).collect(),
            tables: schema.tables.iter().map(TableScanner::compile).collect(),
            crosstabs: schema.crosstabs.iter().map(CrosstabScanner::compile).collect(),
        }
    }

    /// An extractor for the bunker delivery receipt layout.
    pub fn bunker_receipt() -> Self {
        Self::new(&DocumentSchema::bunker_receipt())
    }

    /// Extract a structured document from raw text.
    pub fn extract(&self, text: &str) -> DocumentRecord {
        if let Some(document) = recover_document(text) {
            debug!("Input already carries a JSON document, skipping heuristics");
            return document;
        }

        let mut document = DocumentRecord::new();

        for field in &self.fields {
            document.insert(field.name().to_string(), Value::String(field.find(text)));
        }

        for scanner in &self.tables {
            let rows = scanner
                .scan(text)
                .map(|table| normalize_table(&table).into_iter().map(Value::Object).collect())
                .unwrap_or_default();
            document.insert(scanner.name().to_string(), Value::Array(rows));
        }

        for scanner in &self.crosstabs {
            let entries = scanner.scan(text).into_iter().map(Value::Object).collect();
            document.insert(scanner.name().to_string(), Value::Array(entries));
        }

        info!(
            "Extracted document: {} scalar fields, {} tables, {} crosstabs",
            self.fields.len(),
            self.tables.len(),
            self.crosstabs.len()
        );

        document
    }

    /// Extract and view the result as a typed bunker delivery receipt.
    pub fn extract_receipt(&self, text: &str) -> BunkerReceipt {
        BunkerReceipt::from_document(self.extract(text))
    }
}
