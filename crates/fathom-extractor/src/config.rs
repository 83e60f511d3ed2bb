//! Document schema configuration
//!
//! The extraction engine is driven entirely by a [`DocumentSchema`]: which
//! labeled scalars to look for, which tables to locate, and which synonym
//! phrases identify each column. Schemas round-trip through TOML so a new
//! document layout is a configuration change, not a code change.

use crate::error::ExtractorError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum number of matched canonical fields for a line to qualify as a
/// table header row. Below this, a narrative sentence that happens to
/// contain one column word would be mistaken for a header.
pub const MIN_HEADER_MATCHES: usize = 3;

fn default_min_matched_columns() -> usize {
    MIN_HEADER_MATCHES
}

/// How a column's raw cell text is converted into a typed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Keep the cell text as-is
    Text,
    /// Loose float (thousands separators tolerated)
    Number,
    /// Temperature normalized to °F, using the header text as unit hint
    Temperature,
    /// Compound viscosity expression (value, unit, measured-at)
    Viscosity,
}

impl Default for ColumnKind {
    fn default() -> Self {
        ColumnKind::Text
    }
}

/// A labeled scalar field and its ordered label-pattern alternatives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Canonical field name in the output document
    pub name: String,

    /// Regex fragments tried in priority order against the whole text
    pub patterns: Vec<String>,
}

/// One canonical column of a record table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Canonical field name in each output record
    pub name: String,

    /// Synonym regex fragments tried in order against the header cells
    pub synonyms: Vec<String>,

    /// Conversion applied to this column's cells
    #[serde(default)]
    pub kind: ColumnKind,
}

/// A record table: one output record per data row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSpec {
    /// Key under which the record list appears in the output document
    pub name: String,

    /// Column whose presence is mandatory for a header row to qualify
    pub anchor: String,

    /// Matched-column threshold for header qualification
    #[serde(default = "default_min_matched_columns")]
    pub min_matched_columns: usize,

    /// Canonical columns recognized in this table
    pub columns: Vec<ColumnSpec>,
}

/// A crosstab table: the first column keys each row, the remaining header
/// cells are category labels, and every (row, category) cell fans out to its
/// own output record — the shape of a seal-number table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrosstabSpec {
    /// Key under which the fanned-out record list appears in the output
    pub name: String,

    /// Synonyms identifying the key column in a header row
    pub key_synonyms: Vec<String>,

    /// Category keywords, at least one of which must appear in a header row
    pub type_keywords: Vec<String>,

    /// Output field name for the row key
    pub key_field: String,

    /// Output field name for the category label
    pub type_field: String,

    /// Output field name for the cell value
    pub value_field: String,
}

/// Everything the extraction engine needs to know about one document layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSchema {
    /// Labeled scalar fields
    #[serde(default)]
    pub fields: Vec<FieldSpec>,

    /// Record tables
    #[serde(default)]
    pub tables: Vec<TableSpec>,

    /// Crosstab tables
    #[serde(default)]
    pub crosstabs: Vec<CrosstabSpec>,
}

impl DocumentSchema {
    /// The bunker delivery receipt layout: vessel header fields, the product
    /// specification table, and the sample seal-number crosstab.
    pub fn bunker_receipt() -> Self {
        Self {
            fields: vec![
                field("vessel_name", &["vessel name", r"bunkers delivered to \(vessel name\)"]),
                field("barge_name", &["barge name", "delivery company", "barge"]),
                field("vessel_flag", &["vessel flag", "flag"]),
                field("port_delivery_location", &["delivery location", "port", "terminal location"]),
                field("date", &["date", "date of commencement of delivery"]),
            ],
            tables: vec![TableSpec {
                name: "products".to_string(),
                anchor: "product_name".to_string(),
                min_matched_columns: MIN_HEADER_MATCHES,
                columns: vec![
                    column("product_name", &["product description", "fuel grade", "product"], ColumnKind::Text),
                    column("weight_mt", &[r"weight \(mt\)", "metric tons"], ColumnKind::Number),
                    column("gross_barrels", &["gross bbls", "gross barrels"], ColumnKind::Number),
                    column("net_barrels", &["net bbls", "net barrels"], ColumnKind::Number),
                    column("api_gravity", &["gravity api", "api @ 60f", "api @ 15c", "api"], ColumnKind::Number),
                    column("density_kgm3", &["density", "density @ 15c", "density @ 60f"], ColumnKind::Number),
                    column("viscosity", &["visc", "viscosity", "visc cst @ 40c", "visc cst @ 50c"], ColumnKind::Viscosity),
                    column("delivery_temperature_f", &["temp °c", "temp °f", "temp @ delivery", "temp"], ColumnKind::Temperature),
                    column("flash_point_f", &["flash °c", "flash °f", "flash point"], ColumnKind::Temperature),
                    column("pour_point_f", &["pour °c", "pour °f", "pour point"], ColumnKind::Temperature),
                    column("sulfur_content_percent", &["sulfur % wt", r"sulphur % \(m/m\)", "sulfur"], ColumnKind::Number),
                ],
            }],
            crosstabs: vec![CrosstabSpec {
                name: "sample_seal_numbers".to_string(),
                key_synonyms: vec!["product".to_string()],
                type_keywords: vec![
                    "marpol".to_string(),
                    "supplier".to_string(),
                    "ship".to_string(),
                    "barge".to_string(),
                ],
                key_field: "product".to_string(),
                type_field: "sample_type".to_string(),
                value_field: "seal_number".to_string(),
            }],
        }
    }

    /// Load a schema from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize the schema to a TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }

    /// Check the schema for authoring mistakes: empty names, anchors that
    /// name no declared column, thresholds that can never be met, and
    /// pattern fragments that do not compile.
    pub fn validate(&self) -> Result<(), ExtractorError> {
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(ExtractorError::Schema("field with empty name".to_string()));
            }
            for pattern in &field.patterns {
                check_fragment(pattern, &field.name)?;
            }
        }

        for table in &self.tables {
            if table.name.is_empty() {
                return Err(ExtractorError::Schema("table with empty name".to_string()));
            }
            if !table.columns.iter().any(|c| c.name == table.anchor) {
                return Err(ExtractorError::Schema(format!(
                    "table '{}' anchor '{}' names no declared column",
                    table.name, table.anchor
                )));
            }
            if table.min_matched_columns == 0 || table.min_matched_columns > table.columns.len() {
                return Err(ExtractorError::Schema(format!(
                    "table '{}' threshold {} is outside 1..={}",
                    table.name,
                    table.min_matched_columns,
                    table.columns.len()
                )));
            }
            for col in &table.columns {
                for synonym in &col.synonyms {
                    check_fragment(synonym, &col.name)?;
                }
            }
        }

        for crosstab in &self.crosstabs {
            if crosstab.name.is_empty() {
                return Err(ExtractorError::Schema("crosstab with empty name".to_string()));
            }
            for fragment in crosstab.key_synonyms.iter().chain(&crosstab.type_keywords) {
                check_fragment(fragment, &crosstab.name)?;
            }
        }

        Ok(())
    }
}

fn check_fragment(fragment: &str, owner: &str) -> Result<(), ExtractorError> {
    Regex::new(&format!("(?i){}", fragment)).map_err(|e| {
        ExtractorError::Schema(format!("'{}' has unusable pattern '{}': {}", owner, fragment, e))
    })?;
    Ok(())
}

fn field(name: &str, patterns: &[&str]) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    }
}

fn column(name: &str, synonyms: &[&str], kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        name: name.to_string(),
        synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        kind,
    }
}
