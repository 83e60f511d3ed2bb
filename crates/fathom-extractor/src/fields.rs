//! Locate labeled single-value fields in free-form text

use crate::config::FieldSpec;
use regex::Regex;
use tracing::warn;

/// Finds a labeled value (`Vessel Name: MATSON ANCHORAGE`) by trying an
/// ordered list of label patterns.
///
/// Alternatives are tried in priority order against the entire text: an
/// earlier pattern matching anywhere beats a later pattern matching sooner.
pub struct FieldMatcher {
    name: String,
    patterns: Vec<Regex>,
}

impl FieldMatcher {
    /// Compile a field spec into a matcher.
    ///
    /// Label patterns that fail to compile are skipped with a warning —
    /// a broken alternative degrades to "not found" rather than poisoning
    /// the whole extraction.
    pub fn compile(spec: &FieldSpec) -> Self {
        let patterns = spec
            .patterns
            .iter()
            .filter_map(|pattern| {
                match Regex::new(&format!(r"(?i){}\s*[:\-]?\s*(.+)", pattern)) {
                    Ok(regex) => Some(regex),
                    Err(e) => {
                        warn!("Skipping unusable label pattern '{}' for field '{}': {}", pattern, spec.name, e);
                        None
                    }
                }
            })
            .collect();

        Self {
            name: spec.name.clone(),
            patterns,
        }
    }

    /// The canonical field name this matcher fills.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Search `text` for the field, returning the trimmed remainder of the
    /// first matching line, or the empty string when no alternative matches.
    pub fn find(&self, text: &str) -> String {
        for pattern in &self.patterns {
            if let Some(caps) = pattern.captures(text) {
                return caps[1].trim().to_string();
            }
        }
        String::new()
    }
}
