//! Safety/toxicology reference tables.
//!
//! Four independently sourced tables with a common semantic shape: a
//! substance name, an optional chemical registry (CAS) number, and a
//! verdict. Loaded once at process start from their materialized JSON form
//! and read-only thereafter — shared freely across requests with no locking.

use serde::Deserialize;
use std::path::Path;

use crate::error::{AnalysisError, Result};

/// One row of a reference table. Row order is preserved from the source
/// file: "first match wins" must be deterministic and reproducible.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceRow {
    /// Substance/agent name as the source body publishes it.
    pub substance: String,

    /// CAS registry number, where the source provides one.
    #[serde(default)]
    pub cas_number: Option<String>,

    /// The source's classification/verdict text.
    pub verdict: String,
}

/// A single reference table.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    /// Short identifier (logs, diagnostics).
    pub name: String,

    /// Display label prefixed onto classification strings,
    /// e.g. "FDA SCOGS Status".
    pub label: String,

    /// Rows in source order.
    pub rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
    /// Build a table from rows.
    pub fn new(name: impl Into<String>, label: impl Into<String>, rows: Vec<ReferenceRow>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            rows,
        }
    }

    /// First row matching the ingredient name (case-insensitive substring
    /// against the substance column) or the registry number (exact, against
    /// the CAS column).
    pub fn find_match(&self, ingredient_name: &str, registry_number: Option<&str>) -> Option<&ReferenceRow> {
        let needle = ingredient_name.trim().to_lowercase();
        if needle.is_empty() && registry_number.is_none() {
            return None;
        }

        self.rows.iter().find(|row| {
            let name_hit =
                !needle.is_empty() && row.substance.to_lowercase().contains(&needle);
            let cas_hit = match (registry_number, row.cas_number.as_deref()) {
                (Some(query), Some(cas)) => query == cas,
                _ => false,
            };
            name_hit || cas_hit
        })
    }
}

/// The four tables and their source files.
const TABLE_FILES: &[(&str, &str, &str)] = &[
    ("scogs", "FDA SCOGS Status", "scogs.json"),
    ("iarc", "IARC Group", "iarc.json"),
    ("prop65", "California Prop 65", "prop65.json"),
    ("efsa", "EFSA Conclusion", "efsa.json"),
];

/// All four reference tables, loaded together.
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    tables: Vec<ReferenceTable>,
}

impl ReferenceSet {
    /// Build a set from explicit tables (tests, embedded data).
    pub fn new(tables: Vec<ReferenceTable>) -> Self {
        Self { tables }
    }

    /// Load all four tables from a directory of JSON files.
    ///
    /// Any missing or unparsable file is `ReferenceDataUnavailable`:
    /// classifying against partial tables would be misleading, so the whole
    /// load fails.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut tables = Vec::with_capacity(TABLE_FILES.len());

        for (name, label, file) in TABLE_FILES {
            let path = dir.join(file);
            let raw = std::fs::read_to_string(&path).map_err(|e| {
                AnalysisError::ReferenceDataUnavailable(
                    format!("cannot read {}: {}", path.display(), e).into(),
                )
            })?;
            let rows: Vec<ReferenceRow> = serde_json::from_str(&raw).map_err(|e| {
                AnalysisError::ReferenceDataUnavailable(
                    format!("cannot parse {}: {}", path.display(), e).into(),
                )
            })?;
            tables.push(ReferenceTable::new(*name, *label, rows));
        }

        tracing::info!(
            tables = tables.len(),
            rows = tables.iter().map(|t| t.rows.len()).sum::<usize>(),
            "reference tables loaded"
        );
        Ok(Self { tables })
    }

    /// The tables in fixed order (SCOGS, IARC, Prop 65, EFSA).
    pub fn tables(&self) -> &[ReferenceTable] {
        &self.tables
    }
}
