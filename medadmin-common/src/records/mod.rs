//! Strongly-typed records for each filtering screen, and the fixture set
//! they are loaded from.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::Result;

pub mod activity;
pub mod experiment;

pub use activity::{ActivityCategory, ActivityFlag, ActivityLogEntry, ActivityToggle, Severity};
pub use experiment::{ExperimentCategory, ExperimentDesign, ExperimentFlag, ExperimentToggle};

/// All datasets served by the review service.
///
/// Loaded once; never mutated by filtering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(default)]
    pub experiments: Vec<ExperimentDesign>,
    #[serde(default)]
    pub activity: Vec<ActivityLogEntry>,
}

impl RecordSet {
    /// Parse a JSON document `{"experiments": [...], "activity": [...]}`
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a fixture file, failing if it is missing or malformed
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let records = Self::from_json(&content)?;
        info!(
            "Loaded {} experiment designs and {} activity entries from {}",
            records.experiments.len(),
            records.activity.len(),
            path.display()
        );
        Ok(records)
    }

    /// Load a fixture file; a missing file yields empty datasets.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_empty(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Fixture file {} not found; starting with empty datasets",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
