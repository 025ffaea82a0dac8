//! Admin activity log entries

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::filter::{CategoryValue, FieldKey, FilterContext, Filterable, NumericRange};
use crate::time::calendar_date;

/// Severity of an audited action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }
}

/// One row of the admin activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: String,
    /// Account that performed the action
    #[serde(default)]
    pub actor: String,
    #[serde(default)]
    pub action: String,
    /// Admin area the action touched (users, training, deployment, ...)
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub occurred_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub duration_ms: Option<f64>,
    #[serde(default = "default_success")]
    pub success: bool,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActivityCategory {
    Module,
    Severity,
}

impl FieldKey for ActivityCategory {
    const ALL: &'static [Self] = &[ActivityCategory::Module, ActivityCategory::Severity];

    fn key(self) -> &'static str {
        match self {
            ActivityCategory::Module => "module",
            ActivityCategory::Severity => "severity",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ActivityCategory::Module => "Module",
            ActivityCategory::Severity => "Severity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActivityFlag {
    Success,
}

impl FieldKey for ActivityFlag {
    const ALL: &'static [Self] = &[ActivityFlag::Success];

    fn key(self) -> &'static str {
        "success"
    }

    fn label(self) -> &'static str {
        "Succeeded"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActivityToggle {
    Mine,
}

impl FieldKey for ActivityToggle {
    const ALL: &'static [Self] = &[ActivityToggle::Mine];

    fn key(self) -> &'static str {
        "mine"
    }

    fn label(self) -> &'static str {
        "My activity"
    }
}

impl Filterable for ActivityLogEntry {
    type Category = ActivityCategory;
    type Flag = ActivityFlag;
    type Toggle = ActivityToggle;

    const NUMERIC_EXTENT: NumericRange = NumericRange::new(0.0, 60_000.0);
    const NUMERIC_LABEL: &'static str = "Duration (ms)";
    const DATE_LABEL: &'static str = "Date";

    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.action.as_str(), self.actor.as_str()]
    }

    fn category_value(&self, category: ActivityCategory) -> CategoryValue<'_> {
        match category {
            ActivityCategory::Module => CategoryValue::Single(&self.module),
            ActivityCategory::Severity => CategoryValue::Single(self.severity.as_str()),
        }
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        self.occurred_at.map(calendar_date)
    }

    fn numeric_value(&self) -> Option<f64> {
        self.duration_ms
    }

    fn flag_value(&self, flag: ActivityFlag) -> bool {
        match flag {
            ActivityFlag::Success => self.success,
        }
    }

    fn toggle_holds(&self, toggle: ActivityToggle, ctx: &FilterContext) -> bool {
        match toggle {
            ActivityToggle::Mine => ctx.is_actor(&self.actor),
        }
    }
}
