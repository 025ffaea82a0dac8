//! Experiment design records (research experiment CRUD screen)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filter::{CategoryValue, FieldKey, FilterContext, Filterable, NumericRange};

/// One experiment design as listed on the research screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentDesign {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Principal investigator; compared against the current actor
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub research_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub sample_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_on: Option<NaiveDate>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub multicenter: bool,
    #[serde(default)]
    pub ethics_approved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExperimentCategory {
    ResearchType,
    Status,
    Department,
    SampleType,
    Tags,
}

impl FieldKey for ExperimentCategory {
    const ALL: &'static [Self] = &[
        ExperimentCategory::ResearchType,
        ExperimentCategory::Status,
        ExperimentCategory::Department,
        ExperimentCategory::SampleType,
        ExperimentCategory::Tags,
    ];

    fn key(self) -> &'static str {
        match self {
            ExperimentCategory::ResearchType => "research_type",
            ExperimentCategory::Status => "status",
            ExperimentCategory::Department => "department",
            ExperimentCategory::SampleType => "sample_type",
            ExperimentCategory::Tags => "tags",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ExperimentCategory::ResearchType => "Research type",
            ExperimentCategory::Status => "Status",
            ExperimentCategory::Department => "Department",
            ExperimentCategory::SampleType => "Sample type",
            ExperimentCategory::Tags => "Tags",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExperimentFlag {
    Multicenter,
    EthicsApproved,
}

impl FieldKey for ExperimentFlag {
    const ALL: &'static [Self] = &[ExperimentFlag::Multicenter, ExperimentFlag::EthicsApproved];

    fn key(self) -> &'static str {
        match self {
            ExperimentFlag::Multicenter => "multicenter",
            ExperimentFlag::EthicsApproved => "ethics_approved",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ExperimentFlag::Multicenter => "Multicenter",
            ExperimentFlag::EthicsApproved => "Ethics approved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExperimentToggle {
    CreatedByMe,
}

impl FieldKey for ExperimentToggle {
    const ALL: &'static [Self] = &[ExperimentToggle::CreatedByMe];

    fn key(self) -> &'static str {
        "created_by_me"
    }

    fn label(self) -> &'static str {
        "Created by me"
    }
}

impl Filterable for ExperimentDesign {
    type Category = ExperimentCategory;
    type Flag = ExperimentFlag;
    type Toggle = ExperimentToggle;

    const NUMERIC_EXTENT: NumericRange = NumericRange::new(0.0, 1_000_000.0);
    const NUMERIC_LABEL: &'static str = "Budget";
    const DATE_LABEL: &'static str = "Created";

    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.title.as_str(), self.owner.as_str()]
    }

    fn category_value(&self, category: ExperimentCategory) -> CategoryValue<'_> {
        match category {
            ExperimentCategory::ResearchType => CategoryValue::Single(&self.research_type),
            ExperimentCategory::Status => CategoryValue::Single(&self.status),
            ExperimentCategory::Department => CategoryValue::Single(&self.department),
            ExperimentCategory::SampleType => CategoryValue::Single(&self.sample_type),
            ExperimentCategory::Tags => CategoryValue::Multi(&self.tags),
        }
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        self.created_on
    }

    fn numeric_value(&self) -> Option<f64> {
        self.budget
    }

    fn flag_value(&self, flag: ExperimentFlag) -> bool {
        match flag {
            ExperimentFlag::Multicenter => self.multicenter,
            ExperimentFlag::EthicsApproved => self.ethics_approved,
        }
    }

    fn toggle_holds(&self, toggle: ExperimentToggle, ctx: &FilterContext) -> bool {
        match toggle {
            ExperimentToggle::CreatedByMe => ctx.is_actor(&self.owner),
        }
    }
}
