//! Active-filter summary
//!
//! Both functions derive their output from the state passed in; nothing is
//! cached, so the result always reflects the latest transition.

use serde::Serialize;

use super::state::{FilterField, FilterState};
use super::{FieldKey, Filterable};

/// One removable chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilter {
    /// Machine key of the field, accepted by [`FilterField::from_key`]
    pub field: String,
    pub label: String,
    pub value: String,
}

impl ActiveFilter {
    fn new<R: Filterable>(field: FilterField<R>, value: String) -> Self {
        Self {
            field: field.key().to_string(),
            label: field.label().to_string(),
            value,
        }
    }
}

/// Number of fields holding a non-default value.
///
/// A multi-select field counts once however many values are selected.
pub fn count_active<R: Filterable>(state: &FilterState<R>) -> usize {
    let mut count = 0;
    if !state.search_term.is_empty() {
        count += 1;
    }
    count += state.categories.values().filter(|s| !s.is_empty()).count();
    if !state.date_range.is_unbounded() {
        count += 1;
    }
    if state.is_numeric_constrained() {
        count += 1;
    }
    count += state.flags.len();
    count += state.toggles.len();
    count
}

/// Chips for every active field, in display order.
///
/// Categories produce one chip per selected value so each can be removed
/// individually; every other field produces a single chip.
pub fn describe_active<R: Filterable>(state: &FilterState<R>) -> Vec<ActiveFilter> {
    let mut chips = Vec::new();

    if !state.search_term.is_empty() {
        chips.push(ActiveFilter::new::<R>(
            FilterField::Search,
            state.search_term.clone(),
        ));
    }

    for category in R::Category::ALL {
        if let Some(selected) = state.categories.get(category) {
            for value in selected {
                chips.push(ActiveFilter::new::<R>(
                    FilterField::Category(*category),
                    value.clone(),
                ));
            }
        }
    }

    let range = state.date_range;
    let date_text = match (range.from, range.to) {
        (Some(from), Some(to)) => Some(format!("{} ~ {}", from, to)),
        (Some(from), None) => Some(format!("from {}", from)),
        (None, Some(to)) => Some(format!("until {}", to)),
        (None, None) => None,
    };
    if let Some(text) = date_text {
        chips.push(ActiveFilter::new::<R>(FilterField::DateRange, text));
    }

    if state.is_numeric_constrained() {
        chips.push(ActiveFilter::new::<R>(
            FilterField::NumericRange,
            format!("{} - {}", state.numeric_range.min, state.numeric_range.max),
        ));
    }

    for flag in R::Flag::ALL {
        if let Some(value) = state.flags.get(flag) {
            let text = if *value { "yes" } else { "no" };
            chips.push(ActiveFilter::new::<R>(FilterField::Flag(*flag), text.to_string()));
        }
    }

    for toggle in R::Toggle::ALL {
        if state.toggles.contains(toggle) {
            chips.push(ActiveFilter::new::<R>(
                FilterField::Toggle(*toggle),
                "on".to_string(),
            ));
        }
    }

    chips
}
