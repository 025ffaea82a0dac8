//! Predicate evaluation: does a record satisfy a filter state?

use tracing::debug;

use super::state::FilterState;
use super::summary::count_active;
use super::{FilterContext, Filterable};

/// One independent per-field check. A record matches when every check passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    Search,
    Categories,
    DateRange,
    NumericRange,
    Flags,
    Toggles,
}

impl Check {
    /// Every check, in the default evaluation order.
    pub const ALL: [Check; 6] = [
        Check::Search,
        Check::Categories,
        Check::DateRange,
        Check::NumericRange,
        Check::Flags,
        Check::Toggles,
    ];

    pub fn evaluate<R: Filterable>(
        self,
        record: &R,
        state: &FilterState<R>,
        ctx: &FilterContext,
    ) -> bool {
        match self {
            Check::Search => search_matches(record, &state.search_term),
            Check::Categories => state.categories.iter().all(|(category, selected)| {
                selected.is_empty() || record.category_value(*category).is_selected_by(selected)
            }),
            Check::DateRange => {
                state.date_range.is_unbounded()
                    || record
                        .filter_date()
                        .map_or(false, |date| state.date_range.contains(date))
            }
            Check::NumericRange => {
                !state.is_numeric_constrained()
                    || record
                        .numeric_value()
                        .map_or(false, |value| state.numeric_range.contains(value))
            }
            Check::Flags => state
                .flags
                .iter()
                .all(|(flag, expected)| record.flag_value(*flag) == *expected),
            Check::Toggles => state
                .toggles
                .iter()
                .all(|toggle| record.toggle_holds(*toggle, ctx)),
        }
    }
}

/// Case-insensitive substring match over the record's search fields.
fn search_matches<R: Filterable>(record: &R, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// True when `record` satisfies every field of `state`.
pub fn matches<R: Filterable>(record: &R, state: &FilterState<R>, ctx: &FilterContext) -> bool {
    matches_in_order(record, state, ctx, &Check::ALL)
}

/// Evaluates the listed checks in the given order, stopping at the first failure.
pub fn matches_in_order<R: Filterable>(
    record: &R,
    state: &FilterState<R>,
    ctx: &FilterContext,
    order: &[Check],
) -> bool {
    order.iter().all(|check| check.evaluate(record, state, ctx))
}

/// Returns the matching records, preserving input order.
pub fn filter_records<'a, R: Filterable>(
    records: &'a [R],
    state: &FilterState<R>,
    ctx: &FilterContext,
) -> Vec<&'a R> {
    let matched: Vec<&R> = records
        .iter()
        .filter(|record| matches(*record, state, ctx))
        .collect();

    debug!(
        total = records.len(),
        matched = matched.len(),
        active_filters = count_active(state),
        "Filter pass complete"
    );

    matched
}
