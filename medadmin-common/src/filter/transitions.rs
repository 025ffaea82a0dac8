//! Pure state transitions
//!
//! Every function takes the current state by reference and returns the
//! next one; callers never observe an in-place mutation. Reapplying a
//! transition with the same arguments is a no-op, except
//! [`toggle_category_value`] which is its own inverse.

use super::state::{DateRange, FieldUpdate, FilterField, FilterState};
use super::Filterable;

/// Replaces one field wholesale.
pub fn set_field<R: Filterable>(state: &FilterState<R>, update: FieldUpdate<R>) -> FilterState<R> {
    let mut next = state.clone();
    match update {
        FieldUpdate::SearchTerm(term) => next.search_term = term,
        FieldUpdate::Categories(category, values) => {
            if values.is_empty() {
                next.categories.remove(&category);
            } else {
                next.categories.insert(category, values);
            }
        }
        FieldUpdate::DateRange(range) => next.date_range = range,
        FieldUpdate::NumericRange(range) => {
            next.numeric_range = range.finite_or(R::NUMERIC_EXTENT)
        }
        FieldUpdate::Toggle(toggle, on) => {
            if on {
                next.toggles.insert(toggle);
            } else {
                next.toggles.remove(&toggle);
            }
        }
    }
    next
}

/// Adds `value` to the category's selection, or removes it if already selected.
pub fn toggle_category_value<R: Filterable>(
    state: &FilterState<R>,
    category: R::Category,
    value: &str,
) -> FilterState<R> {
    let mut next = state.clone();
    let selected = next.categories.entry(category).or_default();
    if !selected.remove(value) {
        selected.insert(value.to_string());
    }
    if selected.is_empty() {
        next.categories.remove(&category);
    }
    next
}

/// Sets a tri-state flag; `None` unsets it.
pub fn set_tri_state<R: Filterable>(
    state: &FilterState<R>,
    flag: R::Flag,
    value: Option<bool>,
) -> FilterState<R> {
    let mut next = state.clone();
    match value {
        Some(v) => {
            next.flags.insert(flag, v);
        }
        None => {
            next.flags.remove(&flag);
        }
    }
    next
}

/// Resets every field to its default.
pub fn clear<R: Filterable>(_state: &FilterState<R>) -> FilterState<R> {
    FilterState::default()
}

/// Removes one constraint.
///
/// For categories `value` names the selected value to drop; without one
/// the whole category is cleared. Every other field has no discrete value
/// and is reset to its unconstrained default.
pub fn remove_one<R: Filterable>(
    state: &FilterState<R>,
    field: FilterField<R>,
    value: Option<&str>,
) -> FilterState<R> {
    let mut next = state.clone();
    match field {
        FilterField::Search => next.search_term.clear(),
        FilterField::Category(category) => match value {
            Some(value) => {
                if let Some(selected) = next.categories.get_mut(&category) {
                    selected.remove(value);
                    if selected.is_empty() {
                        next.categories.remove(&category);
                    }
                }
            }
            None => {
                next.categories.remove(&category);
            }
        },
        FilterField::DateRange => next.date_range = DateRange::default(),
        FilterField::NumericRange => next.numeric_range = R::NUMERIC_EXTENT,
        FilterField::Flag(flag) => {
            next.flags.remove(&flag);
        }
        FilterField::Toggle(toggle) => {
            next.toggles.remove(&toggle);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::NumericRange;
    use crate::records::{ExperimentCategory, ExperimentDesign, ExperimentFlag, ExperimentToggle};
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    type State = FilterState<ExperimentDesign>;

    fn busy_state() -> State {
        let s = State::default();
        let s = set_field(&s, FieldUpdate::SearchTerm("肝".to_string()));
        let s = toggle_category_value(&s, ExperimentCategory::Tags, "糖尿病");
        let s = toggle_category_value(&s, ExperimentCategory::Tags, "肝纤维化");
        let s = toggle_category_value(&s, ExperimentCategory::Status, "进行中");
        let s = set_field(
            &s,
            FieldUpdate::DateRange(DateRange::new(NaiveDate::from_ymd_opt(2024, 1, 1), None)),
        );
        let s = set_field(&s, FieldUpdate::NumericRange(NumericRange::new(1000.0, 50_000.0)));
        let s = set_tri_state(&s, ExperimentFlag::Multicenter, Some(true));
        set_field(&s, FieldUpdate::Toggle(ExperimentToggle::CreatedByMe, true))
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let s = State::default();
        let added = toggle_category_value(&s, ExperimentCategory::Tags, "糖尿病");
        assert!(added.selected(ExperimentCategory::Tags).unwrap().contains("糖尿病"));

        let removed = toggle_category_value(&added, ExperimentCategory::Tags, "糖尿病");
        assert_eq!(removed.selected(ExperimentCategory::Tags), None);
        assert_eq!(removed, s);
    }

    #[test]
    fn test_transitions_leave_input_untouched() {
        let before = State::default();
        let _ = toggle_category_value(&before, ExperimentCategory::Status, "已批准");
        let _ = set_field(&before, FieldUpdate::SearchTerm("E1".to_string()));
        assert!(before.is_default());
    }

    #[test]
    fn test_set_categories_with_empty_set_clears() {
        let s = toggle_category_value(&State::default(), ExperimentCategory::Department, "肝病科");
        let s = set_field(&s, FieldUpdate::Categories(ExperimentCategory::Department, BTreeSet::new()));
        assert!(s.categories().is_empty());
    }

    #[test]
    fn test_remove_one_category_value() {
        let s = busy_state();
        let next = remove_one(&s, FilterField::Category(ExperimentCategory::Tags), Some("糖尿病"));
        let tags = next.selected(ExperimentCategory::Tags).unwrap();
        assert_eq!(tags.len(), 1);
        assert!(tags.contains("肝纤维化"));

        // Second application is a no-op
        let again = remove_one(&next, FilterField::Category(ExperimentCategory::Tags), Some("糖尿病"));
        assert_eq!(again, next);
    }

    #[test]
    fn test_remove_one_last_value_drops_category() {
        let s = busy_state();
        let next = remove_one(&s, FilterField::Category(ExperimentCategory::Status), Some("进行中"));
        assert_eq!(next.selected(ExperimentCategory::Status), None);
    }

    #[test]
    fn test_remove_one_resets_valueless_fields() {
        let s = busy_state();

        let next = remove_one(&s, FilterField::DateRange, None);
        assert!(next.date_range().is_unbounded());

        let next = remove_one(&s, FilterField::NumericRange, None);
        assert!(!next.is_numeric_constrained());

        let next = remove_one(&s, FilterField::Flag(ExperimentFlag::Multicenter), None);
        assert_eq!(next.flag(ExperimentFlag::Multicenter), None);

        let next = remove_one(&s, FilterField::Toggle(ExperimentToggle::CreatedByMe), None);
        assert!(!next.is_toggled(ExperimentToggle::CreatedByMe));

        let next = remove_one(&s, FilterField::Search, None);
        assert_eq!(next.search_term(), "");
    }

    #[test]
    fn test_set_tri_state_idempotent() {
        let s = busy_state();
        let once = set_tri_state(&s, ExperimentFlag::EthicsApproved, Some(false));
        let twice = set_tri_state(&once, ExperimentFlag::EthicsApproved, Some(false));
        assert_eq!(once, twice);
        assert_eq!(once.flag(ExperimentFlag::EthicsApproved), Some(false));

        let unset = set_tri_state(&once, ExperimentFlag::EthicsApproved, None);
        assert_eq!(unset.flag(ExperimentFlag::EthicsApproved), None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let s = busy_state();
        assert!(!s.is_default());
        let cleared = clear(&s);
        assert!(cleared.is_default());
        assert_eq!(clear(&cleared), cleared);
    }

    #[test]
    fn test_non_finite_numeric_bounds_keep_state_comparable() {
        let s = busy_state();
        let nan = set_field(&s, FieldUpdate::NumericRange(NumericRange::new(f64::NAN, 500.0)));
        assert_eq!(nan, nan.clone());
        assert_eq!(nan.numeric_range(), NumericRange::new(0.0, 500.0));

        let again = set_field(&nan, FieldUpdate::NumericRange(NumericRange::new(f64::NAN, 500.0)));
        assert_eq!(nan, again);

        let unbounded = set_field(
            &State::default(),
            FieldUpdate::NumericRange(NumericRange::new(f64::NEG_INFINITY, f64::INFINITY)),
        );
        assert!(unbounded.is_default());
    }
}
