//! Building a filter state from query-string pairs
//!
//! Recognised keys:
//! - `search` - free-text term
//! - `<category>` - comma-separated selected values
//! - `from` / `to` - `YYYY-MM-DD` date bounds
//! - `min` / `max` - numeric bounds; a missing side keeps the full extent
//! - `<flag>` - `true`, `false` or `any`
//! - `<toggle>` - `true` or `false`
//!
//! Any other key is ignored so the same query can carry pagination.
//!
//! Category values are split on `,` and trimmed, so a value that contains
//! a comma or has leading or trailing whitespace cannot be selected from a
//! query string. Use [`toggle_category_value`](super::toggle_category_value)
//! or [`set_field`] for such values.

use std::collections::BTreeSet;

use super::state::{DateRange, FieldUpdate, FilterState, NumericRange};
use super::transitions::{set_field, set_tri_state};
use super::{FieldKey, Filterable};
use crate::time::parse_calendar_date;
use crate::{Error, Result};

pub const FROM_PARAM: &str = "from";
pub const TO_PARAM: &str = "to";
pub const MIN_PARAM: &str = "min";
pub const MAX_PARAM: &str = "max";
pub const SEARCH_PARAM: &str = "search";

/// Applies every recognised pair to a default state.
pub fn state_from_pairs<'a, R, I>(pairs: I) -> Result<FilterState<R>>
where
    R: Filterable,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut state = FilterState::<R>::default();

    for (key, raw) in pairs {
        state = match key {
            SEARCH_PARAM => set_field(&state, FieldUpdate::SearchTerm(raw.to_string())),
            FROM_PARAM => {
                let range = DateRange::new(parse_optional_date(raw)?, state.date_range().to);
                set_field(&state, FieldUpdate::DateRange(range))
            }
            TO_PARAM => {
                let range = DateRange::new(state.date_range().from, parse_optional_date(raw)?);
                set_field(&state, FieldUpdate::DateRange(range))
            }
            MIN_PARAM => {
                let current = state.numeric_range();
                let min = parse_optional_number(key, raw)?.unwrap_or(R::NUMERIC_EXTENT.min);
                set_field(&state, FieldUpdate::NumericRange(NumericRange::new(min, current.max)))
            }
            MAX_PARAM => {
                let current = state.numeric_range();
                let max = parse_optional_number(key, raw)?.unwrap_or(R::NUMERIC_EXTENT.max);
                set_field(&state, FieldUpdate::NumericRange(NumericRange::new(current.min, max)))
            }
            _ => apply_keyed_field(&state, key, raw)?,
        };
    }

    Ok(state)
}

fn apply_keyed_field<R: Filterable>(
    state: &FilterState<R>,
    key: &str,
    raw: &str,
) -> Result<FilterState<R>> {
    if let Some(category) = R::Category::from_key(key) {
        let mut values: BTreeSet<String> = state.selected(category).cloned().unwrap_or_default();
        values.extend(
            raw.split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        );
        return Ok(set_field(state, FieldUpdate::Categories(category, values)));
    }

    if let Some(flag) = R::Flag::from_key(key) {
        let value = match raw {
            "true" => Some(true),
            "false" => Some(false),
            "" | "any" => None,
            other => {
                return Err(Error::InvalidInput(format!(
                    "{} must be true, false or any (got '{}')",
                    key, other
                )))
            }
        };
        return Ok(set_tri_state(state, flag, value));
    }

    if let Some(toggle) = R::Toggle::from_key(key) {
        let on = match raw {
            "true" | "1" | "on" => true,
            "" | "false" | "0" | "off" => false,
            other => {
                return Err(Error::InvalidInput(format!(
                    "{} must be true or false (got '{}')",
                    key, other
                )))
            }
        };
        return Ok(set_field(state, FieldUpdate::Toggle(toggle, on)));
    }

    Ok(state.clone())
}

fn parse_optional_date(raw: &str) -> Result<Option<chrono::NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_calendar_date(raw).map(Some)
}

fn parse_optional_number(key: &str, raw: &str) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(Error::InvalidInput(format!(
            "{} must be a finite number (got '{}')",
            key, raw
        ))),
    }
}
