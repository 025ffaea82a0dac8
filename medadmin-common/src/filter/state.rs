//! Filter state and the fields it is made of

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{FieldKey, Filterable};

/// Inclusive calendar-date bounds. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// `from > to` is accepted and contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Inclusive bounds over a record's numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Replaces a non-finite bound with the matching side of `extent`.
    pub fn finite_or(self, extent: NumericRange) -> Self {
        Self {
            min: if self.min.is_finite() { self.min } else { extent.min },
            max: if self.max.is_finite() { self.max } else { extent.max },
        }
    }
}

/// Criteria currently applied to one screen.
///
/// Fields are only changed through the functions in
/// [`transitions`](super::transitions); the predicate never mutates it.
/// Category sets are never stored empty, so a present entry always
/// constrains results.
pub struct FilterState<R: Filterable> {
    pub(crate) search_term: String,
    pub(crate) categories: BTreeMap<R::Category, BTreeSet<String>>,
    pub(crate) date_range: DateRange,
    pub(crate) numeric_range: NumericRange,
    pub(crate) flags: BTreeMap<R::Flag, bool>,
    pub(crate) toggles: BTreeSet<R::Toggle>,
}

impl<R: Filterable> FilterState<R> {
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn categories(&self) -> &BTreeMap<R::Category, BTreeSet<String>> {
        &self.categories
    }

    /// Selected values of one category, `None` when it imposes no constraint.
    pub fn selected(&self, category: R::Category) -> Option<&BTreeSet<String>> {
        self.categories.get(&category)
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn numeric_range(&self) -> NumericRange {
        self.numeric_range
    }

    /// `None` means the flag is unset and does not filter.
    pub fn flag(&self, flag: R::Flag) -> Option<bool> {
        self.flags.get(&flag).copied()
    }

    pub fn flags(&self) -> &BTreeMap<R::Flag, bool> {
        &self.flags
    }

    pub fn is_toggled(&self, toggle: R::Toggle) -> bool {
        self.toggles.contains(&toggle)
    }

    pub fn toggles(&self) -> &BTreeSet<R::Toggle> {
        &self.toggles
    }

    pub fn is_numeric_constrained(&self) -> bool {
        self.numeric_range != R::NUMERIC_EXTENT
    }

    /// True when no field holds a non-default value.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl<R: Filterable> Default for FilterState<R> {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            categories: BTreeMap::new(),
            date_range: DateRange::default(),
            numeric_range: R::NUMERIC_EXTENT,
            flags: BTreeMap::new(),
            toggles: BTreeSet::new(),
        }
    }
}

impl<R: Filterable> Clone for FilterState<R> {
    fn clone(&self) -> Self {
        Self {
            search_term: self.search_term.clone(),
            categories: self.categories.clone(),
            date_range: self.date_range,
            numeric_range: self.numeric_range,
            flags: self.flags.clone(),
            toggles: self.toggles.clone(),
        }
    }
}

impl<R: Filterable> PartialEq for FilterState<R> {
    fn eq(&self, other: &Self) -> bool {
        self.search_term == other.search_term
            && self.categories == other.categories
            && self.date_range == other.date_range
            && self.numeric_range == other.numeric_range
            && self.flags == other.flags
            && self.toggles == other.toggles
    }
}

impl<R: Filterable> fmt::Debug for FilterState<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterState")
            .field("search_term", &self.search_term)
            .field("categories", &self.categories)
            .field("date_range", &self.date_range)
            .field("numeric_range", &self.numeric_range)
            .field("flags", &self.flags)
            .field("toggles", &self.toggles)
            .finish()
    }
}

/// Chip key of the free-text search field
pub const SEARCH_KEY: &str = "search";

/// Chip key of the date range field
pub const DATE_KEY: &str = "date";

/// Chip key of the numeric range field
pub const NUMERIC_KEY: &str = "range";

/// Names one field of a [`FilterState`].
pub enum FilterField<R: Filterable> {
    Search,
    Category(R::Category),
    DateRange,
    NumericRange,
    Flag(R::Flag),
    Toggle(R::Toggle),
}

impl<R: Filterable> FilterField<R> {
    /// Machine name, as used by chips.
    pub fn key(&self) -> &'static str {
        match self {
            FilterField::Search => SEARCH_KEY,
            FilterField::Category(c) => c.key(),
            FilterField::DateRange => DATE_KEY,
            FilterField::NumericRange => NUMERIC_KEY,
            FilterField::Flag(f) => f.key(),
            FilterField::Toggle(t) => t.key(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Search => "Search",
            FilterField::Category(c) => c.label(),
            FilterField::DateRange => R::DATE_LABEL,
            FilterField::NumericRange => R::NUMERIC_LABEL,
            FilterField::Flag(f) => f.label(),
            FilterField::Toggle(t) => t.label(),
        }
    }

    /// Inverse of [`key`](Self::key).
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            SEARCH_KEY => Some(FilterField::Search),
            DATE_KEY => Some(FilterField::DateRange),
            NUMERIC_KEY => Some(FilterField::NumericRange),
            _ => R::Category::from_key(key)
                .map(FilterField::Category)
                .or_else(|| R::Flag::from_key(key).map(FilterField::Flag))
                .or_else(|| R::Toggle::from_key(key).map(FilterField::Toggle)),
        }
    }
}

impl<R: Filterable> Clone for FilterField<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Filterable> Copy for FilterField<R> {}

impl<R: Filterable> PartialEq for FilterField<R> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FilterField::Search, FilterField::Search)
            | (FilterField::DateRange, FilterField::DateRange)
            | (FilterField::NumericRange, FilterField::NumericRange) => true,
            (FilterField::Category(a), FilterField::Category(b)) => a == b,
            (FilterField::Flag(a), FilterField::Flag(b)) => a == b,
            (FilterField::Toggle(a), FilterField::Toggle(b)) => a == b,
            _ => false,
        }
    }
}

impl<R: Filterable> Eq for FilterField<R> {}

impl<R: Filterable> fmt::Debug for FilterField<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterField::Search => f.write_str("Search"),
            FilterField::Category(c) => f.debug_tuple("Category").field(c).finish(),
            FilterField::DateRange => f.write_str("DateRange"),
            FilterField::NumericRange => f.write_str("NumericRange"),
            FilterField::Flag(flag) => f.debug_tuple("Flag").field(flag).finish(),
            FilterField::Toggle(t) => f.debug_tuple("Toggle").field(t).finish(),
        }
    }
}

/// Whole-field replacement passed to [`set_field`](super::set_field).
pub enum FieldUpdate<R: Filterable> {
    SearchTerm(String),
    /// Replaces a category's selection; an empty set clears it
    Categories(R::Category, BTreeSet<String>),
    DateRange(DateRange),
    NumericRange(NumericRange),
    Toggle(R::Toggle, bool),
}
