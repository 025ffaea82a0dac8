//! Multi-criteria record filtering
//!
//! A [`FilterState`] holds the criteria for one screen. It is an ordinary
//! value owned by the caller: [`transitions`] derive new states from old
//! ones, [`predicate`] decides whether a record is included, and
//! [`summary`] projects the state into removable chips.
//!
//! Records take part by implementing [`Filterable`], which maps every
//! filter dimension onto a named, typed field of the record.

use std::fmt;
use std::hash::Hash;

use chrono::NaiveDate;

pub mod predicate;
pub mod query;
pub mod state;
pub mod summary;
pub mod transitions;

pub use predicate::{filter_records, matches, matches_in_order, Check};
pub use query::state_from_pairs;
pub use state::{DateRange, FieldUpdate, FilterField, FilterState, NumericRange};
pub use summary::{count_active, describe_active, ActiveFilter};
pub use transitions::{clear, remove_one, set_field, set_tri_state, toggle_category_value};

/// A closed set of named fields (categories, tri-state flags, toggles).
///
/// `key` is the stable machine name used in query strings and chips,
/// `label` is the human-facing name.
pub trait FieldKey: Copy + Ord + Eq + Hash + fmt::Debug + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    fn key(self) -> &'static str;

    fn label(self) -> &'static str;

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.key() == key)
    }
}

/// The value a record holds for a category field.
#[derive(Debug, Clone, Copy)]
pub enum CategoryValue<'a> {
    /// Single-valued field (status, department, ...)
    Single(&'a str),
    /// Set-valued field (tags)
    Multi(&'a [String]),
}

impl CategoryValue<'_> {
    /// Membership for single values, intersection for multi values.
    pub fn is_selected_by<'s, I>(&self, selected: I) -> bool
    where
        I: IntoIterator<Item = &'s String>,
    {
        match self {
            CategoryValue::Single(value) => selected.into_iter().any(|s| s == value),
            CategoryValue::Multi(values) => selected
                .into_iter()
                .any(|s| values.iter().any(|v| v == s)),
        }
    }
}

/// Values supplied from outside the filter state itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterContext {
    /// Identity of the current user, used by "created by me" style toggles
    pub actor: Option<String>,
}

impl FilterContext {
    pub fn for_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    /// True when an actor is known and equals `owner`.
    pub fn is_actor(&self, owner: &str) -> bool {
        self.actor.as_deref() == Some(owner)
    }
}

/// A record type that can be filtered.
///
/// Each implementation is one screen's strongly-typed record. The predicate
/// only ever reaches record data through these accessors.
pub trait Filterable {
    type Category: FieldKey;
    type Flag: FieldKey;
    type Toggle: FieldKey;

    /// Full extent of the numeric field. A range equal to this is unconstrained.
    const NUMERIC_EXTENT: NumericRange;

    /// Display label for the numeric field
    const NUMERIC_LABEL: &'static str;

    /// Display label for the date field
    const DATE_LABEL: &'static str;

    /// Strings searched by the free-text term.
    fn search_fields(&self) -> Vec<&str>;

    fn category_value(&self, category: Self::Category) -> CategoryValue<'_>;

    /// Calendar date used for date-range checks.
    fn filter_date(&self) -> Option<NaiveDate>;

    fn numeric_value(&self) -> Option<f64>;

    fn flag_value(&self, flag: Self::Flag) -> bool;

    /// Whether the record satisfies `toggle` when it is switched on.
    fn toggle_holds(&self, toggle: Self::Toggle, ctx: &FilterContext) -> bool;
}
