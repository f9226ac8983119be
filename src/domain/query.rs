//! Composite query state and its wire-level parameter derivation.
//!
//! [`QueryState`] records what the user currently wants to see: search text,
//! selected filters, sort option, and page. Every transition builds a fresh
//! value instead of patching in place, so change detection is plain equality.
//!
//! Transitions follow one rule: changing search text, filters, or sort resets
//! the page to 1. Changing the page touches nothing else.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::error::{BrowserError, Result};

/// Page size used when no `per_page` override is configured.
pub const DEFAULT_PER_PAGE: u32 = 5;

/// Largest page size the candidate API accepts.
pub const MAX_PER_PAGE: u32 = 50;

/// Filterable candidate attributes.
///
/// The set is closed: toggling a value in an unknown category cannot be
/// expressed. Variant order is the order categories are serialized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCategory {
    ApplicationType,
    Source,
}

impl FilterCategory {
    /// All categories in serialization order.
    pub const ALL: [Self; 2] = [Self::ApplicationType, Self::Source];

    /// Query parameter name used by the candidate API.
    #[must_use]
    pub const fn param_name(self) -> &'static str {
        match self {
            Self::ApplicationType => "application_type",
            Self::Source => "source",
        }
    }

    /// Section title shown in the filter panel.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ApplicationType => "Application Type",
            Self::Source => "Source",
        }
    }

    /// Values offered for selection in the filter panel.
    #[must_use]
    pub const fn options(self) -> &'static [&'static str] {
        match self {
            Self::ApplicationType => &["active", "archived"],
            Self::Source => &["LinkedIn", "Indeed", "Referral", "GitHub"],
        }
    }
}

/// Field the candidate list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    LastActivity,
    Name,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LastActivity => "last_activity",
            Self::Name => "name",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A sort key and direction, always changed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortOption {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortOption {
    /// The sort choices offered to the user, in cycling order.
    pub const ALL: [Self; 4] = [
        Self::new(SortKey::LastActivity, SortOrder::Desc),
        Self::new(SortKey::LastActivity, SortOrder::Asc),
        Self::new(SortKey::Name, SortOrder::Asc),
        Self::new(SortKey::Name, SortOrder::Desc),
    ];

    #[must_use]
    pub const fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Returns the option after this one in [`SortOption::ALL`], wrapping.
    ///
    /// ```
    /// use candidate_browser::domain::query::{SortKey, SortOption, SortOrder};
    ///
    /// let next = SortOption::default().next();
    /// assert_eq!(next, SortOption::new(SortKey::LastActivity, SortOrder::Asc));
    /// ```
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|o| *o == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match (self.key, self.order) {
            (SortKey::LastActivity, SortOrder::Desc) => "Last Activity (new to old)",
            (SortKey::LastActivity, SortOrder::Asc) => "Last Activity (old to new)",
            (SortKey::Name, SortOrder::Asc) => "Name (A to Z)",
            (SortKey::Name, SortOrder::Desc) => "Name (Z to A)",
        }
    }
}

/// Selected filter values per category.
///
/// Categories with no selected values are not stored, so an empty selection
/// always compares equal to `Filters::default()`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Filters {
    selected: BTreeMap<FilterCategory, BTreeSet<String>>,
}

impl Filters {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    #[must_use]
    pub fn contains(&self, category: FilterCategory, value: &str) -> bool {
        self.selected
            .get(&category)
            .is_some_and(|values| values.contains(value))
    }

    /// Selected values of a category in their serialization order.
    pub fn values(&self, category: FilterCategory) -> impl Iterator<Item = &str> {
        self.selected
            .get(&category)
            .into_iter()
            .flat_map(|values| values.iter().map(String::as_str))
    }

    /// Total number of selected values across all categories.
    #[must_use]
    pub fn count(&self) -> usize {
        self.selected.values().map(BTreeSet::len).sum()
    }

    fn toggled(&self, category: FilterCategory, value: &str) -> Self {
        let mut next = self.clone();
        let values = next.selected.entry(category).or_default();
        if !values.remove(value) {
            values.insert(value.to_string());
        }
        if values.is_empty() {
            next.selected.remove(&category);
        }
        next
    }
}

/// Everything the user has asked for, in one comparable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_text: String,
    pub filters: Filters,
    pub sort: SortOption,
    pub page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            filters: Filters::default(),
            sort: SortOption::default(),
            page: 1,
        }
    }
}

impl QueryState {
    /// Replaces the search text and returns to the first page.
    #[must_use]
    pub fn with_search_text(&self, text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            page: 1,
            ..self.clone()
        }
    }

    /// Adds `value` to the category if absent, removes it if present, and
    /// returns to the first page.
    #[must_use]
    pub fn with_filter_toggled(&self, category: FilterCategory, value: &str) -> Self {
        Self {
            filters: self.filters.toggled(category, value),
            page: 1,
            ..self.clone()
        }
    }

    /// Replaces the sort key and order together and returns to the first page.
    #[must_use]
    pub fn with_sort(&self, sort: SortOption) -> Self {
        Self {
            sort,
            page: 1,
            ..self.clone()
        }
    }

    /// Replaces the page only. Page 0 is treated as page 1.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Returns the initial state: no search, no filters, default sort, page 1.
    #[must_use]
    pub fn reset() -> Self {
        Self::default()
    }

    /// Derives the candidate API query parameters for this state.
    ///
    /// Parameters are emitted in a fixed order: `page`, `per_page`, `search`
    /// (only when non-empty), `sort_by`, `sort_order`, then one entry per
    /// selected filter value, categories in [`FilterCategory::ALL`] order and
    /// values sorted within each category. Equal states therefore always
    /// produce byte-identical query strings.
    ///
    /// ```
    /// use candidate_browser::domain::query::{FilterCategory, QueryState};
    ///
    /// let state = QueryState::default().with_filter_toggled(FilterCategory::Source, "LinkedIn");
    /// let params = state.to_request_parameters(5);
    /// assert_eq!(
    ///     params.to_query_string().unwrap(),
    ///     "page=1&per_page=5&sort_by=last_activity&sort_order=desc&source=LinkedIn"
    /// );
    /// ```
    #[must_use]
    pub fn to_request_parameters(&self, per_page: u32) -> RequestParameters {
        let mut params = RequestParameters::default();
        params.push("page", self.page.max(1).to_string());
        params.push("per_page", per_page.clamp(1, MAX_PER_PAGE).to_string());
        if !self.search_text.is_empty() {
            params.push("search", self.search_text.clone());
        }
        params.push("sort_by", self.sort.key.as_str());
        params.push("sort_order", self.sort.order.as_str());
        for category in FilterCategory::ALL {
            for value in self.filters.values(category) {
                params.push(category.param_name(), value);
            }
        }
        params
    }
}

/// Ordered query parameters; a name may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestParameters(Vec<(&'static str, String)>);

impl RequestParameters {
    pub fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.0.push((name, value.into()));
    }

    /// First value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `name`, in emission order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(n, v)| (*n, v.as_str()))
    }

    /// Encodes the parameters as an `application/x-www-form-urlencoded` string.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Request`] if the encoder rejects the input.
    pub fn to_query_string(&self) -> Result<String> {
        serde_html_form::to_string(&self.0).map_err(|e| BrowserError::Request(e.to_string()))
    }
}
