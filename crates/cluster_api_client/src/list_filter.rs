//! Query constraints for list operations.

use std::fmt;

use url::form_urlencoded;

#[cfg(test)]
#[path = "list_filter_tests.rs"]
mod tests;

/// Sort direction for a list field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(format!("invalid sort order `{}`, expected asc or desc", s)),
        }
    }
}

/// Paging, filtering and sorting for list operations.
///
/// The default filter carries no constraints and renders an empty query.
///
/// # Examples
///
/// ```
/// use cluster_api_client::{ListFilter, SortOrder};
///
/// let filter = ListFilter::new()
///     .limit(10)
///     .filter("cluster_id", "3")
///     .sort("username", SortOrder::Ascending);
///
/// assert_eq!(filter.to_query(), "limit=10&filter=cluster_id%3A3&sort=username%3AASC");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    skip: Option<u64>,
    limit: Option<u64>,
    filters: Vec<(String, String)>,
    sorts: Vec<(String, SortOrder)>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records to skip.
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Maximum number of records to return.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Only return records whose `field` equals `value`.
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Sort by `field`; earlier sorts take precedence.
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sorts.push((field.into(), order));
        self
    }

    /// Renders the filter as a form-urlencoded query string, without a leading `?`.
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());

        if let Some(skip) = self.skip {
            query.append_pair("skip", &skip.to_string());
        }
        if let Some(limit) = self.limit {
            query.append_pair("limit", &limit.to_string());
        }
        for (field, value) in &self.filters {
            query.append_pair("filter", &format!("{}:{}", field, value));
        }
        for (field, order) in &self.sorts {
            query.append_pair("sort", &format!("{}:{}", field, order));
        }

        query.finish()
    }
}
