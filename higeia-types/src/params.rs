//! Query parameters in the backend's wire format.

use chrono::NaiveDate;

/// Ordered query parameters for list endpoints.
///
/// Wire names follow the backend: free-text search is `query`, paging is
/// `per_page`/`page`, and date windows are a single `whereBetween` pair
/// formatted `YYYY-MM-DD,YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchParams {
    pairs: Vec<(String, String)>,
}

impl FetchParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text search (`query`).
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.set("query", text.into());
        self
    }

    /// Page size (`per_page`).
    #[must_use]
    pub fn per_page(mut self, count: u32) -> Self {
        self.set("per_page", count.to_string());
        self
    }

    /// Page number (`page`).
    #[must_use]
    pub fn page(mut self, number: u32) -> Self {
        self.set("page", number.to_string());
        self
    }

    /// Inclusive date window (`whereBetween=start,end`).
    #[must_use]
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.set(
            "whereBetween",
            format!("{},{}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d")),
        );
        self
    }

    /// Ad-hoc parameter (`discharge=false` and friends).
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a parameter, replacing an earlier value with the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(n, _)| *n == name) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Pairs in insertion order, in the shape `reqwest`'s `query` takes.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
