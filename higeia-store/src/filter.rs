//! Pure filter and sort projections over record snapshots.

use higeia_types::Record;
use serde_json::Value;
use std::cmp::Ordering;

/// A predicate over records, combinable by conjunction.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Predicate {
    /// Matches everything.
    #[default]
    Always,
    /// The field at `path` equals `value` exactly.
    Equals { path: String, value: Value },
    /// Case-insensitive substring over the string fields at `paths`.
    /// True when `text` is empty; a record matches when any path does.
    Search { paths: Vec<String>, text: String },
    /// Every inner predicate matches.
    AllOf(Vec<Predicate>),
}

impl Predicate {
    pub fn equals(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn search<P: Into<String>>(
        paths: impl IntoIterator<Item = P>,
        text: impl Into<String>,
    ) -> Self {
        Self::Search {
            paths: paths.into_iter().map(Into::into).collect(),
            text: text.into(),
        }
    }

    pub fn all_of(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Self::AllOf(predicates.into_iter().collect())
    }

    /// Dropdown-style selection where the `"all"` sentinel matches
    /// everything, as the appointment type filter does.
    pub fn selection(path: impl Into<String>, value: &str) -> Self {
        if value == "all" {
            Self::Always
        } else {
            Self::equals(path, value)
        }
    }

    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Always => true,
            Self::Equals { path, value } => record.pointer(path) == Some(value),
            Self::Search { paths, text } => {
                if text.is_empty() {
                    return true;
                }
                let needle = text.to_lowercase();
                paths.iter().any(|path| {
                    record
                        .get_str(path)
                        .is_some_and(|s| s.to_lowercase().contains(&needle))
                })
            }
            Self::AllOf(inner) => inner.iter().all(|p| p.matches(record)),
        }
    }
}

/// Sort order applied after filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub path: String,
    pub descending: bool,
}

impl SortKey {
    pub fn ascending(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            descending: false,
        }
    }

    pub fn descending(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            descending: true,
        }
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ordering = compare_values(a.pointer(&self.path), b.pointer(&self.path));
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Compares field values: numbers numerically, strings lexicographically,
/// missing or incomparable values last.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => match (a.as_str(), b.as_str()) {
                (Some(x), Some(y)) => x.cmp(y),
                _ => Ordering::Equal,
            },
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A derived view: filter plus optional sort, recomputed on demand.
///
/// Nothing is memoized. Callers re-apply whenever the source collection
/// or the criteria change, which keeps projections trivially consistent
/// with the store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterProjection {
    pub predicate: Predicate,
    pub sort: Option<SortKey>,
}

impl FilterProjection {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            sort: None,
        }
    }

    pub fn sorted(predicate: Predicate, sort: SortKey) -> Self {
        Self {
            predicate,
            sort: Some(sort),
        }
    }

    /// Applies the projection to a snapshot, cloning the matches.
    /// Source order is preserved unless a sort key is set.
    #[must_use]
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        let mut matches: Vec<Record> = records
            .iter()
            .filter(|record| self.predicate.matches(record))
            .cloned()
            .collect();
        if let Some(sort) = &self.sort {
            matches.sort_by(|a, b| sort.compare(a, b));
        }
        matches
    }
}
