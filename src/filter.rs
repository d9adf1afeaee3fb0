use tracing::trace;

use crate::catalog::{CatalogRecord, Facet};

/// Free-text query plus exact-match selectors. An empty selector value
/// means "any".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    pub query: String,
    selectors: Vec<(Facet, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_selector(mut self, facet: Facet, value: impl Into<String>) -> Self {
        self.set_selector(facet, value);
        self
    }

    pub fn set_selector(&mut self, facet: Facet, value: impl Into<String>) {
        let value = value.into();
        match self.selectors.iter_mut().find(|(f, _)| *f == facet) {
            Some((_, current)) => *current = value,
            None => self.selectors.push((facet, value)),
        }
    }

    pub fn selector(&self, facet: Facet) -> &str {
        self.selectors
            .iter()
            .find(|(f, _)| *f == facet)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Mutable handle to a selector value, creating it unset if needed.
    pub fn selector_mut(&mut self, facet: Facet) -> &mut String {
        let index = match self.selectors.iter().position(|(f, _)| *f == facet) {
            Some(index) => index,
            None => {
                self.selectors.push((facet, String::new()));
                self.selectors.len() - 1
            }
        };
        &mut self.selectors[index].1
    }

    pub fn reset(&mut self) {
        self.query.clear();
        for (_, value) in &mut self.selectors {
            value.clear();
        }
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.selectors.iter().any(|(_, value)| !value.is_empty())
    }

    pub fn matches<T: CatalogRecord>(&self, record: &T) -> bool {
        self.matches_query(record) && self.matches_selectors(record)
    }

    fn matches_query<T: CatalogRecord>(&self, record: &T) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let query = self.query.to_lowercase();
        record.name().to_lowercase().contains(&query)
            || record.description().to_lowercase().contains(&query)
    }

    fn matches_selectors<T: CatalogRecord>(&self, record: &T) -> bool {
        self.selectors
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .all(|(facet, value)| record.tag(*facet) == Some(value.as_str()))
    }

    /// Every matching record, in catalog order.
    pub fn apply<'a, T: CatalogRecord>(&self, records: &'a [T]) -> Vec<&'a T> {
        let matched: Vec<&T> = records.iter().filter(|r| self.matches(*r)).collect();
        trace!(
            query = %self.query,
            total = records.len(),
            matched = matched.len(),
            "filter applied"
        );
        matched
    }
}

/// Distinct values of `facet` across `records`, in first-seen order.
pub fn distinct_tags<T: CatalogRecord>(records: &[T], facet: Facet) -> Vec<&str> {
    let mut values: Vec<&str> = Vec::new();
    for value in records.iter().filter_map(|r| r.tag(facet)) {
        if !values.contains(&value) {
            values.push(value);
        }
    }
    values
}
