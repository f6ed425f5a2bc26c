//! Filter state: one global free-text filter plus per-column typed filters.
//!
//! Matching semantics: the global filter is a case-insensitive substring
//! match, a row matches if ANY filterable column matches. Column filters are
//! combined with logical AND between columns.

use super::column::ColumnDef;

pub type Predicate<R> = Box<dyn Fn(&R) -> bool>;

/// A filter bound to one column.
pub enum ColumnFilter<R> {
    /// Exact match against the column's stringified value.
    Equals(String),
    /// Case-insensitive substring match against the column's stringified value.
    Contains(String),
    /// Arbitrary typed predicate over the row.
    Predicate(Predicate<R>),
}

impl<R> ColumnFilter<R> {
    pub fn equals(value: impl Into<String>) -> Self {
        ColumnFilter::Equals(value.into())
    }

    pub fn contains(value: impl Into<String>) -> Self {
        ColumnFilter::Contains(value.into().to_lowercase())
    }

    pub fn matching(predicate: impl Fn(&R) -> bool + 'static) -> Self {
        ColumnFilter::Predicate(Box::new(predicate))
    }

    fn matches(&self, row: &R, column: &ColumnDef<R>) -> bool {
        match self {
            ColumnFilter::Equals(value) => column.value(row) == *value,
            ColumnFilter::Contains(needle) => {
                column.value(row).to_lowercase().contains(needle.as_str())
            }
            ColumnFilter::Predicate(predicate) => predicate(row),
        }
    }
}

impl<R> std::fmt::Debug for ColumnFilter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnFilter::Equals(value) => f.debug_tuple("Equals").field(value).finish(),
            ColumnFilter::Contains(value) => f.debug_tuple("Contains").field(value).finish(),
            ColumnFilter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// The full filter state held by a controller.
pub(crate) struct FilterSet<R> {
    global: String,
    columns: Vec<(String, ColumnFilter<R>)>,
}

impl<R> Default for FilterSet<R> {
    fn default() -> Self {
        Self {
            global: String::new(),
            columns: Vec::new(),
        }
    }
}

impl<R> FilterSet<R> {
    pub(crate) fn global(&self) -> &str {
        &self.global
    }

    pub(crate) fn set_global(&mut self, text: String) {
        self.global = text;
    }

    /// Replaces any existing filter on the same column.
    pub(crate) fn set_column(&mut self, column_id: &str, filter: ColumnFilter<R>) {
        self.clear_column(column_id);
        self.columns.push((column_id.to_string(), filter));
    }

    pub(crate) fn clear_column(&mut self, column_id: &str) {
        self.columns.retain(|(id, _)| id != column_id);
    }

    pub(crate) fn clear_all(&mut self) {
        self.global.clear();
        self.columns.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.global.is_empty() && self.columns.is_empty()
    }

    pub(crate) fn matches(&self, row: &R, columns: &[ColumnDef<R>]) -> bool {
        if !self.global.is_empty() {
            let needle = self.global.to_lowercase();
            let any_column_matches = columns
                .iter()
                .filter(|column| column.is_filterable())
                .any(|column| column.value(row).to_lowercase().contains(&needle));
            if !any_column_matches {
                return false;
            }
        }

        // Filters on column ids that don't exist are ignored rather than
        // failing every row; the controller renders continuously even under
        // transient bad input.
        self.columns.iter().all(|(id, filter)| {
            match columns.iter().find(|column| column.id() == id) {
                Some(column) => filter.matches(row, column),
                None => true,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Contact {
        name: &'static str,
        city: &'static str,
    }

    fn columns() -> Vec<ColumnDef<Contact>> {
        vec![
            ColumnDef::new("name", "Name", |c: &Contact| c.name.to_string()),
            ColumnDef::new("city", "City", |c: &Contact| c.city.to_string()),
        ]
    }

    fn maria() -> Contact {
        Contact {
            name: "Maria Santos",
            city: "Recife",
        }
    }

    fn joao() -> Contact {
        Contact {
            name: "João Silva",
            city: "São Paulo",
        }
    }

    #[test]
    fn test_global_filter_is_case_insensitive_or_across_columns() {
        let mut filters = FilterSet::default();
        filters.set_global("maria".to_string());
        assert!(filters.matches(&maria(), &columns()));
        assert!(!filters.matches(&joao(), &columns()));

        // Matching any column is enough.
        filters.set_global("recife".to_string());
        assert!(filters.matches(&maria(), &columns()));
    }

    #[test]
    fn test_global_filter_skips_unfilterable_columns() {
        let columns = vec![
            ColumnDef::new("name", "Name", |c: &Contact| c.name.to_string()),
            ColumnDef::new("city", "City", |c: &Contact| c.city.to_string())
                .with_filterable(false),
        ];
        let mut filters = FilterSet::default();
        filters.set_global("recife".to_string());
        assert!(!filters.matches(&maria(), &columns));
    }

    #[test]
    fn test_column_filters_and_between_columns() {
        let mut filters = FilterSet::default();
        filters.set_column("name", ColumnFilter::contains("Maria"));
        filters.set_column("city", ColumnFilter::equals("Recife"));
        assert!(filters.matches(&maria(), &columns()));

        filters.set_column("city", ColumnFilter::equals("São Paulo"));
        assert!(!filters.matches(&maria(), &columns()));
    }

    #[test]
    fn test_predicate_filter() {
        let mut filters = FilterSet::default();
        filters.set_column(
            "name",
            ColumnFilter::matching(|c: &Contact| c.name.len() > 10),
        );
        assert!(filters.matches(&maria(), &columns()));
        assert!(!filters.matches(
            &Contact {
                name: "Ana",
                city: "Recife",
            },
            &columns()
        ));
    }

    #[test]
    fn test_setting_same_column_replaces_previous_filter() {
        let mut filters = FilterSet::default();
        filters.set_column("city", ColumnFilter::equals("Recife"));
        filters.set_column("city", ColumnFilter::equals("São Paulo"));
        assert!(filters.matches(&joao(), &columns()));
        assert!(!filters.matches(&maria(), &columns()));
    }

    #[test]
    fn test_unknown_column_filter_is_ignored() {
        let mut filters = FilterSet::default();
        filters.set_column("deleted_at", ColumnFilter::equals("never"));
        assert!(filters.matches(&maria(), &columns()));
    }

    #[test]
    fn test_clear_all_restores_match_everything() {
        let mut filters = FilterSet::default();
        filters.set_global("nothing-matches-this".to_string());
        filters.set_column("city", ColumnFilter::equals("Atlantis"));
        assert!(!filters.matches(&maria(), &columns()));

        filters.clear_all();
        assert!(filters.is_empty());
        assert!(filters.matches(&maria(), &columns()));
    }
}
