//! Typed column descriptors.

use std::cmp::Ordering;
use std::fmt;

pub type Accessor<R> = Box<dyn Fn(&R) -> String>;
pub type Comparator<R> = Box<dyn Fn(&R, &R) -> Ordering>;

/// Describes one column over a row type `R`.
///
/// The accessor produces the stringified cell value used for display, global
/// filtering, and the default sort order. Columns that need a non-lexical
/// order (dates, enums) can attach a typed comparator.
pub struct ColumnDef<R> {
    id: String,
    header: String,
    accessor: Accessor<R>,
    sortable: bool,
    filterable: bool,
    hideable: bool,
    comparator: Option<Comparator<R>>,
}

impl<R> ColumnDef<R> {
    pub fn new(
        id: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&R) -> String + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            accessor: Box::new(accessor),
            sortable: true,
            filterable: true,
            hideable: true,
            comparator: None,
        }
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn with_hideable(mut self, hideable: bool) -> Self {
        self.hideable = hideable;
        self
    }

    pub fn with_comparator(mut self, comparator: impl Fn(&R, &R) -> Ordering + 'static) -> Self {
        self.comparator = Some(Box::new(comparator));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    pub fn is_hideable(&self) -> bool {
        self.hideable
    }

    /// Stringified cell value for a row.
    pub fn value(&self, row: &R) -> String {
        (self.accessor)(row)
    }

    /// Compares two rows under this column, using the typed comparator when
    /// one is attached and numeric-aware cell comparison otherwise.
    pub(crate) fn compare(&self, a: &R, b: &R) -> Ordering {
        match &self.comparator {
            Some(comparator) => comparator(a, b),
            None => compare_cells(&self.value(a), &self.value(b)),
        }
    }
}

impl<R> fmt::Debug for ColumnDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("hideable", &self.hideable)
            .finish()
    }
}

/// Numeric comparison when both cells parse as numbers, string comparison
/// otherwise.
pub(crate) fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(num_a), Ok(num_b)) => num_a.partial_cmp(&num_b).unwrap_or(Ordering::Equal),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        score: u32,
    }

    #[test]
    fn test_value_uses_accessor() {
        let column = ColumnDef::new("name", "Name", |row: &Row| row.name.to_string());
        let row = Row {
            name: "Maria",
            score: 7,
        };
        assert_eq!(column.value(&row), "Maria");
        assert_eq!(column.id(), "name");
        assert_eq!(column.header(), "Name");
    }

    #[test]
    fn test_flags_default_on() {
        let column = ColumnDef::new("name", "Name", |row: &Row| row.name.to_string());
        assert!(column.is_sortable());
        assert!(column.is_filterable());
        assert!(column.is_hideable());

        let column = column.with_sortable(false).with_hideable(false);
        assert!(!column.is_sortable());
        assert!(!column.is_hideable());
    }

    #[test]
    fn test_compare_cells_numeric_first() {
        // "9" < "10" numerically even though "10" < "9" lexically.
        assert_eq!(compare_cells("9", "10"), Ordering::Less);
        assert_eq!(compare_cells("banana", "apple"), Ordering::Greater);
        // Mixed content falls back to string comparison.
        assert_eq!(compare_cells("9", "apple"), Ordering::Less);
    }

    #[test]
    fn test_typed_comparator_overrides_default() {
        let column = ColumnDef::new("score", "Score", |row: &Row| row.score.to_string())
            .with_comparator(|a: &Row, b: &Row| a.score.cmp(&b.score));
        let low = Row {
            name: "a",
            score: 2,
        };
        let high = Row {
            name: "b",
            score: 11,
        };
        assert_eq!(column.compare(&low, &high), Ordering::Less);
    }
}
