//! The tabular data controller.
//!
//! Single source of truth for how a row set is currently windowed, ordered,
//! and filtered. Pagination and sorting each run in one of two modes, fixed
//! at construction:
//!
//! - **local**: the controller stores the state and computes the visible
//!   window against its in-memory row set;
//! - **server** (manual): an external caller owns the state and row set; the
//!   controller relays change intents upward through a registered handler and
//!   displays caller-supplied totals.
//!
//! The controller performs no I/O and cannot fail: malformed input is
//! normalized or clamped, never surfaced as an error, because the host keeps
//! rendering while fetches are in flight.

use std::collections::HashSet;

use super::column::ColumnDef;
use super::filter::{ColumnFilter, FilterSet};
use super::state::{
    PageMetadata, PageRequest, PageState, PageUpdate, SortCycle, SortDescriptor, TableOptions,
    normalize_page_size,
};

pub type PaginationHandler = Box<dyn FnMut(PageRequest)>;
pub type SortingHandler = Box<dyn FnMut(&[SortDescriptor])>;

/// Per-concern ownership, resolved once at construction.
enum PaginationMode {
    Local(PageState),
    Server {
        /// Controlled copy of the caller-owned state, used for display.
        state: PageState,
        /// Totals from the most recent fetch; `None` until the first fetch
        /// resolves.
        metadata: Option<PageMetadata>,
    },
}

enum SortingMode {
    Local(Vec<SortDescriptor>),
    /// Controlled copy of the caller-owned sort sequence.
    Server(Vec<SortDescriptor>),
}

pub struct TableController<R> {
    rows: Vec<R>,
    columns: Vec<ColumnDef<R>>,
    options: TableOptions,
    pagination: PaginationMode,
    sorting: SortingMode,
    filters: FilterSet<R>,
    hidden_columns: HashSet<String>,
    on_pagination_change: Option<PaginationHandler>,
    on_sorting_change: Option<SortingHandler>,
    /// Row indices after filtering and local sorting. Index-based so large
    /// row sets are never cloned.
    view: Vec<usize>,
}

impl<R> TableController<R> {
    pub fn builder(columns: Vec<ColumnDef<R>>) -> TableControllerBuilder<R> {
        TableControllerBuilder {
            rows: None,
            columns,
            options: TableOptions::default(),
            on_pagination_change: None,
            on_sorting_change: None,
        }
    }

    // === Pagination ===

    /// Applies a partial pagination update.
    ///
    /// A limit change always lands on page 1 so the index can never point
    /// past the shrunken page range. In server mode the controller does not
    /// mutate its own state; it forwards the normalized 1-based descriptor
    /// and waits for the caller to re-supply controlled state.
    pub fn set_pagination(&mut self, update: PageUpdate) {
        let current = self.page_state();
        let limit = update
            .limit
            .map(normalize_page_size)
            .unwrap_or(current.page_size);
        let limit_changed = limit != current.page_size;
        let page = if limit_changed {
            1
        } else {
            update.page.unwrap_or(current.page_index + 1).max(1)
        };

        if self.is_manual_pagination() {
            self.emit_pagination(PageRequest { page, limit });
            return;
        }

        if let PaginationMode::Local(state) = &mut self.pagination {
            state.page_size = limit;
            state.page_index = page - 1;
        }
        self.clamp_page_index();
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            let current = self.page_state();
            self.set_pagination(PageUpdate::page(current.page_index + 2));
        }
    }

    pub fn previous_page(&mut self) {
        if self.can_previous_page() {
            let current = self.page_state();
            self.set_pagination(PageUpdate::page(current.page_index.max(1)));
        }
    }

    pub fn first_page(&mut self) {
        self.set_pagination(PageUpdate::page(1));
    }

    pub fn last_page(&mut self) {
        let count = self.page_count();
        if count > 0 {
            self.set_pagination(PageUpdate::page(count));
        }
    }

    /// Downward data from the owning caller (server mode only).
    pub fn set_controlled_pagination(&mut self, request: PageRequest) {
        if let PaginationMode::Server { state, .. } = &mut self.pagination {
            *state = request.to_state();
        }
    }

    /// Totals from the most recent server fetch (server mode only).
    pub fn set_page_metadata(&mut self, meta: PageMetadata) {
        if let PaginationMode::Server { metadata, .. } = &mut self.pagination {
            *metadata = Some(meta);
        }
    }

    // === Sorting ===

    /// Replaces the sort sequence. Duplicate column ids are dropped, keeping
    /// the first occurrence. Local mode stable-sorts the view; server mode
    /// forwards the normalized sequence upward without sorting locally.
    pub fn set_sorting(&mut self, descriptors: Vec<SortDescriptor>) {
        if !self.options.enable_sorting {
            return;
        }
        let normalized = normalize_sorting(descriptors);

        if self.is_manual_sorting() {
            self.emit_sorting(&normalized);
            return;
        }

        if let SortingMode::Local(current) = &mut self.sorting {
            *current = normalized;
        }
        self.rebuild_view();
        self.reset_local_page();
    }

    /// Cycles the sort on one column: unsorted → ascending → descending →
    /// unsorted under the three-state policy, ascending ↔ descending under
    /// the two-state policy.
    pub fn toggle_sort(&mut self, column_id: &str) {
        if !self.options.enable_sorting {
            return;
        }
        let sortable = self
            .columns
            .iter()
            .any(|column| column.id() == column_id && column.is_sortable());
        if !sortable {
            return;
        }

        let current = self
            .sorting_state()
            .iter()
            .find(|descriptor| descriptor.column_id == column_id)
            .map(|descriptor| descriptor.descending);

        let next = match current {
            None => vec![SortDescriptor::asc(column_id)],
            Some(false) => vec![SortDescriptor::desc(column_id)],
            Some(true) => match self.options.sort_cycle {
                SortCycle::ThreeState => Vec::new(),
                SortCycle::TwoState => vec![SortDescriptor::asc(column_id)],
            },
        };
        self.set_sorting(next);
    }

    /// Downward data from the owning caller (server mode only).
    pub fn set_controlled_sorting(&mut self, descriptors: Vec<SortDescriptor>) {
        if let SortingMode::Server(current) = &mut self.sorting {
            *current = normalize_sorting(descriptors);
        }
    }

    // === Filtering (local data only) ===

    /// Case-insensitive substring filter across all filterable columns; a row
    /// matches if any column matches. Resets to the first page.
    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        if !self.filters_allowed() {
            return;
        }
        self.filters.set_global(text.into());
        self.rebuild_view();
        self.reset_local_page();
    }

    /// Sets (or replaces) the filter on one column. Active column filters
    /// combine with logical AND. Resets to the first page.
    pub fn set_column_filter(&mut self, column_id: &str, filter: ColumnFilter<R>) {
        if !self.filters_allowed() {
            return;
        }
        self.filters.set_column(column_id, filter);
        self.rebuild_view();
        self.reset_local_page();
    }

    pub fn clear_column_filter(&mut self, column_id: &str) {
        if !self.filters_allowed() {
            return;
        }
        self.filters.clear_column(column_id);
        self.rebuild_view();
        self.reset_local_page();
    }

    pub fn global_filter(&self) -> &str {
        self.filters.global()
    }

    pub fn is_filtered(&self) -> bool {
        !self.filters.is_empty()
    }

    // === Column visibility ===

    pub fn set_column_visible(&mut self, column_id: &str, visible: bool) {
        if !self.options.enable_column_visibility {
            return;
        }
        let hideable = self
            .columns
            .iter()
            .any(|column| column.id() == column_id && column.is_hideable());
        if visible {
            self.hidden_columns.remove(column_id);
        } else if hideable {
            self.hidden_columns.insert(column_id.to_string());
        }
    }

    pub fn is_column_visible(&self, column_id: &str) -> bool {
        !self.hidden_columns.contains(column_id)
    }

    pub fn visible_columns(&self) -> Vec<&ColumnDef<R>> {
        self.columns
            .iter()
            .filter(|column| !self.hidden_columns.contains(column.id()))
            .collect()
    }

    pub fn columns(&self) -> &[ColumnDef<R>] {
        &self.columns
    }

    // === Data ===

    /// Replaces the row set, e.g. when a fetch resolves. An absent row set is
    /// coerced to empty. Rebuilds the view and clamps the page index.
    pub fn set_rows(&mut self, rows: impl Into<Option<Vec<R>>>) {
        self.rows = rows.into().unwrap_or_default();
        self.rebuild_view();
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// The rows of the current page: the local window in local mode, the
    /// caller-supplied rows as-is in server mode (the fetch already returned
    /// exactly one page).
    pub fn page_rows(&self) -> Vec<&R> {
        match &self.pagination {
            PaginationMode::Server { .. } => {
                self.view.iter().map(|&index| &self.rows[index]).collect()
            }
            PaginationMode::Local(state) => self
                .view
                .iter()
                .skip(state.page_index * state.page_size)
                .take(state.page_size)
                .map(|&index| &self.rows[index])
                .collect(),
        }
    }

    // === Reset ===

    /// Clears filters, sorting, column visibility, and pagination back to
    /// initial defaults in one transition. Manual concerns also emit the
    /// reset upward so the owning caller can refetch.
    pub fn reset_all(&mut self) {
        self.filters.clear_all();
        self.hidden_columns.clear();

        let initial = PageState::new(self.options.initial_page_size);
        match &mut self.pagination {
            PaginationMode::Local(state) => *state = initial,
            PaginationMode::Server { state, metadata } => {
                *state = initial;
                *metadata = None;
            }
        }
        match &mut self.sorting {
            SortingMode::Local(descriptors) | SortingMode::Server(descriptors) => {
                descriptors.clear()
            }
        }
        self.rebuild_view();

        if self.is_manual_pagination() {
            self.emit_pagination(initial.to_request());
        }
        if self.is_manual_sorting() {
            self.emit_sorting(&[]);
        }
    }

    // === Derived values ===

    pub fn page_state(&self) -> PageState {
        match &self.pagination {
            PaginationMode::Local(state) => *state,
            PaginationMode::Server { state, .. } => *state,
        }
    }

    /// Total pages: `ceil(total / limit)` from caller metadata in server mode
    /// (0 until the first fetch resolves), `ceil(filtered / page_size)`
    /// locally.
    pub fn page_count(&self) -> usize {
        match &self.pagination {
            PaginationMode::Server { metadata, .. } => {
                metadata.map(|meta| meta.page_count()).unwrap_or(0)
            }
            PaginationMode::Local(state) => self.view.len().div_ceil(state.page_size),
        }
    }

    /// Record count after filtering (not after pagination) in local mode, the
    /// caller-supplied authoritative total in server mode.
    pub fn total_records(&self) -> usize {
        match &self.pagination {
            PaginationMode::Server { metadata, .. } => {
                metadata.map(|meta| meta.total).unwrap_or(0)
            }
            PaginationMode::Local(_) => self.view.len(),
        }
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_state().page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_state().page_index + 1 < self.page_count()
    }

    pub fn sorting_state(&self) -> &[SortDescriptor] {
        match &self.sorting {
            SortingMode::Local(descriptors) | SortingMode::Server(descriptors) => descriptors,
        }
    }

    /// Direction of the active sort on a column: `Some(true)` descending,
    /// `Some(false)` ascending, `None` unsorted.
    pub fn sort_direction(&self, column_id: &str) -> Option<bool> {
        self.sorting_state()
            .iter()
            .find(|descriptor| descriptor.column_id == column_id)
            .map(|descriptor| descriptor.descending)
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn is_manual_pagination(&self) -> bool {
        matches!(self.pagination, PaginationMode::Server { .. })
    }

    pub fn is_manual_sorting(&self) -> bool {
        matches!(self.sorting, SortingMode::Server(_))
    }

    // === Internals ===

    fn filters_allowed(&self) -> bool {
        // In server mode the filter lives in the caller's fetch descriptor.
        self.options.enable_filtering && !self.is_manual_pagination()
    }

    fn rebuild_view(&mut self) {
        let mut view: Vec<usize> = (0..self.rows.len())
            .filter(|&index| self.filters.matches(&self.rows[index], &self.columns))
            .collect();

        if let SortingMode::Local(descriptors) = &self.sorting {
            if !descriptors.is_empty() {
                // Vec::sort_by is stable: rows equal under every descriptor
                // keep their original relative order.
                view.sort_by(|&a, &b| {
                    compare_rows(&self.columns, &self.rows[a], &self.rows[b], descriptors)
                });
            }
        }

        self.view = view;
        self.clamp_page_index();
    }

    fn clamp_page_index(&mut self) {
        let view_len = self.view.len();
        if let PaginationMode::Local(state) = &mut self.pagination {
            let page_count = view_len.div_ceil(state.page_size);
            let max_index = page_count.saturating_sub(1);
            if state.page_index > max_index {
                state.page_index = max_index;
            }
        }
    }

    fn reset_local_page(&mut self) {
        if let PaginationMode::Local(state) = &mut self.pagination {
            state.page_index = 0;
        }
    }

    fn emit_pagination(&mut self, request: PageRequest) {
        if let Some(handler) = self.on_pagination_change.as_mut() {
            handler(request);
        }
    }

    fn emit_sorting(&mut self, descriptors: &[SortDescriptor]) {
        if let Some(handler) = self.on_sorting_change.as_mut() {
            handler(descriptors);
        }
    }
}

fn compare_rows<R>(
    columns: &[ColumnDef<R>],
    a: &R,
    b: &R,
    descriptors: &[SortDescriptor],
) -> std::cmp::Ordering {
    for descriptor in descriptors {
        let Some(column) = columns
            .iter()
            .find(|column| column.id() == descriptor.column_id)
        else {
            continue;
        };
        let ordering = column.compare(a, b);
        let ordering = if descriptor.descending {
            ordering.reverse()
        } else {
            ordering
        };
        if ordering != std::cmp::Ordering::Equal {
            return ordering;
        }
    }
    std::cmp::Ordering::Equal
}

/// Drops duplicate column ids, keeping the first occurrence.
fn normalize_sorting(descriptors: Vec<SortDescriptor>) -> Vec<SortDescriptor> {
    let mut seen = HashSet::new();
    descriptors
        .into_iter()
        .filter(|descriptor| seen.insert(descriptor.column_id.clone()))
        .collect()
}

pub struct TableControllerBuilder<R> {
    rows: Option<Vec<R>>,
    columns: Vec<ColumnDef<R>>,
    options: TableOptions,
    on_pagination_change: Option<PaginationHandler>,
    on_sorting_change: Option<SortingHandler>,
}

impl<R> TableControllerBuilder<R> {
    /// Seeds the row set. An absent value (a fetch still in flight) is
    /// coerced to empty.
    pub fn rows(mut self, rows: impl Into<Option<Vec<R>>>) -> Self {
        self.rows = rows.into();
        self
    }

    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn on_pagination_change(mut self, handler: impl FnMut(PageRequest) + 'static) -> Self {
        self.on_pagination_change = Some(Box::new(handler));
        self
    }

    pub fn on_sorting_change(mut self, handler: impl FnMut(&[SortDescriptor]) + 'static) -> Self {
        self.on_sorting_change = Some(Box::new(handler));
        self
    }

    /// Resolves each concern's mode once. A manual flag without a registered
    /// handler degrades to local so the host keeps working, with a logged
    /// warning instead of a panic.
    pub fn build(self) -> TableController<R> {
        let mut options = self.options;
        options.initial_page_size = normalize_page_size(options.initial_page_size);
        let initial = PageState::new(options.initial_page_size);

        if options.manual_pagination && self.on_pagination_change.is_none() {
            log::warn!(
                "manual_pagination is set but no pagination handler is registered; \
                 falling back to local pagination"
            );
            options.manual_pagination = false;
        }
        if options.manual_sorting && self.on_sorting_change.is_none() {
            log::warn!(
                "manual_sorting is set but no sorting handler is registered; \
                 falling back to local sorting"
            );
            options.manual_sorting = false;
        }

        let pagination = if options.manual_pagination {
            PaginationMode::Server {
                state: initial,
                metadata: None,
            }
        } else {
            PaginationMode::Local(initial)
        };
        let sorting = if options.manual_sorting {
            SortingMode::Server(Vec::new())
        } else {
            SortingMode::Local(Vec::new())
        };

        let mut controller = TableController {
            rows: self.rows.unwrap_or_default(),
            columns: self.columns,
            options,
            pagination,
            sorting,
            filters: FilterSet::default(),
            hidden_columns: HashSet::new(),
            on_pagination_change: self.on_pagination_change,
            on_sorting_change: self.on_sorting_change,
            view: Vec::new(),
        };
        controller.rebuild_view();
        controller
    }
}
