//! State types for the tabular data controller.

/// Default number of rows per page when the caller does not configure one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Replaces a non-positive page size with the default.
pub(crate) fn normalize_page_size(size: usize) -> usize {
    if size == 0 { DEFAULT_PAGE_SIZE } else { size }
}

/// Zero-based pagination state used for local window computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page_index: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: normalize_page_size(page_size),
        }
    }

    /// The 1-based descriptor for this state: `page = page_index + 1`.
    pub fn to_request(self) -> PageRequest {
        PageRequest {
            page: self.page_index + 1,
            limit: self.page_size,
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// One-based page descriptor exchanged with callers in manual mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    /// The 0-based state for this descriptor: `page_index = page - 1`.
    pub fn to_state(self) -> PageState {
        PageState {
            page_index: self.page.max(1) - 1,
            page_size: normalize_page_size(self.limit),
        }
    }
}

/// Partial pagination update; absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageUpdate {
    /// 1-based page number.
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl PageUpdate {
    pub fn page(page: usize) -> Self {
        Self {
            page: Some(page),
            limit: None,
        }
    }

    pub fn limit(limit: usize) -> Self {
        Self {
            page: None,
            limit: Some(limit),
        }
    }
}

/// One ordering key and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDescriptor {
    pub column_id: String,
    pub descending: bool,
}

impl SortDescriptor {
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: false,
        }
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: true,
        }
    }
}

/// How repeated sort toggles on the same column cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortCycle {
    /// unsorted → ascending → descending → unsorted
    #[default]
    ThreeState,
    /// ascending ↔ descending (for hosts with no "unsorted" rendering)
    TwoState,
}

/// Caller-supplied totals after a server-mode fetch. `total` is authoritative
/// for page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMetadata {
    pub limit: usize,
    pub offset: usize,
    pub total: usize,
}

impl PageMetadata {
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.limit.max(1))
    }
}

/// Capability flags and initial values for a controller.
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Seeds the default page size; non-positive values fall back to
    /// [`DEFAULT_PAGE_SIZE`].
    pub initial_page_size: usize,
    pub enable_sorting: bool,
    pub enable_filtering: bool,
    pub enable_column_visibility: bool,
    /// Pagination is caller-owned; the controller only relays change intents.
    pub manual_pagination: bool,
    /// Sorting is caller-owned; the controller never sorts locally.
    pub manual_sorting: bool,
    pub sort_cycle: SortCycle,
    /// Choices for a page-size selector. View concern, forwarded unchanged.
    pub page_size_options: Vec<usize>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            initial_page_size: DEFAULT_PAGE_SIZE,
            enable_sorting: true,
            enable_filtering: true,
            enable_column_visibility: true,
            manual_pagination: false,
            manual_sorting: false,
            sort_cycle: SortCycle::default(),
            page_size_options: vec![10, 20, 50, 100],
        }
    }
}
