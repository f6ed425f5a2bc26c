//! Generic tabular data controller.
//!
//! Every list view in the back office runs through one [`TableController`]:
//! it owns pagination, sorting, filtering, and column-visibility state for a
//! row set, and reconciles self-managed ("local") state against caller-owned
//! ("server") state per concern. The controller performs no I/O of its own;
//! fetching rows is the caller's job.
//!
//! Submodules:
//! - `state`: page/sort state types and the 1-based page descriptor
//! - `column`: typed column descriptors with accessors and comparators
//! - `filter`: global text filter and per-column typed filters
//! - `controller`: the controller itself

pub mod column;
pub mod controller;
pub mod filter;
pub mod state;

pub use column::ColumnDef;
pub use controller::{PaginationHandler, SortingHandler, TableController, TableControllerBuilder};
pub use filter::ColumnFilter;
pub use state::{
    DEFAULT_PAGE_SIZE, PageMetadata, PageRequest, PageState, PageUpdate, SortCycle,
    SortDescriptor, TableOptions,
};
