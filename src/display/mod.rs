pub mod pager;
pub mod table;

pub use pager::{InputAction, InteractivePager};
pub use table::TableRenderer;
