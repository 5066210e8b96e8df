//! Pure filter/sort engine over the in-memory user collection.
//!
//! This is the computational core of the plugin: two side-effect-free
//! operations that derive the visible listing from the fetched collection.
//! The page state composes them (always filter first, then sort, from the
//! full collection) so the derived list is a pure function of exactly three
//! inputs: the collection, the debounced search term, and the sort direction.
//!
//! # Modules
//!
//! - [`filter`]: case-insensitive substring filtering plus highlight ranges
//! - [`sort`]: locale-aware stable ordering and the sort direction toggle

pub mod filter;
pub mod sort;

pub use filter::{filter_by_name, match_ranges};
pub use sort::{sort_by_name, SortDirection};
