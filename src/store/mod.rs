//! Per-group counter tables and their persistence.
//!
//! A [`GroupTable`] maps user ids to [`UserStats`] in first-seen order. Tables are kept resident by the
//! [`GroupRegistry`], which loads each group lazily through a [`TablePersistence`] implementation the
//! first time it is touched. Mutated groups are recorded in [`DirtyGroups`] until a flush writes them back.

mod dirty;
mod memory;
mod persistence;
mod registry;
mod stats;
mod table;

pub use dirty::DirtyGroups;
pub use memory::MemoryStore;
pub use persistence::{JsonFileStore, TablePersistence};
pub use registry::{GroupRegistry, TableHandle};
pub use stats::{DailyCounter, UserStats, WeeklyCounter};
pub use table::GroupTable;
