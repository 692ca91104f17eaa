use crate::store::{GroupTable, TablePersistence};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const LOG_TARGET: &str = "  registry";

/// Shared handle to a resident group table
pub type TableHandle = Arc<Mutex<GroupTable>>;

/// The resident group tables, loaded on first use and kept for the life of the registry
#[derive(Debug)]
pub struct GroupRegistry {
    persistence: Arc<dyn TablePersistence>,
    tables: Mutex<HashMap<String, TableHandle>>,
}

impl GroupRegistry {
    #[must_use]
    pub fn new(persistence: Arc<dyn TablePersistence>) -> Self {
        Self {
            persistence,
            tables: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn persistence(&self) -> &dyn TablePersistence {
        self.persistence.as_ref()
    }

    /// The group's table, loading it (or starting an empty one) if it is not resident yet
    ///
    /// Loading happens without holding the registry lock, so other groups stay usable meanwhile.
    #[must_use]
    pub fn ensure_loaded(&self, group_id: &str) -> TableHandle {
        if let Some(handle) = self.resident(group_id) {
            return handle;
        }

        let table = self.load(group_id).unwrap_or_default();
        self.install(group_id, table)
    }

    /// The group's table if it is resident or has stored data
    ///
    /// Unlike [`Self::ensure_loaded`], a group with nothing stored is left unregistered and `None` is returned.
    #[must_use]
    pub fn resident_or_stored(&self, group_id: &str) -> Option<TableHandle> {
        if let Some(handle) = self.resident(group_id) {
            return Some(handle);
        }

        let table = self.load(group_id)?;
        Some(self.install(group_id, table))
    }

    /// The group's table if it is already resident
    #[must_use]
    pub fn resident(&self, group_id: &str) -> Option<TableHandle> {
        self.tables.lock().expect("lock poisoned").get(group_id).map(Arc::clone)
    }

    #[must_use]
    pub fn resident_count(&self) -> usize {
        self.tables.lock().expect("lock poisoned").len()
    }

    /// Register a freshly loaded table; a handle installed by a concurrent load wins
    fn install(&self, group_id: &str, table: GroupTable) -> TableHandle {
        let mut tables = self.tables.lock().expect("lock poisoned");
        Arc::clone(
            tables
                .entry(group_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(table))),
        )
    }

    /// Read stored data for a group; unreadable data is discarded in favour of an empty table
    fn load(&self, group_id: &str) -> Option<GroupTable> {
        match self.persistence.load_table(group_id) {
            Ok(Some(table)) => {
                log::debug!(target: LOG_TARGET, "Loaded {} user(s) for group {group_id}", table.len());
                Some(table)
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Discarding unreadable ranking data for group {group_id}: {e:#}");
                Some(GroupTable::new())
            }
        }
    }
}
