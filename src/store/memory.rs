use crate::Result;
use crate::store::{GroupTable, TablePersistence};
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use core::time::Duration;
use ohno::bail;
use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;

#[derive(Debug, Clone)]
enum Stored {
    Table(GroupTable),
    Corrupt,
}

/// Persistence kept in process memory
///
/// Useful wherever the engine should run without touching a filesystem. Stored entries can be marked
/// corrupt, writes can be made to fail, and loads or saves can be slowed down, to drive the loader and
/// flush error paths and their interleavings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Stored>>,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
    load_delays: Mutex<HashMap<String, Duration>>,
    save_delay: Mutex<Option<Duration>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the stored table for a group
    pub fn put(&self, group_id: &str, table: GroupTable) {
        let _ = self
            .entries
            .lock()
            .expect("lock poisoned")
            .insert(group_id.to_string(), Stored::Table(table));
    }

    /// Make the stored data for a group unreadable
    pub fn put_corrupt(&self, group_id: &str) {
        let _ = self.entries.lock().expect("lock poisoned").insert(group_id.to_string(), Stored::Corrupt);
    }

    /// Make every following save fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Make the next load of a group take at least `delay`
    pub fn delay_next_load(&self, group_id: &str, delay: Duration) {
        let _ = self.load_delays.lock().expect("lock poisoned").insert(group_id.to_string(), delay);
    }

    /// Make the next save, for any group, take at least `delay`
    pub fn delay_next_save(&self, delay: Duration) {
        *self.save_delay.lock().expect("lock poisoned") = Some(delay);
    }

    /// The last table successfully saved for a group
    #[must_use]
    pub fn stored(&self, group_id: &str) -> Option<GroupTable> {
        match self.entries.lock().expect("lock poisoned").get(group_id) {
            Some(Stored::Table(table)) => Some(table.clone()),
            Some(Stored::Corrupt) | None => None,
        }
    }

    /// Number of successful saves so far
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

impl TablePersistence for MemoryStore {
    fn load_table(&self, group_id: &str) -> Result<Option<GroupTable>> {
        let delay = self.load_delays.lock().expect("lock poisoned").remove(group_id);
        if let Some(delay) = delay {
            thread::sleep(delay);
        }

        match self.entries.lock().expect("lock poisoned").get(group_id) {
            Some(Stored::Table(table)) => Ok(Some(table.clone())),
            Some(Stored::Corrupt) => bail!("stored table for group {group_id} is corrupt"),
            None => Ok(None),
        }
    }

    fn save_table(&self, group_id: &str, table: &GroupTable) -> Result<()> {
        let delay = self.save_delay.lock().expect("lock poisoned").take();
        if let Some(delay) = delay {
            thread::sleep(delay);
        }

        if self.fail_writes.load(Ordering::Relaxed) {
            bail!("writes are disabled for group {group_id}");
        }

        let _ = self
            .entries
            .lock()
            .expect("lock poisoned")
            .insert(group_id.to_string(), Stored::Table(table.clone()));
        let _ = self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_load() {
        let store = MemoryStore::new();
        assert!(store.load_table("g").unwrap().is_none());

        store.put("g", GroupTable::new());
        assert_eq!(store.load_table("g").unwrap(), Some(GroupTable::new()));
    }

    #[test]
    fn test_corrupt_entry_fails_to_load() {
        let store = MemoryStore::new();
        store.put_corrupt("g");
        assert!(store.load_table("g").is_err());
        assert!(store.stored("g").is_none());
    }

    #[test]
    fn test_failing_writes() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(store.save_table("g", &GroupTable::new()).is_err());
        assert_eq!(store.save_count(), 0);

        store.set_fail_writes(false);
        store.save_table("g", &GroupTable::new()).unwrap();
        assert_eq!(store.save_count(), 1);
        assert!(store.stored("g").is_some());
    }

    #[test]
    fn test_delays_apply_once() {
        let store = MemoryStore::new();
        store.delay_next_save(Duration::from_millis(20));
        store.delay_next_load("g", Duration::from_millis(20));

        let start = std::time::Instant::now();
        store.save_table("g", &GroupTable::new()).unwrap();
        let _ = store.load_table("g").unwrap();
        assert!(start.elapsed() >= Duration::from_millis(40));

        let start = std::time::Instant::now();
        store.save_table("g", &GroupTable::new()).unwrap();
        let _ = store.load_table("g").unwrap();
        assert!(start.elapsed() < Duration::from_millis(40));
    }
}
