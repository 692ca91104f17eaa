use std::collections::HashSet;
use std::sync::Mutex;

/// Groups whose resident table has changes that are not yet stored
///
/// Flushing swaps the whole set out at once, so a group marked while a flush is writing lands in the
/// fresh set and is picked up by the next flush.
#[derive(Debug, Default)]
pub struct DirtyGroups {
    groups: Mutex<HashSet<String>>,
}

impl DirtyGroups {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self, group_id: &str) {
        let mut groups = self.groups.lock().expect("lock poisoned");
        if !groups.contains(group_id) {
            let _ = groups.insert(group_id.to_string());
        }
    }

    /// Remove and return every dirty group, sorted by id
    #[must_use]
    pub fn take(&self) -> Vec<String> {
        let taken = core::mem::take(&mut *self.groups.lock().expect("lock poisoned"));
        let mut groups: Vec<_> = taken.into_iter().collect();
        groups.sort_unstable();
        groups
    }

    #[must_use]
    pub fn is_dirty(&self, group_id: &str) -> bool {
        self.groups.lock().expect("lock poisoned").contains(group_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.lock().expect("lock poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.lock().expect("lock poisoned").is_empty()
    }
}
