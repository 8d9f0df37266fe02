use std::{
    collections::HashSet,
    sync::{PoisonError, RwLock},
};

/// The set of known project prefixes.
///
/// Empty at construction; fully replaced (never merged) by each successful
/// refresh. Readers take the read lock for O(1) membership tests and can
/// never observe a partially-updated set: `replace` swaps the whole set
/// under the write lock.
#[derive(Debug, Default)]
pub struct ProjectDirectory {
    inner: RwLock<HashSet<String>>,
}

impl ProjectDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(prefix)
    }

    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Swap in a freshly fetched project list, returning the new count.
    pub fn replace(&self, keys: Vec<String>) -> usize {
        let set: HashSet<String> = keys.into_iter().collect();
        let count = set.len();
        *self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner) = set;
        count
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn starts_empty() {
        let dir = ProjectDirectory::new();
        assert!(dir.is_empty());
        assert!(!dir.contains("JIRA"));
    }

    #[test]
    fn replace_swaps_the_whole_set() {
        let dir = ProjectDirectory::new();
        assert_eq!(dir.replace(strings(&["JIRA", "OPS"])), 2);
        assert!(dir.contains("JIRA"));

        // A second refresh replaces, never merges.
        assert_eq!(dir.replace(strings(&["NEW"])), 1);
        assert!(dir.contains("NEW"));
        assert!(!dir.contains("JIRA"));
    }

    #[test]
    fn replace_counts_distinct_keys() {
        let dir = ProjectDirectory::new();
        assert_eq!(dir.replace(strings(&["A", "A", "B"])), 2);
    }

    #[test]
    fn concurrent_readers_see_old_or_new_set_never_a_mix() {
        let dir = Arc::new(ProjectDirectory::new());
        dir.replace(strings(&["A", "B"]));

        let writer = {
            let dir = Arc::clone(&dir);
            thread::spawn(move || {
                for i in 0..500 {
                    if i % 2 == 0 {
                        dir.replace(strings(&["C", "D"]));
                    } else {
                        dir.replace(strings(&["A", "B"]));
                    }
                }
            })
        };

        // Each observation takes the same read lock `contains` uses, so it
        // sees one whole set at one instant.
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let dir = Arc::clone(&dir);
                thread::spawn(move || {
                    for _ in 0..500 {
                        let set = dir.inner.read().unwrap_or_else(PoisonError::into_inner);
                        let old = set.contains("A")
                            && set.contains("B")
                            && !set.contains("C")
                            && !set.contains("D");
                        let new = set.contains("C")
                            && set.contains("D")
                            && !set.contains("A")
                            && !set.contains("B");
                        assert!(old || new, "observed a mixed set: {:?}", *set);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
