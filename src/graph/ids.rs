//! Run-scoped unique id registry.
//!
//! Every distinct network node or instance name gets one integer id for the
//! lifetime of a graph build. Ids start at 1; 0 belongs to the cluster root.

use std::collections::HashMap;
use std::fmt;

/// First id handed out after a reset
const FIRST_UID: u32 = 1;

/// An integer id together with the name it was assigned to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniqueId {
    pub uid: u32,
    pub name: String,
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uid)
    }
}

/// Maps names to ids in first-lookup order
#[derive(Debug)]
pub struct IdRegistry {
    counter: u32,
    seen: HashMap<String, UniqueId>,
}

impl IdRegistry {
    pub fn new() -> Self {
        IdRegistry {
            counter: FIRST_UID,
            seen: HashMap::new(),
        }
    }

    /// Return the id for `name`, allocating the next one if it was never seen
    pub fn get_or_create(&mut self, name: &str) -> UniqueId {
        if let Some(uid) = self.seen.get(name) {
            return uid.clone();
        }

        log::debug!("{} is not yet seen, adding with uid {}", name, self.counter);
        let uid = UniqueId {
            uid: self.counter,
            name: name.to_string(),
        };
        self.seen.insert(name.to_string(), uid.clone());
        self.counter += 1;
        uid
    }

    /// Look up a name without allocating
    pub fn get(&self, name: &str) -> Option<&UniqueId> {
        self.seen.get(name)
    }

    /// Forget every name and restart counting at 1
    pub fn reset(&mut self) {
        self.counter = FIRST_UID;
        self.seen.clear();
    }

    /// Number of names registered in this run
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl Default for IdRegistry {
    fn default() -> Self {
        Self::new()
    }
}
