//! Id allocation for simulation entities
//!
//! Simulations need many small integer ids (sessions, VMs, hosts, ...). The
//! allocator hands out strictly increasing ids per category. Categories may be
//! hierarchical, written with `/` separators: `"session/web"` draws from the
//! nearest registered ancestor (`"session"`) unless it is registered itself.
//! Anything with no registered ancestor draws from a shared global counter.
//!
//! # Example
//! ```
//! use session_workload_core_rs::IdAllocator;
//!
//! let ids = IdAllocator::with_defaults();
//! assert_eq!(ids.poll_id("session"), 1);
//! assert_eq!(ids.poll_id("session/web"), 2);
//! assert_eq!(ids.poll_id("tenant"), 0); // global fallback
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::warn;

/// Category for cloudlets (individual requests)
pub const CLOUDLET: &str = "cloudlet";
/// Category for virtual machines
pub const VM: &str = "vm";
/// Category for physical hosts
pub const HOST: &str = "host";
/// Category for datacenter brokers
pub const BROKER: &str = "broker";
/// Category for sessions
pub const SESSION: &str = "session";

const DEFAULT_CATEGORIES: [&str; 5] = [CLOUDLET, VM, HOST, BROKER, SESSION];

#[derive(Debug, Default)]
struct Counters {
    /// Next id per registered category
    categories: HashMap<String, i64>,
    /// Next id for unregistered categories
    global: i64,
}

/// Thread-safe per-category id allocator
#[derive(Debug, Default)]
pub struct IdAllocator {
    counters: Mutex<Counters>,
}

impl IdAllocator {
    /// Allocator with no registered categories (everything is global)
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator with the standard entity categories, each starting at 1
    pub fn with_defaults() -> Self {
        let allocator = Self::new();
        for category in DEFAULT_CATEGORIES {
            allocator.register(category, 1);
        }
        allocator
    }

    /// Register (or reset) a category so that its next id is `initial`
    pub fn register(&self, category: &str, initial: i64) {
        self.lock().categories.insert(category.to_string(), initial);
    }

    /// Return the next id for `category`
    pub fn poll_id(&self, category: &str) -> i64 {
        let mut counters = self.lock();

        if let Some(key) = Self::resolve(&counters.categories, category) {
            if let Some(next) = counters.categories.get_mut(&key) {
                let id = *next;
                *next += 1;
                return id;
            }
        }

        let id = counters.global;
        counters.global += 1;
        id
    }

    /// Next id the global fallback counter would hand out
    pub fn peek_global(&self) -> i64 {
        self.lock().global
    }

    /// Find the registered category that `category` draws from
    fn resolve(categories: &HashMap<String, i64>, category: &str) -> Option<String> {
        let mut candidate = category;
        loop {
            if categories.contains_key(candidate) {
                return Some(candidate.to_string());
            }
            match candidate.rfind('/') {
                Some(idx) => candidate = &candidate[..idx],
                None => return None,
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            // Counters are plain integers, always consistent between updates
            warn!("id allocator lock was poisoned; continuing with recovered state");
            poisoned.into_inner()
        })
    }
}
