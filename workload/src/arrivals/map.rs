//! Arrival instant → payload list mapping
//!
//! Keeps instants in insertion order so consumers can replay a window by
//! iterating it. Several payloads may share one instant.

use serde::Serialize;
use std::collections::HashMap;

/// Ordered mapping from arrival instant to the payloads arriving then
///
/// # Example
/// ```
/// use session_workload_core_rs::ArrivalMap;
///
/// let mut arrivals = ArrivalMap::new();
/// arrivals.push(0.0, "a");
/// arrivals.push(2.5, "b");
/// arrivals.push(2.5, "c");
///
/// assert_eq!(arrivals.len(), 2);
/// assert_eq!(arrivals.total_payloads(), 3);
/// assert_eq!(arrivals.get(2.5), Some(&["b", "c"][..]));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ArrivalMap<P> {
    /// (instant, payloads) in insertion order
    entries: Vec<(f64, Vec<P>)>,

    /// Instant bits → position in `entries`
    #[serde(skip)]
    index: HashMap<u64, usize>,
}

/// Lookup key for an instant; `-0.0` and `0.0` are the same instant
///
/// Merging the two zeros is deliberate; keying on raw bit patterns, as
/// boxed-double maps do, would keep them apart.
fn instant_key(t: f64) -> u64 {
    if t == 0.0 {
        0.0f64.to_bits()
    } else {
        t.to_bits()
    }
}

impl<P> ArrivalMap<P> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Append `payload` to the list at `instant`, creating the instant if absent
    pub fn push(&mut self, instant: f64, payload: P) {
        let key = instant_key(instant);
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1.push(payload),
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((instant, vec![payload]));
            }
        }
    }

    /// Number of distinct instants
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of payloads across all instants
    pub fn total_payloads(&self) -> usize {
        self.entries.iter().map(|(_, payloads)| payloads.len()).sum()
    }

    pub fn get(&self, instant: f64) -> Option<&[P]> {
        self.index
            .get(&instant_key(instant))
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    /// Instants in insertion order
    pub fn instants(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(instant, _)| *instant)
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &[P])> + '_ {
        self.entries
            .iter()
            .map(|(instant, payloads)| (*instant, payloads.as_slice()))
    }

    /// All payloads, instant by instant
    pub fn payloads(&self) -> impl Iterator<Item = &P> + '_ {
        self.entries.iter().flat_map(|(_, payloads)| payloads.iter())
    }

    /// First instant inserted
    pub fn first_instant(&self) -> Option<f64> {
        self.entries.first().map(|(t, _)| *t)
    }

    /// Last instant inserted
    pub fn last_instant(&self) -> Option<f64> {
        self.entries.last().map(|(t, _)| *t)
    }

    /// Smallest instant, regardless of insertion order
    pub fn earliest_instant(&self) -> Option<f64> {
        self.instants().min_by(f64::total_cmp)
    }

    pub fn latest_instant(&self) -> Option<f64> {
        self.instants().max_by(f64::total_cmp)
    }

    /// Move every payload of `other` into this map
    ///
    /// Instants already present get `other`'s payloads appended after their
    /// own; new instants are added in `other`'s order.
    pub fn merge(&mut self, other: ArrivalMap<P>) {
        for (instant, payloads) in other.entries {
            let key = instant_key(instant);
            match self.index.get(&key) {
                Some(&pos) => self.entries[pos].1.extend(payloads),
                None => {
                    self.index.insert(key, self.entries.len());
                    self.entries.push((instant, payloads));
                }
            }
        }
    }

    /// Reorder instants by time (stable, payload order untouched)
    pub fn sort_chronologically(&mut self) {
        self.entries.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, (instant, _))| (instant_key(*instant), pos))
            .collect();
    }
}

impl<P> Default for ArrivalMap<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PartialEq> PartialEq for ArrivalMap<P> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<P> IntoIterator for ArrivalMap<P> {
    type Item = (f64, Vec<P>);
    type IntoIter = std::vec::IntoIter<(f64, Vec<P>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<P> FromIterator<(f64, P)> for ArrivalMap<P> {
    fn from_iter<T: IntoIterator<Item = (f64, P)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (instant, payload) in iter {
            map.push(instant, payload);
        }
        map
    }
}
