//! Several workloads driven over the same windows
//!
//! A site usually serves more than one class of session (browsing, checkout,
//! batch jobs), each with its own intensity. The composite runs every member
//! for the same window and merges the results into one chronological map.

use super::{ArrivalMap, WorkloadGenerator};
use crate::error::WorkloadError;

/// Merges the arrivals of several generators with the same payload type
pub struct CompositeWorkloadGenerator<P> {
    generators: Vec<Box<dyn WorkloadGenerator<Payload = P>>>,
}

impl<P> CompositeWorkloadGenerator<P> {
    pub fn new() -> Self {
        Self {
            generators: Vec::new(),
        }
    }

    /// Add a member; members run in the order they were added
    pub fn add<G>(&mut self, generator: G)
    where
        G: WorkloadGenerator<Payload = P> + 'static,
    {
        self.generators.push(Box::new(generator));
    }

    /// Builder-style [`add`](Self::add)
    pub fn with<G>(mut self, generator: G) -> Self
    where
        G: WorkloadGenerator<Payload = P> + 'static,
    {
        self.add(generator);
        self
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl<P> Default for CompositeWorkloadGenerator<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> std::fmt::Debug for CompositeWorkloadGenerator<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeWorkloadGenerator")
            .field("generators", &self.generators.len())
            .finish()
    }
}

impl<P> WorkloadGenerator for CompositeWorkloadGenerator<P> {
    type Payload = P;

    /// Run every member for the window and merge their arrivals
    ///
    /// Payloads sharing an instant keep member order. The merged map is
    /// sorted by instant. The first member error aborts the whole window.
    fn generate_sessions(
        &mut self,
        start_time: f64,
        period_len: f64,
    ) -> Result<ArrivalMap<P>, WorkloadError> {
        if !(period_len > 0.0) || !period_len.is_finite() {
            return Err(WorkloadError::InvalidPeriod(period_len));
        }

        let mut merged = ArrivalMap::new();
        for generator in &mut self.generators {
            merged.merge(generator.generate_sessions(start_time, period_len)?);
        }
        merged.sort_chronologically();
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Emits one fixed-label payload at each listed offset into the window
    struct Fixed {
        label: &'static str,
        offsets: Vec<f64>,
    }

    impl WorkloadGenerator for Fixed {
        type Payload = &'static str;

        fn generate_sessions(
            &mut self,
            start_time: f64,
            _period_len: f64,
        ) -> Result<ArrivalMap<&'static str>, WorkloadError> {
            Ok(self
                .offsets
                .iter()
                .map(|offset| (start_time + offset, self.label))
                .collect())
        }
    }

    #[test]
    fn test_merges_in_time_order() {
        let mut composite = CompositeWorkloadGenerator::new()
            .with(Fixed {
                label: "a",
                offsets: vec![0.0, 4.0],
            })
            .with(Fixed {
                label: "b",
                offsets: vec![2.0, 4.0],
            });

        let arrivals = composite.generate_sessions(10.0, 5.0).unwrap();

        let instants: Vec<f64> = arrivals.instants().collect();
        assert_eq!(instants, vec![10.0, 12.0, 14.0]);
        assert_eq!(arrivals.get(14.0), Some(&["a", "b"][..]));
        assert_eq!(arrivals.total_payloads(), 4);
    }

    #[test]
    fn test_empty_composite_still_validates_window() {
        let mut composite: CompositeWorkloadGenerator<u8> = CompositeWorkloadGenerator::new();
        assert!(composite.is_empty());
        assert!(composite.generate_sessions(0.0, 1.0).unwrap().is_empty());
        assert!(matches!(
            composite.generate_sessions(0.0, 0.0),
            Err(WorkloadError::InvalidPeriod(_))
        ));
    }
}
