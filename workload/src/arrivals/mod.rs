//! Arrival generation: from an intensity model to time-located sessions.
//!
//! # Key Principles
//!
//! 1. **Determinism**: Same seed + same sequence of windows → same arrivals
//! 2. **Poisson Counts**: Arrivals per window follow Po(rate × window / unit)
//! 3. **Even Layout**: Arrivals are spread evenly over the window, starting at its left edge
//! 4. **Pluggable Collaborators**: Rate model and payload factory are injected
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use session_workload_core_rs::{
//!     ConstantIntensity, IdAllocator, PoissonArrivalGenerator, WebSessionFactory,
//! };
//!
//! let ids = Arc::new(IdAllocator::with_defaults());
//! let mut generator = PoissonArrivalGenerator::seeded(
//!     42,
//!     ConstantIntensity::new(1.0, 2.0),
//!     WebSessionFactory::new("browse", ids),
//! );
//!
//! let arrivals = generator.generate(0.0, 10.0).unwrap();
//! for (instant, sessions) in arrivals.iter() {
//!     assert!(sessions.iter().all(|s| s.start_time() == instant));
//! }
//! ```

mod composite;
mod generator;
mod map;

pub use composite::CompositeWorkloadGenerator;
pub use generator::PoissonArrivalGenerator;
pub use map::ArrivalMap;

use crate::error::WorkloadError;

/// Anything that can produce the sessions of a time window
pub trait WorkloadGenerator {
    type Payload;

    /// Sessions arriving in `[start_time, start_time + period_len)`, keyed by instant
    fn generate_sessions(
        &mut self,
        start_time: f64,
        period_len: f64,
    ) -> Result<ArrivalMap<Self::Payload>, WorkloadError>;
}

impl<G: WorkloadGenerator + ?Sized> WorkloadGenerator for Box<G> {
    type Payload = G::Payload;

    fn generate_sessions(
        &mut self,
        start_time: f64,
        period_len: f64,
    ) -> Result<ArrivalMap<Self::Payload>, WorkloadError> {
        (**self).generate_sessions(start_time, period_len)
    }
}
