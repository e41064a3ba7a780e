//! Windowed Poisson arrival generation
//!
//! For a window `[start_time, start_time + period_len)` the generator:
//!
//! 1. reads `unit` and `rate(start_time)` from its intensity source, treating
//!    the rate as constant over the window,
//! 2. computes `expected = rate * period_len / unit`,
//! 3. draws `count ~ Poisson(expected)` from its own RNG,
//! 4. places arrival `i` at `start_time + i * period_len / count`,
//! 5. asks its session factory for one payload per arrival, in time order.
//!
//! Only the count is random; the layout inside the window is even spacing
//! from the left edge. Keep windows short compared to how fast the intensity
//! changes, since the rate is sampled only at the window start.

use super::{ArrivalMap, WorkloadGenerator};
use crate::error::WorkloadError;
use crate::intensity::IntensitySource;
use crate::rng::RngManager;
use crate::sessions::SessionFactory;
use tracing::{debug, trace};

/// Upper bound on up-front allocation for one window
const MAX_PREALLOCATED_INSTANTS: u64 = 1 << 16;

/// Generates Poisson-distributed session arrivals, one window at a time
///
/// Owns its RNG: the same seed and the same sequence of `generate` calls
/// reproduce the same arrivals, given deterministic collaborators.
///
/// # Example
/// ```
/// use session_workload_core_rs::{ConstantIntensity, PoissonArrivalGenerator};
/// use session_workload_core_rs::sessions::from_fn;
///
/// let intensity = ConstantIntensity::new(1.0, 2.0);
/// let factory = from_fn(|t| Ok(t));
/// let mut generator = PoissonArrivalGenerator::seeded(42, intensity, factory);
///
/// let arrivals = generator.generate(0.0, 10.0).unwrap();
/// assert!(arrivals.instants().all(|t| (0.0..10.0).contains(&t)));
/// ```
#[derive(Debug)]
pub struct PoissonArrivalGenerator<I, F> {
    intensity: I,
    factory: F,
    rng: RngManager,
}

impl<I, F> PoissonArrivalGenerator<I, F>
where
    I: IntensitySource,
    F: SessionFactory,
{
    /// Create a generator, seeded when `seed` is given
    pub fn new(seed: Option<u64>, intensity: I, factory: F) -> Self {
        let rng = match seed {
            Some(seed) => RngManager::new(seed),
            None => RngManager::from_entropy(),
        };
        Self::with_rng(rng, intensity, factory)
    }

    /// Reproducible generator
    pub fn seeded(seed: u64, intensity: I, factory: F) -> Self {
        Self::with_rng(RngManager::new(seed), intensity, factory)
    }

    /// Non-reproducible generator for independent runs
    pub fn unseeded(intensity: I, factory: F) -> Self {
        Self::with_rng(RngManager::from_entropy(), intensity, factory)
    }

    /// Reproducible generator keyed by an arbitrary byte string
    pub fn from_seed_bytes(seed: &[u8], intensity: I, factory: F) -> Self {
        Self::with_rng(RngManager::from_seed_bytes(seed), intensity, factory)
    }

    /// Generator driven by an existing RNG (e.g. one restored from `rng_state`)
    pub fn with_rng(rng: RngManager, intensity: I, factory: F) -> Self {
        Self {
            intensity,
            factory,
            rng,
        }
    }

    /// Current RNG state, for checkpoint/replay
    pub fn rng_state(&self) -> u64 {
        self.rng.get_state()
    }

    pub fn intensity(&self) -> &I {
        &self.intensity
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    /// Expected number of arrivals in the window, without drawing anything
    ///
    /// # Errors
    /// - `InvalidPeriod` if `period_len` is not finite and positive
    /// - `InvalidUnit` / `InvalidRate` if the intensity source breaks its contract
    /// - any error the intensity source itself returns
    pub fn expected_arrivals(&self, start_time: f64, period_len: f64) -> Result<f64, WorkloadError> {
        if !(period_len > 0.0) || !period_len.is_finite() {
            return Err(WorkloadError::InvalidPeriod(period_len));
        }

        let unit = self.intensity.unit()?;
        if !(unit > 0.0) || !unit.is_finite() {
            return Err(WorkloadError::InvalidUnit(unit));
        }

        let rate = self.intensity.rate(start_time)?;
        if !rate.is_finite() {
            return Err(WorkloadError::InvalidRate(rate));
        }

        Ok(rate * (period_len / unit))
    }

    /// Generate the arrivals of window `[start_time, start_time + period_len)`
    ///
    /// Returns an empty map when no arrivals are expected or none are drawn.
    /// Errors from the intensity source or factory are returned unchanged, and
    /// no partial map is ever returned.
    pub fn generate(
        &mut self,
        start_time: f64,
        period_len: f64,
    ) -> Result<ArrivalMap<F::Payload>, WorkloadError> {
        let expected = self.expected_arrivals(start_time, period_len)?;
        if expected <= 0.0 {
            trace!(start_time, period_len, "no arrivals expected in window");
            return Ok(ArrivalMap::new());
        }

        let count = self.rng.poisson(expected)?;
        debug!(start_time, period_len, expected, count, "realized arrival window");

        let capacity = count.min(MAX_PREALLOCATED_INSTANTS) as usize;
        let mut arrivals = ArrivalMap::with_capacity(capacity);
        if count == 0 {
            return Ok(arrivals);
        }

        let step = period_len / count as f64;
        // Rounding near large start times can land on the window end
        let last_instant = start_time.max(float_below(start_time + period_len));
        for i in 0..count {
            let instant = (start_time + i as f64 * step).min(last_instant);
            let payload = self.factory.create_at(instant)?;
            arrivals.push(instant, payload);
        }

        Ok(arrivals)
    }
}

/// Largest f64 strictly below finite `x`
fn float_below(x: f64) -> f64 {
    if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else if x < 0.0 {
        f64::from_bits(x.to_bits() + 1)
    } else {
        -f64::from_bits(1)
    }
}

impl<I, F> WorkloadGenerator for PoissonArrivalGenerator<I, F>
where
    I: IntensitySource,
    F: SessionFactory,
{
    type Payload = F::Payload;

    fn generate_sessions(
        &mut self,
        start_time: f64,
        period_len: f64,
    ) -> Result<ArrivalMap<F::Payload>, WorkloadError> {
        self.generate(start_time, period_len)
    }
}
