//! Intensity sources: how many arrivals to expect per unit of time
//!
//! A source reports a time `unit` and a `rate(t)`, the expected number of
//! arrivals per `unit` at instant `t`. Generators sample the rate once per
//! window, so a source only needs to answer point queries.
//!
//! # Example
//!
//! ```
//! use session_workload_core_rs::intensity::{IntensitySource, PeriodicIntensity};
//!
//! // Busy first half of each 100s cycle, quiet second half
//! let profile = PeriodicIntensity::new(1.0, 100.0, vec![(0.0, 5.0), (50.0, 0.5)]).unwrap();
//! assert_eq!(profile.rate(10.0).unwrap(), 5.0);
//! assert_eq!(profile.rate(175.0).unwrap(), 0.5);
//! ```

mod periodic;

pub use periodic::PeriodicIntensity;

use crate::error::WorkloadError;

/// Rate model consumed by arrival generators
pub trait IntensitySource {
    /// Length of time over which `rate` is expressed
    fn unit(&self) -> Result<f64, WorkloadError>;

    /// Expected arrivals per `unit` at instant `t`
    fn rate(&self, t: f64) -> Result<f64, WorkloadError>;
}

impl<S: IntensitySource + ?Sized> IntensitySource for Box<S> {
    fn unit(&self) -> Result<f64, WorkloadError> {
        (**self).unit()
    }

    fn rate(&self, t: f64) -> Result<f64, WorkloadError> {
        (**self).rate(t)
    }
}

impl<S: IntensitySource + ?Sized> IntensitySource for &S {
    fn unit(&self) -> Result<f64, WorkloadError> {
        (**self).unit()
    }

    fn rate(&self, t: f64) -> Result<f64, WorkloadError> {
        (**self).rate(t)
    }
}

/// Time-invariant rate
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConstantIntensity {
    pub unit: f64,
    pub rate: f64,
}

impl ConstantIntensity {
    pub fn new(unit: f64, rate: f64) -> Self {
        Self { unit, rate }
    }
}

impl IntensitySource for ConstantIntensity {
    fn unit(&self) -> Result<f64, WorkloadError> {
        Ok(self.unit)
    }

    fn rate(&self, _t: f64) -> Result<f64, WorkloadError> {
        Ok(self.rate)
    }
}

/// Closure-backed rate model
///
/// Lets callers plug an arbitrary (possibly fallible) rate function in
/// without defining a type for it.
pub struct FnIntensity<R> {
    unit: f64,
    rate_fn: R,
}

impl<R> FnIntensity<R>
where
    R: Fn(f64) -> Result<f64, WorkloadError>,
{
    pub fn new(unit: f64, rate_fn: R) -> Self {
        Self { unit, rate_fn }
    }
}

impl<R> IntensitySource for FnIntensity<R>
where
    R: Fn(f64) -> Result<f64, WorkloadError>,
{
    fn unit(&self) -> Result<f64, WorkloadError> {
        Ok(self.unit)
    }

    fn rate(&self, t: f64) -> Result<f64, WorkloadError> {
        (self.rate_fn)(t)
    }
}

impl<R> std::fmt::Debug for FnIntensity<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnIntensity")
            .field("unit", &self.unit)
            .finish_non_exhaustive()
    }
}
