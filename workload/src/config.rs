//! Generator configuration
//!
//! Workloads are described as JSON so experiments can be replayed from a file:
//!
//! ```json
//! {
//!   "seed": 42,
//!   "intensity": {
//!     "type": "periodic",
//!     "unit": 3600.0,
//!     "period": 86400.0,
//!     "segments": [
//!       { "offset": 0.0, "rate": 20.0 },
//!       { "offset": 28800.0, "rate": 400.0 }
//!     ]
//!   }
//! }
//! ```
//!
//! A missing `seed` means an unseeded (non-reproducible) generator.

use crate::arrivals::PoissonArrivalGenerator;
use crate::error::WorkloadError;
use crate::intensity::{ConstantIntensity, IntensitySource, PeriodicIntensity};
use crate::sessions::SessionFactory;
use serde::{Deserialize, Serialize};

/// One step of a periodic rate profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSegment {
    /// Offset from the start of the period at which this rate takes effect
    pub offset: f64,

    /// Expected arrivals per unit while active
    pub rate: f64,
}

/// Intensity model selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntensityConfig {
    /// Same rate at all times
    Constant { unit: f64, rate: f64 },

    /// Piecewise-constant profile repeating every `period`
    Periodic {
        unit: f64,
        period: f64,
        segments: Vec<RateSegment>,
    },
}

impl IntensityConfig {
    pub fn validate(&self) -> Result<(), WorkloadError> {
        match self {
            IntensityConfig::Constant { unit, rate } => {
                if !(*unit > 0.0) || !unit.is_finite() {
                    return Err(WorkloadError::InvalidConfig(format!(
                        "unit must be > 0, got {}",
                        unit
                    )));
                }
                if !(*rate >= 0.0) || !rate.is_finite() {
                    return Err(WorkloadError::InvalidConfig(format!(
                        "rate must be finite and >= 0, got {}",
                        rate
                    )));
                }
                Ok(())
            }
            // PeriodicIntensity::new carries the full table checks
            IntensityConfig::Periodic { .. } => self.build().map(|_| ()),
        }
    }

    /// Build the intensity source this config describes
    pub fn build(&self) -> Result<Box<dyn IntensitySource + Send>, WorkloadError> {
        match self {
            IntensityConfig::Constant { unit, rate } => {
                Ok(Box::new(ConstantIntensity::new(*unit, *rate)))
            }
            IntensityConfig::Periodic {
                unit,
                period,
                segments,
            } => {
                let table = segments.iter().map(|s| (s.offset, s.rate)).collect();
                Ok(Box::new(PeriodicIntensity::new(*unit, *period, table)?))
            }
        }
    }
}

/// Full description of one Poisson workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// RNG seed; `None` for a non-reproducible run
    #[serde(default)]
    pub seed: Option<u64>,

    pub intensity: IntensityConfig,
}

impl WorkloadConfig {
    /// Parse and validate a JSON config
    ///
    /// # Example
    /// ```
    /// use session_workload_core_rs::WorkloadConfig;
    ///
    /// let config = WorkloadConfig::from_json(
    ///     r#"{ "seed": 7, "intensity": { "type": "constant", "unit": 1.0, "rate": 3.0 } }"#,
    /// ).unwrap();
    /// assert_eq!(config.seed, Some(7));
    /// ```
    pub fn from_json(json: &str) -> Result<Self, WorkloadError> {
        let config: WorkloadConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, WorkloadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), WorkloadError> {
        self.intensity.validate()
    }

    /// Build a generator for this workload around `factory`
    pub fn build_generator<F>(
        &self,
        factory: F,
    ) -> Result<PoissonArrivalGenerator<Box<dyn IntensitySource + Send>, F>, WorkloadError>
    where
        F: SessionFactory,
    {
        self.validate()?;
        let intensity = self.intensity.build()?;
        Ok(PoissonArrivalGenerator::new(self.seed, intensity, factory))
    }
}
