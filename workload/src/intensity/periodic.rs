//! Repeating piecewise-constant rate profile
//!
//! Models cyclic load such as a daily traffic curve: the period is split into
//! segments, each with its own rate, and the profile repeats forever in both
//! directions of time.

use super::IntensitySource;
use crate::error::WorkloadError;

/// Piecewise-constant rate that repeats every `period`
///
/// Segments are `(offset, rate)` pairs; a segment is active from its offset
/// until the next segment's offset (or the end of the period).
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicIntensity {
    unit: f64,
    period: f64,
    segments: Vec<(f64, f64)>,
}

impl PeriodicIntensity {
    /// Create a validated periodic profile
    ///
    /// # Errors
    /// `InvalidConfig` when the unit or period is not positive, when the
    /// segment table is empty, does not start at offset 0, is not strictly
    /// increasing, leaves the period, or holds a negative or non-finite rate.
    pub fn new(unit: f64, period: f64, segments: Vec<(f64, f64)>) -> Result<Self, WorkloadError> {
        if !(unit > 0.0) || !unit.is_finite() {
            return Err(WorkloadError::InvalidConfig(format!(
                "unit must be > 0, got {}",
                unit
            )));
        }
        if !(period > 0.0) || !period.is_finite() {
            return Err(WorkloadError::InvalidConfig(format!(
                "period must be > 0, got {}",
                period
            )));
        }

        match segments.first() {
            None => {
                return Err(WorkloadError::InvalidConfig(
                    "at least one rate segment is required".to_string(),
                ))
            }
            Some((offset, _)) if *offset != 0.0 => {
                return Err(WorkloadError::InvalidConfig(format!(
                    "first segment must start at offset 0, got {}",
                    offset
                )))
            }
            Some(_) => {}
        }

        for window in segments.windows(2) {
            if !(window[1].0 > window[0].0) {
                return Err(WorkloadError::InvalidConfig(format!(
                    "segment offsets must be strictly increasing ({} then {})",
                    window[0].0, window[1].0
                )));
            }
        }

        for (offset, rate) in &segments {
            if *offset >= period {
                return Err(WorkloadError::InvalidConfig(format!(
                    "segment offset {} lies outside period {}",
                    offset, period
                )));
            }
            if !(*rate >= 0.0) || !rate.is_finite() {
                return Err(WorkloadError::InvalidConfig(format!(
                    "segment rate must be finite and >= 0, got {}",
                    rate
                )));
            }
        }

        Ok(Self {
            unit,
            period,
            segments,
        })
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn segments(&self) -> &[(f64, f64)] {
        &self.segments
    }
}

impl IntensitySource for PeriodicIntensity {
    fn unit(&self) -> Result<f64, WorkloadError> {
        Ok(self.unit)
    }

    fn rate(&self, t: f64) -> Result<f64, WorkloadError> {
        if !t.is_finite() {
            return Err(WorkloadError::Intensity(format!(
                "cannot evaluate rate at non-finite time {}",
                t
            )));
        }

        // rem_euclid keeps negative times inside [0, period)
        let phase = t.rem_euclid(self.period);
        let idx = self
            .segments
            .partition_point(|(offset, _)| *offset <= phase)
            .saturating_sub(1);
        Ok(self.segments[idx].1)
    }
}
