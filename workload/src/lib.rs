//! Session Workload Core - Rust Engine
//!
//! Synthesizes time-stamped session arrivals for request-driven workload
//! simulations (e.g. web traffic against a data center).
//!
//! # Architecture
//!
//! - **arrivals**: Windowed Poisson arrival generation and result mappings
//! - **intensity**: Rate models (arrivals per unit of time)
//! - **sessions**: Payload factories turning an arrival instant into a session
//! - **ids**: Thread-safe per-category id allocation
//! - **config**: JSON configuration for generators
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. The realized arrival count is the sum of payloads across all instants
//! 2. Every arrival instant lies inside its window
//! 3. All randomness is deterministic when seeded (one RNG per generator)

// Module declarations
pub mod arrivals;
pub mod config;
pub mod error;
pub mod ids;
pub mod intensity;
pub mod rng;
pub mod sessions;

// Re-exports for convenience
pub use arrivals::{
    ArrivalMap, CompositeWorkloadGenerator, PoissonArrivalGenerator, WorkloadGenerator,
};
pub use config::{IntensityConfig, RateSegment, WorkloadConfig};
pub use error::WorkloadError;
pub use ids::IdAllocator;
pub use intensity::{ConstantIntensity, FnIntensity, IntensitySource, PeriodicIntensity};
pub use rng::RngManager;
pub use sessions::{SessionFactory, WebSession, WebSessionFactory};
