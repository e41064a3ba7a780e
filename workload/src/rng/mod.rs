//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! Each generator owns its own `RngManager`; nothing in this crate shares one.
//! `RngManager` implements `rand::RngCore`, so Poisson counts come from
//! `rand_distr` while staying on the replayable xorshift stream.

mod xorshift;

pub use xorshift::RngManager;
