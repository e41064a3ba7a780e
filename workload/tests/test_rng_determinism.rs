//! Tests for deterministic RNG
//!
//! Same seed MUST produce the same sequence, and therefore the same counts.

use session_workload_core_rs::RngManager;

#[test]
fn test_rng_new_with_seed() {
    let rng = RngManager::new(12345);
    assert_eq!(rng.get_state(), 12345);
}

#[test]
fn test_rng_next_deterministic() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(12345);

    for _ in 0..100 {
        assert_eq!(rng1.next(), rng2.next(), "RNG not deterministic!");
    }
}

#[test]
fn test_rng_different_seeds_different_sequences() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(54321);

    assert_ne!(
        rng1.next(),
        rng2.next(),
        "Different seeds should produce different values"
    );
}

#[test]
fn test_poisson_deterministic() {
    let mut rng1 = RngManager::new(2024);
    let mut rng2 = RngManager::new(2024);

    // Small and large means take different sampling paths
    for lambda in [0.3, 2.0, 9.99, 10.0, 55.5, 1_000.0] {
        for _ in 0..50 {
            assert_eq!(rng1.poisson(lambda).unwrap(), rng2.poisson(lambda).unwrap());
        }
    }
}

#[test]
fn test_rng_replay_from_state() {
    let mut rng1 = RngManager::new(12345);

    for _ in 0..10 {
        rng1.next();
    }

    let checkpoint_state = rng1.get_state();
    let counts1: Vec<u64> = (0..20).map(|_| rng1.poisson(6.0).unwrap()).collect();

    let mut rng2 = RngManager::new(checkpoint_state);
    let counts2: Vec<u64> = (0..20).map(|_| rng2.poisson(6.0).unwrap()).collect();

    assert_eq!(counts1, counts2);
}

#[test]
fn test_seed_bytes_are_stable() {
    let mut a = RngManager::from_seed_bytes(b"web-workload");
    let mut b = RngManager::from_seed_bytes(b"web-workload");

    for _ in 0..100 {
        assert_eq!(a.next(), b.next());
    }
}

#[test]
fn test_poisson_empirical_mean() {
    let mut rng = RngManager::new(31337);
    let lambda = 20.0;
    let draws = 10_000;

    let total: u64 = (0..draws).map(|_| rng.poisson(lambda).unwrap()).sum();
    let mean = total as f64 / draws as f64;

    // Standard error of the mean is sqrt(lambda / draws) ≈ 0.045
    assert!(
        (mean - lambda).abs() < 0.25,
        "empirical mean {} too far from {}",
        mean,
        lambda
    );
}
