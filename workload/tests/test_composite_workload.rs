//! Tests for running several session workloads over shared windows

use session_workload_core_rs::{
    CompositeWorkloadGenerator, ConstantIntensity, IdAllocator, PeriodicIntensity,
    PoissonArrivalGenerator, WebSession, WebSessionFactory, WorkloadError, WorkloadGenerator,
};
use std::sync::Arc;

fn site(seed: u64, ids: &Arc<IdAllocator>) -> CompositeWorkloadGenerator<WebSession> {
    let browse = PoissonArrivalGenerator::seeded(
        seed,
        ConstantIntensity::new(1.0, 4.0),
        WebSessionFactory::new("browse", Arc::clone(ids)),
    );
    // Checkout traffic only in the second half of every 60s cycle
    let checkout = PoissonArrivalGenerator::seeded(
        seed + 1,
        PeriodicIntensity::new(1.0, 60.0, vec![(0.0, 0.0), (30.0, 2.0)]).unwrap(),
        WebSessionFactory::new("checkout", Arc::clone(ids)),
    );

    CompositeWorkloadGenerator::new().with(browse).with(checkout)
}

#[test]
fn test_merged_window_is_chronological() {
    let ids = Arc::new(IdAllocator::with_defaults());
    let mut composite = site(5, &ids);
    assert_eq!(composite.len(), 2);

    let arrivals = composite.generate_sessions(30.0, 10.0).unwrap();

    let instants: Vec<f64> = arrivals.instants().collect();
    assert!(instants.windows(2).all(|w| w[0] < w[1]));
    assert!(instants.iter().all(|t| (30.0..40.0).contains(t)));
    for (instant, sessions) in arrivals.iter() {
        assert!(sessions.iter().all(|s| s.start_time() == instant));
    }
}

#[test]
fn test_quiet_member_contributes_nothing() {
    let ids = Arc::new(IdAllocator::with_defaults());
    let mut composite = site(5, &ids);

    // Checkout rate is 0 during [0, 30)
    let arrivals = composite.generate_sessions(0.0, 10.0).unwrap();
    assert!(arrivals.payloads().all(|s| s.kind() == "browse"));
}

#[test]
fn test_both_members_share_the_window_start() {
    let ids = Arc::new(IdAllocator::with_defaults());
    let mut composite = site(21, &ids);

    // Long window so both members almost surely draw at least one session,
    // and every non-empty member places one at the window start
    let arrivals = composite.generate_sessions(30.0, 25.0).unwrap();
    let at_start = arrivals.get(30.0).expect("window start has arrivals");
    let kinds: Vec<&str> = at_start.iter().map(|s| s.kind()).collect();

    assert_eq!(kinds, vec!["browse", "checkout"]);
}

#[test]
fn test_composite_is_reproducible() {
    let ids_a = Arc::new(IdAllocator::with_defaults());
    let ids_b = Arc::new(IdAllocator::with_defaults());
    let mut a = site(99, &ids_a);
    let mut b = site(99, &ids_b);

    for w in 0..12 {
        let start = w as f64 * 15.0;
        assert_eq!(
            a.generate_sessions(start, 15.0).unwrap(),
            b.generate_sessions(start, 15.0).unwrap()
        );
    }
}

#[test]
fn test_member_failure_aborts_window() {
    let ids = Arc::new(IdAllocator::with_defaults());
    let mut composite = site(3, &ids);
    composite.add(PoissonArrivalGenerator::seeded(
        4,
        ConstantIntensity::new(0.0, 1.0),
        WebSessionFactory::new("broken", Arc::clone(&ids)),
    ));

    assert!(matches!(
        composite.generate_sessions(0.0, 5.0),
        Err(WorkloadError::InvalidUnit(_))
    ));
}
