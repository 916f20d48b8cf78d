use cosmo_core::Hierarchy;
use cosmo_ncdm::{split_summed_mass, SplitOpts};

fn sum_of(masses: [f64; 3]) -> f64 {
    masses[0] + masses[1] + masses[2]
}

#[test]
fn sums_are_preserved_above_each_minimum() {
    let opts = SplitOpts::default();
    for &sum in &[0.06, 0.1, 0.2, 0.6, 1.2] {
        let m = split_summed_mass(sum, Hierarchy::Normal, &opts).unwrap();
        assert!((sum_of(m) - sum).abs() < 1e-10, "normal {sum}: {m:?}");
    }
    for &sum in &[0.0978, 0.1, 0.2, 0.6, 1.2] {
        let m = split_summed_mass(sum, Hierarchy::Inverted, &opts).unwrap();
        assert!((sum_of(m) - sum).abs() < 1e-10, "inverted {sum}: {m:?}");
    }
    for &sum in &[0.0, 0.06, 0.3] {
        let m = split_summed_mass(sum, Hierarchy::Degenerate, &opts).unwrap();
        assert!((sum_of(m) - sum).abs() < 1e-12, "degenerate {sum}: {m:?}");
    }
}

#[test]
fn normal_boundary_succeeds_and_below_fails() {
    let opts = SplitOpts::default();
    let m = split_summed_mass(0.0592, Hierarchy::Normal, &opts).unwrap();
    assert!((sum_of(m) - 0.0592).abs() < 1e-10, "{m:?}");

    let err = split_summed_mass(0.05, Hierarchy::Normal, &opts).unwrap_err();
    assert_eq!(err.info().code, "hierarchy-minimum");
}

#[test]
fn inverted_boundary_succeeds_and_below_fails() {
    let opts = SplitOpts::default();
    let m = split_summed_mass(0.0978, Hierarchy::Inverted, &opts).unwrap();
    assert!((sum_of(m) - 0.0978).abs() < 1e-10, "{m:?}");

    let err = split_summed_mass(0.09, Hierarchy::Inverted, &opts).unwrap_err();
    assert_eq!(err.info().code, "hierarchy-minimum");
}

#[test]
fn degenerate_sixty_mev_gives_three_twenty_mev_states() {
    let m = split_summed_mass(0.06, Hierarchy::Degenerate, &SplitOpts::default()).unwrap();
    assert_eq!(m, [0.02, 0.02, 0.02]);
}

#[test]
fn near_physical_minimum_still_sums_correctly() {
    // Just past the inverted kink the attainable residual is limited by the
    // square-root granularity; the stall acceptance keeps the sum good to
    // well under the 1e-10 contract.
    let opts = SplitOpts::default();
    for &sum in &[0.0993, 0.0994, 0.0995] {
        let m = split_summed_mass(sum, Hierarchy::Inverted, &opts).unwrap();
        assert!((sum_of(m) - sum).abs() < 1e-10, "inverted {sum}: {m:?}");
        assert!(m[2] >= 0.0, "lightest state clamped: {m:?}");
    }
}
