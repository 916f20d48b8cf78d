use cosmo_core::constants::{N_EFF, T_NCDM};
use cosmo_core::ParamValue;
use cosmo_params::{
    check_conflicts, compile_params, default_params, merge_params, CompileOpts, RawParams,
};

fn compile(raw: RawParams) -> cosmo_params::CanonicalParams {
    let merged = merge_params(&default_params(), &raw);
    check_conflicts(&merged).expect("conflict-free");
    compile_params(&merged, &CompileOpts::default()).expect("compile")
}

#[test]
fn big_h0_normalises_to_h() {
    let params = compile(RawParams::new().with("H0", 70.0));
    assert_eq!(params.h, 0.7);
    assert!(!params.extra.contains_key("H0"));
}

#[test]
fn small_omegas_divide_by_h_squared() {
    let params = compile(
        RawParams::new()
            .with("h", 0.7)
            .with("omega_b", 0.0245)
            .with("omega_cdm", 0.1225),
    );
    assert!((params.Omega_b - 0.05).abs() < 1e-12);
    assert!((params.Omega_cdm - 0.25).abs() < 1e-12);
}

#[test]
fn legacy_spellings_map_one_to_one() {
    let params = compile(
        RawParams::new()
            .with("Omega0_b", 0.049)
            .with("omega_c", 0.1225),
    );
    assert!((params.Omega_b - 0.049).abs() < 1e-12);
    assert!((params.Omega_cdm - 0.25).abs() < 1e-12);
}

#[test]
fn merge_precedence_is_conflict_group_wise() {
    let base = merge_params(&default_params(), &RawParams::new().with("H0", 70.0));
    let merged = merge_params(&base, &RawParams::new().with("h", 0.72));
    assert!(!merged.contains("H0"));
    let params = compile_params(&merged, &CompileOpts::default()).unwrap();
    assert_eq!(params.h, 0.72);
}

#[test]
fn explicit_masses_are_used_as_is() {
    let params = compile(RawParams::new().with("m_ncdm", vec![0.06, 0.01]));
    assert_eq!(params.m_ncdm(), vec![0.06, 0.01]);
    assert_eq!(params.T_ncdm(), vec![T_NCDM, T_NCDM]);
}

#[test]
fn density_fraction_inverts_to_a_mass() {
    let omega = 0.0006442 / 0.49;
    let params = compile(RawParams::new().with("h", 0.7).with("Omega_ncdm", omega));
    assert_eq!(params.N_ncdm(), 1);
    let mass = params.m_ncdm()[0];
    assert!((mass - 0.06).abs() < 1e-3, "mass {mass}");
    // The compiled total reproduces the request.
    assert!(
        (params.Omega_ncdm - omega).abs() / omega < 1e-9,
        "Omega_ncdm {}",
        params.Omega_ncdm
    );
}

#[test]
fn zero_density_fraction_short_circuits_to_zero_mass() {
    // With an explicit N_ur the massless species survives the accounting.
    let params = compile(RawParams::new().with("Omega_ncdm", 0.0).with("N_ur", 3.044));
    assert_eq!(params.m_ncdm(), vec![0.0]);

    // Under N_eff accounting it folds into N_ur instead.
    let params = compile(RawParams::new().with("Omega_ncdm", 0.0));
    assert_eq!(params.N_ncdm(), 0);
    assert!((params.N_ur - N_EFF).abs() < 1e-12);
}

#[test]
fn summed_mass_splits_under_a_hierarchy() {
    let params = compile(
        RawParams::new()
            .with("m_ncdm", 0.1)
            .with("neutrino_hierarchy", "normal"),
    );
    let masses = params.m_ncdm();
    assert_eq!(masses.len(), 3);
    let sum: f64 = masses.iter().sum();
    assert!((sum - 0.1).abs() < 1e-10);
    assert_eq!(params.T_ncdm(), vec![T_NCDM; 3]);
}

#[test]
fn degenerate_hierarchy_splits_evenly() {
    let params = compile(
        RawParams::new()
            .with("m_ncdm", 0.06)
            .with("neutrino_hierarchy", "degenerate"),
    );
    assert_eq!(params.m_ncdm(), vec![0.02, 0.02, 0.02]);
}

#[test]
fn hierarchy_with_a_mass_list_is_fatal() {
    let merged = merge_params(
        &default_params(),
        &RawParams::new()
            .with("m_ncdm", vec![0.02, 0.02, 0.02])
            .with("neutrino_hierarchy", "normal"),
    );
    let err = compile_params(&merged, &CompileOpts::default()).unwrap_err();
    assert_eq!(err.info().code, "hierarchy-needs-sum");
}

#[test]
fn unknown_hierarchy_name_is_fatal() {
    let merged = merge_params(
        &default_params(),
        &RawParams::new()
            .with("m_ncdm", 0.1)
            .with("neutrino_hierarchy", "sideways"),
    );
    let err = compile_params(&merged, &CompileOpts::default()).unwrap_err();
    assert_eq!(err.info().code, "unknown-hierarchy");
}

#[test]
fn n_ur_subtracts_each_massive_species_share() {
    let params = compile(RawParams::new().with("m_ncdm", 0.06));
    let expected = N_EFF - T_NCDM.powi(4) * (4.0f64 / 11.0).powf(-4.0 / 3.0);
    assert!((params.N_ur - expected).abs() < 1e-12, "N_ur {}", params.N_ur);
    assert!((params.N_eff() - N_EFF).abs() < 1e-12);
}

#[test]
fn sub_threshold_masses_count_as_relativistic() {
    let params = compile(RawParams::new().with("m_ncdm", vec![0.06, 1e-5]));
    assert_eq!(params.N_ncdm(), 1);
    let expected = N_EFF - T_NCDM.powi(4) * (4.0f64 / 11.0).powf(-4.0 / 3.0);
    assert!((params.N_ur - expected).abs() < 1e-12);
}

#[test]
fn explicit_n_ur_is_used_as_is() {
    let params = compile(RawParams::new().with("m_ncdm", 0.06).with("N_ur", 2.0));
    assert_eq!(params.N_ur, 2.0);
}

#[test]
fn too_much_massive_content_is_rejected() {
    let merged = merge_params(
        &default_params(),
        &RawParams::new()
            .with("m_ncdm", vec![0.06, 0.06, 0.06, 0.06])
            .with("N_eff", 3.044),
    );
    let err = compile_params(&merged, &CompileOpts::default()).unwrap_err();
    assert_eq!(err.info().code, "negative-n-ur");
}

#[test]
fn total_matter_backs_out_the_cdm_fraction() {
    let params = compile(
        RawParams::new()
            .with("Omega_m", 0.31)
            .with("m_ncdm", 0.06),
    );
    // Omega_cdm = Omega_m - Omega_b - (rho - 3p)/rho_crit at the Omega level.
    let expected = 0.31 - 0.05 - 0.0013145620;
    assert!(
        (params.Omega_cdm - expected).abs() < 1e-8,
        "Omega_cdm {}",
        params.Omega_cdm
    );
}

#[test]
fn z_pk_always_contains_the_zero_anchor() {
    let params = compile(RawParams::new());
    assert!(params.z_pk.contains(&0.0));

    let params = compile(RawParams::new().with("z_pk", vec![1.0, 2.0]));
    assert_eq!(params.z_pk, vec![1.0, 2.0, 0.0]);
}

#[test]
fn mismatched_species_lengths_are_fatal() {
    let merged = merge_params(
        &default_params(),
        &RawParams::new()
            .with("m_ncdm", vec![0.06, 0.05])
            .with("T_ncdm", vec![0.7]),
    );
    let err = compile_params(&merged, &CompileOpts::default()).unwrap_err();
    assert_eq!(err.info().code, "species-length-mismatch");
}

#[test]
fn ln_amplitude_exponentiates_to_a_s() {
    let params = compile(RawParams::new().with("ln10^{10}A_s", 3.0));
    let a_s = params.A_s.unwrap();
    assert!((a_s - 3.0f64.exp() * 1e-10).abs() < 1e-22);
    assert_eq!(params.sigma8, None);
}

#[test]
fn unrecognized_names_pass_through() {
    let params = compile(RawParams::new().with("my_engine_knob", 42.0));
    assert_eq!(
        params.extra.get("my_engine_knob"),
        Some(&ParamValue::Float(42.0))
    );
    assert_eq!(
        params.get("my_engine_knob").unwrap(),
        ParamValue::Float(42.0)
    );
}

#[test]
fn compilation_is_pure() {
    let raw = merge_params(&default_params(), &RawParams::new().with("H0", 70.0));
    let before = raw.clone();
    let _ = compile_params(&raw, &CompileOpts::default()).unwrap();
    assert_eq!(raw, before);
}
