use cosmo_params::{
    compile_params, default_params, hash_params, merge_params, CompileOpts, RawParams,
};

fn compiled() -> cosmo_params::CanonicalParams {
    let raw = merge_params(
        &default_params(),
        &RawParams::new()
            .with("H0", 67.4)
            .with("m_ncdm", 0.06)
            .with("A_s", 2.1e-9)
            .with("my_engine_knob", 42.0),
    );
    compile_params(&raw, &CompileOpts::default()).unwrap()
}

#[test]
fn canonical_params_roundtrip_through_json() {
    let params = compiled();
    let json = serde_json::to_string(&params).unwrap();
    let restored: cosmo_params::CanonicalParams = serde_json::from_str(&json).unwrap();
    assert_eq!(params, restored);
}

#[test]
fn canonical_hash_is_stable_across_roundtrip() {
    let params = compiled();
    let json = serde_json::to_string(&params).unwrap();
    let restored: cosmo_params::CanonicalParams = serde_json::from_str(&json).unwrap();
    assert_eq!(
        hash_params(&params).unwrap(),
        hash_params(&restored).unwrap()
    );
}

#[test]
fn recompiling_the_same_input_reproduces_the_hash() {
    let a = compiled();
    let b = compiled();
    assert_eq!(hash_params(&a).unwrap(), hash_params(&b).unwrap());
}
