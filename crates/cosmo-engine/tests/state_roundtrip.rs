use cosmo_engine::{Cosmology, CosmologyState};
use cosmo_params::RawParams;

#[test]
fn state_roundtrips_through_disk() {
    let mut cosmo = Cosmology::new(
        RawParams::new()
            .with("H0", 67.4)
            .with("m_ncdm", 0.06)
            .with("neutrino_hierarchy", "normal"),
    )
    .unwrap();
    cosmo
        .set_engine("friedmann", RawParams::new().with("epsrel", 1e-8))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cosmology.json");
    cosmo.state().unwrap().save(&path).unwrap();

    let restored_state = CosmologyState::load(&path).unwrap();
    let restored = Cosmology::from_state(&restored_state).unwrap();

    assert_eq!(restored.params(), cosmo.params());
    let engine = restored.engine().expect("engine re-attached");
    assert_eq!(engine.name(), "friedmann");
    assert_eq!(
        engine.extra().get("epsrel").unwrap().as_f64("epsrel").unwrap(),
        1e-8
    );
    // Background capability is live on the reloaded instance.
    let e0 = restored.background().unwrap().efunc(0.0).unwrap();
    assert!((e0 - 1.0).abs() < 1e-9);
}

#[test]
fn engineless_state_reloads_without_an_engine() {
    let cosmo = Cosmology::new(RawParams::new()).unwrap();
    let state = cosmo.state().unwrap();
    let json = state.to_json().unwrap();
    let restored = Cosmology::from_state(&CosmologyState::from_json(&json).unwrap()).unwrap();
    assert!(restored.engine().is_none());
    assert_eq!(restored.params(), cosmo.params());
}

#[test]
fn tampered_state_fails_the_hash_check() {
    let cosmo = Cosmology::new(RawParams::new()).unwrap();
    let mut state = cosmo.state().unwrap();
    state.raw.set("n_s", 0.99);
    let err = Cosmology::from_state(&state).unwrap_err();
    assert_eq!(err.info().code, "state-hash-mismatch");
}
