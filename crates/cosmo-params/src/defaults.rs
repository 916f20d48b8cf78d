//! Default cosmological and calculation parameters.
//!
//! The neutrino content (`m_ncdm`, `neutrino_hierarchy`) and the output
//! redshift grid (`z_pk`) default to absent; the compiler fills them.

use cosmo_core::constants::{N_EFF, T_CMB, T_NCDM};

use crate::raw::RawParams;

/// Default cosmological parameters.
pub fn default_cosmology() -> RawParams {
    RawParams::new()
        .with("h", 0.7)
        .with("Omega_cdm", 0.25)
        .with("Omega_b", 0.05)
        .with("Omega_k", 0.0)
        .with("sigma8", 0.8)
        .with("k_pivot", 0.05)
        .with("n_s", 0.96)
        .with("alpha_s", 0.0)
        .with("r", 0.0)
        .with("T_cmb", T_CMB)
        .with("T_ncdm", T_NCDM)
        .with("N_eff", N_EFF)
        .with("tau_reio", 0.06)
        .with("reionization_width", 0.5)
        .with("A_L", 1.0)
        .with("w0_fld", -1.0)
        .with("wa_fld", 0.0)
        .with("cs2_fld", 1.0)
}

/// Default calculation parameters.
pub fn default_calculation() -> RawParams {
    RawParams::new()
        .with("non_linear", "")
        .with("modes", vec!["s".to_string()])
        .with("lensing", false)
        .with("kmax_pk", 10.0)
        .with("ellmax_cl", 2500.0)
}

/// All default parameters.
pub fn default_params() -> RawParams {
    let mut all = default_cosmology();
    for (name, value) in default_calculation().iter() {
        all.set(name, value.clone());
    }
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflicts::check_conflicts;

    #[test]
    fn defaults_are_conflict_free() {
        check_conflicts(&default_params()).unwrap();
    }
}
