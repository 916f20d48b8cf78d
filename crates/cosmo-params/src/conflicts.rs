//! Conflict groups: sets of parameter names that denote the same physical
//! quantity in different units or forms.

use cosmo_core::errors::{CosmoError, ErrorInfo};

use crate::raw::RawParams;

/// Groups of mutually-exclusive parameter names. Groups partition the
/// recognized-alias name space: a name belongs to at most one group.
pub const CONFLICT_GROUPS: &[&[&str]] = &[
    &["h", "H0"],
    &["T_cmb", "Omega_g", "omega_g", "Omega0_g"],
    &["Omega_b", "omega_b", "Omega0_b"],
    &["N_ur", "Omega_ur", "omega_ur", "Omega0_ur", "N_eff"],
    &["Omega_cdm", "omega_cdm", "Omega0_cdm", "Omega_c", "omega_c"],
    &["m_ncdm", "Omega_ncdm", "omega_ncdm", "Omega0_ncdm"],
    &["A_s", "ln10^{10}A_s", "sigma8"],
    &["tau_reio", "z_reio"],
];

/// Returns the conflict group containing `name`, or an empty slice.
pub fn find_conflicts(name: &str) -> &'static [&'static str] {
    for group in CONFLICT_GROUPS {
        if group.contains(&name) {
            return group;
        }
    }
    &[]
}

/// Rejects the mapping if two or more names from the same conflict group are
/// simultaneously present; the error lists every conflicting name found.
pub fn check_conflicts(params: &RawParams) -> Result<(), CosmoError> {
    for name in params.names() {
        let clashing: Vec<&str> = find_conflicts(name)
            .iter()
            .copied()
            .filter(|eq| *eq != name && params.contains(eq))
            .collect();
        if !clashing.is_empty() {
            let mut all = vec![name];
            all.extend(clashing);
            return Err(CosmoError::Conflict(
                ErrorInfo::new(
                    "conflicting-parameters",
                    format!("conflicting parameters are given: {all:?}"),
                )
                .with_context("parameters", all.join(", ")),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_partition_the_alias_space() {
        for (i, group) in CONFLICT_GROUPS.iter().enumerate() {
            for name in *group {
                for (j, other) in CONFLICT_GROUPS.iter().enumerate() {
                    if i != j {
                        assert!(
                            !other.contains(name),
                            "{name} appears in more than one group"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn h_and_big_h0_conflict_names_both() {
        let raw = RawParams::new().with("h", 0.7).with("H0", 70.0);
        let err = check_conflicts(&raw).unwrap_err();
        let info = err.info();
        assert_eq!(info.code, "conflicting-parameters");
        let listed = info.context.get("parameters").unwrap();
        assert!(listed.contains('h') && listed.contains("H0"), "{listed}");
    }

    #[test]
    fn disjoint_names_pass() {
        let raw = RawParams::new().with("h", 0.7).with("Omega_b", 0.05);
        assert!(check_conflicts(&raw).is_ok());
    }
}
