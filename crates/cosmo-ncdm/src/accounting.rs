//! Reconciliation of the effective number of neutrino species with the
//! massive-species list.

use cosmo_core::constants::{
    C_LIGHT, M_NONRELATIVISTIC_EV, N_EFF, RHO_CRIT_KGPH_PER_MPH3, STEFAN_BOLTZMANN,
};
use cosmo_core::errors::{CosmoError, ErrorInfo};
use cosmo_core::NcdmSpecies;
use serde::{Deserialize, Serialize};

/// How the ultra-relativistic species count was supplied or derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NUrSource {
    /// `N_ur` supplied directly.
    Explicit,
    /// Derived from an explicit ultra-relativistic density fraction.
    FromOmegaUr,
    /// Derived from `N_eff` minus the massive species' contribution.
    FromNEff,
}

/// Result of the relativistic-species accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSpecies {
    /// Number of massless (ultra-relativistic) species.
    pub n_ur: f64,
    /// Massive species retained after accounting.
    pub species: Vec<NcdmSpecies>,
    /// Provenance of the `n_ur` value.
    pub source: NUrSource,
}

/// Reconciles `N_ur`, `N_eff` and the massive-species list.
///
/// Precedence follows the input forms: an explicit `N_ur` wins, then an
/// explicit `Omega_ur` converted through the Stefan-Boltzmann relation at
/// the neutrino decoupling temperature, else `N_ur` is derived from `N_eff`
/// by subtracting each non-relativistic species' contribution. In the
/// derived branch, species at or below the non-relativistic mass threshold
/// count as ultra-relativistic and are removed from the massive list.
pub fn resolve_species(
    explicit_n_ur: Option<f64>,
    omega_ur: Option<f64>,
    n_eff: Option<f64>,
    t_cmb: f64,
    h: f64,
    species: Vec<NcdmSpecies>,
) -> Result<ResolvedSpecies, CosmoError> {
    if let Some(n_ur) = explicit_n_ur {
        return checked(n_ur, species, NUrSource::Explicit);
    }
    if let Some(omega_ur) = omega_ur {
        let t_ur = t_cmb * (4.0f64 / 11.0).powf(1.0 / 3.0);
        // kg/m^3 for N_ur = 1.
        let rho_one = 7.0 / 8.0 * 4.0 / C_LIGHT.powi(3) * STEFAN_BOLTZMANN * t_ur.powi(4);
        let n_ur = omega_ur / (rho_one / (h * h * RHO_CRIT_KGPH_PER_MPH3));
        return checked(n_ur, species, NUrSource::FromOmegaUr);
    }
    let n_eff = n_eff.unwrap_or(N_EFF);
    let weight = (4.0f64 / 11.0).powf(-4.0 / 3.0);
    let massive: Vec<NcdmSpecies> = species
        .into_iter()
        .filter(|sp| sp.mass_ev > M_NONRELATIVISTIC_EV)
        .collect();
    let subtracted: f64 = massive.iter().map(|sp| sp.t_ncdm.powi(4) * weight).sum();
    checked(n_eff - subtracted, massive, NUrSource::FromNEff)
}

fn checked(
    n_ur: f64,
    species: Vec<NcdmSpecies>,
    source: NUrSource,
) -> Result<ResolvedSpecies, CosmoError> {
    if n_ur < 0.0 {
        return Err(CosmoError::Unphysical(
            ErrorInfo::new(
                "negative-n-ur",
                "massive neutrino content leaves a negative number of relativistic species",
            )
            .with_context("n_ur", format!("{n_ur}"))
            .with_context("n_massive", format!("{}", species.len())),
        ));
    }
    Ok(ResolvedSpecies {
        n_ur,
        species,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmo_core::constants::{T_CMB, T_NCDM};

    #[test]
    fn one_massive_species_subtracts_its_share() {
        let species = vec![NcdmSpecies {
            mass_ev: 0.06,
            t_ncdm: T_NCDM,
        }];
        let resolved = resolve_species(None, None, None, T_CMB, 0.7, species).unwrap();
        let expected = N_EFF - T_NCDM.powi(4) * (4.0f64 / 11.0).powf(-4.0 / 3.0);
        assert!((resolved.n_ur - expected).abs() < 1e-12, "{}", resolved.n_ur);
        assert_eq!(resolved.species.len(), 1);
        assert_eq!(resolved.source, NUrSource::FromNEff);
    }

    #[test]
    fn sub_threshold_species_fold_into_n_ur() {
        let species = vec![
            NcdmSpecies {
                mass_ev: 0.06,
                t_ncdm: T_NCDM,
            },
            NcdmSpecies {
                mass_ev: 1e-5,
                t_ncdm: T_NCDM,
            },
        ];
        let resolved = resolve_species(None, None, None, T_CMB, 0.7, species).unwrap();
        // Only the 0.06 eV species counts as massive or subtracts from N_eff.
        assert_eq!(resolved.species.len(), 1);
        assert_eq!(resolved.species[0].mass_ev, 0.06);
        let expected = N_EFF - T_NCDM.powi(4) * (4.0f64 / 11.0).powf(-4.0 / 3.0);
        assert!((resolved.n_ur - expected).abs() < 1e-12);
    }

    #[test]
    fn explicit_n_ur_wins_and_keeps_species() {
        let species = vec![NcdmSpecies {
            mass_ev: 1e-5,
            t_ncdm: T_NCDM,
        }];
        let resolved = resolve_species(Some(2.0), None, None, T_CMB, 0.7, species).unwrap();
        assert_eq!(resolved.n_ur, 2.0);
        assert_eq!(resolved.species.len(), 1);
        assert_eq!(resolved.source, NUrSource::Explicit);
    }

    #[test]
    fn too_much_massive_content_is_unphysical() {
        let species = vec![
            NcdmSpecies {
                mass_ev: 0.06,
                t_ncdm: 1.3,
            },
            NcdmSpecies {
                mass_ev: 0.06,
                t_ncdm: 1.3,
            },
        ];
        let err = resolve_species(None, None, Some(1.0), T_CMB, 0.7, species).unwrap_err();
        assert_eq!(err.info().code, "negative-n-ur");
    }
}
