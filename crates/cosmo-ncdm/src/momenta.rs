//! Phase-space momenta of massive relic (ncdm) species.
//!
//! The momentum distribution is a frozen Fermi-Dirac spectrum with one
//! massless-equivalent degree of freedom and no chemical potential; energy
//! density, its mass derivative and pressure follow from a single
//! dimensionless integral over `q`.

use cosmo_core::constants::{
    BOLTZMANN, C_LIGHT, ELECTRONVOLT, FERMI_DIRAC_NORM, MEGAPARSEC, MSUN, STEFAN_BOLTZMANN,
};
use cosmo_core::errors::CosmoError;
use cosmo_core::NcdmSpecies;
use serde::{Deserialize, Serialize};

use crate::quadrature::{integrate, QuadratureOpts};

/// Upper bound of the dimensionless momentum integral. The integrand decays
/// as `e^{-q}`, so truncating at 100 keeps the relative truncation error
/// around 1e-16.
pub const Q_CUTOFF: f64 = 100.0;

/// Quantity evaluated by [`ncdm_momenta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentaKind {
    /// Energy density.
    Rho,
    /// Derivative of the energy density with respect to the rest mass.
    DRhoDm,
    /// Pressure.
    P,
}

/// Returns the requested momentum of one ncdm species, in
/// `10^10 M_sun/h / (Mpc/h)^3` (divided by eV for [`MomentaKind::DRhoDm`]).
///
/// `t_eff` is the present-day effective temperature in Kelvin (typically
/// `T_cmb * T_ncdm`), `mass_ev` the rest mass in eV and `z` the redshift.
/// The constant-based unit conversion happens here, exactly once.
pub fn ncdm_momenta(
    t_eff: f64,
    mass_ev: f64,
    z: f64,
    kind: MomentaKind,
    opts: &QuadratureOpts,
) -> Result<f64, CosmoError> {
    let a = 1.0 / (1.0 + z);
    let t = t_eff / a;
    let over_t = ELECTRONVOLT / (BOLTZMANN * t);
    let m2_over_t2 = (mass_ev * over_t) * (mass_ev * over_t);
    let m_over_t2 = mass_ev * over_t * over_t;

    let reduced = match kind {
        MomentaKind::Rho => integrate(
            &|q: f64| q * q * (q * q + m2_over_t2).sqrt() / (1.0 + q.exp()),
            0.0,
            Q_CUTOFF,
            opts,
        )?,
        MomentaKind::DRhoDm => {
            if mass_ev == 0.0 {
                // The analytic derivative carries a factor m; nothing to integrate.
                0.0
            } else {
                integrate(
                    &|q: f64| m_over_t2 * q * q / (q * q + m2_over_t2).sqrt() / (1.0 + q.exp()),
                    0.0,
                    Q_CUTOFF,
                    opts,
                )?
            }
        }
        MomentaKind::P => integrate(
            &|q: f64| (1.0 / 3.0) * q.powi(4) / (q * q + m2_over_t2).sqrt() / (1.0 + q.exp()),
            0.0,
            Q_CUTOFF,
            opts,
        )?,
    };

    Ok(7.0 / 8.0 * 4.0 / C_LIGHT.powi(3)
        * STEFAN_BOLTZMANN
        * t.powi(4)
        * (reduced / FERMI_DIRAC_NORM)
        * MEGAPARSEC.powi(3)
        / (1.0e10 * MSUN))
}

/// Total energy density of the given species at redshift `z`, in
/// `10^10 M_sun/h / (Mpc/h)^3`, per the `1/h^2` convention of the caller.
pub fn rho_ncdm_total(
    species: &[NcdmSpecies],
    t_cmb: f64,
    h: f64,
    z: f64,
    opts: &QuadratureOpts,
) -> Result<f64, CosmoError> {
    let mut total = 0.0;
    for sp in species {
        total += ncdm_momenta(t_cmb * sp.t_ncdm, sp.mass_ev, z, MomentaKind::Rho, opts)?;
    }
    Ok(total / (h * h))
}

/// Total pressure of the given species at redshift `z`, same units as
/// [`rho_ncdm_total`].
pub fn p_ncdm_total(
    species: &[NcdmSpecies],
    t_cmb: f64,
    h: f64,
    z: f64,
    opts: &QuadratureOpts,
) -> Result<f64, CosmoError> {
    let mut total = 0.0;
    for sp in species {
        total += ncdm_momenta(t_cmb * sp.t_ncdm, sp.mass_ev, z, MomentaKind::P, opts)?;
    }
    Ok(total / (h * h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmo_core::constants::{RHO_CRIT_MSUNPH_PER_MPCPH3, T_CMB, T_NCDM};

    #[test]
    fn omega_of_60_mev_matches_rule_of_thumb() {
        // Omega h^2 ~ sum(m)/93.14 by construction of T_ncdm.
        let opts = QuadratureOpts::default();
        let rho = ncdm_momenta(T_CMB * T_NCDM, 0.06, 0.0, MomentaKind::Rho, &opts).unwrap();
        let omega = rho / RHO_CRIT_MSUNPH_PER_MPCPH3;
        let expected = 0.06 / 93.14;
        assert!(
            (omega - expected).abs() / expected < 2e-5,
            "omega {omega} vs {expected}"
        );
    }

    #[test]
    fn massless_limit_is_pure_radiation() {
        // At m = 0 the rho integrand reduces to the radiation integral and
        // pressure must equal rho / 3.
        let opts = QuadratureOpts::default();
        let rho = ncdm_momenta(T_CMB * T_NCDM, 0.0, 0.0, MomentaKind::Rho, &opts).unwrap();
        let p = ncdm_momenta(T_CMB * T_NCDM, 0.0, 0.0, MomentaKind::P, &opts).unwrap();
        assert!(rho > 0.0);
        assert!((3.0 * p - rho).abs() / rho < 1e-6, "rho {rho} p {p}");
        let drho = ncdm_momenta(T_CMB * T_NCDM, 0.0, 0.0, MomentaKind::DRhoDm, &opts).unwrap();
        assert_eq!(drho, 0.0);
    }

    #[test]
    fn redshift_scales_massless_density_as_fourth_power() {
        let opts = QuadratureOpts::default();
        let rho0 = ncdm_momenta(T_CMB * T_NCDM, 0.0, 0.0, MomentaKind::Rho, &opts).unwrap();
        let rho1 = ncdm_momenta(T_CMB * T_NCDM, 0.0, 1.0, MomentaKind::Rho, &opts).unwrap();
        assert!((rho1 / rho0 - 16.0).abs() < 1e-5, "ratio {}", rho1 / rho0);
    }
}
