//! Newton-Raphson inversion between an ncdm rest mass and its density
//! fraction.

use cosmo_core::constants::RHO_CRIT_MSUNPH_PER_MPCPH3;
use cosmo_core::errors::{CosmoError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::momenta::{ncdm_momenta, MomentaKind};
use crate::quadrature::QuadratureOpts;

/// First-guess conversion between a density fraction `Omega h^2` and a mass
/// in eV; close to exact by construction of the default temperature ratio.
pub const EV_PER_OMEGA_H2: f64 = 93.14;

fn default_tol_abs() -> f64 {
    1e-15
}

fn default_max_iters() -> usize {
    100
}

/// Options controlling the mass-density Newton iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverOpts {
    /// Absolute tolerance on the density fraction residual.
    #[serde(default = "default_tol_abs")]
    pub tol_abs: f64,
    /// Iteration budget; exceeding it is a fatal numerical error.
    #[serde(default = "default_max_iters")]
    pub max_iters: usize,
    /// Quadrature options forwarded to the phase-space integrator.
    #[serde(default)]
    pub quadrature: QuadratureOpts,
}

impl Default for SolverOpts {
    fn default() -> Self {
        Self {
            tol_abs: default_tol_abs(),
            max_iters: default_max_iters(),
            quadrature: QuadratureOpts::default(),
        }
    }
}

/// Returns the density fraction `Omega h^2` contributed today by one species
/// of rest mass `mass_ev` at effective temperature `t_eff`.
pub fn omega_from_mass(
    mass_ev: f64,
    t_eff: f64,
    opts: &QuadratureOpts,
) -> Result<f64, CosmoError> {
    let rho = ncdm_momenta(t_eff, mass_ev, 0.0, MomentaKind::Rho, opts)?;
    Ok(rho / RHO_CRIT_MSUNPH_PER_MPCPH3)
}

/// Solves for the rest mass whose density fraction matches `omega_target`
/// (`Omega h^2`, one species).
///
/// A target of exactly zero returns mass zero without iterating; the
/// derivative-based update is singular there. Non-convergence within the
/// iteration budget, or a non-finite iterate, is a fatal numerical error:
/// targets below the massless radiation floor have no non-negative solution.
pub fn mass_from_omega(
    omega_target: f64,
    t_eff: f64,
    guess_ev: f64,
    opts: &SolverOpts,
) -> Result<f64, CosmoError> {
    if omega_target == 0.0 {
        return Ok(0.0);
    }
    let mut mass = guess_ev;
    let mut omega = omega_from_mass(mass, t_eff, &opts.quadrature)?;
    for _ in 0..opts.max_iters {
        if (omega_target - omega).abs() <= opts.tol_abs {
            return Ok(mass);
        }
        let rho_prime = ncdm_momenta(t_eff, mass, 0.0, MomentaKind::DRhoDm, &opts.quadrature)?;
        let slope = rho_prime / RHO_CRIT_MSUNPH_PER_MPCPH3;
        mass += (omega_target - omega) / slope;
        if !mass.is_finite() {
            return Err(non_convergence(omega_target, mass, opts));
        }
        omega = omega_from_mass(mass, t_eff, &opts.quadrature)?;
    }
    Err(non_convergence(omega_target, mass, opts))
}

fn non_convergence(omega_target: f64, mass: f64, opts: &SolverOpts) -> CosmoError {
    CosmoError::Convergence(
        ErrorInfo::new(
            "mass-density-newton",
            "mass-density inversion did not converge",
        )
        .with_context("omega_target", format!("{omega_target}"))
        .with_context("last_mass_ev", format!("{mass}"))
        .with_context("max_iters", format!("{}", opts.max_iters))
        .with_hint("targets below the massless radiation floor have no solution"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmo_core::constants::{T_CMB, T_NCDM};

    #[test]
    fn zero_target_short_circuits() {
        let mass =
            mass_from_omega(0.0, T_CMB * T_NCDM, 1.0, &SolverOpts::default()).unwrap();
        assert_eq!(mass, 0.0);
    }

    #[test]
    fn recovers_the_sixty_mev_mass() {
        let opts = SolverOpts::default();
        let target = 0.06 / 93.14;
        let mass = mass_from_omega(
            target,
            T_CMB * T_NCDM,
            target * EV_PER_OMEGA_H2,
            &opts,
        )
        .unwrap();
        assert!((mass - 0.06).abs() < 1e-4, "mass {mass}");
        let omega = omega_from_mass(mass, T_CMB * T_NCDM, &opts.quadrature).unwrap();
        assert!((omega - target).abs() <= opts.tol_abs);
    }

    #[test]
    fn unreachable_target_reports_non_convergence() {
        // Below the massless radiation floor (~5.7e-6 for the default
        // temperature ratio) no non-negative mass matches the target.
        let opts = SolverOpts::default();
        let err = mass_from_omega(1e-9, T_CMB * T_NCDM, 1e-9 * EV_PER_OMEGA_H2, &opts)
            .unwrap_err();
        assert_eq!(err.info().code, "mass-density-newton");
    }
}
