//! Background-quantity capability interface.

#![allow(non_snake_case)]

use cosmo_core::constants::RHO_CRIT_MSUNPH_PER_MPCPH3;
use cosmo_core::errors::CosmoError;
use cosmo_ncdm::QuadratureOpts;
use cosmo_params::CanonicalParams;

/// Background quantities derivable from the canonical parameters plus a
/// normalised expansion rate. Engines implement [`Background::efunc`]; every
/// other quantity follows from it and is provided here.
///
/// Densities are comoving, in `10^10 M_sun/h / (Mpc/h)^3`; density
/// parameters are unitless.
pub trait Background {
    /// The compiled parameter set backing this background.
    fn params(&self) -> &CanonicalParams;

    /// Normalised expansion rate `E(z) = H(z)/H0`.
    fn efunc(&self, z: f64) -> Result<f64, CosmoError>;

    /// Quadrature options used for ncdm integrals.
    fn quadrature(&self) -> &QuadratureOpts;

    /// Hubble rate at `z`, km/s/Mpc.
    fn hubble_function(&self, z: f64) -> Result<f64, CosmoError> {
        Ok(self.efunc(z)? * self.params().H0())
    }

    /// Critical density (excluding curvature) at `z`.
    fn rho_crit(&self, z: f64) -> Result<f64, CosmoError> {
        let e = self.efunc(z)?;
        Ok(e * e * RHO_CRIT_MSUNPH_PER_MPCPH3)
    }

    /// Cold dark matter density parameter at `z`.
    fn Omega_cdm(&self, z: f64) -> Result<f64, CosmoError> {
        let e = self.efunc(z)?;
        Ok(self.params().Omega_cdm * (1.0 + z).powi(3) / (e * e))
    }

    /// Baryon density parameter at `z`.
    fn Omega_b(&self, z: f64) -> Result<f64, CosmoError> {
        let e = self.efunc(z)?;
        Ok(self.params().Omega_b * (1.0 + z).powi(3) / (e * e))
    }

    /// Curvature density parameter at `z`.
    fn Omega_k(&self, z: f64) -> Result<f64, CosmoError> {
        let e = self.efunc(z)?;
        Ok(self.params().Omega_k * (1.0 + z).powi(2) / (e * e))
    }

    /// Photon density parameter at `z`.
    fn Omega_g(&self, z: f64) -> Result<f64, CosmoError> {
        let e = self.efunc(z)?;
        Ok(self.params().Omega_g() * (1.0 + z).powi(4) / (e * e))
    }

    /// Massless neutrino density parameter at `z`.
    fn Omega_ur(&self, z: f64) -> Result<f64, CosmoError> {
        let e = self.efunc(z)?;
        Ok(self.params().Omega_ur() * (1.0 + z).powi(4) / (e * e))
    }

    /// Comoving ncdm energy density at `z`.
    fn rho_ncdm(&self, z: f64) -> Result<f64, CosmoError> {
        self.params().rho_ncdm(z, self.quadrature())
    }

    /// Comoving ncdm pressure at `z`.
    fn p_ncdm(&self, z: f64) -> Result<f64, CosmoError> {
        self.params().p_ncdm(z, self.quadrature())
    }

    /// Massive neutrino density parameter at `z`.
    fn Omega_ncdm(&self, z: f64) -> Result<f64, CosmoError> {
        Ok(self.rho_ncdm(z)? / self.rho_crit(z)?)
    }

    /// Radiation-like density parameter at `z`: photons, massless neutrinos
    /// and the relativistic part of the massive species.
    fn Omega_r(&self, z: f64) -> Result<f64, CosmoError> {
        Ok(self.Omega_g(z)? + self.Omega_ur(z)? + 3.0 * self.p_ncdm(z)? / self.rho_crit(z)?)
    }

    /// Matter-like density parameter at `z`: baryons, cold dark matter and
    /// the non-relativistic part of the massive species.
    fn Omega_m(&self, z: f64) -> Result<f64, CosmoError> {
        Ok(self.Omega_cdm(z)? + self.Omega_b(z)? + self.Omega_ncdm(z)?
            - 3.0 * self.p_ncdm(z)? / self.rho_crit(z)?)
    }

    /// CMB temperature at `z`, K.
    fn T_cmb(&self, z: f64) -> f64 {
        self.params().T_cmb * (1.0 + z)
    }

    /// ncdm temperatures at `z`, K, one entry per species.
    fn T_ncdm(&self, z: f64) -> Vec<f64> {
        self.params()
            .species
            .iter()
            .map(|sp| self.params().T_cmb * sp.t_ncdm * (1.0 + z))
            .collect()
    }
}
