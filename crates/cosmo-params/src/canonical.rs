//! The canonical, alias-free parameter set produced by compilation.

#![allow(non_snake_case)]

use cosmo_core::constants::{C_LIGHT, RHO_CRIT_KGPH_PER_MPH3, STEFAN_BOLTZMANN};
use cosmo_core::errors::{CosmoError, ErrorInfo};
use cosmo_core::{NcdmSpecies, ParamValue};
use cosmo_ncdm::{p_ncdm_total, rho_ncdm_total, QuadratureOpts};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reionization parametrization: optical depth or redshift, never both.
/// The two forms are mutually exclusive and validated, not auto-converted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reionization {
    /// Optical depth to reionization.
    TauReio(f64),
    /// Reionization redshift.
    ZReio(f64),
}

/// Canonical parameter set: one name per physical quantity, immutable for
/// the lifetime of the owning cosmology. Derived quantities are either
/// computed eagerly at compilation (`Omega_ncdm`) or exposed as pure
/// accessor methods, so the type carries no interior mutability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalParams {
    /// Dimensionless Hubble rate.
    pub h: f64,
    /// Cold dark matter density fraction today.
    pub Omega_cdm: f64,
    /// Baryon density fraction today.
    pub Omega_b: f64,
    /// Curvature density fraction today.
    pub Omega_k: f64,
    /// Cosmological-constant fraction, when supplied explicitly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub Omega_Lambda: Option<f64>,
    /// Dark-energy fluid fraction, when supplied explicitly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub Omega_fld: Option<f64>,
    /// Primordial scalar amplitude, when it anchors the spectrum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub A_s: Option<f64>,
    /// sigma8 amplitude anchor, when `A_s` was not supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sigma8: Option<f64>,
    /// Pivot scale, 1/Mpc.
    pub k_pivot: f64,
    /// Scalar spectral index.
    pub n_s: f64,
    /// Running of the spectral index.
    pub alpha_s: f64,
    /// Tensor-to-scalar ratio.
    pub r: f64,
    /// CMB temperature today, K.
    pub T_cmb: f64,
    /// Massive relic species, one `(mass_eV, T ratio)` pair each.
    pub species: Vec<NcdmSpecies>,
    /// Number of massless (ultra-relativistic) species.
    pub N_ur: f64,
    /// Total ncdm density fraction today, computed eagerly at compilation.
    pub Omega_ncdm: f64,
    /// Reionization parametrization.
    pub reio: Reionization,
    /// Width of the reionization transition.
    pub reionization_width: f64,
    /// Lensing amplitude scaling.
    pub A_L: f64,
    /// Dark-energy equation of state today.
    pub w0_fld: f64,
    /// Evolution of the dark-energy equation of state.
    pub wa_fld: f64,
    /// Dark-energy sound speed squared.
    pub cs2_fld: f64,
    /// Non-linear correction model name (empty for linear).
    pub non_linear: String,
    /// Perturbation modes.
    pub modes: Vec<String>,
    /// Whether lensed spectra are requested.
    pub lensing: bool,
    /// Output redshifts for power-spectrum products; always contains 0.
    pub z_pk: Vec<f64>,
    /// Maximum wavenumber for power spectra, h/Mpc.
    pub kmax_pk: f64,
    /// Maximum multipole for harmonic spectra.
    pub ellmax_cl: f64,
    /// Unrecognized names carried through untouched for downstream engines.
    #[serde(flatten)]
    pub extra: IndexMap<String, ParamValue>,
}

impl CanonicalParams {
    /// Hubble rate in km/s/Mpc.
    pub fn H0(&self) -> f64 {
        self.h * 100.0
    }

    /// Number of massive ncdm species.
    pub fn N_ncdm(&self) -> usize {
        self.species.len()
    }

    /// Species rest masses, eV.
    pub fn m_ncdm(&self) -> Vec<f64> {
        self.species.iter().map(|sp| sp.mass_ev).collect()
    }

    /// Species temperature ratios with respect to the CMB.
    pub fn T_ncdm(&self) -> Vec<f64> {
        self.species.iter().map(|sp| sp.t_ncdm).collect()
    }

    /// Photon density fraction today.
    pub fn Omega_g(&self) -> f64 {
        let rho = self.T_cmb.powi(4) * 4.0 / C_LIGHT.powi(3) * STEFAN_BOLTZMANN;
        rho / (self.h * self.h * RHO_CRIT_KGPH_PER_MPH3)
    }

    /// Temperature of the ultra-relativistic background, K.
    pub fn T_ur(&self) -> f64 {
        self.T_cmb * (4.0f64 / 11.0).powf(1.0 / 3.0)
    }

    /// Ultra-relativistic (massless neutrino) density fraction today.
    pub fn Omega_ur(&self) -> f64 {
        let rho = self.N_ur * 7.0 / 8.0 * self.T_ur().powi(4) * 4.0 / C_LIGHT.powi(3)
            * STEFAN_BOLTZMANN;
        rho / (self.h * self.h * RHO_CRIT_KGPH_PER_MPH3)
    }

    /// Radiation density fraction today: photons plus massless neutrinos.
    pub fn Omega_r(&self) -> f64 {
        let rho = (self.T_cmb.powi(4) + self.N_ur * 7.0 / 8.0 * self.T_ur().powi(4)) * 4.0
            / C_LIGHT.powi(3)
            * STEFAN_BOLTZMANN;
        rho / (self.h * self.h * RHO_CRIT_KGPH_PER_MPH3)
    }

    /// Matter density fraction today, including the whole ncdm density.
    pub fn Omega_m(&self) -> f64 {
        self.Omega_b + self.Omega_cdm + self.Omega_ncdm
    }

    /// Effective number of neutrino species.
    pub fn N_eff(&self) -> f64 {
        let weight = (4.0f64 / 11.0).powf(-4.0 / 3.0);
        self.species
            .iter()
            .map(|sp| sp.t_ncdm.powi(4) * weight)
            .sum::<f64>()
            + self.N_ur
    }

    /// `ln(10^10 A_s)`; requires the `A_s` anchor.
    pub fn ln_1e10_A_s(&self) -> Result<f64, CosmoError> {
        let a_s = self.A_s.ok_or_else(|| {
            CosmoError::UnknownParameter(
                ErrorInfo::new("amplitude-not-a-s", "A_s is not the amplitude anchor")
                    .with_hint("the spectrum is anchored by sigma8; use a_s_or_fid"),
            )
        })?;
        Ok((1.0e10 * a_s).ln())
    }

    /// `A_s`, or the first-guess amplitude from `sigma8` via the fit
    /// `2.43e-9 (sigma8 / 0.87659)^2`.
    pub fn a_s_or_fid(&self) -> Result<f64, CosmoError> {
        if let Some(a_s) = self.A_s {
            return Ok(a_s);
        }
        let sigma8 = self.sigma8.ok_or_else(|| {
            CosmoError::UnknownParameter(ErrorInfo::new(
                "no-amplitude-anchor",
                "neither A_s nor sigma8 backs the primordial amplitude",
            ))
        })?;
        Ok(2.43e-9 * (sigma8 / 0.87659).powi(2))
    }

    /// Total ncdm energy density at redshift `z`, in
    /// `10^10 M_sun/h / (Mpc/h)^3`.
    pub fn rho_ncdm(&self, z: f64, opts: &QuadratureOpts) -> Result<f64, CosmoError> {
        rho_ncdm_total(&self.species, self.T_cmb, self.h, z, opts)
    }

    /// Total ncdm pressure at redshift `z`, same units as [`Self::rho_ncdm`].
    pub fn p_ncdm(&self, z: f64, opts: &QuadratureOpts) -> Result<f64, CosmoError> {
        p_ncdm_total(&self.species, self.T_cmb, self.h, z, opts)
    }

    /// String-keyed lookup covering canonical names, derived names
    /// (`H0`, `omega_*`, `N_eff`, ...) and pass-through extras.
    pub fn get(&self, name: &str) -> Result<ParamValue, CosmoError> {
        if let Some(value) = self.lookup(name) {
            return Ok(value);
        }
        if let Some(value) = self.extra.get(name) {
            return Ok(value.clone());
        }
        Err(CosmoError::UnknownParameter(
            ErrorInfo::new("parameter-not-found", format!("parameter {name} not found"))
                .with_context("parameter", name),
        ))
    }

    /// Like [`Self::get`] but substituting `default` for unknown names.
    pub fn get_or(&self, name: &str, default: ParamValue) -> ParamValue {
        self.get(name).unwrap_or(default)
    }

    fn lookup(&self, name: &str) -> Option<ParamValue> {
        let value = match name {
            "h" => ParamValue::Float(self.h),
            "H0" => ParamValue::Float(self.H0()),
            "Omega_cdm" => ParamValue::Float(self.Omega_cdm),
            "Omega_b" => ParamValue::Float(self.Omega_b),
            "Omega_k" => ParamValue::Float(self.Omega_k),
            "Omega_Lambda" => ParamValue::Float(self.Omega_Lambda?),
            "Omega_fld" => ParamValue::Float(self.Omega_fld?),
            "Omega_g" => ParamValue::Float(self.Omega_g()),
            "Omega_ur" => ParamValue::Float(self.Omega_ur()),
            "Omega_r" => ParamValue::Float(self.Omega_r()),
            "Omega_ncdm" => ParamValue::Float(self.Omega_ncdm),
            "Omega_m" => ParamValue::Float(self.Omega_m()),
            "T_cmb" => ParamValue::Float(self.T_cmb),
            "T_ur" => ParamValue::Float(self.T_ur()),
            "T_ncdm" => ParamValue::Floats(self.T_ncdm()),
            "m_ncdm" => ParamValue::Floats(self.m_ncdm()),
            "N_ncdm" => ParamValue::Float(self.N_ncdm() as f64),
            "N_ur" => ParamValue::Float(self.N_ur),
            "N_eff" => ParamValue::Float(self.N_eff()),
            "A_s" => ParamValue::Float(self.A_s?),
            "sigma8" => ParamValue::Float(self.sigma8?),
            "ln10^{10}A_s" => ParamValue::Float(self.ln_1e10_A_s().ok()?),
            "k_pivot" => ParamValue::Float(self.k_pivot),
            "n_s" => ParamValue::Float(self.n_s),
            "alpha_s" => ParamValue::Float(self.alpha_s),
            "r" => ParamValue::Float(self.r),
            "tau_reio" => match self.reio {
                Reionization::TauReio(tau) => ParamValue::Float(tau),
                Reionization::ZReio(_) => return None,
            },
            "z_reio" => match self.reio {
                Reionization::ZReio(z) => ParamValue::Float(z),
                Reionization::TauReio(_) => return None,
            },
            "reionization_width" => ParamValue::Float(self.reionization_width),
            "A_L" => ParamValue::Float(self.A_L),
            "w0_fld" => ParamValue::Float(self.w0_fld),
            "wa_fld" => ParamValue::Float(self.wa_fld),
            "cs2_fld" => ParamValue::Float(self.cs2_fld),
            "non_linear" => ParamValue::Str(self.non_linear.clone()),
            "modes" => ParamValue::Strs(self.modes.clone()),
            "lensing" => ParamValue::Bool(self.lensing),
            "z_pk" => ParamValue::Floats(self.z_pk.clone()),
            "kmax_pk" => ParamValue::Float(self.kmax_pk),
            "ellmax_cl" => ParamValue::Float(self.ellmax_cl),
            other => {
                // omega_x is Omega_x scaled by h^2, for scalars and lists.
                let rest = other.strip_prefix("omega")?;
                let h2 = self.h * self.h;
                match self.lookup(&format!("Omega{rest}"))? {
                    ParamValue::Float(v) => ParamValue::Float(v * h2),
                    ParamValue::Floats(vs) => {
                        ParamValue::Floats(vs.into_iter().map(|v| v * h2).collect())
                    }
                    _ => return None,
                }
            }
        };
        Some(value)
    }
}
