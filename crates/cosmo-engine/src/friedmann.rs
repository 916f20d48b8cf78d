//! Built-in analytic background engine.

use cosmo_core::constants::RHO_CRIT_MSUNPH_PER_MPCPH3;
use cosmo_core::errors::CosmoError;
use cosmo_ncdm::QuadratureOpts;
use cosmo_params::{CanonicalParams, RawParams};

use crate::background::Background;
use crate::registry::Engine;

/// Analytic Friedmann background: `E(z)` assembled from the compiled density
/// fractions, with the exact ncdm energy density from the phase-space
/// integrator. The dark-energy sector closes the budget to flatness unless
/// `Omega_Lambda` was supplied explicitly, and follows the `w0/wa` fluid
/// equation of state.
pub struct FriedmannEngine {
    params: CanonicalParams,
    extra: RawParams,
    quadrature: QuadratureOpts,
    omega_de: f64,
}

impl FriedmannEngine {
    /// Builds the engine for a compiled parameter set. The only recognised
    /// extra parameter is `epsrel`, forwarded to the ncdm quadrature.
    pub fn new(params: &CanonicalParams, extra: &RawParams) -> Result<Self, CosmoError> {
        let mut quadrature = QuadratureOpts::default();
        if let Some(value) = extra.get("epsrel") {
            quadrature.epsrel = value.as_f64("epsrel")?;
        }
        let omega_de = match params.Omega_Lambda {
            Some(omega_lambda) => omega_lambda,
            None => {
                1.0 - params.Omega_g()
                    - params.Omega_ur()
                    - params.Omega_b
                    - params.Omega_cdm
                    - params.Omega_k
                    - params.Omega_ncdm
            }
        };
        Ok(Self {
            params: params.clone(),
            extra: extra.clone(),
            quadrature,
            omega_de,
        })
    }

    /// Dark-energy density scaling for the `w0/wa` equation of state,
    /// normalised to 1 at z = 0.
    fn de_scaling(&self, z: f64) -> f64 {
        let w0 = self.params.w0_fld;
        let wa = self.params.wa_fld;
        let a = 1.0 / (1.0 + z);
        (1.0 + z).powf(3.0 * (1.0 + w0 + wa)) * (-3.0 * wa * (1.0 - a)).exp()
    }
}

impl Background for FriedmannEngine {
    fn params(&self) -> &CanonicalParams {
        &self.params
    }

    fn quadrature(&self) -> &QuadratureOpts {
        &self.quadrature
    }

    fn efunc(&self, z: f64) -> Result<f64, CosmoError> {
        let p = &self.params;
        let zp1 = 1.0 + z;
        let radiation = (p.Omega_g() + p.Omega_ur()) * zp1.powi(4);
        let matter = (p.Omega_cdm + p.Omega_b) * zp1.powi(3);
        let curvature = p.Omega_k * zp1.powi(2);
        let ncdm = p.rho_ncdm(z, &self.quadrature)? / RHO_CRIT_MSUNPH_PER_MPCPH3;
        let dark_energy = self.omega_de * self.de_scaling(z);
        Ok((radiation + matter + curvature + ncdm + dark_energy).sqrt())
    }
}

impl Engine for FriedmannEngine {
    fn name(&self) -> &str {
        "friedmann"
    }

    fn extra(&self) -> &RawParams {
        &self.extra
    }

    fn background(&self) -> Result<&dyn Background, CosmoError> {
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmo_params::{compile_params, default_params, merge_params, CompileOpts};

    fn engine(overrides: RawParams) -> FriedmannEngine {
        let raw = merge_params(&default_params(), &overrides);
        let params = compile_params(&raw, &CompileOpts::default()).unwrap();
        FriedmannEngine::new(&params, &RawParams::new()).unwrap()
    }

    #[test]
    fn efunc_is_one_today() {
        let engine = engine(RawParams::new().with("m_ncdm", 0.06));
        let e0 = engine.efunc(0.0).unwrap();
        assert!((e0 - 1.0).abs() < 1e-9, "E(0) = {e0}");
    }

    #[test]
    fn expansion_rate_grows_with_redshift() {
        let engine = engine(RawParams::new());
        let e1 = engine.efunc(1.0).unwrap();
        let e3 = engine.efunc(3.0).unwrap();
        assert!(e1 > 1.0 && e3 > e1);
    }

    #[test]
    fn matter_dominates_early() {
        let engine = engine(RawParams::new());
        let omega_m = engine.Omega_m(1000.0).unwrap();
        assert!(omega_m > 0.5, "Omega_m(1000) = {omega_m}");
    }
}
