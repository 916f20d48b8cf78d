//! Compilation of a raw parameter mapping into the canonical set.
//!
//! The pipeline: normalise aliases, branch on the supplied neutrino-content
//! form (explicit masses, density fractions through the Newton solver, or a
//! hierarchy split of a summed mass), reconcile the relativistic species
//! accounting, back out `Omega_cdm` from a total-matter fraction if one was
//! given, and pin the output-redshift anchor at z = 0.

use cosmo_core::constants::{
    C_LIGHT, RHO_CRIT_KGPH_PER_MPH3, RHO_CRIT_MSUNPH_PER_MPCPH3, STEFAN_BOLTZMANN, T_NCDM,
};
use cosmo_core::errors::{CosmoError, ErrorInfo};
use cosmo_core::{Hierarchy, NcdmSpecies, ParamValue};
use cosmo_ncdm::{
    mass_from_omega, p_ncdm_total, resolve_species, rho_ncdm_total, split_summed_mass,
    SolverOpts, SplitOpts, EV_PER_OMEGA_H2,
};
use serde::{Deserialize, Serialize};

use crate::canonical::{CanonicalParams, Reionization};
use crate::raw::RawParams;

/// Options forwarded to the numerical components of the compiler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompileOpts {
    /// Mass-density inversion options.
    #[serde(default)]
    pub solver: SolverOpts,
    /// Hierarchy splitting options.
    #[serde(default)]
    pub split: SplitOpts,
}

/// Compiles a conflict-free raw mapping into the canonical parameter set.
///
/// The input is expected to carry the full default-backed parameter set (see
/// [`crate::default_params`] and [`crate::merge_params`]); missing required
/// names surface as unknown-parameter errors. The input itself is never
/// modified and nothing observable changes on failure.
pub fn compile_params(args: &RawParams, opts: &CompileOpts) -> Result<CanonicalParams, CosmoError> {
    let mut p = args.clone();

    // h first: every omega conversion depends on it.
    if let Some(value) = p.remove("H0") {
        let h0 = value.as_f64("H0")?;
        p.set("h", h0 / 100.0);
    }
    let h = take_f64(&mut p, "h")?;
    if !(h > 0.0) {
        return Err(CosmoError::Unphysical(
            ErrorInfo::new("nonpositive-h", "the Hubble rate h must be positive")
                .with_context("h", format!("{h}")),
        ));
    }

    normalize_small_omegas(&mut p, h)?;
    normalize_spellings(&mut p);

    if let Some(value) = p.remove("ln10^{10}A_s") {
        let ln_amp = value.as_f64("ln10^{10}A_s")?;
        p.set("A_s", ln_amp.exp() * 1.0e-10);
    }

    if let Some(value) = p.remove("Omega_g") {
        // Invert the Stefan-Boltzmann relation back to a photon temperature.
        let omega_g = value.as_f64("Omega_g")?;
        let t4 = omega_g * h * h * RHO_CRIT_KGPH_PER_MPH3
            / (4.0 / C_LIGHT.powi(3) * STEFAN_BOLTZMANN);
        p.set("T_cmb", t4.powf(0.25));
    }

    let t_cmb = take_opt_f64(&mut p, "T_cmb")?.unwrap_or(cosmo_core::constants::T_CMB);

    let (masses, single, t_ratios) = neutrino_masses(&mut p, h, t_cmb, opts)?;
    let (masses, t_ratios) = apply_hierarchy(&mut p, masses, single, t_ratios, opts)?;

    if masses.len() != t_ratios.len() {
        return Err(CosmoError::Unphysical(
            ErrorInfo::new(
                "species-length-mismatch",
                "T_ncdm and m_ncdm must be of same length",
            )
            .with_context("m_ncdm", format!("{}", masses.len()))
            .with_context("T_ncdm", format!("{}", t_ratios.len())),
        ));
    }
    let species: Vec<NcdmSpecies> = masses
        .iter()
        .zip(&t_ratios)
        .map(|(&mass_ev, &t_ncdm)| NcdmSpecies { mass_ev, t_ncdm })
        .collect();

    let explicit_n_ur = take_opt_f64(&mut p, "N_ur")?;
    let omega_ur = take_opt_f64(&mut p, "Omega_ur")?;
    let n_eff = take_opt_f64(&mut p, "N_eff")?;
    let resolved = resolve_species(explicit_n_ur, omega_ur, n_eff, t_cmb, h, species)?;
    let species = resolved.species;

    // Computed once here; downstream readers never mutate it.
    let omega_ncdm_total =
        rho_ncdm_total(&species, t_cmb, h, 0.0, &opts.solver.quadrature)?
            / RHO_CRIT_MSUNPH_PER_MPCPH3;

    let omega_b = take_f64(&mut p, "Omega_b")?;
    let omega_cdm = match p.remove("Omega_m") {
        Some(value) => {
            // Subtract baryons and the non-relativistic part of the ncdm
            // density (rho - 3p) from the requested total matter fraction.
            let omega_m = value.as_f64("Omega_m")?;
            let rho = rho_ncdm_total(&species, t_cmb, h, 0.0, &opts.solver.quadrature)?;
            let p_ncdm = p_ncdm_total(&species, t_cmb, h, 0.0, &opts.solver.quadrature)?;
            let nonrelativistic = (rho - 3.0 * p_ncdm) / RHO_CRIT_MSUNPH_PER_MPCPH3;
            omega_m - omega_b - nonrelativistic
        }
        None => take_f64(&mut p, "Omega_cdm")?,
    };
    p.remove("Omega_cdm");

    let reio = match take_opt_f64(&mut p, "z_reio")? {
        Some(z) => Reionization::ZReio(z),
        None => Reionization::TauReio(take_opt_f64(&mut p, "tau_reio")?.unwrap_or(0.06)),
    };

    let mut z_pk = match p.remove("z_pk") {
        Some(value) => value.as_f64_list("z_pk")?,
        None => vec![0.0],
    };
    if !z_pk.contains(&0.0) {
        // z = 0 anchors the power-spectrum amplitude normalisation.
        z_pk.push(0.0);
    }
    let modes = match p.remove("modes") {
        Some(ParamValue::Str(mode)) => vec![mode],
        Some(ParamValue::Strs(modes)) => modes,
        Some(other) => {
            return Err(CosmoError::Value(
                ErrorInfo::new("value-type", "modes must be a string or string-list")
                    .with_context("found", other.kind()),
            ))
        }
        None => vec!["s".to_string()],
    };

    Ok(CanonicalParams {
        h,
        Omega_cdm: omega_cdm,
        Omega_b: omega_b,
        Omega_k: take_f64(&mut p, "Omega_k")?,
        Omega_Lambda: take_opt_f64(&mut p, "Omega_Lambda")?,
        Omega_fld: take_opt_f64(&mut p, "Omega_fld")?,
        A_s: take_opt_f64(&mut p, "A_s")?,
        sigma8: take_opt_f64(&mut p, "sigma8")?,
        k_pivot: take_f64(&mut p, "k_pivot")?,
        n_s: take_f64(&mut p, "n_s")?,
        alpha_s: take_f64(&mut p, "alpha_s")?,
        r: take_f64(&mut p, "r")?,
        T_cmb: t_cmb,
        species,
        N_ur: resolved.n_ur,
        Omega_ncdm: omega_ncdm_total,
        reio,
        reionization_width: take_f64(&mut p, "reionization_width")?,
        A_L: take_f64(&mut p, "A_L")?,
        w0_fld: take_f64(&mut p, "w0_fld")?,
        wa_fld: take_f64(&mut p, "wa_fld")?,
        cs2_fld: take_f64(&mut p, "cs2_fld")?,
        non_linear: p
            .remove("non_linear")
            .map(|v| v.as_str("non_linear").map(str::to_string))
            .transpose()?
            .unwrap_or_default(),
        modes,
        lensing: p
            .remove("lensing")
            .map(|v| v.as_bool("lensing"))
            .transpose()?
            .unwrap_or(false),
        z_pk,
        kmax_pk: take_f64(&mut p, "kmax_pk")?,
        ellmax_cl: take_f64(&mut p, "ellmax_cl")?,
        extra: p.into_inner(),
    })
}

/// Rescales every lowercase `omega_*` entry by `1/h^2` and renames it to the
/// corresponding `Omega_*`, element-wise for lists.
fn normalize_small_omegas(p: &mut RawParams, h: f64) -> Result<(), CosmoError> {
    let h2 = h * h;
    let lowercase: Vec<(String, ParamValue)> = p
        .iter()
        .filter(|(name, _)| name.starts_with("omega"))
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect();
    for (name, value) in lowercase {
        p.remove(&name);
        let scaled = match value {
            ParamValue::Float(v) => ParamValue::Float(v / h2),
            ParamValue::Floats(vs) => ParamValue::Floats(vs.into_iter().map(|v| v / h2).collect()),
            other => {
                return Err(CosmoError::Value(
                    ErrorInfo::new("value-type", format!("parameter {name} must be numeric"))
                        .with_context("found", other.kind()),
                ))
            }
        };
        p.set(name.replacen("omega", "Omega", 1), scaled);
    }
    Ok(())
}

/// One-to-one legacy spellings mapped onto canonical names.
fn normalize_spellings(p: &mut RawParams) {
    const ALIASES: &[(&str, &str)] = &[
        ("T_cmb", "T0_cmb"),
        ("Omega_m", "Omega0_m"),
        ("Omega_cdm", "Omega0_cdm"),
        ("Omega_cdm", "Omega_c"),
        ("Omega_ncdm", "Omega0_ncdm"),
        ("Omega_b", "Omega0_b"),
        ("Omega_k", "Omega0_k"),
        ("Omega_ur", "Omega0_ur"),
        ("Omega_Lambda", "Omega_lambda"),
        ("Omega_Lambda", "Omega0_lambda"),
        ("Omega_Lambda", "Omega0_Lambda"),
        ("Omega_fld", "Omega0_fld"),
        ("Omega_g", "Omega0_g"),
    ];
    for (canonical, alias) in ALIASES {
        if let Some(value) = p.remove(alias) {
            p.set(*canonical, value);
        }
    }
}

/// Resolves the supplied neutrino-content form into a mass list, whether it
/// was single-valued, and the (broadcast) temperature-ratio list.
fn neutrino_masses(
    p: &mut RawParams,
    h: f64,
    t_cmb: f64,
    opts: &CompileOpts,
) -> Result<(Vec<f64>, bool, Vec<f64>), CosmoError> {
    let t_value = p.remove("T_ncdm");
    let (masses, single) = if let Some(value) = p.remove("m_ncdm") {
        (value.as_f64_list("m_ncdm")?, value.is_scalar())
    } else if let Some(value) = p.remove("Omega_ncdm") {
        let omegas = value.as_f64_list("Omega_ncdm")?;
        let ratios = broadcast_t_ncdm(&t_value, omegas.len())?;
        if ratios.len() != omegas.len() {
            return Err(CosmoError::Unphysical(
                ErrorInfo::new(
                    "species-length-mismatch",
                    "T_ncdm and Omega_ncdm must be of same length",
                )
                .with_context("Omega_ncdm", format!("{}", omegas.len()))
                .with_context("T_ncdm", format!("{}", ratios.len())),
            ));
        }
        let mut masses = Vec::with_capacity(omegas.len());
        for (omega, t_ratio) in omegas.iter().zip(&ratios) {
            if *omega == 0.0 {
                masses.push(0.0);
            } else {
                let target = omega * h * h;
                let mass = mass_from_omega(
                    target,
                    t_cmb * t_ratio,
                    target * EV_PER_OMEGA_H2,
                    &opts.solver,
                )?;
                masses.push(mass);
            }
        }
        (masses, value.is_scalar())
    } else {
        (Vec::new(), false)
    };
    let t_ratios = broadcast_t_ncdm(&t_value, masses.len())?;
    Ok((masses, single, t_ratios))
}

/// Broadcasts a scalar temperature ratio over `len` species; an explicit
/// list must already have matching length (checked by the caller).
fn broadcast_t_ncdm(value: &Option<ParamValue>, len: usize) -> Result<Vec<f64>, CosmoError> {
    match value {
        None => Ok(vec![T_NCDM; len]),
        Some(ParamValue::Float(t)) => Ok(vec![*t; len]),
        Some(value) => value.as_f64_list("T_ncdm"),
    }
}

/// Routes a single summed mass through the hierarchy splitter when a named
/// hierarchy was supplied; a per-species mass list with a hierarchy is fatal.
fn apply_hierarchy(
    p: &mut RawParams,
    masses: Vec<f64>,
    single: bool,
    t_ratios: Vec<f64>,
    opts: &CompileOpts,
) -> Result<(Vec<f64>, Vec<f64>), CosmoError> {
    let Some(value) = p.remove("neutrino_hierarchy") else {
        return Ok((masses, t_ratios));
    };
    let hierarchy = Hierarchy::parse(value.as_str("neutrino_hierarchy")?)?;
    if !single {
        return Err(CosmoError::Unphysical(
            ErrorInfo::new(
                "hierarchy-needs-sum",
                format!(
                    "neutrino_hierarchy {hierarchy} cannot be passed with a list for m_ncdm, only with a sum"
                ),
            )
            .with_context("n_masses", format!("{}", masses.len())),
        ));
    }
    let sum_ev = masses[0];
    let split = split_summed_mass(sum_ev, hierarchy, &opts.split)?;
    let t_ratio = t_ratios.first().copied().unwrap_or(T_NCDM);
    Ok((split.to_vec(), vec![t_ratio; 3]))
}

fn take_f64(p: &mut RawParams, name: &str) -> Result<f64, CosmoError> {
    match p.remove(name) {
        Some(value) => value.as_f64(name),
        None => Err(CosmoError::UnknownParameter(
            ErrorInfo::new(
                "parameter-not-found",
                format!("parameter {name} required for compilation"),
            )
            .with_context("parameter", name),
        )),
    }
}

fn take_opt_f64(p: &mut RawParams, name: &str) -> Result<Option<f64>, CosmoError> {
    p.remove(name).map(|value| value.as_f64(name)).transpose()
}
