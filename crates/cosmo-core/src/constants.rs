//! Physical constants and unit-conversion anchors.
//!
//! SI values follow CODATA 2018. The derived critical-density constants are
//! precomputed to full f64 precision from the values below; they define the
//! `10^10 M_sun/h / (Mpc/h)^3` unit system used at the boundary between the
//! phase-space integrator and its callers.

/// Speed of light, m/s.
pub const C_LIGHT: f64 = 299_792_458.0;

/// Newtonian gravitational constant, m^3/kg/s^2.
pub const GRAVITATIONAL: f64 = 6.6743e-11;

/// One electronvolt, J.
pub const ELECTRONVOLT: f64 = 1.602_176_634e-19;

/// Boltzmann constant, J/K.
pub const BOLTZMANN: f64 = 1.380_649e-23;

/// Stefan-Boltzmann constant, W/m^2/K^4.
pub const STEFAN_BOLTZMANN: f64 = 5.670_374_419e-8;

/// One megaparsec, m.
pub const MEGAPARSEC: f64 = 3.085_677_581_491_367_3e22;

/// Solar mass, kg.
pub const MSUN: f64 = 1.988_47e30;

/// Present-day CMB temperature, K.
pub const T_CMB: f64 = 2.7255;

/// Default ncdm to CMB temperature ratio (instantaneous-decoupling value
/// corrected for non-instantaneous neutrino decoupling).
pub const T_NCDM: f64 = 0.71611;

/// Default effective number of neutrino species.
pub const N_EFF: f64 = 3.044;

/// Critical density over h^2, kg/m^3: `3 (100 km/s/Mpc)^2 / (8 pi G)`.
pub const RHO_CRIT_KGPH_PER_MPH3: f64 = 1.878_341_616_933_167_7e-26;

/// Critical density over h^2, in 10^10 M_sun/h / (Mpc/h)^3.
pub const RHO_CRIT_MSUNPH_PER_MPCPH3: f64 = 27.752_823_482_167_468;

/// Normalization of the massless Fermi-Dirac momentum integral, `7 pi^4 / 120`.
pub const FERMI_DIRAC_NORM: f64 = 5.682_196_976_983_474_8;

/// Solar neutrino mass-squared splitting from oscillation data, eV^2
/// (Lesgourgues & Pastor 2012).
pub const DELTA_M21_SQ: f64 = 7.62e-5;

/// Atmospheric splitting for the normal hierarchy, eV^2.
pub const DELTA_M31_SQ_NORMAL: f64 = 2.55e-3;

/// Atmospheric splitting for the inverted hierarchy, eV^2.
pub const DELTA_M31_SQ_INVERTED: f64 = -2.43e-3;

/// Mass above which a relic species counts as non-relativistic today, eV
/// (Lesgourgues et al. 2012).
pub const M_NONRELATIVISTIC_EV: f64 = 0.00017;

/// Minimum summed mass accommodated by the inverted hierarchy, eV.
pub const INVERTED_MIN_SUM_EV: f64 = 0.0978;
