#![deny(missing_docs)]
#![doc = "Phase-space integration, mass-density inversion, hierarchy splitting and relativistic accounting for massive relic (ncdm) species."]

pub mod accounting;
pub mod hierarchy;
pub mod momenta;
pub mod quadrature;
pub mod solver;

pub use accounting::{resolve_species, NUrSource, ResolvedSpecies};
pub use hierarchy::{split_summed_mass, SplitOpts};
pub use momenta::{ncdm_momenta, p_ncdm_total, rho_ncdm_total, MomentaKind, Q_CUTOFF};
pub use quadrature::{integrate, QuadratureOpts};
pub use solver::{mass_from_omega, omega_from_mass, SolverOpts, EV_PER_OMEGA_H2};
