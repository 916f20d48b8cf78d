#![deny(missing_docs)]
#![doc = "Alias resolution, conflict detection and canonical compilation of cosmological parameters."]

mod canonical;
mod compile;
mod conflicts;
mod defaults;
mod hash;
mod merge;
mod raw;

pub use canonical::{CanonicalParams, Reionization};
pub use compile::{compile_params, CompileOpts};
pub use conflicts::{check_conflicts, find_conflicts, CONFLICT_GROUPS};
pub use defaults::{default_calculation, default_cosmology, default_params};
pub use hash::hash_params;
pub use merge::merge_params;
pub use raw::RawParams;
