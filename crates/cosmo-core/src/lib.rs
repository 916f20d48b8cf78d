#![deny(missing_docs)]
#![doc = "Core error, constant and value types shared across the cosmo parameter engine."]

pub mod constants;
pub mod errors;
pub mod provenance;
mod types;

pub use errors::{CosmoError, ErrorInfo};
pub use provenance::{ParamsProvenance, SchemaVersion};
pub use types::{Hierarchy, NcdmSpecies, ParamValue};
