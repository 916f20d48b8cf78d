#![deny(missing_docs)]
#![doc = "Cosmology facade, engine capability interfaces, registry and persistable state."]

mod background;
mod cosmology;
mod friedmann;
mod registry;
mod state;

pub use background::Background;
pub use cosmology::Cosmology;
pub use friedmann::FriedmannEngine;
pub use registry::{Engine, EngineFactory, EngineRegistry};
pub use state::{CosmologyState, EngineRecord};
