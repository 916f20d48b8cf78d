//! Engine capability interface and the explicit name-to-factory registry.

use std::collections::BTreeMap;

use cosmo_core::errors::{CosmoError, ErrorInfo};
use cosmo_params::{CanonicalParams, RawParams};

use crate::background::Background;
use crate::friedmann::FriedmannEngine;

/// A computation backend attached to a cosmology.
///
/// Capabilities are explicit accessors per computation category; an engine
/// that does not provide a category returns a structured error rather than
/// being probed attribute-by-attribute.
pub trait Engine {
    /// Registered name of the engine.
    fn name(&self) -> &str;

    /// Extra engine configuration recorded at attach time.
    fn extra(&self) -> &RawParams;

    /// Background-quantity capability.
    fn background(&self) -> Result<&dyn Background, CosmoError> {
        Err(CosmoError::Engine(
            ErrorInfo::new(
                "capability-missing",
                format!("engine {} does not provide background quantities", self.name()),
            )
            .with_context("engine", self.name()),
        ))
    }
}

/// Factory signature for engine construction.
pub type EngineFactory =
    fn(&CanonicalParams, &RawParams) -> Result<Box<dyn Engine>, CosmoError>;

/// Explicit, statically-constructed map from engine name to factory.
#[derive(Clone)]
pub struct EngineRegistry {
    factories: BTreeMap<String, EngineFactory>,
}

impl EngineRegistry {
    /// Registry holding the built-in engines.
    pub fn builtin() -> Self {
        let mut registry = Self {
            factories: BTreeMap::new(),
        };
        registry.register("friedmann", |params, extra| {
            Ok(Box::new(FriedmannEngine::new(params, extra)?))
        });
        registry
    }

    /// Adds or replaces a factory under `name`.
    pub fn register(&mut self, name: impl Into<String>, factory: EngineFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Instantiates the engine registered under `name`.
    pub fn create(
        &self,
        name: &str,
        params: &CanonicalParams,
        extra: &RawParams,
    ) -> Result<Box<dyn Engine>, CosmoError> {
        let factory = self.factories.get(name).ok_or_else(|| {
            CosmoError::Engine(
                ErrorInfo::new("unknown-engine", format!("unknown engine {name}"))
                    .with_context("engine", name)
                    .with_context("known", self.names().collect::<Vec<_>>().join(", ")),
            )
        })?;
        factory(params, extra)
    }

    /// Registered engine names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmo_params::{compile_params, default_params, CompileOpts};

    #[test]
    fn unknown_engine_names_are_structured_errors() {
        let registry = EngineRegistry::builtin();
        let params = compile_params(&default_params(), &CompileOpts::default()).unwrap();
        let err = match registry.create("boltzmann_hydra", &params, &RawParams::new()) {
            Ok(_) => panic!("expected create() to reject an unknown engine"),
            Err(e) => e,
        };
        assert_eq!(err.info().code, "unknown-engine");
    }

    #[test]
    fn builtin_friedmann_resolves() {
        let registry = EngineRegistry::builtin();
        let params = compile_params(&default_params(), &CompileOpts::default()).unwrap();
        let engine = registry
            .create("friedmann", &params, &RawParams::new())
            .unwrap();
        assert_eq!(engine.name(), "friedmann");
        assert!(engine.background().is_ok());
    }
}
