//! The cosmology facade: a compiled parameter set plus an optional engine.

use cosmo_core::errors::{CosmoError, ErrorInfo};
use cosmo_core::ParamsProvenance;
use cosmo_params::{
    check_conflicts, compile_params, default_params, hash_params, merge_params, CanonicalParams,
    CompileOpts, RawParams,
};

use crate::background::Background;
use crate::registry::{Engine, EngineRegistry};
use crate::state::{CosmologyState, EngineRecord};

/// A cosmology: canonical parameters compiled once at construction, an
/// engine registry, and an optionally attached engine.
///
/// The canonical set is immutable for the lifetime of the instance; cloning
/// with overrides produces a fresh compilation and never touches the
/// original (the merge is pure).
pub struct Cosmology {
    raw: RawParams,
    params: CanonicalParams,
    opts: CompileOpts,
    registry: EngineRegistry,
    engine: Option<Box<dyn Engine>>,
}

impl Cosmology {
    /// Builds a cosmology from user parameters merged over the defaults.
    ///
    /// User parameters are validated for conflicts first; compilation either
    /// fully succeeds or fails atomically.
    pub fn new(params: RawParams) -> Result<Self, CosmoError> {
        Self::with_opts(params, CompileOpts::default())
    }

    /// Like [`Cosmology::new`] with explicit numerical options.
    pub fn with_opts(params: RawParams, opts: CompileOpts) -> Result<Self, CosmoError> {
        check_conflicts(&params)?;
        let raw = merge_params(&default_params(), &params);
        let compiled = compile_params(&raw, &opts)?;
        Ok(Self {
            raw,
            params: compiled,
            opts,
            registry: EngineRegistry::builtin(),
            engine: None,
        })
    }

    /// The compiled canonical parameter set.
    pub fn params(&self) -> &CanonicalParams {
        &self.params
    }

    /// The merged raw mapping the instance was compiled from.
    pub fn raw(&self) -> &RawParams {
        &self.raw
    }

    /// The engine registry; register additional factories here before
    /// attaching by name.
    pub fn registry_mut(&mut self) -> &mut EngineRegistry {
        &mut self.registry
    }

    /// Attaches the engine registered under `name`.
    pub fn set_engine(&mut self, name: &str, extra: RawParams) -> Result<(), CosmoError> {
        let engine = self.registry.create(name, &self.params, &extra)?;
        self.engine = Some(engine);
        Ok(())
    }

    /// The attached engine, if any.
    pub fn engine(&self) -> Option<&dyn Engine> {
        self.engine.as_deref()
    }

    /// Background quantities from the attached engine.
    pub fn background(&self) -> Result<&dyn Background, CosmoError> {
        match &self.engine {
            Some(engine) => engine.background(),
            None => Err(CosmoError::Engine(
                ErrorInfo::new("no-engine", "no engine attached")
                    .with_hint("attach one with set_engine"),
            )),
        }
    }

    /// Clones the cosmology with `overrides` merged in (conflict-group-wise
    /// precedence) and a fresh compilation. The attached engine, if any, is
    /// re-created for the new parameters with its recorded configuration.
    pub fn clone_with(&self, overrides: &RawParams) -> Result<Self, CosmoError> {
        check_conflicts(overrides)?;
        let raw = merge_params(&self.raw, overrides);
        let compiled = compile_params(&raw, &self.opts)?;
        let mut new = Self {
            raw,
            params: compiled,
            opts: self.opts.clone(),
            registry: self.registry.clone(),
            engine: None,
        };
        if let Some(engine) = &self.engine {
            let name = engine.name().to_string();
            let extra = engine.extra().clone();
            new.set_engine(&name, extra)?;
        }
        Ok(new)
    }

    /// Snapshot of the cosmology for persistence.
    pub fn state(&self) -> Result<CosmologyState, CosmoError> {
        Ok(CosmologyState {
            schema_version: Default::default(),
            provenance: ParamsProvenance::stamped(hash_params(&self.params)?),
            opts: self.opts.clone(),
            raw: self.raw.clone(),
            params: self.params.clone(),
            engine: self.engine.as_ref().map(|engine| EngineRecord {
                name: engine.name().to_string(),
                extra: engine.extra().clone(),
            }),
        })
    }

    /// Reconstructs a cosmology from a snapshot: recompiles the recorded raw
    /// mapping, verifies the canonical hash, and re-attaches the recorded
    /// engine.
    pub fn from_state(state: &CosmologyState) -> Result<Self, CosmoError> {
        let opts = state.opts.clone();
        let compiled = compile_params(&state.raw, &opts)?;
        let hash = hash_params(&compiled)?;
        if hash != state.provenance.params_hash {
            return Err(CosmoError::Serde(
                ErrorInfo::new(
                    "state-hash-mismatch",
                    "recompiled parameters do not match the recorded canonical hash",
                )
                .with_context("recorded", state.provenance.params_hash.clone())
                .with_context("recompiled", hash),
            ));
        }
        let mut new = Self {
            raw: state.raw.clone(),
            params: compiled,
            opts,
            registry: EngineRegistry::builtin(),
            engine: None,
        };
        if let Some(record) = &state.engine {
            new.set_engine(&record.name, record.extra.clone())?;
        }
        Ok(new)
    }
}

impl std::fmt::Debug for Cosmology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cosmology")
            .field("params", &self.params)
            .field("engine", &self.engine.as_ref().map(|engine| engine.name().to_string()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicting_inputs_are_rejected_at_construction() {
        let err = Cosmology::new(RawParams::new().with("h", 0.7).with("H0", 70.0)).unwrap_err();
        assert_eq!(err.info().code, "conflicting-parameters");
    }

    #[test]
    fn clone_with_leaves_the_base_untouched() {
        let base = Cosmology::new(RawParams::new().with("H0", 70.0)).unwrap();
        let cloned = base.clone_with(&RawParams::new().with("h", 0.72)).unwrap();
        assert_eq!(base.params().h, 0.70);
        assert_eq!(cloned.params().h, 0.72);
        assert!(!cloned.raw().contains("H0"));
    }

    #[test]
    fn background_requires_an_engine() {
        let cosmo = Cosmology::new(RawParams::new()).unwrap();
        let err = match cosmo.background() {
            Ok(_) => panic!("expected background() to fail without an engine"),
            Err(e) => e,
        };
        assert_eq!(err.info().code, "no-engine");
    }

    #[test]
    fn clone_with_carries_the_engine() {
        let mut cosmo = Cosmology::new(RawParams::new()).unwrap();
        cosmo.set_engine("friedmann", RawParams::new()).unwrap();
        let cloned = cosmo.clone_with(&RawParams::new().with("h", 0.68)).unwrap();
        let engine = cloned.engine().unwrap();
        assert_eq!(engine.name(), "friedmann");
        assert_eq!(cloned.background().unwrap().params().h, 0.68);
    }
}
