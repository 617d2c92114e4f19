//! Wiring generator: turns a connection rule into edges
//!
//! A call is split in two phases. [`WiringPlan::prepare`] validates the type,
//! parameters, ids and rule arity without touching any store.
//! [`WiringPlan::execute`] checks the random streams, then lets every worker
//! walk the target list in order and insert the edges whose target it owns,
//! drawing from its own random stream. Any error is raised before the first
//! insert, so a failed call leaves the stores unchanged.

use crate::{
    error::{ConnectError, Result},
    ids::{NodeId, SynapseTypeId},
    partition::IdentifierSpace,
    rng::{RandomSource, RandomStreams},
    store::ConnectionStore,
    synapse::SynapseParams,
    types::{SynapseTypeTable, TypeRef},
};
use core::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Connection rule applied between a source and a target list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(tag = "rule", rename_all = "snake_case"))]
pub enum ConnectionRule {
    /// `sources[i] -> targets[i]`; both lists must have equal length
    OneToOne,
    /// Each target draws `indegree` sources uniformly, with replacement
    FixedIndegree {
        /// Incoming edges per target
        indegree: usize,
    },
    /// Every source connects to every target
    AllToAll,
}

impl fmt::Display for ConnectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneToOne => f.write_str("one_to_one"),
            Self::FixedIndegree { indegree } => write!(f, "fixed_indegree({})", indegree),
            Self::AllToAll => f.write_str("all_to_all"),
        }
    }
}

/// Per-edge value specification for one parameter
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum ParamValue {
    /// Same value for every edge
    Constant(f64),
    /// Drawn per edge, uniformly in `[low, high)`
    Uniform {
        /// Lower bound
        low: f64,
        /// Upper bound
        high: f64,
    },
}

/// Synapse type and parameter specification for a connect call
#[derive(Debug, Clone, PartialEq)]
pub struct SynapseSpec {
    /// Type of the created edges
    pub synapse_type: TypeRef,
    /// Parameter overrides, applied in declaration order
    pub params: Vec<(String, ParamValue)>,
}

impl SynapseSpec {
    /// Spec using the type's defaults unchanged
    pub fn new(synapse_type: impl Into<TypeRef>) -> Self {
        Self {
            synapse_type: synapse_type.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter override
    pub fn with_param(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.params.push((name.into(), value));
        self
    }

    /// Override the weight with a constant
    pub fn with_weight(self, weight: f64) -> Self {
        self.with_param("weight", ParamValue::Constant(weight))
    }

    /// Override the delay with a constant
    pub fn with_delay(self, delay: f64) -> Self {
        self.with_param("delay", ParamValue::Constant(delay))
    }
}

/// A validated connect call, ready to run on the worker stores
#[derive(Debug)]
pub struct WiringPlan<'a> {
    rule: ConnectionRule,
    sources: &'a [NodeId],
    targets: &'a [NodeId],
    synapse_type: SynapseTypeId,
    /// Type defaults with all constant overrides applied
    base: SynapseParams,
    /// Parameters drawn per edge: (name, low, high)
    drawn: Vec<(&'static str, f64, f64)>,
}

impl<'a> WiringPlan<'a> {
    /// Validate a connect call
    pub fn prepare(
        space: &IdentifierSpace,
        types: &SynapseTypeTable,
        rule: ConnectionRule,
        sources: &'a [NodeId],
        targets: &'a [NodeId],
        spec: &SynapseSpec,
    ) -> Result<Self> {
        let synapse_type = types.resolve_ref(&spec.synapse_type)?;
        let model = synapse_type.model();

        let mut base = synapse_type.defaults;
        let mut drawn = Vec::new();
        for (name, value) in &spec.params {
            let name = model
                .parameter_names()
                .iter()
                .copied()
                .find(|known| *known == name.as_str())
                .ok_or_else(|| ConnectError::unknown_parameter(model.builtin_name(), name.as_str()))?;
            match *value {
                ParamValue::Constant(v) => {
                    base.set(name, v)?;
                    drawn.retain(|(drawn_name, _, _)| *drawn_name != name);
                }
                ParamValue::Uniform { low, high } => {
                    if !(low.is_finite() && high.is_finite() && low <= high) {
                        return Err(ConnectError::invalid_parameter(
                            name,
                            format!("uniform({}, {})", low, high),
                            "finite bounds with low <= high",
                        ));
                    }
                    drawn.retain(|(drawn_name, _, _)| *drawn_name != name);
                    drawn.push((name, low, high));
                }
            }
        }
        base.validate()?;
        // Parameter constraints are intervals, so checking both bounds covers every draw.
        for &(name, low, high) in &drawn {
            base.with_overrides(&[(name, low)])?;
            base.with_overrides(&[(name, high)])?;
        }

        space.validate_all(sources)?;
        space.validate_all(targets)?;

        match rule {
            ConnectionRule::OneToOne if sources.len() != targets.len() => {
                return Err(ConnectError::SizeMismatch {
                    sources: sources.len(),
                    targets: targets.len(),
                });
            }
            ConnectionRule::FixedIndegree { indegree }
                if indegree > 0 && !targets.is_empty() && sources.is_empty() =>
            {
                return Err(ConnectError::EmptyRange { draws: indegree });
            }
            _ => {}
        }

        Ok(Self {
            rule,
            sources,
            targets,
            synapse_type: synapse_type.id,
            base,
            drawn,
        })
    }

    /// Synapse type the plan creates
    pub fn synapse_type(&self) -> SynapseTypeId {
        self.synapse_type
    }

    /// Number of edges the plan creates across all workers
    pub fn edge_count(&self) -> usize {
        match self.rule {
            ConnectionRule::OneToOne => self.targets.len(),
            ConnectionRule::FixedIndegree { indegree } => self.targets.len() * indegree,
            ConnectionRule::AllToAll => self.targets.len() * self.sources.len(),
        }
    }

    /// Run the plan on every worker store
    ///
    /// `stores[w]` must belong to worker `w` and `rngs` must hold one stream
    /// per store. Returns the number of edges created.
    pub fn execute<R>(
        &self,
        space: &IdentifierSpace,
        stores: &mut [ConnectionStore],
        rngs: &mut RandomStreams<R>,
    ) -> Result<usize>
    where
        R: RandomSource + Send,
    {
        rngs.check_workers(stores.len())?;
        let rngs = rngs.as_mut_slice();

        #[cfg(feature = "parallel")]
        let created = stores
            .par_iter_mut()
            .zip(rngs.par_iter_mut())
            .map(|(store, rng)| self.execute_worker(space, store, rng))
            .sum::<usize>();

        #[cfg(not(feature = "parallel"))]
        let created = stores
            .iter_mut()
            .zip(rngs.iter_mut())
            .map(|(store, rng)| self.execute_worker(space, store, rng))
            .sum::<usize>();

        log::debug!(
            "Wired {} edges of type {} with rule {}",
            created,
            self.synapse_type,
            self.rule
        );
        Ok(created)
    }

    fn execute_worker<R: RandomSource>(
        &self,
        space: &IdentifierSpace,
        store: &mut ConnectionStore,
        rng: &mut R,
    ) -> usize {
        let worker = store.worker();
        let before = store.len();
        let is_local = |target: &NodeId| space.owner_unchecked(*target) == worker;

        match self.rule {
            ConnectionRule::OneToOne => {
                for (&source, &target) in self.sources.iter().zip(self.targets) {
                    if is_local(&target) {
                        let params = self.edge_params(rng);
                        store.insert(source, target, self.synapse_type, params);
                    }
                }
            }
            ConnectionRule::FixedIndegree { indegree } => {
                let local = self.targets.iter().filter(|t| is_local(t)).count();
                store.reserve(local * indegree);
                let n = self.sources.len();
                for &target in self.targets.iter().filter(|t| is_local(t)) {
                    for _ in 0..indegree {
                        let source = self.sources[rng.draw_index(n)];
                        let params = self.edge_params(rng);
                        store.insert(source, target, self.synapse_type, params);
                    }
                }
            }
            ConnectionRule::AllToAll => {
                for &target in self.targets.iter().filter(|t| is_local(t)) {
                    for &source in self.sources {
                        let params = self.edge_params(rng);
                        store.insert(source, target, self.synapse_type, params);
                    }
                }
            }
        }

        let created = store.len() - before;
        log::trace!("Worker {} inserted {} edges", worker, created);
        created
    }

    fn edge_params<R: RandomSource>(&self, rng: &mut R) -> SynapseParams {
        let mut params = self.base;
        for &(name, low, high) in &self.drawn {
            let value = rng.draw_uniform(low, high);
            // Names were checked against the schema in `prepare`.
            let applied = params.set(name, value).is_ok();
            debug_assert!(applied, "drawn parameter '{}' missing from schema", name);
        }
        params
    }
}
