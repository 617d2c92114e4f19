//! Synapse models and their fixed parameter schemas
//!
//! Each model kind carries its own parameter struct. The schema (the set of
//! parameter names) is fixed per kind and resolved once, when a type is
//! registered; edges store a plain [`SynapseParams`] value.

use crate::error::{ConnectError, Result};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Synapse model kinds known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum SynapseModel {
    /// Fixed weight and delay
    Static,
    /// Pair-based STDP synapse (parameters only, no dynamics)
    Stdp,
    /// Tsodyks-Markram short-term plasticity synapse (parameters only)
    Tsodyks,
}

impl SynapseModel {
    /// Every built-in model kind
    pub const ALL: [SynapseModel; 3] = [Self::Static, Self::Stdp, Self::Tsodyks];

    /// Name under which the model is pre-registered
    pub const fn builtin_name(&self) -> &'static str {
        match self {
            Self::Static => "static_synapse",
            Self::Stdp => "stdp_synapse",
            Self::Tsodyks => "tsodyks_synapse",
        }
    }

    /// Parameter names accepted by this model, in declaration order
    pub const fn parameter_names(&self) -> &'static [&'static str] {
        match self {
            Self::Static => &["weight", "delay"],
            Self::Stdp => &[
                "weight", "delay", "tau_plus", "lambda", "alpha", "mu_plus", "mu_minus", "Wmax",
            ],
            Self::Tsodyks => &["weight", "delay", "U", "tau_rec", "tau_fac"],
        }
    }

    /// Default parameter set of this model
    pub fn default_params(&self) -> SynapseParams {
        match self {
            Self::Static => SynapseParams::Static(StaticParams::default()),
            Self::Stdp => SynapseParams::Stdp(StdpParams::default()),
            Self::Tsodyks => SynapseParams::Tsodyks(TsodyksParams::default()),
        }
    }
}

impl fmt::Display for SynapseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.builtin_name())
    }
}

/// Parameters of a static synapse
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StaticParams {
    /// Synaptic weight
    pub weight: f64,
    /// Transmission delay (ms)
    pub delay: f64,
}

impl Default for StaticParams {
    fn default() -> Self {
        Self {
            weight: 1.0,
            delay: 1.0,
        }
    }
}

/// Parameters of an STDP synapse
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StdpParams {
    /// Synaptic weight
    pub weight: f64,
    /// Transmission delay (ms)
    pub delay: f64,
    /// Potentiation time constant (ms)
    pub tau_plus: f64,
    /// Learning rate
    pub lambda: f64,
    /// Depression/potentiation asymmetry
    pub alpha: f64,
    /// Potentiation weight dependence exponent
    pub mu_plus: f64,
    /// Depression weight dependence exponent
    pub mu_minus: f64,
    /// Maximum weight
    pub w_max: f64,
}

impl Default for StdpParams {
    fn default() -> Self {
        Self {
            weight: 1.0,
            delay: 1.0,
            tau_plus: 20.0,
            lambda: 0.01,
            alpha: 1.0,
            mu_plus: 1.0,
            mu_minus: 1.0,
            w_max: 100.0,
        }
    }
}

/// Parameters of a Tsodyks-Markram synapse
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TsodyksParams {
    /// Synaptic weight
    pub weight: f64,
    /// Transmission delay (ms)
    pub delay: f64,
    /// Utilization of synaptic efficacy
    pub u: f64,
    /// Recovery time constant (ms)
    pub tau_rec: f64,
    /// Facilitation time constant (ms)
    pub tau_fac: f64,
}

impl Default for TsodyksParams {
    fn default() -> Self {
        Self {
            weight: 1.0,
            delay: 1.0,
            u: 0.5,
            tau_rec: 800.0,
            tau_fac: 0.0,
        }
    }
}

/// Parameter values of one synapse type or one edge
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(tag = "model", rename_all = "snake_case"))]
pub enum SynapseParams {
    /// Static synapse parameters
    Static(StaticParams),
    /// STDP synapse parameters
    Stdp(StdpParams),
    /// Tsodyks synapse parameters
    Tsodyks(TsodyksParams),
}

impl SynapseParams {
    /// Model kind these parameters belong to
    pub fn model(&self) -> SynapseModel {
        match self {
            Self::Static(_) => SynapseModel::Static,
            Self::Stdp(_) => SynapseModel::Stdp,
            Self::Tsodyks(_) => SynapseModel::Tsodyks,
        }
    }

    /// Synaptic weight
    pub fn weight(&self) -> f64 {
        match self {
            Self::Static(p) => p.weight,
            Self::Stdp(p) => p.weight,
            Self::Tsodyks(p) => p.weight,
        }
    }

    /// Transmission delay (ms)
    pub fn delay(&self) -> f64 {
        match self {
            Self::Static(p) => p.delay,
            Self::Stdp(p) => p.delay,
            Self::Tsodyks(p) => p.delay,
        }
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut f64> {
        match (self, name) {
            (Self::Static(p), "weight") => Some(&mut p.weight),
            (Self::Static(p), "delay") => Some(&mut p.delay),
            (Self::Stdp(p), "weight") => Some(&mut p.weight),
            (Self::Stdp(p), "delay") => Some(&mut p.delay),
            (Self::Stdp(p), "tau_plus") => Some(&mut p.tau_plus),
            (Self::Stdp(p), "lambda") => Some(&mut p.lambda),
            (Self::Stdp(p), "alpha") => Some(&mut p.alpha),
            (Self::Stdp(p), "mu_plus") => Some(&mut p.mu_plus),
            (Self::Stdp(p), "mu_minus") => Some(&mut p.mu_minus),
            (Self::Stdp(p), "Wmax") => Some(&mut p.w_max),
            (Self::Tsodyks(p), "weight") => Some(&mut p.weight),
            (Self::Tsodyks(p), "delay") => Some(&mut p.delay),
            (Self::Tsodyks(p), "U") => Some(&mut p.u),
            (Self::Tsodyks(p), "tau_rec") => Some(&mut p.tau_rec),
            (Self::Tsodyks(p), "tau_fac") => Some(&mut p.tau_fac),
            _ => None,
        }
    }

    /// Read a parameter by name
    pub fn get(&self, name: &str) -> Option<f64> {
        let mut copy = *self;
        copy.slot_mut(name).map(|v| *v)
    }

    /// Overwrite a parameter by name
    ///
    /// Only checks the name against the schema; call [`validate`](Self::validate)
    /// once all values are in place.
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        let model = self.model();
        let slot = self
            .slot_mut(name)
            .ok_or_else(|| ConnectError::unknown_parameter(model.builtin_name(), name))?;
        *slot = value;
        Ok(())
    }

    /// Check that `name` belongs to this model's schema
    pub fn check_name(&self, name: &str) -> Result<()> {
        if self.model().parameter_names().contains(&name) {
            Ok(())
        } else {
            Err(ConnectError::unknown_parameter(self.model().builtin_name(), name))
        }
    }

    /// Copy with `overrides` applied and validated
    pub fn with_overrides(&self, overrides: &[(&str, f64)]) -> Result<Self> {
        let mut params = *self;
        for &(name, value) in overrides {
            params.set(name, value)?;
        }
        params.validate()?;
        Ok(params)
    }

    /// All parameters as `(name, value)` pairs in schema order
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        self.model()
            .parameter_names()
            .iter()
            .filter_map(|&name| self.get(name).map(|v| (name, v)))
            .collect()
    }

    /// Validate parameter values
    pub fn validate(&self) -> Result<()> {
        check_finite("weight", self.weight())?;
        check_positive("delay", self.delay())?;
        match self {
            Self::Static(_) => {}
            Self::Stdp(p) => {
                check_positive("tau_plus", p.tau_plus)?;
                check_non_negative("lambda", p.lambda)?;
                check_finite("alpha", p.alpha)?;
                check_finite("mu_plus", p.mu_plus)?;
                check_finite("mu_minus", p.mu_minus)?;
                check_positive("Wmax", p.w_max)?;
            }
            Self::Tsodyks(p) => {
                if !(0.0..=1.0).contains(&p.u) {
                    return Err(ConnectError::invalid_parameter(
                        "U",
                        p.u.to_string(),
                        "in [0.0, 1.0]",
                    ));
                }
                check_positive("tau_rec", p.tau_rec)?;
                check_non_negative("tau_fac", p.tau_fac)?;
            }
        }
        Ok(())
    }
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ConnectError::invalid_parameter(name, value.to_string(), "finite"));
    }
    Ok(())
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConnectError::invalid_parameter(name, value.to_string(), "> 0.0"));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ConnectError::invalid_parameter(name, value.to_string(), ">= 0.0"));
    }
    Ok(())
}
