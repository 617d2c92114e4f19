//! Registry of named synapse types
//!
//! Types are append-only: once registered, a type's id, name and default
//! parameters never change, so edges drawn earlier keep their meaning.

use crate::{
    error::{ConnectError, Result},
    ids::SynapseTypeId,
    synapse::{SynapseModel, SynapseParams},
};
use core::fmt;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A registered synapse type
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SynapseType {
    /// Unique type name
    pub name: String,
    /// Dense type id
    pub id: SynapseTypeId,
    /// Default parameters applied to new edges of this type
    pub defaults: SynapseParams,
}

impl SynapseType {
    /// Model kind of this type
    pub fn model(&self) -> SynapseModel {
        self.defaults.model()
    }
}

/// Reference to a synapse type by id or by name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Reference by id
    Id(SynapseTypeId),
    /// Reference by name
    Name(String),
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<SynapseTypeId> for TypeRef {
    fn from(id: SynapseTypeId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Table mapping synapse type names to ids and default parameters
#[derive(Debug, Clone)]
pub struct SynapseTypeTable {
    types: Vec<SynapseType>,
    by_name: HashMap<String, SynapseTypeId>,
}

impl SynapseTypeTable {
    /// Create a table holding only the built-in models
    pub fn with_builtins() -> Self {
        let mut table = Self {
            types: Vec::new(),
            by_name: HashMap::new(),
        };
        for model in SynapseModel::ALL {
            table.push(model.builtin_name().to_string(), model.default_params());
        }
        table
    }

    fn push(&mut self, name: String, defaults: SynapseParams) -> SynapseTypeId {
        let id = SynapseTypeId(self.types.len() as u16);
        self.by_name.insert(name.clone(), id);
        self.types.push(SynapseType { name, id, defaults });
        id
    }

    /// Register a new type under `name`
    pub fn register_type(&mut self, name: &str, defaults: SynapseParams) -> Result<SynapseTypeId> {
        if self.by_name.contains_key(name) {
            return Err(ConnectError::duplicate_type(name));
        }
        if self.types.len() > u16::MAX as usize {
            return Err(ConnectError::invalid_config("synapse type table is full"));
        }
        defaults.validate()?;
        let id = self.push(name.to_string(), defaults);
        log::debug!("Registered synapse type '{}' as {} ({})", name, id, defaults.model());
        Ok(id)
    }

    /// Register `new_name` as a copy of `base_name` with `overrides` applied
    pub fn clone_type(
        &mut self,
        base_name: &str,
        new_name: &str,
        overrides: &[(&str, f64)],
    ) -> Result<SynapseTypeId> {
        let base = self.get(self.resolve(base_name)?);
        if self.by_name.contains_key(new_name) {
            return Err(ConnectError::duplicate_type(new_name));
        }
        let defaults = base.defaults.with_overrides(overrides)?;
        self.register_type(new_name, defaults)
    }

    /// Look up the id registered for `name`
    pub fn resolve(&self, name: &str) -> Result<SynapseTypeId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ConnectError::unknown_type(name))
    }

    /// Look up the name registered for `id`
    pub fn name_of(&self, id: SynapseTypeId) -> Result<&str> {
        self.types
            .get(id.index())
            .map(|t| t.name.as_str())
            .ok_or_else(|| ConnectError::unknown_type(id))
    }

    /// Resolve an id-or-name reference
    pub fn resolve_ref(&self, reference: &TypeRef) -> Result<&SynapseType> {
        match reference {
            TypeRef::Id(id) => self
                .types
                .get(id.index())
                .ok_or_else(|| ConnectError::unknown_type(id)),
            TypeRef::Name(name) => self.resolve(name).map(|id| self.get(id)),
        }
    }

    // Ids handed out by this table are always in range.
    fn get(&self, id: SynapseTypeId) -> &SynapseType {
        &self.types[id.index()]
    }

    /// Registered types in id order
    pub fn iter(&self) -> impl Iterator<Item = &SynapseType> {
        self.types.iter()
    }

    /// Number of registered types, built-ins included
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True if no types are registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for SynapseTypeTable {
    fn default() -> Self {
        Self::with_builtins()
    }
}
