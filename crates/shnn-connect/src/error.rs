//! Error types for the connection registry

use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, ConnectError>;

/// Errors raised by the connection registry
///
/// Every variant is tied to one violated precondition of the operation that
/// returned it. Validation always happens before any store is touched, so an
/// `Err` leaves the registry exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConnectError {
    /// Node id outside the allocated range
    #[error("Invalid node id {id} (allocated range: 1..={last})")]
    InvalidId {
        /// Offending id
        id: u64,
        /// Last allocated id (0 when nothing has been created)
        last: u64,
    },

    /// Synapse type name already registered
    #[error("Synapse type '{name}' already registered")]
    DuplicateType {
        /// Name that was registered twice
        name: String,
    },

    /// Synapse type name or id not registered
    #[error("Unknown synapse type '{reference}'")]
    UnknownType {
        /// Name or id as given by the caller
        reference: String,
    },

    /// One-to-one wiring with unequal source and target counts
    #[error("Size mismatch: {sources} sources vs {targets} targets")]
    SizeMismatch {
        /// Number of sources
        sources: usize,
        /// Number of targets
        targets: usize,
    },

    /// Random draws requested from an empty source range
    #[error("Empty source range: cannot draw {draws} sources per target")]
    EmptyRange {
        /// Draws per target that were requested
        draws: usize,
    },

    /// Parameter name not part of the synapse model's schema
    #[error("Synapse model '{model}' has no parameter '{parameter}'")]
    UnknownParameter {
        /// Model kind name
        model: String,
        /// Parameter that was not recognised
        parameter: String,
    },

    /// Invalid parameter value
    #[error("Invalid parameter {parameter}: {value} (expected {constraint})")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Invalid registry configuration
    #[error("Invalid registry configuration: {reason}")]
    InvalidConfiguration {
        /// Reason for invalid configuration
        reason: String,
    },
}

impl ConnectError {
    /// Create an unknown type error
    pub fn unknown_type(reference: impl ToString) -> Self {
        Self::UnknownType {
            reference: reference.to_string(),
        }
    }

    /// Create a duplicate type error
    pub fn duplicate_type(name: impl Into<String>) -> Self {
        Self::DuplicateType { name: name.into() }
    }

    /// Create an unknown parameter error
    pub fn unknown_parameter(model: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::UnknownParameter {
            model: model.into(),
            parameter: parameter.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            constraint: constraint.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
