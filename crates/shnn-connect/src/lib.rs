//! Synaptic connection registry for partitioned spiking network construction
//!
//! This crate stores the directed, typed edges of a large spiking network,
//! split across parallel workers, and answers filtered queries over them with
//! a deterministic result order. It does not simulate anything.
//!
//! The typical flow mirrors a network construction script:
//!
//! 1. create node ids with [`ConnectionRegistry::create_nodes`]
//! 2. register or clone synapse types
//! 3. wire populations with [`ConnectionRegistry::connect`]
//! 4. inspect the result with [`ConnectionRegistry::query`] and
//!    [`ConnectionRegistry::total_count`]
//!
//! ```
//! use shnn_connect::{ConnectionFilter, ConnectionRegistry, ConnectionRule, RegistryConfig, SynapseSpec};
//!
//! let mut registry = ConnectionRegistry::new(RegistryConfig::default()).unwrap();
//! let nodes = registry.create_nodes(100).unwrap();
//! let odd = nodes.slice(0, Some(70), 2);
//! let even = nodes.slice(1, Some(70), 2);
//!
//! let mut rngs = registry.random_streams();
//! registry
//!     .connect(ConnectionRule::OneToOne, &odd, &even, &SynapseSpec::new("static_synapse"), &mut rngs)
//!     .unwrap();
//!
//! let edges = registry.query(&ConnectionFilter::new().synapse_type("static_synapse"));
//! assert_eq!(edges.len(), 35);
//! assert_eq!((edges[0].source.raw(), edges[0].target.raw()), (1, 2));
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod ids;
pub mod partition;
pub mod query;
pub mod registry;
pub mod rng;
pub mod store;
pub mod synapse;
pub mod types;
pub mod wiring;

// Re-export essential types
pub use config::{RegistryConfig, DEFAULT_SEED};
pub use error::{ConnectError, Result};
pub use ids::{NodeId, NodeRange, SynapseTypeId, WorkerId};
pub use partition::IdentifierSpace;
pub use query::ConnectionFilter;
pub use registry::{ConnectionRegistry, ConnectivityReport};
pub use rng::{RandomSource, RandomStreams};
pub use store::{ConnectionStore, Edge};
pub use synapse::{StaticParams, StdpParams, SynapseModel, SynapseParams, TsodyksParams};
pub use types::{SynapseType, SynapseTypeTable, TypeRef};
pub use wiring::{ConnectionRule, ParamValue, SynapseSpec, WiringPlan};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_integration() {
        let mut registry = ConnectionRegistry::new(RegistryConfig::new(2, 11).unwrap()).unwrap();
        let nodes = registry.create_nodes(6).unwrap().to_vec();
        let mut rngs = registry.random_streams();
        let created = registry
            .connect(
                ConnectionRule::FixedIndegree { indegree: 2 },
                &nodes[..3],
                &nodes[3..],
                &SynapseSpec::new("static_synapse"),
                &mut rngs,
            )
            .unwrap();
        assert_eq!(created, 6);
        assert_eq!(registry.query(&ConnectionFilter::new()).len(), 6);
    }
}
