//! pc-graph: cycle topology for the power-cycle solver.
//!
//! Components are joined by named state points. [`GraphBuilder::build`]
//! checks references and classifies the result as one closed cycle or one
//! open chain, fixing the order the solver runs components in.
//!
//! # Example
//!
//! ```
//! use pc_graph::{GraphBuilder, TopologyKind};
//!
//! let mut builder = GraphBuilder::new();
//! let cold = builder.add_point("cold");
//! let hot = builder.add_point("hot");
//! let heater = builder.add_component("heater", cold, hot);
//! let cooler = builder.add_component("cooler", hot, cold);
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.topology().kind, TopologyKind::Closed);
//! assert_eq!(graph.order(), &[heater, cooler]);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub(crate) mod validate;

pub use builder::GraphBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{Component, Graph, Point, Port, PortKind, Topology, TopologyKind};
