//! Weight-initialization engine
//!
//! This module is the core of the crate: a depth-first traversal over a
//! [`crate::module::ModuleNode`] tree that applies each node's declarative
//! rules exactly once and records per-parameter provenance for audit.
//!
//! # Ordering
//!
//! For any node, its standard rules complete before any child begins, and
//! every child completes before the node's override rules run. Declaration
//! order decides ties among sibling rules and sibling children.
//!
//! # Example
//!
//! ```
//! use semilla::init::{init_tree, InitRule};
//! use semilla::module::{ModuleNode, Param};
//!
//! let mut model = ModuleNode::new("mlp")
//!     .with_child(
//!         ModuleNode::new("fc1")
//!             .with_param(Param::zeros("weight", &[16, 8]))
//!             .with_init(vec![InitRule::Xavier { gain: 1.0 }]),
//!     )
//!     .with_child(
//!         ModuleNode::new("fc2")
//!             .with_param(Param::zeros("weight", &[8, 16]))
//!             .with_init(vec![InitRule::Normal { mean: 0.0, std: 0.02 }]),
//!     );
//!
//! let report = init_tree(&mut model).unwrap();
//! assert_eq!(report.len(), 2);
//! ```

mod context;
pub mod dispatch;
mod engine;
mod report;
mod rule;


pub use engine::{init_tree, init_tree_with};
pub use report::{ProvenanceRecord, ProvenanceReport};
pub use rule::{InitRule, RulePhase};
