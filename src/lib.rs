//! # Semilla: Component-Tree Weight Initialization
//!
//! Semilla initializes trees of composable modules from declarative rule
//! specs, applying each node's rules exactly once, letting pretrained
//! overrides win over structural defaults, and recording per-parameter
//! provenance for audit.
//!
//! ## Architecture
//!
//! - **module**: Component-node data model (parameters with stable identity,
//!   tree structure)
//! - **init**: The initialization engine (rules, dispatch, traversal,
//!   provenance)
//! - **io**: JSON checkpoint save/load
//! - **config**: Declarative YAML specification and CLI
//!
//! ## Example
//!
//! ```
//! use semilla::init::{init_tree, InitRule};
//! use semilla::module::{ModuleNode, Param};
//!
//! let mut model = ModuleNode::new("model")
//!     .with_param(Param::zeros("embed", &[16, 8]))
//!     .with_init(vec![InitRule::Normal { mean: 0.0, std: 0.02 }]);
//!
//! let report = init_tree(&mut model).unwrap();
//! assert!(model.is_initialized());
//! assert_eq!(report.len(), 1);
//! ```

pub mod config;
pub mod init;
pub mod io;
pub mod module;

pub mod error;

// Re-export commonly used types
pub use error::{Error, Result};
pub use init::{init_tree, InitRule, ProvenanceReport};
pub use module::{ModuleNode, Param};
