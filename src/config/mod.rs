//! Declarative YAML configuration
//!
//! A spec file describes the model tree and its initialization rules; the
//! harness builds the tree, validates it, and hands it to the engine.
//!
//! # Example
//!
//! ```yaml
//! model:
//!   name: encoder
//!   params:
//!     - { name: weight, shape: [64, 32] }
//!   init:
//!     - { rule: normal, mean: 0.0, std: 0.02 }
//!     - { rule: pretrained, checkpoint: weights.json }
//!   children:
//!     - name: head
//!       params: [{ name: bias, shape: [32] }]
//!       init: [{ rule: constant, value: 0.0 }]
//!
//! report: init_report.txt
//! ```

mod build;
mod cli;
mod schema;
mod validate;


pub use build::{build_tree, load_spec};
pub use cli::{parse_args, Cli, Command, InfoArgs, InitArgs, ValidateArgs};
pub use schema::{HarnessSpec, NodeSpec, ParamSpec, RuleSpec};
pub use validate::{validate_spec, ValidationError};
