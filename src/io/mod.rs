//! Checkpoint I/O
//!
//! The crate's one persisted artifact: a JSON map of hierarchical parameter
//! name to shape-described flat buffer. Consumed by the `Pretrained` rule and
//! produced by the CLI export path.

mod checkpoint;

pub use checkpoint::{Checkpoint, CheckpointEntry};
