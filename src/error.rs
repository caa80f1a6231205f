//! Error types for Semilla

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Rule `{rule}` failed on `{node}`: {reason}")]
    Dispatch {
        rule: String,
        node: String,
        reason: String,
    },

    #[error("Tracking already installed for parameter `{name}`: the tree shares a node")]
    Reentrancy { name: String },

    #[error("Shape mismatch for `{name}`: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        name: String,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;
