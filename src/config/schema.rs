//! YAML schema definitions for the declarative initialization harness

use crate::init::InitRule;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete harness specification: the model tree plus harness options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessSpec {
    /// Root of the model tree
    pub model: NodeSpec,

    /// Optional provenance report sink path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
}

/// One node of the model tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Node name; becomes a segment of hierarchical parameter names
    pub name: String,

    /// Directly-owned parameters
    #[serde(default)]
    pub params: Vec<ParamSpec>,

    /// Initialization rules, applied in declaration order
    #[serde(default)]
    pub init: Vec<RuleSpec>,

    /// Child nodes, initialized in declaration order
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

/// A leaf parameter declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Short name, unique within its node
    pub name: String,

    /// Logical shape
    pub shape: Vec<usize>,
}

/// Serialized form of an initialization rule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "rule", rename_all = "lowercase")]
pub enum RuleSpec {
    Constant {
        value: f32,
    },
    Uniform {
        low: f32,
        high: f32,
    },
    Normal {
        mean: f32,
        std: f32,
    },
    Xavier {
        #[serde(default = "default_gain")]
        gain: f32,
    },
    Pretrained {
        checkpoint: PathBuf,
    },
}

fn default_gain() -> f32 {
    1.0
}

impl From<&RuleSpec> for InitRule {
    fn from(spec: &RuleSpec) -> Self {
        match spec {
            RuleSpec::Constant { value } => InitRule::Constant { value: *value },
            RuleSpec::Uniform { low, high } => InitRule::Uniform {
                low: *low,
                high: *high,
            },
            RuleSpec::Normal { mean, std } => InitRule::Normal {
                mean: *mean,
                std: *std,
            },
            RuleSpec::Xavier { gain } => InitRule::Xavier { gain: *gain },
            RuleSpec::Pretrained { checkpoint } => InitRule::Pretrained {
                checkpoint: checkpoint.clone(),
            },
        }
    }
}
