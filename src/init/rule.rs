//! Declarative initialization rules

use std::path::PathBuf;

/// Application phase of a rule.
///
/// `Standard` rules run before a node's children are initialized; `Override`
/// rules run after, so they can overwrite whatever defaults or child specs
/// produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulePhase {
    Standard,
    Override,
}

/// A declarative instruction to set parameter values.
///
/// The variant decides the phase; the engine looks only at the phase for
/// ordering, the dispatcher interprets everything else. Standard kinds target
/// the declaring node's own parameters; `Pretrained` targets the subtree by
/// relative hierarchical name, touching only names present in the checkpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum InitRule {
    /// Fill every element with a constant.
    Constant { value: f32 },
    /// Sample each element from `U[low, high)`.
    Uniform { low: f32, high: f32 },
    /// Sample each element from `N(mean, std)`.
    Normal { mean: f32, std: f32 },
    /// Xavier/Glorot uniform: bound derived from fan-in and fan-out.
    Xavier { gain: f32 },
    /// Load matching entries from a checkpoint file. Override phase.
    Pretrained { checkpoint: PathBuf },
}

impl InitRule {
    pub fn phase(&self) -> RulePhase {
        match self {
            InitRule::Pretrained { .. } => RulePhase::Override,
            _ => RulePhase::Standard,
        }
    }

    pub fn is_override(&self) -> bool {
        self.phase() == RulePhase::Override
    }
}

impl std::fmt::Display for InitRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitRule::Constant { value } => write!(f, "Constant({value})"),
            InitRule::Uniform { low, high } => write!(f, "Uniform({low}, {high})"),
            InitRule::Normal { mean, std } => write!(f, "Normal({mean}, {std})"),
            InitRule::Xavier { gain } => write!(f, "Xavier({gain})"),
            InitRule::Pretrained { checkpoint } => {
                write!(f, "Pretrained({})", checkpoint.display())
            }
        }
    }
}
