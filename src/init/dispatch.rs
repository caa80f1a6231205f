//! Rule dispatch: applying one rule to a node's parameters
//!
//! Dispatch interprets the rule kind; the engine only cares about the phase
//! tag. Each application returns the human-readable description recorded as
//! provenance for the parameters it changed.

use super::InitRule;
use crate::io::Checkpoint;
use crate::module::{ModuleNode, Param};
use crate::{Error, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Apply `rule` to `node` in place and return the provenance description.
///
/// Standard kinds fill the node's directly-owned parameters. `Pretrained`
/// overwrites subtree parameters whose relative hierarchical name appears in
/// the checkpoint; file entries with no matching parameter are ignored, a
/// shape mismatch fails the dispatch.
pub fn apply(rule: &InitRule, node: &mut ModuleNode) -> Result<String> {
    match rule {
        InitRule::Constant { value } => {
            for param in node.params_mut() {
                param.fill(*value);
            }
        }
        InitRule::Uniform { low, high } => {
            if low >= high {
                return Err(dispatch_error(rule, node, "low must be below high"));
            }
            let mut rng = rand::thread_rng();
            for param in node.params_mut() {
                for x in param.data_mut().iter_mut() {
                    *x = rng.gen_range(*low..*high);
                }
            }
        }
        InitRule::Normal { mean, std } => {
            if *std <= 0.0 {
                return Err(dispatch_error(rule, node, "std must be positive"));
            }
            let normal = Normal::new(*mean, *std)
                .map_err(|e| dispatch_error(rule, node, &e.to_string()))?;
            let mut rng = rand::thread_rng();
            for param in node.params_mut() {
                for x in param.data_mut().iter_mut() {
                    *x = normal.sample(&mut rng);
                }
            }
        }
        InitRule::Xavier { gain } => {
            if *gain <= 0.0 {
                return Err(dispatch_error(rule, node, "gain must be positive"));
            }
            let mut rng = rand::thread_rng();
            for param in node.params_mut() {
                let bound = gain * xavier_bound(param);
                for x in param.data_mut().iter_mut() {
                    *x = rng.gen_range(-bound..bound);
                }
            }
        }
        InitRule::Pretrained { checkpoint } => {
            let loaded = Checkpoint::load(checkpoint).map_err(|e| Error::Dispatch {
                rule: rule.to_string(),
                node: node.name().to_string(),
                reason: e.to_string(),
            })?;
            let mut failure = None;
            node.visit_params_mut(|name, param| {
                if failure.is_some() {
                    return;
                }
                if let Some(entry) = loaded.get(name) {
                    if let Err(e) = param.load(&entry.data) {
                        failure = Some(e);
                    }
                }
            });
            if let Some(e) = failure {
                return Err(Error::Dispatch {
                    rule: rule.to_string(),
                    node: node.name().to_string(),
                    reason: e.to_string(),
                });
            }
            return Ok(format!(
                "Loaded from checkpoint `{}` via rule `{rule}` on `{}`",
                checkpoint.display(),
                node.name()
            ));
        }
    }

    Ok(format!("Initialized by rule `{rule}` in `{}`", node.name()))
}

/// Glorot bound `sqrt(6 / (fan_in + fan_out))`.
///
/// Matrices take their two leading dims as fans; vectors and scalars fall
/// back to the element count for both.
fn xavier_bound(param: &Param) -> f32 {
    let shape = param.shape();
    let (fan_in, fan_out) = if shape.len() >= 2 {
        (shape[1], shape[0])
    } else {
        (param.numel().max(1), param.numel().max(1))
    };
    (6.0 / (fan_in + fan_out) as f32).sqrt()
}

fn dispatch_error(rule: &InitRule, node: &ModuleNode, reason: &str) -> Error {
    Error::Dispatch {
        rule: rule.to_string(),
        node: node.name().to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Param;

    fn node_with_param(shape: &[usize]) -> ModuleNode {
        ModuleNode::new("n").with_param(Param::zeros("w", shape))
    }

    #[test]
    fn test_constant_fills_own_params_only() {
        let mut node = node_with_param(&[4])
            .with_child(ModuleNode::new("c").with_param(Param::zeros("w", &[4])));
        apply(&InitRule::Constant { value: 2.0 }, &mut node).unwrap();
        assert!(node.params()[0].data().iter().all(|&x| x == 2.0));
        assert!(node.children()[0].params()[0].data().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_uniform_respects_bounds() {
        let mut node = node_with_param(&[256]);
        apply(&InitRule::Uniform { low: -0.5, high: 0.5 }, &mut node).unwrap();
        assert!(node.params()[0]
            .data()
            .iter()
            .all(|&x| (-0.5..0.5).contains(&x)));
    }

    #[test]
    fn test_uniform_rejects_inverted_bounds() {
        let mut node = node_with_param(&[4]);
        let err = apply(&InitRule::Uniform { low: 1.0, high: 0.0 }, &mut node).unwrap_err();
        assert!(matches!(err, Error::Dispatch { .. }));
    }

    #[test]
    fn test_normal_produces_finite_values() {
        let mut node = node_with_param(&[256]);
        apply(&InitRule::Normal { mean: 0.0, std: 0.02 }, &mut node).unwrap();
        let data = node.params()[0].data();
        assert!(data.iter().all(|x| x.is_finite()));
        assert!(data.iter().any(|&x| x != 0.0));
    }

    #[test]
    fn test_normal_rejects_nonpositive_std() {
        let mut node = node_with_param(&[4]);
        let err = apply(&InitRule::Normal { mean: 0.0, std: 0.0 }, &mut node).unwrap_err();
        assert!(matches!(err, Error::Dispatch { .. }));
    }

    #[test]
    fn test_xavier_bound_matrix() {
        let mut node = ModuleNode::new("n").with_param(Param::zeros("w", &[2, 4]));
        apply(&InitRule::Xavier { gain: 1.0 }, &mut node).unwrap();
        let bound = (6.0f32 / 6.0).sqrt();
        assert!(node.params()[0].data().iter().all(|&x| x.abs() <= bound));
    }

    #[test]
    fn test_description_names_rule_and_node() {
        let mut node = node_with_param(&[2]);
        let desc = apply(&InitRule::Constant { value: 1.0 }, &mut node).unwrap();
        assert!(desc.contains("Constant(1)"));
        assert!(desc.contains("in `n`"));
    }

    #[test]
    fn test_pretrained_missing_file_is_dispatch_error() {
        let mut node = node_with_param(&[2]);
        let rule = InitRule::Pretrained {
            checkpoint: "/definitely/not/here.json".into(),
        };
        assert!(matches!(
            apply(&rule, &mut node),
            Err(Error::Dispatch { .. })
        ));
    }
}
