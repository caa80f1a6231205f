//! Call-scoped provenance tracking
//!
//! One [`TrackingCtx`] exists per top-level [`crate::init::init_tree`] call.
//! It is created at entry, threaded by `&mut` through the recursion, and
//! dropped on every exit path, so no tracking state can outlive the call or
//! leak into a later one.

use crate::module::{ModuleNode, ParamId};
use crate::{Error, Result};
use std::collections::HashMap;

/// Per-parameter provenance during one top-level initialization call.
#[derive(Debug, Clone)]
pub struct ProvenanceEntry {
    /// Full hierarchical name, for reporting only.
    pub name: String,
    /// Logical shape descriptor.
    pub shape: Vec<usize>,
    /// How (or whether) the value was produced.
    pub init_info: String,
    /// Last observed mean; decides whether a dispatch changed the value.
    snapshot_mean: f32,
}

/// The tracking map of one top-level call, keyed by parameter identity.
#[derive(Debug)]
pub struct TrackingCtx {
    entries: HashMap<ParamId, ProvenanceEntry>,
    /// Installation order, so the report is deterministic.
    order: Vec<ParamId>,
}

impl TrackingCtx {
    /// Walk the whole tree once and create one entry per parameter with the
    /// default description and a pre-initialization mean snapshot.
    ///
    /// Seeing a `ParamId` twice means the same physical parameter is
    /// reachable through two paths (a cloned node inserted alongside its
    /// original); installation fails fast rather than double-track it.
    pub fn install(root: &ModuleNode) -> Result<Self> {
        let default_info = format!(
            "The value is unchanged by the initialization of `{}`",
            root.name()
        );
        let mut entries = HashMap::new();
        let mut order = Vec::new();
        let mut duplicate = None;
        root.visit_params(|name, param| {
            if duplicate.is_some() {
                return;
            }
            if entries.contains_key(&param.id()) {
                duplicate = Some(name.to_string());
                return;
            }
            entries.insert(
                param.id(),
                ProvenanceEntry {
                    name: name.to_string(),
                    shape: param.shape().to_vec(),
                    init_info: default_info.clone(),
                    snapshot_mean: param.mean(),
                },
            );
            order.push(param.id());
        });
        if let Some(name) = duplicate {
            return Err(Error::Reentrancy { name });
        }
        Ok(Self { entries, order })
    }

    /// Refresh provenance over `node`'s subtree: every entry whose mean moved
    /// since its last snapshot takes `info` and a new snapshot; untouched
    /// entries keep their previous description.
    pub fn update_subtree(&mut self, node: &ModuleNode, info: &str) {
        node.visit_params(|_, param| {
            if let Some(entry) = self.entries.get_mut(&param.id()) {
                let mean = param.mean();
                if (mean - entry.snapshot_mean).abs() > f32::EPSILON {
                    entry.init_info = info.to_string();
                    entry.snapshot_mean = mean;
                }
            }
        });
    }

    pub fn get(&self, id: ParamId) -> Option<&ProvenanceEntry> {
        self.entries.get(&id)
    }

    /// Entries in installation order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = &ProvenanceEntry> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Param;

    fn tree() -> ModuleNode {
        ModuleNode::new("root")
            .with_param(Param::zeros("w", &[2]))
            .with_child(ModuleNode::new("c").with_param(Param::zeros("w", &[2])))
    }

    #[test]
    fn test_install_snapshots_every_param() {
        let root = tree();
        let ctx = TrackingCtx::install(&root).unwrap();
        assert_eq!(ctx.len(), 2);
        let names: Vec<_> = ctx.iter_ordered().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["w", "c.w"]);
        assert!(ctx
            .iter_ordered()
            .all(|e| e.init_info.contains("unchanged") && e.init_info.contains("root")));
    }

    #[test]
    fn test_install_rejects_shared_params() {
        let shared = ModuleNode::new("shared").with_param(Param::zeros("w", &[2]));
        let root = ModuleNode::new("root")
            .with_child(shared.clone())
            .with_child(shared);
        assert!(matches!(
            TrackingCtx::install(&root),
            Err(Error::Reentrancy { .. })
        ));
    }

    #[test]
    fn test_update_subtree_only_touches_changed_params() {
        let mut root = tree();
        let mut ctx = TrackingCtx::install(&root).unwrap();

        // Change only the child's buffer.
        root.children_mut()[0].params_mut()[0].fill(1.0);
        ctx.update_subtree(&root, "changed");

        let infos: Vec<_> = ctx.iter_ordered().map(|e| e.init_info.clone()).collect();
        assert!(infos[0].contains("unchanged"));
        assert_eq!(infos[1], "changed");
    }

    #[test]
    fn test_update_refreshes_snapshot() {
        let mut root = tree();
        let mut ctx = TrackingCtx::install(&root).unwrap();

        root.params_mut()[0].fill(1.0);
        ctx.update_subtree(&root, "first");
        // Same value again: mean did not move, description must stay.
        ctx.update_subtree(&root, "second");

        let entry = ctx.get(root.params()[0].id()).unwrap();
        assert_eq!(entry.init_info, "first");
    }
}
