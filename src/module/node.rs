//! Component node: the unit of the initialization tree

use super::Param;
use crate::init::InitRule;

/// A composable unit owning named leaf parameters, child nodes, and a
/// declarative initialization spec.
///
/// A node is a passive data holder from the engine's perspective: it exposes
/// its spec, its `initialized` flag, and enumeration of children and
/// directly-owned parameters. Children are owned by value, so a tree cannot
/// share nodes without cloning them (which the engine rejects, since a cloned
/// parameter keeps its identity).
///
/// # Example
///
/// ```
/// use semilla::module::{ModuleNode, Param};
/// use semilla::init::InitRule;
///
/// let head = ModuleNode::new("head")
///     .with_param(Param::zeros("weight", &[8]))
///     .with_init(vec![InitRule::Constant { value: 0.0 }]);
///
/// let model = ModuleNode::new("model")
///     .with_param(Param::zeros("embed", &[4, 8]))
///     .with_child(head);
///
/// assert_eq!(model.children().len(), 1);
/// assert!(!model.is_initialized());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModuleNode {
    name: String,
    init_spec: Vec<InitRule>,
    initialized: bool,
    params: Vec<Param>,
    children: Vec<ModuleNode>,
}

impl ModuleNode {
    /// Create an empty node with no spec, parameters, or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the initialization spec (declaration order is application order).
    pub fn with_init(mut self, init_spec: Vec<InitRule>) -> Self {
        self.init_spec = init_spec;
        self
    }

    /// Append a directly-owned parameter.
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: ModuleNode) -> Self {
        self.children.push(child);
        self
    }

    /// Attach a child after construction (e.g. growing a tree between
    /// initialization passes).
    pub fn add_child(&mut self, child: ModuleNode) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn init_spec(&self) -> &[InitRule] {
        &self.init_spec
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Mark the node initialized. The flag never goes back to false.
    pub fn set_initialized(&mut self) {
        self.initialized = true;
    }

    pub fn children(&self) -> &[ModuleNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [ModuleNode] {
        &mut self.children
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut [Param] {
        &mut self.params
    }

    /// Number of parameters in the whole subtree.
    pub fn num_params(&self) -> usize {
        self.params.len() + self.children.iter().map(ModuleNode::num_params).sum::<usize>()
    }

    /// Number of nodes in the whole subtree, this node included.
    pub fn num_nodes(&self) -> usize {
        1 + self.children.iter().map(ModuleNode::num_nodes).sum::<usize>()
    }

    /// Depth-first walk over the subtree's parameters with dot-separated
    /// hierarchical names relative to this node (`"head.weight"`); this
    /// node's own parameters carry their short name.
    pub fn visit_params<'a>(&'a self, mut f: impl FnMut(&str, &'a Param)) {
        self.visit_params_inner("", &mut f);
    }

    fn visit_params_inner<'a>(&'a self, prefix: &str, f: &mut impl FnMut(&str, &'a Param)) {
        for param in &self.params {
            f(&join_name(prefix, param.name()), param);
        }
        for child in &self.children {
            child.visit_params_inner(&join_name(prefix, child.name()), f);
        }
    }

    /// Mutable variant of [`visit_params`](Self::visit_params).
    pub fn visit_params_mut(&mut self, mut f: impl FnMut(&str, &mut Param)) {
        self.visit_params_mut_inner("", &mut f);
    }

    fn visit_params_mut_inner(&mut self, prefix: &str, f: &mut impl FnMut(&str, &mut Param)) {
        for param in &mut self.params {
            let name = join_name(prefix, param.name());
            f(&name, param);
        }
        for child in &mut self.children {
            let child_prefix = join_name(prefix, child.name());
            child.visit_params_mut_inner(&child_prefix, f);
        }
    }
}

fn join_name(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
