//! Tree traversal: the initialization engine
//!
//! One top-level call owns one [`TrackingCtx`] for its whole duration. The
//! traversal is single-threaded, depth-first, and applies each node's spec
//! exactly once: standard rules, then children in declaration order, then
//! override rules, so pretrained weights win over structural defaults at
//! every nesting level.

use super::context::TrackingCtx;
use super::report::ProvenanceReport;
use super::{dispatch, InitRule};
use crate::module::ModuleNode;
use crate::Result;
use std::io::Write;
use tracing::{debug, warn};

/// Initialize the tree rooted at `root` and return the provenance report.
///
/// Calling this on an already-initialized tree is legal: it warns, applies no
/// rules to initialized nodes, and initializes only children attached since
/// the previous pass. Any dispatch failure aborts the whole call; the
/// `initialized` flags then reflect exactly the nodes that completed, and the
/// caller should rebuild the tree rather than assume a usable partial state.
///
/// # Example
///
/// ```
/// use semilla::init::{init_tree, InitRule};
/// use semilla::module::{ModuleNode, Param};
///
/// let mut model = ModuleNode::new("model")
///     .with_param(Param::zeros("weight", &[4, 4]))
///     .with_init(vec![InitRule::Constant { value: 0.1 }]);
///
/// let report = init_tree(&mut model).unwrap();
/// assert!(model.is_initialized());
/// assert_eq!(report.len(), 1);
/// ```
pub fn init_tree(root: &mut ModuleNode) -> Result<ProvenanceReport> {
    init_tree_with(root, None)
}

/// Like [`init_tree`], with an optional file-like sink for the provenance
/// dump. With a sink attached the report is written there; otherwise it goes
/// to the logging channel at info level.
pub fn init_tree_with(
    root: &mut ModuleNode,
    sink: Option<&mut dyn Write>,
) -> Result<ProvenanceReport> {
    // Top-level entry: the one place the tracking map is created. Recursive
    // calls below receive it by reference and can never allocate a second
    // one. The map dies with this scope on every exit path.
    let mut ctx = TrackingCtx::install(root)?;

    init_node(root, &mut ctx)?;

    let report = ProvenanceReport::from_ctx(&ctx);
    match sink {
        Some(sink) => report.dump(sink)?,
        None => report.log(),
    }
    Ok(report)
}

fn init_node(node: &mut ModuleNode, ctx: &mut TrackingCtx) -> Result<()> {
    if node.is_initialized() {
        // Only an explicit external call lands here: recursion below never
        // descends into initialized children. The node's own rules are not
        // re-applied, but children attached since the first pass still get
        // their own pass.
        warn!("{} init_tree() called multiple times.", node.name());
        return init_children(node, ctx);
    }

    if !node.init_spec().is_empty() {
        debug!(node = node.name(), rules = node.init_spec().len(), "applying init spec");
    }

    let (standard, overrides): (Vec<InitRule>, Vec<InitRule>) = node
        .init_spec()
        .iter()
        .cloned()
        .partition(|rule| !rule.is_override());

    for rule in &standard {
        let info = dispatch::apply(rule, node)?;
        ctx.update_subtree(node, &info);
    }

    init_children(node, ctx)?;

    // Overrides run after every descendant has finished, so a checkpoint
    // load supersedes whatever the subtree's own specs produced.
    for rule in &overrides {
        let info = dispatch::apply(rule, node)?;
        ctx.update_subtree(node, &info);
    }

    node.set_initialized();
    Ok(())
}

fn init_children(node: &mut ModuleNode, ctx: &mut TrackingCtx) -> Result<()> {
    for child in node.children_mut() {
        if child.is_initialized() {
            continue;
        }
        init_node(child, ctx)?;
        let info = format!("Initialized by the init_spec of `{}`", child.name());
        ctx.update_subtree(child, &info);
    }
    Ok(())
}
