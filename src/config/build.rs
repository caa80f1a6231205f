//! Building a module tree from a parsed specification

use super::schema::{HarnessSpec, NodeSpec};
use crate::module::{ModuleNode, Param};
use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Load and parse a YAML harness specification.
pub fn load_spec(path: impl AsRef<Path>) -> Result<HarnessSpec> {
    let text = fs::read_to_string(path.as_ref())?;
    serde_yaml::from_str(&text)
        .map_err(|e| Error::Config(format!("failed to parse configuration: {e}")))
}

/// Build the module tree a specification describes.
///
/// Every parameter gets a fresh identity and a zero-filled buffer; the init
/// rules decide the values.
pub fn build_tree(spec: &NodeSpec) -> ModuleNode {
    let mut node = ModuleNode::new(&spec.name)
        .with_init(spec.init.iter().map(Into::into).collect());
    for param in &spec.params {
        node = node.with_param(Param::zeros(&param.name, &param.shape));
    }
    for child in &spec.children {
        node = node.with_child(build_tree(child));
    }
    node
}
