//! JSON checkpoint format

use crate::module::ModuleNode;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// One stored parameter: logical shape plus flattened data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckpointEntry {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

/// A set of named parameter buffers, keyed by hierarchical name.
///
/// Keys are relative to the node a `Pretrained` rule is declared on, so a
/// checkpoint exported from a subtree loads back onto that subtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Checkpoint {
    entries: BTreeMap<String, CheckpointEntry>,
}

impl Checkpoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot every parameter of `root`'s subtree under its hierarchical
    /// name.
    pub fn from_tree(root: &ModuleNode) -> Self {
        let mut entries = BTreeMap::new();
        root.visit_params(|name, param| {
            entries.insert(
                name.to_string(),
                CheckpointEntry {
                    shape: param.shape().to_vec(),
                    data: param.data().to_vec(),
                },
            );
        });
        Self { entries }
    }

    pub fn insert(&mut self, name: impl Into<String>, shape: Vec<usize>, data: Vec<f32>) {
        self.entries.insert(name.into(), CheckpointEntry { shape, data });
    }

    pub fn get(&self, name: &str) -> Option<&CheckpointEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Load a checkpoint from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::Serialization(format!("checkpoint parse failed: {e}")))
    }

    /// Write the checkpoint to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| Error::Serialization(format!("checkpoint write failed: {e}")))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Param;

    fn tree() -> ModuleNode {
        ModuleNode::new("model")
            .with_param(Param::from_vec("embed", &[2, 2], vec![1.0, 2.0, 3.0, 4.0]))
            .with_child(
                ModuleNode::new("head").with_param(Param::from_vec("bias", &[2], vec![0.5, 0.5])),
            )
    }

    #[test]
    fn test_from_tree_uses_hierarchical_names() {
        let ckpt = Checkpoint::from_tree(&tree());
        assert_eq!(ckpt.len(), 2);
        assert!(ckpt.get("embed").is_some());
        assert!(ckpt.get("head.bias").is_some());
        assert_eq!(ckpt.get("embed").unwrap().shape, vec![2, 2]);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ckpt.json");

        let ckpt = Checkpoint::from_tree(&tree());
        ckpt.save(&path).unwrap();
        let loaded = Checkpoint::load(&path).unwrap();

        assert_eq!(ckpt, loaded);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        assert!(matches!(
            Checkpoint::load("/no/such/checkpoint.json"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_load_malformed_json_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Checkpoint::load(&path),
            Err(Error::Serialization(_))
        ));
    }
}
