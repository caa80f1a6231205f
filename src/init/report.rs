//! Provenance reporting

use super::context::TrackingCtx;
use std::io::Write;
use tracing::info;

/// One record per parameter: hierarchical name, shape, final description.
#[derive(Debug, Clone)]
pub struct ProvenanceRecord {
    pub name: String,
    pub shape: Vec<usize>,
    pub init_info: String,
}

/// The finalized provenance of one top-level initialization call, in
/// tree-traversal order.
#[derive(Debug, Clone)]
pub struct ProvenanceReport {
    pub records: Vec<ProvenanceRecord>,
}

impl ProvenanceReport {
    pub(crate) fn from_ctx(ctx: &TrackingCtx) -> Self {
        let records = ctx
            .iter_ordered()
            .map(|entry| ProvenanceRecord {
                name: entry.name.clone(),
                shape: entry.shape.clone(),
                init_info: entry.init_info.clone(),
            })
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by hierarchical name.
    pub fn get(&self, name: &str) -> Option<&ProvenanceRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Write the report to a file-like sink, one block per parameter.
    pub fn dump(&self, sink: &mut dyn Write) -> std::io::Result<()> {
        writeln!(sink, "Name of parameter - Initialization information")?;
        for record in &self.records {
            write!(
                sink,
                "\n{} - {:?}:\n{}\n",
                record.name, record.shape, record.init_info
            )?;
        }
        sink.flush()
    }

    /// Emit the report through the logging channel at info level.
    pub fn log(&self) {
        for record in &self.records {
            info!(
                "\n{} - {:?}:\n{}\n",
                record.name, record.shape, record.init_info
            );
        }
    }
}
