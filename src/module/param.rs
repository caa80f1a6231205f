//! Leaf parameter with stable identity

use ndarray::Array1;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PARAM_ID: AtomicU64 = AtomicU64::new(0);

/// Stable identity of a physical parameter instance.
///
/// Allocated once at construction and preserved by `Clone`: a cloned `Param`
/// is the same identity, not a new parameter. Provenance tracking is keyed by
/// this id because short names are not unique across a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(u64);

impl ParamId {
    fn next() -> Self {
        ParamId(NEXT_PARAM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ParamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named leaf parameter: flattened `f32` buffer plus logical shape.
#[derive(Debug, Clone)]
pub struct Param {
    id: ParamId,
    name: String,
    shape: Vec<usize>,
    data: Array1<f32>,
}

impl Param {
    /// Create a zero-filled parameter with the given logical shape.
    pub fn zeros(name: impl Into<String>, shape: &[usize]) -> Self {
        let numel: usize = shape.iter().product();
        Self {
            id: ParamId::next(),
            name: name.into(),
            shape: shape.to_vec(),
            data: Array1::zeros(numel),
        }
    }

    /// Create a parameter from existing data; `data.len()` must equal the
    /// shape's element count.
    pub fn from_vec(name: impl Into<String>, shape: &[usize], data: Vec<f32>) -> Self {
        let numel: usize = shape.iter().product();
        assert_eq!(data.len(), numel, "data length must match shape");
        Self {
            id: ParamId::next(),
            name: name.into(),
            shape: shape.to_vec(),
            data: Array1::from(data),
        }
    }

    pub fn id(&self) -> ParamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of elements.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Get reference to the flattened buffer
    pub fn data(&self) -> &Array1<f32> {
        &self.data
    }

    /// Get mutable reference to the flattened buffer
    pub fn data_mut(&mut self) -> &mut Array1<f32> {
        &mut self.data
    }

    /// Mean of the buffer; the provenance snapshot statistic.
    pub fn mean(&self) -> f32 {
        if self.data.is_empty() {
            0.0
        } else {
            self.data.sum() / self.data.len() as f32
        }
    }

    /// Overwrite the buffer, checking the incoming length against the shape.
    pub fn load(&mut self, values: &[f32]) -> crate::Result<()> {
        if values.len() != self.numel() {
            return Err(crate::Error::ShapeMismatch {
                name: self.name.clone(),
                expected: self.shape.clone(),
                got: vec![values.len()],
            });
        }
        self.data = Array1::from(values.to_vec());
        Ok(())
    }

    /// Fill every element with a constant.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }
}
