//! Feature vector assembly
//!
//! Concatenates conditioned numeric values and one-hot blocks in the
//! frozen column order, then applies the frozen selection mask. A width
//! or lookup failure here means the loaded artifacts disagree with the
//! pipeline and is an internal invariant violation, not user error.

use crate::errors::PredictError;
use crate::transform::TransformParameters;
use std::collections::HashMap;

/// Assembler over the frozen transform parameters.
pub struct FeatureAssembler<'a> {
    params: &'a TransformParameters,
}

impl<'a> FeatureAssembler<'a> {
    pub fn new(params: &'a TransformParameters) -> Self {
        Self { params }
    }

    /// Concatenate blocks in `column_order` and apply the selection mask.
    ///
    /// `numeric` holds conditioned scalar features by name; `categorical`
    /// holds encoded one-hot blocks by field name.
    pub fn assemble(
        &self,
        numeric: &HashMap<&str, f64>,
        categorical: &HashMap<&str, Vec<f64>>,
    ) -> Result<Vec<f64>, PredictError> {
        let mut vector = Vec::with_capacity(self.params.pre_mask_width());

        for name in &self.params.column_order {
            if let Some(block) = categorical.get(name.as_str()) {
                vector.extend_from_slice(block);
            } else if let Some(&value) = numeric.get(name.as_str()) {
                vector.push(value);
            } else {
                return Err(PredictError::InternalInconsistency(format!(
                    "no feature block produced for column {name:?}"
                )));
            }
        }

        if vector.len() != self.params.pre_mask_width() {
            return Err(PredictError::InternalInconsistency(format!(
                "assembled {} columns, transform artifact declares {}",
                vector.len(),
                self.params.pre_mask_width()
            )));
        }

        match &self.params.selection_mask {
            None => Ok(vector),
            Some(mask) => mask
                .iter()
                .map(|&position| {
                    vector.get(position).copied().ok_or_else(|| {
                        PredictError::InternalInconsistency(format!(
                            "selection mask position {position} exceeds assembled width {}",
                            vector.len()
                        ))
                    })
                })
                .collect(),
        }
    }
}
