//! One-hot encoding against the frozen vocabulary
//!
//! Indicator position comes from the catalog's vocabulary order; a value
//! outside the vocabulary is a hard error naming the field and value,
//! never a silently zeroed block.

use crate::catalog::CategoryCatalog;
use crate::errors::PredictError;
use crate::transform::TransformParameters;

/// Encoder over the frozen catalog and transform parameters.
pub struct CategoricalEncoder<'a> {
    catalog: &'a CategoryCatalog,
    params: &'a TransformParameters,
}

impl<'a> CategoricalEncoder<'a> {
    pub fn new(catalog: &'a CategoryCatalog, params: &'a TransformParameters) -> Self {
        Self { catalog, params }
    }

    /// Encode one field's value as its indicator sub-vector.
    ///
    /// Block width is `|vocabulary|`, or `|vocabulary| - 1` when the
    /// artifact froze a dropped reference category; in that case the
    /// reference (first) value encodes as all zeros.
    pub fn encode(&self, field: &str, value: &str) -> Result<Vec<f64>, PredictError> {
        let position = self
            .catalog
            .index_of(field, value)
            .ok_or_else(|| PredictError::unknown_category(field, value))?;

        let field_params = self.params.categorical_field(field).ok_or_else(|| {
            PredictError::InternalInconsistency(format!(
                "field {field:?} is in the catalog but not the transform artifact"
            ))
        })?;

        let mut block = vec![0.0; field_params.encoded_width()];
        if field_params.drop_first {
            if position > 0 {
                block[position - 1] = 1.0;
            }
        } else {
            block[position] = 1.0;
        }
        Ok(block)
    }
}
