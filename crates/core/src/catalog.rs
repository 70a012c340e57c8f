//! Frozen per-field category vocabularies
//!
//! The catalog is built once from the transform artifact and never
//! mutated: serving with a re-derived or partial vocabulary would
//! silently admit categories the model was never trained on.

use std::collections::HashMap;

/// Mapping from categorical field name to its frozen, ordered vocabulary.
///
/// Vocabulary order is the training-time order and drives one-hot
/// positions; it is not a display order.
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    /// Field names in the frozen artifact order
    fields: Vec<String>,
    /// Field name -> (position in vocabulary) lookup
    positions: HashMap<String, HashMap<String, usize>>,
    /// Field name -> ordered vocabulary
    vocabularies: HashMap<String, Vec<String>>,
}

impl CategoryCatalog {
    /// Build a catalog from frozen `(field, vocabulary)` pairs.
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        let mut fields = Vec::with_capacity(entries.len());
        let mut positions = HashMap::with_capacity(entries.len());
        let mut vocabularies = HashMap::with_capacity(entries.len());

        for (field, vocabulary) in entries {
            let index: HashMap<String, usize> = vocabulary
                .iter()
                .enumerate()
                .map(|(i, value)| (value.clone(), i))
                .collect();
            fields.push(field.clone());
            positions.insert(field.clone(), index);
            vocabularies.insert(field, vocabulary);
        }

        Self {
            fields,
            positions,
            vocabularies,
        }
    }

    /// Field names in frozen order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Ordered vocabulary for a field, if the field exists.
    pub fn lookup(&self, field: &str) -> Option<&[String]> {
        self.vocabularies.get(field).map(Vec::as_slice)
    }

    /// Whether `value` belongs to the frozen vocabulary of `field`.
    pub fn validate(&self, field: &str, value: &str) -> bool {
        self.index_of(field, value).is_some()
    }

    /// Position of `value` within the frozen vocabulary of `field`.
    /// The position determines which one-hot indicator is set.
    pub fn index_of(&self, field: &str, value: &str) -> Option<usize> {
        self.positions.get(field)?.get(value).copied()
    }

    /// Sorted copy of a field's vocabulary, for client choice lists.
    pub fn sorted_options(&self, field: &str) -> Vec<String> {
        let mut options = self
            .lookup(field)
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        options.sort();
        options
    }
}
