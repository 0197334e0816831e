//! Materialized export rows

use super::field::Field;
use serde::Serialize;

/// One exported record joined back onto its field definitions.
///
/// Holds only the fields present in the exported row, each carrying its
/// value. Names from the row that matched no known field are kept in
/// `unmatched` rather than silently discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    pub fields: Vec<Field>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmatched: Vec<String>,
}

impl Record {
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Value of the named field, if the field was exported
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|f| f.value.as_deref())
    }

    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
