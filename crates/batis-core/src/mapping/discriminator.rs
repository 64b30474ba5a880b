use super::ResultMapping;
use indexmap::IndexMap;

/// Column-driven switch between result maps.
#[derive(Debug, Clone, PartialEq)]
pub struct Discriminator {
    /// The column read to pick a case, with its type information
    pub result_mapping: ResultMapping,

    /// Column value to fully qualified result map id
    pub discriminator_map: IndexMap<String, String>,
}

impl Discriminator {
    /// Result map id selected by a column value.
    pub fn map_id_for(&self, value: &str) -> Option<&str> {
        self.discriminator_map.get(value).map(String::as_str)
    }

    pub fn result_map_ids(&self) -> impl Iterator<Item = &str> {
        self.discriminator_map.values().map(String::as_str)
    }
}
