//! The closed catalog of content-control aliases and the field mapping
//! extracted from a source document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A logical field of the pitch deck, bound to one content-control alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Theme,
    ProblemStatement,
    Solution,
    BusinessModel,
    TargetAudienceAndMarketSize,
    Closing,
    BenchmarkAndCompetitors,
}

impl Field {
    /// Every field, in catalog order.
    pub const ALL: [Field; 7] = [
        Field::Theme,
        Field::ProblemStatement,
        Field::Solution,
        Field::BusinessModel,
        Field::TargetAudienceAndMarketSize,
        Field::Closing,
        Field::BenchmarkAndCompetitors,
    ];

    /// The content-control alias (`w:alias/@w:val`) this field is read from.
    pub const fn alias(self) -> &'static str {
        match self {
            Field::Theme => "TemaDaApresentacao",
            Field::ProblemStatement => "ApresentacaoDoProblema",
            Field::Solution => "Solucao",
            Field::BusinessModel => "ModeloDeNegocio",
            Field::TargetAudienceAndMarketSize => "PublicoAlvoETamanhoDoMercado",
            Field::Closing => "Encerramento",
            Field::BenchmarkAndCompetitors => "BenchmarkEConcorrentes",
        }
    }

    /// Look up the field bound to an alias. Matching is exact and case-sensitive.
    pub fn from_alias(alias: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.alias() == alias)
    }

    /// Stable snake_case key, as used in serialized output.
    pub const fn key(self) -> &'static str {
        match self {
            Field::Theme => "theme",
            Field::ProblemStatement => "problem_statement",
            Field::Solution => "solution",
            Field::BusinessModel => "business_model",
            Field::TargetAudienceAndMarketSize => "target_audience_and_market_size",
            Field::Closing => "closing",
            Field::BenchmarkAndCompetitors => "benchmark_and_competitors",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Text extracted for every field of the catalog.
///
/// Every [`Field`] is always present; fields whose alias was not found in the
/// document map to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldMapping {
    values: BTreeMap<Field, String>,
}

impl FieldMapping {
    /// Create a mapping with every field set to an empty string.
    pub fn new() -> Self {
        Self {
            values: Field::ALL
                .into_iter()
                .map(|field| (field, String::new()))
                .collect(),
        }
    }

    /// Text for a field (empty if the document did not provide it).
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Store the text for a field, replacing any earlier value.
    pub fn insert(&mut self, field: Field, text: impl Into<String>) {
        self.values.insert(field, text.into());
    }

    /// Iterate over all fields and their text, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(field, text)| (*field, text.as_str()))
    }

    /// Number of fields with non-empty text.
    pub fn filled_count(&self) -> usize {
        self.values.values().filter(|text| !text.is_empty()).count()
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(Field, String)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (field, text) in iter {
            mapping.insert(field, text);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_lookup_covers_catalog() {
        for field in Field::ALL {
            assert_eq!(Field::from_alias(field.alias()), Some(field));
        }
        assert_eq!(Field::from_alias("temadaapresentacao"), None);
        assert_eq!(Field::from_alias(""), None);
    }

    #[test]
    fn test_new_mapping_has_every_field_empty() {
        let mapping = FieldMapping::new();
        assert_eq!(mapping.iter().count(), Field::ALL.len());
        assert!(mapping.iter().all(|(_, text)| text.is_empty()));
        assert_eq!(mapping.filled_count(), 0);
    }

    #[test]
    fn test_insert_replaces_value() {
        let mut mapping = FieldMapping::new();
        mapping.insert(Field::Solution, "first");
        mapping.insert(Field::Solution, "second");
        assert_eq!(mapping.get(Field::Solution), "second");
        assert_eq!(mapping.filled_count(), 1);
    }

    #[test]
    fn test_iter_is_catalog_order() {
        let mapping = FieldMapping::new();
        let fields: Vec<Field> = mapping.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, Field::ALL.to_vec());
    }

    #[test]
    fn test_serializes_with_snake_case_keys() {
        let mut mapping = FieldMapping::new();
        mapping.insert(Field::Theme, "Minha Ideia");

        let json = serde_json::to_value(&mapping).unwrap();
        assert_eq!(json["theme"], "Minha Ideia");
        assert_eq!(json["target_audience_and_market_size"], "");
    }
}
