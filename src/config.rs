use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How a field's presence across records is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresenceMode {
    /// The key must literally appear in every record
    #[default]
    Strict,
    /// An absent key counts as an explicit null
    Lenient,
}

/// Rule deciding whether a common field's values are clean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcceptanceMode {
    /// All values numeric, or all values coded strings
    #[default]
    FieldLevelOr,
    /// Every value is numeric or a coded string on its own
    ValueLevelOr,
    /// Every value is a non-null scalar
    FlatNonNull,
    /// Nulls are ignored, the remaining values must be scalars
    FlatNullTolerant,
}

/// What the loader does with array elements that are not objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoaderMode {
    #[default]
    #[value(name = "drop")]
    #[serde(rename = "drop")]
    DropNonObjects,
    #[value(name = "reject")]
    #[serde(rename = "reject")]
    RejectNonObjects,
}

/// Configuration for the cleaning (projection) pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    pub presence: PresenceMode,
    pub acceptance: AcceptanceMode,
    pub loader: LoaderMode,

    /// Maximum nesting depth accepted by the loader
    pub max_depth: usize,
}

impl Default for CleanConfig {
    fn default() -> Self {
        CleanConfig {
            presence: PresenceMode::Strict,
            acceptance: AcceptanceMode::FieldLevelOr,
            loader: LoaderMode::DropNonObjects,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Configuration for the aggregation pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateConfig {
    /// Maximum nesting depth accepted before walking a document
    pub max_depth: usize,

    /// Separator placed between path segments
    pub separator: String,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        AggregateConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            separator: String::from("."),
        }
    }
}

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CleanConfig::default();
        assert_eq!(config.presence, PresenceMode::Strict);
        assert_eq!(config.acceptance, AcceptanceMode::FieldLevelOr);
        assert_eq!(config.loader, LoaderMode::DropNonObjects);
        assert_eq!(AggregateConfig::default().separator, ".");
    }

    #[test]
    fn test_partial_config_from_json() {
        let config: CleanConfig =
            serde_json::from_str(r#"{"acceptance": "value-level-or", "loader": "reject"}"#).unwrap();
        assert_eq!(config.acceptance, AcceptanceMode::ValueLevelOr);
        assert_eq!(config.loader, LoaderMode::RejectNonObjects);
        assert_eq!(config.presence, PresenceMode::Strict);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_value_enum_names() {
        let mode = AcceptanceMode::from_str("flat-null-tolerant", false).unwrap();
        assert_eq!(mode, AcceptanceMode::FlatNullTolerant);
        let loader = LoaderMode::from_str("reject", false).unwrap();
        assert_eq!(loader, LoaderMode::RejectNonObjects);
    }
}
