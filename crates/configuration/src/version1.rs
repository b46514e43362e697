//! The configuration file format, version 1.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use query_engine_metadata::metadata;
use query_engine_models::{EntityName, OrderDirection};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};

const CURRENT_VERSION: u32 = 1;
pub const CONFIGURATION_FILENAME: &str = "configuration.json";
const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";

/// The configuration as it is written on disk: the entity metadata, the statement every
/// query starts from, and the knobs of the provider.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct ParsedConfiguration {
    /// Which version of the configuration format are we using
    pub version: u32,
    /// The entity type the rows of the baseline statement are materialized as.
    pub root_entity: EntityName,
    #[serde(default)]
    pub metadata: metadata::Metadata,
    #[serde(default)]
    pub baseline: Baseline,
    /// SQL to run instead of the translated statement when counting rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_override: Option<String>,
    /// Named parameters passed along with every statement.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, serde_json::Value>,
}

/// The statement every query starts from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Baseline {
    #[serde(default = "default_distinct")]
    pub distinct: bool,
    #[serde(default)]
    pub select: Vec<SelectItem>,
    #[serde(default)]
    pub from: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joins: Vec<JoinClause>,
    #[serde(default, rename = "where", skip_serializing_if = "Vec::is_empty")]
    pub where_: Vec<WhereClause>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderByClause>,
}

fn default_distinct() -> bool {
    true
}

impl Default for Baseline {
    fn default() -> Self {
        Baseline {
            distinct: default_distinct(),
            select: vec![],
            from: vec![],
            joins: vec![],
            where_: vec![],
            order_by: vec![],
        }
    }
}

/// An entry of the select list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum SelectItem {
    /// A literal select expression.
    Expression(String),
    /// Every column-mapped property of an entity, read from a table.
    Entity { table: String, entity: EntityName },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct JoinClause {
    /// e.g. `LEFT JOIN`
    pub keyword: String,
    pub table: String,
    pub on: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct WhereClause {
    pub constraint: String,
    /// How the constraint is combined with the ones before it: `AND` or `OR`.
    #[serde(default = "default_combine")]
    pub combine: String,
}

fn default_combine() -> String {
    "AND".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct OrderByClause {
    pub expression: String,
    #[serde(default)]
    pub direction: OrderDirection,
}

impl ParsedConfiguration {
    pub fn empty(root_entity: EntityName) -> Self {
        ParsedConfiguration {
            version: CURRENT_VERSION,
            root_entity,
            metadata: metadata::Metadata::empty(),
            baseline: Baseline::default(),
            count_override: None,
            parameters: BTreeMap::new(),
        }
    }
}

/// Parse the configuration format from a directory.
pub fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents = fs::read_to_string(&configuration_file).map_err(|err| {
        ParseConfigurationError::IoErrorButStringified(format!(
            "{}: {}",
            &configuration_file.display(),
            err
        ))
    })?;

    let parsed_config: ParsedConfiguration = serde_json::from_str(&configuration_file_contents)
        .map_err(|error| ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })?;

    if parsed_config.version != CURRENT_VERSION {
        return Err(ParseConfigurationError::UnsupportedVersion(
            parsed_config.version,
        ));
    }

    tracing::debug!(
        file = %configuration_file.display(),
        entities = parsed_config.metadata.entities.0.len(),
        "Parsed configuration"
    );

    Ok(parsed_config)
}

/// Write the parsed configuration into a directory on disk, along with its JSON schema.
pub fn write_parsed_configuration(
    parsed_config: &ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let configuration_file = out_dir.as_ref().join(CONFIGURATION_FILENAME);
    fs::create_dir_all(out_dir.as_ref())?;

    // create the configuration file
    fs::write(
        configuration_file,
        serde_json::to_string_pretty(parsed_config)? + "\n",
    )?;

    // create the jsonschema file
    let configuration_jsonschema_file_path = out_dir.as_ref().join(CONFIGURATION_JSONSCHEMA_FILENAME);

    let output = schemars::schema_for!(ParsedConfiguration);
    fs::write(
        configuration_jsonschema_file_path,
        serde_json::to_string_pretty(&output)? + "\n",
    )?;

    Ok(())
}
