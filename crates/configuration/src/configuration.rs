//! Configuration for the provider.

use std::collections::BTreeMap;

use query_engine_metadata::metadata;
use query_engine_models::EntityName;
use query_engine_sql::sql;
use schemars::schema::RootSchema;

use crate::error::MakeRuntimeConfigurationError;
use crate::version1::{ParsedConfiguration, SelectItem};

/// The 'Configuration' type collects all the information necessary to execute queries at runtime.
///
/// 'ParsedConfiguration' is the on-disk format. Values of this type are produced from a
/// 'ParsedConfiguration' using 'make_runtime_configuration', which checks it and builds the
/// baseline statement every query is translated from.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub metadata: metadata::Metadata,
    pub root_entity: EntityName,
    pub baseline: sql::ast::Select,
    pub count_override: Option<String>,
    pub parameters: BTreeMap<String, serde_json::Value>,
}

impl Configuration {
    /// A configuration reading `root_entity` rows with the `baseline` statement.
    pub fn new(
        metadata: metadata::Metadata,
        root_entity: impl Into<EntityName>,
        baseline: sql::ast::Select,
    ) -> Self {
        Configuration {
            metadata,
            root_entity: root_entity.into(),
            baseline,
            count_override: None,
            parameters: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_count_override(mut self, count_sql: impl Into<String>) -> Self {
        self.count_override = Some(count_sql.into());
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }
}

/// The JSON schema of the configuration file.
pub fn get_configuration_schema() -> RootSchema {
    schemars::schema_for!(ParsedConfiguration)
}

/// Check a parsed configuration and build the baseline statement it describes.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let ParsedConfiguration {
        version: _,
        root_entity,
        metadata,
        baseline,
        count_override,
        parameters,
    } = parsed_config;

    if metadata.lookup_entity(&root_entity).is_none() {
        return Err(MakeRuntimeConfigurationError::UnknownRootEntity(root_entity));
    }

    let mut select = sql::helpers::empty_select();
    select.set_distinct(baseline.distinct);

    for item in baseline.select {
        match item {
            SelectItem::Expression(expression) => {
                select.add_select(expression);
            }
            SelectItem::Entity { table, entity } => {
                let entity_info = metadata
                    .lookup_entity(&entity)
                    .ok_or_else(|| MakeRuntimeConfigurationError::UnknownEntity(entity.clone()))?;
                select.add_select_for_entity(&table, entity_info);
            }
        }
    }
    for from in baseline.from {
        select.add_from(from);
    }
    for join in baseline.joins {
        select.add_join(join.keyword, join.table, join.on)?;
    }
    for clause in baseline.where_ {
        let operator: sql::ast::BooleanOperator = clause.combine.parse()?;
        select.add_where(clause.constraint, operator)?;
    }
    for order_by in baseline.order_by {
        let direction = match order_by.direction {
            query_engine_models::OrderDirection::Ascending => sql::ast::OrderByDirection::Asc,
            query_engine_models::OrderDirection::Descending => sql::ast::OrderByDirection::Desc,
        };
        select.add_order_by(order_by.expression, direction);
    }

    Ok(Configuration {
        metadata,
        root_entity,
        baseline: select,
        count_override,
        parameters,
    })
}
