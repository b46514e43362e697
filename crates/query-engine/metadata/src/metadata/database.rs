//! Metadata information regarding the database columns entity properties are mapped to.

use std::collections::BTreeMap;

use enum_iterator::Sequence;
use indexmap::IndexMap;
use query_engine_models::{EntityName, OrderDirection, PropertyName};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The semantic types a mapped column is converted to when materializing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Sequence, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Integer,
    Text,
    Date,
}

impl ScalarType {
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Integer => "integer",
            ScalarType::Text => "text",
            ScalarType::Date => "date",
        }
    }
}

/// Mapping from an entity name to its information.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct EntitiesInfo(pub BTreeMap<EntityName, EntityInfo>);

impl EntitiesInfo {
    pub fn empty() -> Self {
        EntitiesInfo(BTreeMap::new())
    }
}

/// The property mappings of an entity, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct EntityInfo {
    pub properties: IndexMap<PropertyName, PropertyInfo>,
}

/// How a single property is treated. A property is either mapped to a column
/// or fetched recursively from the same row, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyInfo {
    Column(FieldMapping),
    Recursive(RecursiveFetch),
}

/// A property mapped to a database column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldMapping {
    pub column_name: String,
    /// A name for the column that is unique among every table the entity may be joined
    /// with. Rows are read by this alias.
    pub unique_alias: String,
    pub r#type: ScalarType,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub primary_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by_modifier: Option<OrderByModifier>,
}

/// A property holding a nested entity built from the same row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecursiveFetch {
    /// The declared type of the property.
    pub declared_type: EntityName,
    /// The type to construct instead, e.g. a subtype of the declared one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<EntityName>,
}

/// Replaces the bare alias in an ORDER BY clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderByModifier {
    /// Wrap the alias in a function call, e.g. `LOWER(alias)`.
    Function { function: String },
    /// Substitute `{alias}` and `{direction}` in a template.
    Template { template: String },
}

impl EntityInfo {
    pub fn new() -> Self {
        EntityInfo::default()
    }

    /// Declare a property mapped to a column.
    pub fn column(mut self, property: impl Into<PropertyName>, mapping: FieldMapping) -> Self {
        self.properties
            .insert(property.into(), PropertyInfo::Column(mapping));
        self
    }

    /// Declare a property fetched recursively.
    pub fn recursive(mut self, property: impl Into<PropertyName>, fetch: RecursiveFetch) -> Self {
        self.properties
            .insert(property.into(), PropertyInfo::Recursive(fetch));
        self
    }

    pub fn lookup_property(&self, property: &PropertyName) -> Option<&PropertyInfo> {
        self.properties.get(property)
    }

    /// The column-mapped properties, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = (&PropertyName, &FieldMapping)> {
        self.properties
            .iter()
            .filter_map(|(property, info)| match info {
                PropertyInfo::Column(mapping) => Some((property, mapping)),
                PropertyInfo::Recursive(_) => None,
            })
    }

    /// The columns making up the primary key.
    pub fn primary_key(&self) -> Vec<&FieldMapping> {
        self.columns()
            .map(|(_, mapping)| mapping)
            .filter(|mapping| mapping.primary_key)
            .collect()
    }
}

impl FieldMapping {
    /// Map to a column, using the column name as its alias.
    pub fn new(column_name: impl Into<String>, r#type: ScalarType) -> Self {
        let column_name = column_name.into();
        FieldMapping {
            unique_alias: column_name.clone(),
            column_name,
            r#type,
            primary_key: false,
            order_by_modifier: None,
        }
    }

    pub fn with_alias(mut self, unique_alias: impl Into<String>) -> Self {
        self.unique_alias = unique_alias.into();
        self
    }

    pub fn with_primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn with_order_by_modifier(mut self, modifier: OrderByModifier) -> Self {
        self.order_by_modifier = Some(modifier);
        self
    }

    /// `table.column AS alias`
    pub fn select_expression(&self, table: &str) -> String {
        format!("{table}.{} AS {}", self.column_name, self.unique_alias)
    }

    /// The expression to order by this column.
    pub fn order_by_expression(&self, direction: OrderDirection) -> String {
        match &self.order_by_modifier {
            None => self.unique_alias.clone(),
            Some(modifier) => modifier.apply(&self.unique_alias, direction),
        }
    }
}

impl RecursiveFetch {
    pub fn new(declared_type: impl Into<EntityName>) -> Self {
        RecursiveFetch {
            declared_type: declared_type.into(),
            target: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<EntityName>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// The entity type to construct.
    pub fn entity(&self) -> &EntityName {
        self.target.as_ref().unwrap_or(&self.declared_type)
    }
}

impl OrderByModifier {
    pub fn apply(&self, alias: &str, direction: OrderDirection) -> String {
        match self {
            OrderByModifier::Function { function } => format!("{function}({alias})"),
            OrderByModifier::Template { template } => {
                let direction = match direction {
                    OrderDirection::Ascending => "ASC",
                    OrderDirection::Descending => "DESC",
                };
                template
                    .replace("{alias}", alias)
                    .replace("{direction}", direction)
            }
        }
    }
}
