//! Build typed objects from the rows a statement returns.
//!
//! Every column-mapped property is read from the row by its unique alias. Recursively
//! fetched properties are built from the same row, so a single joined row yields a tree
//! of related objects.

use chrono::{NaiveDate, NaiveDateTime};
use query_engine_metadata::metadata::{Metadata, PropertyInfo, ScalarType};
use query_engine_models::{EntityName, PropertyName};

use crate::connection::RowSource;
use crate::error::Error;

/// A column value converted to the semantic type of its property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    Date(NaiveDate),
}

/// An entity type objects can be built for.
///
/// Properties are assigned one at a time onto a default instance, in the order the
/// field mappings declare them. Properties whose column is NULL are left alone.
pub trait Materializable: Default {
    /// Assign a column-mapped property.
    fn set_field(&mut self, property: &PropertyName, value: FieldValue) -> Result<(), Error>;

    /// Assign a recursively fetched property, usually with `row.materialize()`.
    fn set_nested(&mut self, property: &PropertyName, _row: NestedRow<'_>) -> Result<(), Error> {
        Err(Error::UnknownProperty(property.clone()))
    }
}

/// The current row, seen as an object of a nested entity type.
pub struct NestedRow<'a> {
    materializer: &'a Materializer<'a>,
    entity: &'a EntityName,
    row: &'a dyn RowSource,
}

impl NestedRow<'_> {
    /// The entity type the nested object is built as.
    pub fn entity(&self) -> &EntityName {
        self.entity
    }

    pub fn materialize<U: Materializable>(self) -> Result<U, Error> {
        self.materializer.materialize_row(self.entity, self.row)
    }
}

/// Builds objects of an entity type from rows, using the entity's field mappings.
#[derive(Debug, Clone, Copy)]
pub struct Materializer<'a> {
    metadata: &'a Metadata,
    entity: &'a EntityName,
}

impl<'a> Materializer<'a> {
    pub fn new(metadata: &'a Metadata, entity: &'a EntityName) -> Self {
        Materializer { metadata, entity }
    }

    /// Drain the row source, building one object per row, in the order the rows arrive.
    pub fn materialize<T: Materializable>(&self, rows: &mut dyn RowSource) -> Result<Vec<T>, Error> {
        let mut items = vec![];
        while rows.advance()? {
            items.push(self.materialize_row(self.entity, &*rows)?);
        }
        Ok(items)
    }

    /// Build a single object of `entity` from the current row.
    pub fn materialize_row<T: Materializable>(
        &self,
        entity: &EntityName,
        row: &dyn RowSource,
    ) -> Result<T, Error> {
        let entity_info = self
            .metadata
            .lookup_entity(entity)
            .ok_or_else(|| Error::EntityNotFound(entity.clone()))?;

        let mut item = T::default();
        for (property, property_info) in &entity_info.properties {
            match property_info {
                PropertyInfo::Column(mapping) => {
                    let value = row.read_column(&mapping.unique_alias)?;
                    if let Some(value) = convert(&mapping.unique_alias, mapping.r#type, value)? {
                        item.set_field(property, value)?;
                    }
                }
                PropertyInfo::Recursive(fetch) => {
                    item.set_nested(
                        property,
                        NestedRow {
                            materializer: self,
                            entity: fetch.entity(),
                            row,
                        },
                    )?;
                }
            }
        }
        Ok(item)
    }
}

/// Convert a column value. `None` for NULL.
fn convert(
    column: &str,
    scalar_type: ScalarType,
    value: serde_json::Value,
) -> Result<Option<FieldValue>, Error> {
    let conversion_error = |value: &serde_json::Value| Error::Conversion {
        column: column.to_string(),
        expected: scalar_type.name(),
        value: value.to_string(),
    };

    let converted = match (scalar_type, value) {
        (_, serde_json::Value::Null) => return Ok(None),

        (ScalarType::Integer, serde_json::Value::Number(number)) => number
            .as_i64()
            .map(FieldValue::Integer)
            .ok_or_else(|| conversion_error(&serde_json::Value::Number(number.clone())))?,
        // numbers - for when the client hands numbers over as strings
        (ScalarType::Integer, serde_json::Value::String(s)) => match s.trim().parse() {
            Ok(integer) => FieldValue::Integer(integer),
            Err(_) => return Err(conversion_error(&serde_json::Value::String(s))),
        },

        (ScalarType::Text, serde_json::Value::String(s)) => FieldValue::Text(s),
        (ScalarType::Text, serde_json::Value::Number(number)) => {
            FieldValue::Text(number.to_string())
        }
        (ScalarType::Text, serde_json::Value::Bool(b)) => FieldValue::Text(b.to_string()),

        (ScalarType::Date, serde_json::Value::String(s)) => match parse_date(&s) {
            Some(date) => FieldValue::Date(date),
            None => return Err(conversion_error(&serde_json::Value::String(s))),
        },

        (_, other) => return Err(conversion_error(&other)),
    };
    Ok(Some(converted))
}

/// Dates come as `2024-01-31`, possibly with a time of day attached.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .ok()
}

impl FieldValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Integer(_) => ScalarType::Integer.name(),
            FieldValue::Text(_) => ScalarType::Text.name(),
            FieldValue::Date(_) => ScalarType::Date.name(),
        }
    }

    fn mismatch(&self, expected: ScalarType) -> Error {
        Error::FieldType {
            expected: expected.name(),
            found: self.type_name(),
        }
    }
}

impl TryFrom<FieldValue> for i64 {
    type Error = Error;

    fn try_from(value: FieldValue) -> Result<Self, Self::Error> {
        match value {
            FieldValue::Integer(integer) => Ok(integer),
            other => Err(other.mismatch(ScalarType::Integer)),
        }
    }
}

impl TryFrom<FieldValue> for i32 {
    type Error = Error;

    fn try_from(value: FieldValue) -> Result<Self, Self::Error> {
        let integer = i64::try_from(value)?;
        i32::try_from(integer).map_err(|_| Error::FieldType {
            expected: "32-bit integer",
            found: ScalarType::Integer.name(),
        })
    }
}

impl TryFrom<FieldValue> for String {
    type Error = Error;

    fn try_from(value: FieldValue) -> Result<Self, Self::Error> {
        match value {
            FieldValue::Text(text) => Ok(text),
            other => Err(other.mismatch(ScalarType::Text)),
        }
    }
}

impl TryFrom<FieldValue> for NaiveDate {
    type Error = Error;

    fn try_from(value: FieldValue) -> Result<Self, Self::Error> {
        match value {
            FieldValue::Date(date) => Ok(date),
            other => Err(other.mismatch(ScalarType::Date)),
        }
    }
}
